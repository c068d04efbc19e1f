use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct AliasByTagConfig {
    /// Tag keys to join, in order. Every tag is used when omitted.
    pub tags: Option<Vec<String>>,
}

impl AliasByTagConfig {
    pub fn into_constants(self) -> Option<Vec<String>> {
        self.tags
    }
}
