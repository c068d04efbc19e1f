use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenameKind {
    #[default]
    Literal,
    Regex,
}

impl RenameKind {
    fn as_constant(self) -> &'static str {
        match self {
            RenameKind::Literal => "literal",
            RenameKind::Regex => "regex",
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct RenameConfig {
    pub alias: String,

    #[serde(default, rename = "type")]
    pub kind: RenameKind,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct AliasConfig {
    pub metric: RenameConfig,
    pub scope: Option<RenameConfig>,
}

impl AliasConfig {
    pub fn into_constants(self) -> Option<Vec<String>> {
        let mut constants = vec![self.metric.alias, self.metric.kind.as_constant().to_string()];

        if let Some(scope) = self.scope {
            constants.push(scope.alias);
            constants.push(scope.kind.as_constant().to_string());
        }

        Some(constants)
    }
}
