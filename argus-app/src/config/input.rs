use std::path::PathBuf;

use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct InputConfig {
    /// Metrics are read from stdin when no path is configured.
    pub path: Option<PathBuf>,
}
