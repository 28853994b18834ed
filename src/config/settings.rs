use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::project::Project;

#[derive(Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Project used when --project is not given
    #[serde(default)]
    pub default_project: Option<String>,
    pub organization: Organization,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub projects: BTreeMap<String, Project>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
        }
    }
}
