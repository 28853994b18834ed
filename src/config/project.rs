use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}
