use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single species record, flattened from the upstream catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub number: u64,
    /// Animated sprite, when the catalog has one.
    #[serde(rename = "sprite")]
    pub sprite_animated: Option<String>,
    /// Still sprite used in list views.
    #[serde(rename = "list_sprite")]
    pub sprite_static: Option<String>,
    pub types: Vec<String>,
    /// The legacy cry recording.
    #[serde(rename = "cries")]
    pub cry: Option<String>,

    // Passed through untouched for clients that want the detail.
    pub stats: Vec<Value>,
    pub abilities: Vec<Value>,
    pub moves: Vec<Value>,
}

/// The English description of an ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityInfo {
    pub effect: String,
    pub short_effect: String,
}
