use serde::{Deserialize, Serialize};

/// Host-side description of a versioned content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItemMeta {
    pub id: String,
    /// Bundle/type used to select the enabled policies.
    pub item_type: String,
    /// Primary language; receives versions whose own lineage tag is unknown.
    #[serde(default)]
    pub primary_lineage: Option<String>,
}

impl ContentItemMeta {
    pub fn new(id: impl Into<String>, item_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            item_type: item_type.into(),
            primary_lineage: None,
        }
    }

    pub fn with_primary_lineage(mut self, tag: impl Into<String>) -> Self {
        self.primary_lineage = Some(tag.into());
        self
    }
}
