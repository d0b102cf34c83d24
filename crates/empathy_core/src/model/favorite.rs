//! Favorites: user bookmarks on reference items.

use super::Timestamp;
use serde::{Deserialize, Serialize};

/// Kind of reference item a favorite points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Need,
    Emotion,
}

impl ItemType {
    pub fn code(self) -> &'static str {
        match self {
            ItemType::Need => "need",
            ItemType::Emotion => "emotion",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "need" => Some(ItemType::Need),
            "emotion" => Some(ItemType::Emotion),
            _ => None,
        }
    }
}

/// One favorited reference item.
///
/// Identity is the composite `(item_id, item_type)`; a favorite is created
/// and destroyed but never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    /// Serialized as `id` to match the persisted slot shape.
    #[serde(rename = "id")]
    pub item_id: String,
    /// Serialized as `type`.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub date_added: Timestamp,
}

impl FavoriteItem {
    pub fn new(item_id: impl Into<String>, item_type: ItemType, date_added: Timestamp) -> Self {
        Self {
            item_id: item_id.into(),
            item_type,
            date_added,
        }
    }

    pub fn matches(&self, item_id: &str, item_type: ItemType) -> bool {
        self.item_type == item_type && self.item_id == item_id
    }
}
