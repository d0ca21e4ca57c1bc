use serde::{Deserialize, Serialize};

/// Id of the implicit category holding uncategorized library manga
pub const DEFAULT_CATEGORY_ID: i64 = 0;

/// A user-defined library category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Database identifier (0 until inserted)
    pub id: i64,
    pub name: String,

    /// Position among categories
    pub order: i32,

    /// Display and sort flags
    pub flags: i32,
}

impl Category {
    pub fn new(name: String) -> Self {
        Self {
            id: 0,
            name,
            order: 0,
            flags: 0,
        }
    }

    /// The implicit category of uncategorized manga. Never stored.
    pub fn default_category() -> Self {
        Self {
            id: DEFAULT_CATEGORY_ID,
            name: "Default".to_string(),
            order: -1,
            flags: 0,
        }
    }

    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_CATEGORY_ID && self.order < 0
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
