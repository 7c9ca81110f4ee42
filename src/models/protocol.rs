//! Medical protocol reference entries

use serde::{Deserialize, Serialize};

/// A protocol reference card
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Protocol {
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: String,
}

impl Protocol {
    /// Case-insensitive category match
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category.trim())
    }
}
