use serde::{Deserialize, Serialize};

/// Which of the site's historical ingredient-row layouts a row came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientFormat {
    /// Three cells: name / quantity / unit
    Old,
    /// One cell, name and quantity-unit separated by an em-dash
    New,
    /// One cell without an em-dash; the whole text is kept as the name
    NewUnsplit,
}

/// One ingredient line as it appears on the page. Quantity and unit stay
/// free-form strings because the source formatting is inconsistent
/// ("2-3", "по вкусу", "1/2").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIngredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub format: IngredientFormat,
}

/// A fully parsed recipe page. Constructed once per successful parse and
/// never mutated afterwards; the storage layer normalizes it into
/// relational rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub name: String,
    /// Text of the first sub-info highlight, e.g. "4 порции"
    pub servings: Option<String>,
    /// Kept textual because source values mix units ("30 мин", "1.5 час").
    /// "0" when the page carries no usable time value.
    pub cooking_time: String,
    pub description: String,
    pub ingredients: Vec<RawIngredient>,
    pub categories: Vec<String>,
}

impl RecipeRecord {
    /// A record is worth keeping only if the page yielded a title.
    /// Invalid records are skipped by the collector, never persisted.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}
