use std::thread;
use std::time::Duration;

use log::{info, warn};
use serde::Serialize;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extractor;
use crate::fetcher::PageFetcher;
use crate::model::RecipeRecord;

/// Drives the fetcher and extractor across ascending recipe ids until a
/// target number of valid records has been collected.
pub struct RecipeCollector {
    fetcher: PageFetcher,
    request_delay: Duration,
}

impl RecipeCollector {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            fetcher: PageFetcher::new(config)?,
            request_delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    /// Collect `target_count` valid records starting from `start_id`, in
    /// ascending id order. A failed fetch or a titleless page skips that id
    /// and continues; an unrecognized ingredient layout aborts the whole
    /// batch, naming the offending id.
    pub fn collect(
        &self,
        start_id: u64,
        target_count: usize,
    ) -> Result<Vec<RecipeRecord>, ScrapeError> {
        let mut records = Vec::with_capacity(target_count);
        let mut id = start_id;

        while records.len() < target_count {
            // Each iteration builds a fresh record; nothing is carried
            // over from a previous id.
            match self.fetcher.fetch(id) {
                Ok(html) => match extractor::extract(&html) {
                    Ok(record) if record.is_valid() => {
                        info!("collected recipe {id}: {}", record.name);
                        records.push(record);
                    }
                    Ok(_) => warn!("recipe {id}: no title, skipping"),
                    Err(source) => return Err(ScrapeError::UnknownFormat { id, source }),
                },
                Err(err) => warn!("recipe {id}: {err}, skipping"),
            }

            id += 1;
            if !self.request_delay.is_zero() {
                thread::sleep(self.request_delay);
            }
        }

        Ok(records)
    }
}

/// Junction row linking a recipe to one of its ingredients, carrying the
/// recipe-specific quantity and unit. Positions are 1-based: `recipe`
/// indexes the batch, `ingredient` indexes `BatchTables::ingredient_names`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientLink {
    pub recipe: usize,
    pub ingredient: usize,
    pub quantity: String,
    pub unit: String,
}

/// Junction row linking a recipe to a category, both positions 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLink {
    pub recipe: usize,
    pub category: usize,
}

/// Relational view of a finished batch: deduplicated name lists plus the
/// junction rows referencing them. Both join tables are derived from the
/// same ordered name lists in a single pass, so a row's position index is
/// always consistent with the list it points into.
#[derive(Debug, Clone, Serialize)]
pub struct BatchTables {
    /// Distinct ingredient names in first-seen order
    pub ingredient_names: Vec<String>,
    /// Distinct category names in first-seen order
    pub category_names: Vec<String>,
    pub recipe_ingredients: Vec<IngredientLink>,
    pub recipe_categories: Vec<CategoryLink>,
}

impl BatchTables {
    pub fn build(records: &[RecipeRecord]) -> Self {
        let mut ingredient_names: Vec<String> = Vec::new();
        let mut category_names: Vec<String> = Vec::new();
        let mut recipe_ingredients = Vec::new();
        let mut recipe_categories = Vec::new();

        for (position, record) in records.iter().enumerate() {
            let recipe = position + 1;

            for ingredient in &record.ingredients {
                recipe_ingredients.push(IngredientLink {
                    recipe,
                    ingredient: position_of(&mut ingredient_names, &ingredient.name),
                    quantity: ingredient.quantity.clone(),
                    unit: ingredient.unit.clone(),
                });
            }

            for category in &record.categories {
                recipe_categories.push(CategoryLink {
                    recipe,
                    category: position_of(&mut category_names, category),
                });
            }
        }

        Self {
            ingredient_names,
            category_names,
            recipe_ingredients,
            recipe_categories,
        }
    }
}

/// 1-based position of `name` in the list, appending it when unseen.
fn position_of(names: &mut Vec<String>, name: &str) -> usize {
    match names.iter().position(|known| known == name) {
        Some(index) => index + 1,
        None => {
            names.push(name.to_string());
            names.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IngredientFormat, RawIngredient};

    fn ingredient(name: &str, quantity: &str, unit: &str) -> RawIngredient {
        RawIngredient {
            name: name.to_string(),
            quantity: quantity.to_string(),
            unit: unit.to_string(),
            format: IngredientFormat::Old,
        }
    }

    fn record(name: &str, ingredients: Vec<RawIngredient>, categories: &[&str]) -> RecipeRecord {
        RecipeRecord {
            name: name.to_string(),
            servings: None,
            cooking_time: "0".to_string(),
            description: String::new(),
            ingredients,
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_names_deduplicated_in_first_seen_order() {
        let records = vec![
            record(
                "Блины",
                vec![ingredient("Мука", "200", "г"), ingredient("Яйцо", "2", "шт.")],
                &["Завтрак", "Выпечка"],
            ),
            record(
                "Оладьи",
                vec![ingredient("Мука", "300", "г"), ingredient("Кефир", "1", "стакан")],
                &["Завтрак"],
            ),
        ];

        let tables = BatchTables::build(&records);
        assert_eq!(tables.ingredient_names, vec!["Мука", "Яйцо", "Кефир"]);
        assert_eq!(tables.category_names, vec!["Завтрак", "Выпечка"]);
    }

    #[test]
    fn test_join_rows_carry_per_recipe_quantity_and_unit() {
        let records = vec![
            record("Блины", vec![ingredient("Мука", "200", "г")], &[]),
            record("Оладьи", vec![ingredient("Мука", "300", "г")], &[]),
        ];

        let tables = BatchTables::build(&records);
        // Same ingredient position, different per-recipe quantities
        assert_eq!(
            tables.recipe_ingredients,
            vec![
                IngredientLink {
                    recipe: 1,
                    ingredient: 1,
                    quantity: "200".to_string(),
                    unit: "г".to_string(),
                },
                IngredientLink {
                    recipe: 2,
                    ingredient: 1,
                    quantity: "300".to_string(),
                    unit: "г".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_join_indices_stay_in_range() {
        let records = vec![
            record(
                "A",
                vec![ingredient("Мука", "1", ""), ingredient("Яйцо", "2", "")],
                &["Завтрак"],
            ),
            record(
                "B",
                vec![ingredient("Яйцо", "3", ""), ingredient("Кефир", "1", "")],
                &["Обед", "Завтрак"],
            ),
        ];

        let tables = BatchTables::build(&records);
        assert_eq!(tables.ingredient_names.len(), 3);

        for link in &tables.recipe_ingredients {
            assert!((1..=2).contains(&link.recipe));
            assert!((1..=tables.ingredient_names.len()).contains(&link.ingredient));
        }
        for link in &tables.recipe_categories {
            assert!((1..=2).contains(&link.recipe));
            assert!((1..=tables.category_names.len()).contains(&link.category));
        }
    }

    #[test]
    fn test_empty_batch_builds_empty_tables() {
        let tables = BatchTables::build(&[]);
        assert!(tables.ingredient_names.is_empty());
        assert!(tables.category_names.is_empty());
        assert!(tables.recipe_ingredients.is_empty());
        assert!(tables.recipe_categories.is_empty());
    }
}
