pub mod collector;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod filter;
pub mod model;

pub use collector::{BatchTables, CategoryLink, IngredientLink, RecipeCollector};
pub use config::ScraperConfig;
pub use error::{ScrapeError, UnknownFormatError};
pub use fetcher::PageFetcher;
pub use filter::{select_candidate, CookingTimeBucket, Difficulty, MealType, SelectionCriteria};
pub use model::{IngredientFormat, RawIngredient, RecipeRecord};

/// Fetch and parse a single recipe page.
pub fn scrape_recipe(config: &ScraperConfig, id: u64) -> Result<RecipeRecord, ScrapeError> {
    let fetcher = PageFetcher::new(config)?;
    let html = fetcher.fetch(id)?;

    extractor::extract(&html).map_err(|source| ScrapeError::UnknownFormat { id, source })
}

/// Collect `target_count` valid recipes starting from `start_id`. Ids
/// whose fetch fails or whose page has no title are skipped; a page with
/// an unrecognized ingredient layout aborts the batch.
pub fn collect_recipes(
    config: &ScraperConfig,
    start_id: u64,
    target_count: usize,
) -> Result<Vec<RecipeRecord>, ScrapeError> {
    RecipeCollector::new(config)?.collect(start_id, target_count)
}
