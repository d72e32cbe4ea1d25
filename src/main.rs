use std::env;
use std::fs::File;

use log::info;

use recipe_scraper::{collect_recipes, BatchTables, ScraperConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let start_id: u64 = args
        .get(1)
        .ok_or("usage: recipe-scraper <start_id> <count>")?
        .parse()?;
    let target_count: usize = args
        .get(2)
        .ok_or("usage: recipe-scraper <start_id> <count>")?
        .parse()?;

    let config = ScraperConfig::load()?;

    let records = collect_recipes(&config, start_id, target_count)?;
    let tables = BatchTables::build(&records);

    serde_json::to_writer_pretty(File::create("recipes.json")?, &records)?;

    info!(
        "saved {} recipes ({} distinct ingredients, {} distinct categories) to recipes.json",
        records.len(),
        tables.ingredient_names.len(),
        tables.category_names.len()
    );

    Ok(())
}
