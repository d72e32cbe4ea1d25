use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::error::UnknownFormatError;
use crate::model::{IngredientFormat, RawIngredient, RecipeRecord};

// Class markers used by the source site
const TITLE: &str = "h1.title";
const SUB_INFO_HIGHLIGHTS: &str = ".sub_info .hl";
const BREADCRUMB_ANCHORS: &str = ".page_path a";
const DESCRIPTION: &str = "div p";
const DESCRIPTION_FALLBACK: &str = "h1.title + div p";
const INGREDIENTS_TABLE: &str = "table.ingr";

/// Parse one recipe page into a structured record. Every field is
/// extracted independently and falls back to an empty/default value when
/// its element is missing; the only fatal case is an ingredient row whose
/// cell count matches neither known layout.
pub fn extract(html: &str) -> Result<RecipeRecord, UnknownFormatError> {
    let document = Html::parse_document(html);

    let name = first_text(&document, TITLE).unwrap_or_default();
    let (servings, cooking_time) = extract_sub_info(&document);
    let categories = extract_categories(&document);
    let description = extract_description(&document);
    let ingredients = extract_ingredients(&document)?;

    debug!(
        "extracted \"{name}\": {} ingredients, {} categories",
        ingredients.len(),
        categories.len()
    );

    Ok(RecipeRecord {
        name,
        servings,
        cooking_time,
        description,
        ingredients,
        categories,
    })
}

/// Servings and total time live in the first and second highlight of the
/// sub-info block. A page with fewer than two highlights reports time "0";
/// the servings text is never reused as the time.
fn extract_sub_info(document: &Html) -> (Option<String>, String) {
    let mut highlights = Vec::new();
    if let Ok(selector) = Selector::parse(SUB_INFO_HIGHLIGHTS) {
        highlights = document.select(&selector).map(element_text).collect();
    }

    let servings = highlights.first().cloned();
    let cooking_time = highlights
        .get(1)
        .cloned()
        .unwrap_or_else(|| "0".to_string());

    (servings, cooking_time)
}

fn extract_categories(document: &Html) -> Vec<String> {
    let mut categories = Vec::new();
    if let Ok(selector) = Selector::parse(BREADCRUMB_ANCHORS) {
        for anchor in document.select(&selector) {
            let href = anchor.value().attr("href").unwrap_or("");
            if is_navigation_link(href) {
                continue;
            }
            let text = element_text(anchor);
            if !text.is_empty() {
                categories.push(text);
            }
        }
    }
    categories
}

/// Breadcrumb anchors pointing at the bare recipe listing or the search
/// page are navigation, not categories.
fn is_navigation_link(href: &str) -> bool {
    matches!(href.trim_end_matches('/'), "" | "/recipes" | "recipes") || href.contains("search")
}

fn extract_description(document: &Html) -> String {
    first_text(document, DESCRIPTION)
        .or_else(|| first_text(document, DESCRIPTION_FALLBACK))
        .unwrap_or_default()
}

fn extract_ingredients(document: &Html) -> Result<Vec<RawIngredient>, UnknownFormatError> {
    let table = Selector::parse(INGREDIENTS_TABLE)
        .ok()
        .and_then(|selector| document.select(&selector).next());
    let table = match table {
        Some(table) => table,
        // No ingredients table on the page is tolerated
        None => return Ok(Vec::new()),
    };

    let (row_selector, cell_selector) = match (Selector::parse("tr"), Selector::parse("td")) {
        (Ok(rows), Ok(cells)) => (rows, cells),
        _ => return Ok(Vec::new()),
    };

    let mut ingredients = Vec::new();
    // The first row is the "Продукты" header label
    for row in table.select(&row_selector).skip(1) {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        let ingredient = match cells.len() {
            3 => parse_old_format(&cells),
            1 => parse_new_format(cells[0]),
            cells => return Err(UnknownFormatError { cells }),
        };
        ingredients.push(ingredient);
    }

    Ok(ingredients)
}

/// Old layout (roughly the first 115k recipe ids): one cell each for
/// name, quantity and unit.
fn parse_old_format(cells: &[ElementRef]) -> RawIngredient {
    let name = nested_text(cells[0], "span").unwrap_or_else(|| element_text(cells[0]));
    let quantity = element_text(cells[1]);
    let unit = nested_text(cells[2], "nobr").unwrap_or_else(|| element_text(cells[2]));

    RawIngredient {
        name,
        quantity,
        unit,
        format: IngredientFormat::Old,
    }
}

/// New layout: a single cell whose span text holds "name — quantity unit".
/// Without an em-dash the whole text is kept as the name.
fn parse_new_format(cell: ElementRef) -> RawIngredient {
    let full_text = nested_text(cell, "span").unwrap_or_else(|| element_text(cell));

    match full_text.split_once('—') {
        Some((name_part, quantity_unit_part)) => {
            let (quantity, unit) = split_quantity_and_unit(quantity_unit_part.trim());
            RawIngredient {
                name: name_part.trim().to_string(),
                quantity,
                unit,
                format: IngredientFormat::New,
            }
        }
        None => RawIngredient {
            name: full_text,
            quantity: String::new(),
            unit: String::new(),
            format: IngredientFormat::NewUnsplit,
        },
    }
}

/// Split "200 г" into quantity and unit. Characters accumulate into the
/// quantity until the first space followed by a Cyrillic letter
/// (U+0410..=U+044F); everything from that letter on is the unit. The
/// boundary stays Cyrillic-specific to match the site's unit spellings.
/// Without a boundary the whole string is the quantity.
fn split_quantity_and_unit(quantity_unit: &str) -> (String, String) {
    let chars: Vec<char> = quantity_unit.chars().collect();

    for i in 0..chars.len().saturating_sub(1) {
        if chars[i] == ' ' && ('А'..='я').contains(&chars[i + 1]) {
            let quantity = chars[..i].iter().collect();
            let unit = chars[i + 1..].iter().collect();
            return (quantity, unit);
        }
    }

    (quantity_unit.to_string(), String::new())
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next().map(element_text)
}

fn nested_text(element: ElementRef, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    element.select(&selector).next().map(element_text)
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
