use std::collections::HashSet;

use log::debug;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::model::RecipeRecord;

/// How long the user is willing to cook. A recipe matches a bucket when
/// its cooking-time text contains any of the bucket's substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingTimeBucket {
    Fast,
    Medium,
    Slow,
}

impl CookingTimeBucket {
    fn substrings(self) -> &'static [&'static str] {
        match self {
            CookingTimeBucket::Fast => &["15", "20", "25", "30", "мин"],
            CookingTimeBucket::Medium => &["40", "45", "50", "1 час"],
            CookingTimeBucket::Slow => &["1.5", "2 час", "3 час", "часа", "часов"],
        }
    }
}

/// Meal slot, matched against category names by case-insensitive keyword
/// containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    fn keywords(self) -> &'static [&'static str] {
        match self {
            MealType::Breakfast => &["завтрак", "каша", "омлет", "блины"],
            MealType::Lunch => &["обед", "суп", "салат", "второе"],
            MealType::Dinner => &["ужин", "запекан", "мясо", "рыба"],
        }
    }
}

/// Coarse difficulty proxy by ingredient count: at most 5 is easy, more
/// than 8 is hard. Recipes with 6-8 ingredients match neither bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    fn matches(self, ingredient_count: usize) -> bool {
        match self {
            Difficulty::Easy => ingredient_count <= 5,
            Difficulty::Hard => ingredient_count > 8,
        }
    }
}

/// User-supplied answers; absent criteria don't constrain the selection.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SelectionCriteria {
    pub cooking_time: Option<CookingTimeBucket>,
    pub meal_type: Option<MealType>,
    pub difficulty: Option<Difficulty>,
}

/// Pick one recipe matching the criteria, uniformly at random. Every
/// present criterion filters the full recipe set independently and the
/// per-criterion results intersect; if nothing survives, the pick falls
/// back to the full set. Returns `None` only for an empty input.
pub fn select_candidate<'a>(
    recipes: &'a [RecipeRecord],
    criteria: &SelectionCriteria,
) -> Option<&'a RecipeRecord> {
    let mut surviving: Option<HashSet<usize>> = None;

    if let Some(bucket) = criteria.cooking_time {
        intersect(&mut surviving, matching_indices(recipes, |recipe| {
            bucket
                .substrings()
                .iter()
                .any(|needle| recipe.cooking_time.contains(needle))
        }));
    }

    if let Some(meal) = criteria.meal_type {
        intersect(&mut surviving, matching_indices(recipes, |recipe| {
            recipe.categories.iter().any(|category| {
                let category = category.to_lowercase();
                meal.keywords().iter().any(|keyword| category.contains(keyword))
            })
        }));
    }

    if let Some(difficulty) = criteria.difficulty {
        intersect(&mut surviving, matching_indices(recipes, |recipe| {
            difficulty.matches(recipe.ingredients.len())
        }));
    }

    let candidates: Vec<&RecipeRecord> = match &surviving {
        Some(indices) if !indices.is_empty() => recipes
            .iter()
            .enumerate()
            .filter(|(i, _)| indices.contains(i))
            .map(|(_, recipe)| recipe)
            .collect(),
        Some(_) => {
            // No recipe satisfies every criterion; fall back to the full set
            debug!("no recipe matched all criteria, falling back to the full set");
            recipes.iter().collect()
        }
        None => recipes.iter().collect(),
    };

    candidates.choose(&mut rand::thread_rng()).copied()
}

/// Each predicate runs against the full set, not the previous filter's
/// output; composition happens by intersecting the index sets.
fn matching_indices<F>(recipes: &[RecipeRecord], predicate: F) -> HashSet<usize>
where
    F: Fn(&RecipeRecord) -> bool,
{
    recipes
        .iter()
        .enumerate()
        .filter(|(_, recipe)| predicate(recipe))
        .map(|(index, _)| index)
        .collect()
}

fn intersect(surviving: &mut Option<HashSet<usize>>, matched: HashSet<usize>) {
    *surviving = Some(match surviving.take() {
        Some(previous) => previous.intersection(&matched).copied().collect(),
        None => matched,
    });
}
