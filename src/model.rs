use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Number of numbered ingredient slots a provider record carries
pub const INGREDIENT_SLOTS: usize = 20;

/// One of the three independent filter dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Ingredient,
    Country,
    Category,
}

impl Facet {
    /// All facets, in the order they appear in titles and query strings
    pub const ALL: [Facet; 3] = [Facet::Ingredient, Facet::Country, Facet::Category];

    /// Query parameter key used both in listing URLs and provider requests
    pub fn key(&self) -> &'static str {
        match self {
            Facet::Ingredient => "ingredient",
            Facet::Country => "country",
            Facet::Category => "category",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facet::Ingredient => "Ingredient",
            Facet::Country => "Country",
            Facet::Category => "Category",
        }
    }

    /// Field name the provider uses for this facet in option lists
    pub(crate) fn option_field(&self) -> &'static str {
        match self {
            Facet::Ingredient => "strIngredient",
            Facet::Country => "strArea",
            Facet::Category => "strCategory",
        }
    }

    pub fn from_key(key: &str) -> Option<Facet> {
        Facet::ALL.into_iter().find(|facet| facet.key() == key)
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A recipe record as returned by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawRecipe")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,
    pub area: String,
    pub thumbnail: String,
    pub instructions: String,
    /// Numbered ingredient slots 1..=20, stored at index 0..20
    pub ingredient_slots: [Option<String>; INGREDIENT_SLOTS],
}

impl Recipe {
    /// Ingredient names worth displaying: present, non-blank slots in index order.
    ///
    /// Values are returned as stored; duplicates are kept.
    pub fn ingredients(&self) -> Vec<String> {
        self.ingredient_slots
            .iter()
            .flatten()
            .filter(|ingredient| !ingredient.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn has_category(&self) -> bool {
        !self.category.is_empty()
    }
}

/// Wire shape of a provider record.
///
/// Listing endpoints return abbreviated records, so every field may be missing or null.
#[derive(Deserialize)]
struct RawRecipe {
    #[serde(rename = "idMeal", default)]
    id: Option<String>,
    #[serde(rename = "strMeal", default)]
    name: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(flatten)]
    rest: HashMap<String, Value>,
}

impl From<RawRecipe> for Recipe {
    fn from(raw: RawRecipe) -> Self {
        let mut ingredient_slots: [Option<String>; INGREDIENT_SLOTS] = Default::default();
        for (index, slot) in ingredient_slots.iter_mut().enumerate() {
            *slot = raw
                .rest
                .get(&format!("strIngredient{}", index + 1))
                .and_then(Value::as_str)
                .map(String::from);
        }

        Recipe {
            id: raw.id.unwrap_or_default(),
            name: raw.name.unwrap_or_default(),
            category: raw.category.unwrap_or_default(),
            area: raw.area.unwrap_or_default(),
            thumbnail: raw.thumbnail.unwrap_or_default(),
            instructions: raw.instructions.unwrap_or_default(),
            ingredient_slots,
        }
    }
}

/// Option lists that populate the three selectors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetOptions {
    pub ingredients: Vec<String>,
    pub countries: Vec<String>,
    pub categories: Vec<String>,
}

impl FacetOptions {
    pub fn get(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Ingredient => &self.ingredients,
            Facet::Country => &self.countries,
            Facet::Category => &self.categories,
        }
    }

    pub fn set(&mut self, facet: Facet, options: Vec<String>) {
        match facet {
            Facet::Ingredient => self.ingredients = options,
            Facet::Country => self.countries = options,
            Facet::Category => self.categories = options,
        }
    }
}

/// Currently chosen values per facet, in the order they were chosen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub ingredients: Vec<String>,
    pub countries: Vec<String>,
    pub categories: Vec<String>,
}

impl Selection {
    /// Selection holding exactly one value in one facet and nothing elsewhere
    pub fn only(facet: Facet, value: impl Into<String>) -> Self {
        let mut selection = Selection::default();
        selection.set(facet, vec![value.into()]);
        selection
    }

    pub fn get(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Ingredient => &self.ingredients,
            Facet::Country => &self.countries,
            Facet::Category => &self.categories,
        }
    }

    pub fn set(&mut self, facet: Facet, values: Vec<String>) {
        match facet {
            Facet::Ingredient => self.ingredients = values,
            Facet::Country => self.countries = values,
            Facet::Category => self.categories = values,
        }
    }

    /// Add `value` to the facet if absent, remove it if present
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        let values = match facet {
            Facet::Ingredient => &mut self.ingredients,
            Facet::Country => &mut self.countries,
            Facet::Category => &mut self.categories,
        };
        if let Some(position) = values.iter().position(|v| v == value) {
            values.remove(position);
        } else {
            values.push(value.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|facet| self.get(*facet).is_empty())
    }

    /// Heading for the listing screen, derived only from the selection
    pub fn title(&self) -> String {
        let parts: Vec<String> = Facet::ALL
            .iter()
            .filter(|facet| !self.get(**facet).is_empty())
            .map(|facet| format!("{}: {}", facet.label(), self.get(*facet).join(", ")))
            .collect();

        if parts.is_empty() {
            "All Recipes".to_string()
        } else {
            parts.join(" | ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredients_skip_blank_and_missing_slots() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "idMeal": "1",
                "strMeal": "Cake",
                "strIngredient1": "Flour",
                "strIngredient2": "  ",
                "strIngredient3": "Sugar"
            }"#,
        )
        .unwrap();

        assert_eq!(recipe.ingredients(), vec!["Flour", "Sugar"]);
    }

    #[test]
    fn test_ingredients_keep_duplicates_and_null_slots() {
        let recipe: Recipe = serde_json::from_str(
            r#"{
                "idMeal": "2",
                "strIngredient1": "Egg",
                "strIngredient2": null,
                "strIngredient5": "Egg",
                "strIngredient20": " Salt ",
                "strIngredient21": "Ignored"
            }"#,
        )
        .unwrap();

        assert_eq!(recipe.ingredients(), vec!["Egg", "Egg", " Salt "]);
        assert_eq!(recipe.ingredient_slots[1], None);
    }

    #[test]
    fn test_abbreviated_record_defaults_missing_fields() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"idMeal": "52772", "strMeal": "Teriyaki Chicken", "strMealThumb": "https://img/1.jpg", "strCategory": null}"#,
        )
        .unwrap();

        assert_eq!(recipe.id, "52772");
        assert_eq!(recipe.thumbnail, "https://img/1.jpg");
        assert_eq!(recipe.category, "");
        assert!(!recipe.has_category());
        assert!(recipe.ingredients().is_empty());
    }

    #[test]
    fn test_whitespace_category_still_counts() {
        let recipe = Recipe {
            category: " ".to_string(),
            ..Default::default()
        };
        assert!(recipe.has_category());
        assert!(!Recipe::default().has_category());
    }

    #[test]
    fn test_title_with_two_facets() {
        let selection = Selection {
            ingredients: vec!["salt".to_string(), "egg".to_string()],
            countries: vec![],
            categories: vec!["Dessert".to_string()],
        };

        assert_eq!(selection.title(), "Ingredient: salt, egg | Category: Dessert");
    }

    #[test]
    fn test_title_without_selection() {
        assert_eq!(Selection::default().title(), "All Recipes");
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = Selection::default();
        selection.toggle(Facet::Country, "Japanese");
        selection.toggle(Facet::Country, "Thai");
        assert_eq!(selection.countries, vec!["Japanese", "Thai"]);

        selection.toggle(Facet::Country, "Japanese");
        assert_eq!(selection.countries, vec!["Thai"]);
        assert!(!selection.is_empty());

        selection.toggle(Facet::Country, "Thai");
        assert!(selection.is_empty());
    }

    #[test]
    fn test_only_clears_other_facets() {
        let selection = Selection::only(Facet::Ingredient, "Garlic");
        assert_eq!(selection.ingredients, vec!["Garlic"]);
        assert!(selection.countries.is_empty());
        assert!(selection.categories.is_empty());
    }

    #[test]
    fn test_facet_keys_round_trip() {
        for facet in Facet::ALL {
            assert_eq!(Facet::from_key(facet.key()), Some(facet));
        }
        assert_eq!(Facet::from_key("id"), None);
    }
}
