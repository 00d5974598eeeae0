//! Item catalog and category filtering
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Category label that selects the whole catalog.
pub const ALL_CATEGORY: &str = "Все";

/// Cosmetic tier of an item. Only affects styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Accent colour used for card borders and labels.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Common => "#94a3b8",
            Self::Rare => "#3b82f6",
            Self::Epic => "#a855f7",
            Self::Legendary => "#fbbf24",
        }
    }

    /// Translation key for the rarity label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Common => "rarity.common",
            Self::Rare => "rarity.rare",
            Self::Epic => "rarity.epic",
            Self::Legendary => "rarity.legendary",
        }
    }
}

/// Promotional ribbon shown on an item card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ItemTag {
    #[serde(rename = "ХИТ")]
    Hit,
    #[serde(rename = "СКИДКА")]
    Sale,
    #[serde(rename = "НОВИНКА")]
    New,
    #[serde(rename = "РЕДКИЙ")]
    Rare,
}

impl ItemTag {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "ХИТ",
            Self::Sale => "СКИДКА",
            Self::New => "НОВИНКА",
            Self::Rare => "РЕДКИЙ",
        }
    }

    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Rare => "#fbbf24",
            Self::New => "#22d3ee",
            Self::Hit | Self::Sale => "#4ade80",
        }
    }
}

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Item {
    pub id: u32,
    pub emoji: String,
    pub name: String,
    pub category: String,
    /// Price in whole roubles
    pub price: u32,
    #[serde(default)]
    pub old_price: Option<u32>,
    pub rarity: Rarity,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub tag: Option<ItemTag>,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("first category must be \"{ALL_CATEGORY}\" (got {0:?})")]
    MissingAllCategory(Option<String>),
    #[error("duplicate item id {0}")]
    DuplicateId(u32),
    #[error("item {id} uses unknown category {category}")]
    UnknownCategory { id: u32, category: String },
}

/// Static storefront catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub items: Vec<Item>,
}

impl Catalog {
    /// A catalog holding only the "all" category.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            categories: vec![ALL_CATEGORY.to_string()],
            items: Vec::new(),
        }
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, the first category is not
    /// the "all" category, item ids repeat, or an item names an unlisted category.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the catalog embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded data fails validation.
    pub fn load_from_static() -> Result<Self, CatalogError> {
        Self::from_json(include_str!("../data/catalog.json"))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        match self.categories.first() {
            Some(first) if first == ALL_CATEGORY => {}
            other => return Err(CatalogError::MissingAllCategory(other.cloned())),
        }
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(CatalogError::DuplicateId(item.id));
            }
            if item.category == ALL_CATEGORY || !self.categories.contains(&item.category) {
                return Err(CatalogError::UnknownCategory {
                    id: item.id,
                    category: item.category.clone(),
                });
            }
        }
        Ok(())
    }

    /// Items visible under `category`, in catalog order.
    #[must_use]
    pub fn filter(&self, category: &str) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| category == ALL_CATEGORY || item.category == category)
            .collect()
    }

    #[must_use]
    pub fn find_item(&self, id: u32) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Epic and legendary items for the landing showcase, rarest and priciest first.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<&Item> {
        let mut picks: Vec<&Item> = self
            .items
            .iter()
            .filter(|item| item.rarity >= Rarity::Epic)
            .collect();
        picks.sort_by(|a, b| b.rarity.cmp(&a.rarity).then(b.price.cmp(&a.price)));
        picks.truncate(limit);
        picks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_catalog_loads() {
        let catalog = Catalog::load_from_static().expect("catalog should load");
        assert_eq!(catalog.categories[0], ALL_CATEGORY);
        assert_eq!(catalog.items.len(), 9);
    }

    #[test]
    fn all_category_returns_everything() {
        let catalog = Catalog::load_from_static().unwrap();
        assert_eq!(catalog.filter(ALL_CATEGORY).len(), catalog.items.len());
    }

    #[test]
    fn category_filter_matches_exactly() {
        let catalog = Catalog::load_from_static().unwrap();
        for category in catalog.categories.iter().skip(1) {
            let visible = catalog.filter(category);
            let expected = catalog
                .items
                .iter()
                .filter(|item| &item.category == category)
                .count();
            assert_eq!(visible.len(), expected, "category {category}");
            assert!(visible.iter().all(|item| &item.category == category));
        }
        let pets: Vec<u32> = catalog.filter("Питомцы").iter().map(|i| i.id).collect();
        assert_eq!(pets, vec![6, 9]);
    }

    #[test]
    fn unknown_category_is_empty() {
        let catalog = Catalog::load_from_static().unwrap();
        assert!(catalog.filter("Еда").is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"{"categories":["Все","Оружие"],"items":[
            {"id":1,"emoji":"a","name":"A","category":"Оружие","price":1,"rarity":"common"},
            {"id":1,"emoji":"b","name":"B","category":"Оружие","price":2,"rarity":"rare"}]}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::DuplicateId(1))
        ));
    }

    #[test]
    fn rejects_unlisted_category() {
        let json = r#"{"categories":["Все"],"items":[
            {"id":1,"emoji":"a","name":"A","category":"Оружие","price":1,"rarity":"common"}]}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::UnknownCategory { id: 1, .. })
        ));
    }

    #[test]
    fn requires_all_category_first() {
        let json = r#"{"categories":["Оружие"],"items":[]}"#;
        assert!(matches!(
            Catalog::from_json(json),
            Err(CatalogError::MissingAllCategory(Some(_)))
        ));
    }

    #[test]
    fn featured_prefers_legendary_then_price() {
        let catalog = Catalog::load_from_static().unwrap();
        let ids: Vec<u32> = catalog.featured(4).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![6, 3, 1, 5]);
    }

    #[test]
    fn tags_parse_from_cyrillic_labels() {
        let catalog = Catalog::load_from_static().unwrap();
        assert_eq!(catalog.find_item(1).and_then(|i| i.tag), Some(ItemTag::Hit));
        assert_eq!(catalog.find_item(2).and_then(|i| i.tag), None);
        assert_eq!(ItemTag::New.label(), "НОВИНКА");
    }
}
