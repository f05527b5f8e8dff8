//! Default shop catalog.
//!
//! The catalog is static configuration, never runtime state.

use crate::types::*;
use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const BASIC_FOOD_ID: &str = "food_basic";
pub const PREMIUM_FOOD_ID: &str = "food_premium";
pub const VET_VISIT_ID: &str = "vet_visit";
pub const TOY_BALL_ID: &str = "toy_ball";

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog
///
/// Prefer [`get_default_catalog`] outside of tests.
pub fn build_default_catalog() -> Catalog {
    Catalog {
        items: vec![
            ShopItem {
                id: BASIC_FOOD_ID.into(),
                name: "Kibble".into(),
                description: "Basic nutrition. +20 Hunger.".into(),
                price: 10,
                kind: ItemKind::Food,
                effect: StatEffect {
                    hunger: Some(20.0),
                    ..StatEffect::default()
                },
            },
            ShopItem {
                id: PREMIUM_FOOD_ID.into(),
                name: "Gourmet Steak".into(),
                description: "Delicious! +40 Hunger, +10 Happy.".into(),
                price: 50,
                kind: ItemKind::Food,
                effect: StatEffect {
                    hunger: Some(40.0),
                    happiness: Some(10.0),
                    ..StatEffect::default()
                },
            },
            ShopItem {
                id: VET_VISIT_ID.into(),
                name: "Vet Checkup".into(),
                description: "Cures sickness and restores Health.".into(),
                price: 200,
                kind: ItemKind::Vet,
                effect: StatEffect {
                    health: Some(100.0),
                    ..StatEffect::default()
                },
            },
            ShopItem {
                id: TOY_BALL_ID.into(),
                name: "Tennis Ball".into(),
                description: "Great for energy and happiness.".into(),
                price: 30,
                kind: ItemKind::Toy,
                effect: StatEffect {
                    happiness: Some(15.0),
                    energy: Some(-5.0),
                    ..StatEffect::default()
                },
            },
        ],
    }
}

impl Catalog {
    /// Look up an item by id
    pub fn get(&self, id: &str) -> Option<&ShopItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Price of a vet visit, used to charge the VET action
    pub fn vet_price(&self) -> Option<u32> {
        self.get(VET_VISIT_ID).map(|item| item.price)
    }

    /// Validate catalog integrity
    ///
    /// Returns a list of problems (empty when the catalog is consistent).
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                errors.push(format!("Duplicate item id '{}'", item.id));
            }
            if item.kind == ItemKind::Food && food_slot(&item.id).is_none() {
                errors.push(format!(
                    "Food item '{}' has no inventory slot",
                    item.id
                ));
            }
        }

        if self.vet_price().is_none() {
            errors.push(format!("Missing '{}' item", VET_VISIT_ID));
        }

        errors
    }
}

/// Inventory slot a food item is stocked into
pub fn food_slot(item_id: &str) -> Option<FoodSlot> {
    match item_id {
        BASIC_FOOD_ID => Some(FoodSlot::Basic),
        PREMIUM_FOOD_ID => Some(FoodSlot::Premium),
        _ => None,
    }
}
