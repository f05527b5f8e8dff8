//! Core domain types for the PetGrow simulation.
//!
//! This module defines the fundamental types used throughout the system:
//! - Pet identity and numeric needs
//! - Inventory and the aggregate game state
//! - Care actions and their presentation events
//! - Shop catalog entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Pet Types
// ============================================================================

/// Kind of pet being raised
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    #[default]
    Dog,
    Cat,
}

/// Health classification derived from the `health` stat
///
/// Never stored as independent truth: the copy kept on [`GameState`] is
/// recomputed on every transition.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    #[default]
    Healthy,
    /// Reduced condition, still earns coins
    SickMild,
    /// Earns no coins until cured
    SickSerious,
}

/// The five bounded needs of the pet, each in `[0, 100]`
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PetStats {
    /// 100 is full
    pub hunger: f64,
    /// 100 is clean
    pub hygiene: f64,
    /// 100 is rested
    pub energy: f64,
    /// 100 is happy
    pub happiness: f64,
    /// Hidden stat that drives [`HealthState`]
    pub health: f64,
}

impl Default for PetStats {
    fn default() -> Self {
        Self {
            hunger: 80.0,
            hygiene: 100.0,
            energy: 100.0,
            happiness: 90.0,
            health: 100.0,
        }
    }
}

/// Food stock held by the player
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Inventory {
    pub basic_food: u32,
    pub premium_food: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            basic_food: 5,
            premium_food: 1,
        }
    }
}

/// Slot in the inventory a food item is stocked into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodSlot {
    Basic,
    Premium,
}

impl Inventory {
    /// Current count for a slot
    pub fn count(&self, slot: FoodSlot) -> u32 {
        match slot {
            FoodSlot::Basic => self.basic_food,
            FoodSlot::Premium => self.premium_food,
        }
    }

    /// Copy of this inventory with one more item in `slot`
    pub fn restocked(&self, slot: FoodSlot) -> Self {
        let mut next = *self;
        match slot {
            FoodSlot::Basic => next.basic_food = next.basic_food.saturating_add(1),
            FoodSlot::Premium => next.premium_food = next.premium_food.saturating_add(1),
        }
        next
    }
}

// ============================================================================
// Aggregate State
// ============================================================================

/// The whole simulation snapshot for one pet
///
/// Snapshots are replaced wholesale: every engine function takes a
/// `&GameState` and hands back a new one. This is also the persisted record;
/// missing fields in a saved record are filled from the initial state.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameState {
    pub name: String,
    pub species: Species,
    pub stats: PetStats,
    pub inventory: Inventory,
    /// Non-negative coin balance (fractional from per-tick accrual)
    pub coins: f64,
    /// Care reputation in `[0, 100]`
    pub care_score: f64,
    pub days_alive: u32,
    /// Time of the last reconciliation or save, stored as epoch milliseconds
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_login: DateTime<Utc>,
    /// Cache of `hygiene < 30`
    pub has_pooped: bool,
    /// Cache of the health classification
    pub health_state: HealthState,
}

pub const DEFAULT_PET_NAME: &str = "Buddy";

impl GameState {
    /// A freshly adopted pet, last seen at `now`
    pub fn new_pet(name: impl Into<String>, species: Species, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            species,
            stats: PetStats::default(),
            inventory: Inventory::default(),
            coins: 50.0,
            care_score: 50.0,
            days_alive: 1,
            last_login: now,
            has_pooped: false,
            health_state: HealthState::Healthy,
        }
    }

    /// The default pet, last seen at `now`
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self::new_pet(DEFAULT_PET_NAME, Species::default(), now)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial(Utc::now())
    }
}

// ============================================================================
// Actions
// ============================================================================

/// User-initiated care action
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Feed,
    Clean,
    Play,
    Vet,
    Pet,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Feed,
        ActionKind::Clean,
        ActionKind::Play,
        ActionKind::Vet,
        ActionKind::Pet,
    ];
}

/// Most recent action, kept only so presentation can trigger animations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionEvent {
    pub kind: ActionKind,
    pub at: DateTime<Utc>,
}

// ============================================================================
// Shop Types
// ============================================================================

/// Category of a shop item
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Food,
    Toy,
    Vet,
    Cosmetic,
}

/// Partial set of stat deltas applied by an item
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct StatEffect {
    pub hunger: Option<f64>,
    pub hygiene: Option<f64>,
    pub energy: Option<f64>,
    pub happiness: Option<f64>,
    pub health: Option<f64>,
}

/// Static catalog entry
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Price in coins
    pub price: u32,
    pub kind: ItemKind,
    pub effect: StatEffect,
}

/// The complete, immutable list of purchasable items
#[derive(Clone, Debug)]
pub struct Catalog {
    pub items: Vec<ShopItem>,
}
