//! Action resolver for user care actions.
//!
//! Resolution is a pure stats transform. It never charges coins: pricing
//! lives at the dispatch boundary in [`crate::session::GameSession`], which
//! charges for VET before calling in here.

use crate::config::Rules;
use crate::stats::clamp;
use crate::{ActionKind, GameState, StatEffect};

const FEED_HUNGER: f64 = 20.0;
const FEED_HAPPINESS: f64 = 5.0;
const CLEAN_HAPPINESS: f64 = 10.0;
const PLAY_HAPPINESS: f64 = 15.0;
const PLAY_ENERGY_COST: f64 = 10.0;
const PET_HAPPINESS: f64 = 2.0;

/// Result of resolving one action
#[derive(Clone, Debug)]
pub struct ActionOutcome {
    pub state: GameState,
    /// False when a precondition failed and `state` is the input unchanged
    pub applied: bool,
}

/// Apply a care action to `state`
///
/// FEED with an empty food bowl is the only action that can fail; it hands
/// back the input untouched. Every applied action bumps the care score,
/// which has no decay path.
pub fn apply(state: &GameState, kind: ActionKind, rules: &Rules) -> ActionOutcome {
    let mut next = state.clone();
    next.stats = next.stats.clamped();
    let stats = &mut next.stats;

    match kind {
        ActionKind::Feed => {
            if next.inventory.basic_food == 0 {
                tracing::debug!("Feed ignored: no basic food left");
                return ActionOutcome {
                    state: state.clone(),
                    applied: false,
                };
            }
            next.inventory.basic_food -= 1;
            stats.hunger = clamp(stats.hunger + FEED_HUNGER);
            stats.happiness = clamp(stats.happiness + FEED_HAPPINESS);
        }
        ActionKind::Clean => {
            stats.hygiene = 100.0;
            stats.happiness = clamp(stats.happiness + CLEAN_HAPPINESS);
        }
        ActionKind::Play => {
            stats.happiness = clamp(stats.happiness + PLAY_HAPPINESS);
            stats.energy = clamp(stats.energy - PLAY_ENERGY_COST);
        }
        ActionKind::Pet => {
            stats.happiness = clamp(stats.happiness + PET_HAPPINESS);
            next.coins += rules.rewards.pet_coins;
        }
        ActionKind::Vet => {
            stats.health = 100.0;
        }
    }

    next.care_score = clamp(next.care_score + rules.rewards.care_action);
    tracing::debug!("Applied {:?}, care score now {:.1}", kind, next.care_score);

    ActionOutcome {
        state: next.settled(),
        applied: true,
    }
}

/// Apply an item's stat deltas, clamped. Not a care action.
pub fn apply_effect(state: &GameState, effect: &StatEffect) -> GameState {
    let mut next = state.clone();
    let stats = &mut next.stats;
    let shift = |value: f64, delta: Option<f64>| clamp(value + delta.unwrap_or(0.0));

    stats.hunger = shift(stats.hunger, effect.hunger);
    stats.hygiene = shift(stats.hygiene, effect.hygiene);
    stats.energy = shift(stats.energy, effect.energy);
    stats.happiness = shift(stats.happiness, effect.happiness);
    stats.health = shift(stats.health, effect.health);

    next.settled()
}
