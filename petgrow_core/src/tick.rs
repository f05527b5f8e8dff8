//! Tick engine for the live simulation.
//!
//! One tick applies, in order:
//! 1. Linear decay of hunger, hygiene, energy and happiness
//! 2. Health damage (critical need), recovery (thriving) or hold
//! 3. Recomputation of the derived health state and mess flag
//! 4. Coin accrual scaled by happiness, unless seriously ill

use crate::config::Rules;
use crate::stats::{self, clamp};
use crate::{GameState, HealthState};

/// Advance `state` by `delta_seconds` of live time
///
/// Deterministic in its inputs. Stats stay in `[0, 100]` and coins never
/// decrease. A negative delta is treated as zero.
pub fn advance(state: &GameState, delta_seconds: f64, rules: &Rules) -> GameState {
    let dt = delta_seconds.max(0.0);
    let decay = &rules.decay;

    let mut stats = state.stats.clamped();
    stats.hunger = clamp(stats.hunger - decay.hunger * dt);
    stats.hygiene = clamp(stats.hygiene - decay.hygiene * dt);
    stats.energy = clamp(stats.energy - decay.energy * dt);
    stats.happiness = clamp(stats.happiness - decay.happiness * dt);

    if stats::is_critical_need(&stats) {
        stats.health = clamp(stats.health - decay.health_damage * dt);
    } else if stats::is_thriving(&stats) {
        stats.health = clamp(stats.health + decay.health_recovery * dt);
    }

    let health_state = stats::classify_health(stats.health);
    let coin_gain = if health_state == HealthState::SickSerious {
        0.0
    } else {
        rules.rewards.coin_base * (stats.happiness / 100.0) * dt
    };

    tracing::trace!(
        "Tick {:.2}s: health {:.2} ({:?}), +{:.4} coins",
        dt,
        stats.health,
        health_state,
        coin_gain
    );

    GameState {
        stats,
        coins: state.coins + coin_gain,
        ..state.clone()
    }
    .settled()
}
