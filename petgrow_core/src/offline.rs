//! Offline catch-up: reconcile a saved snapshot with the time spent away.
//!
//! The absence is simulated in one closed-form step rather than by replaying
//! ticks. Decay runs at half the live rate, health moves at a tenth of the
//! live rate, and coins accrue ten times slower than the live base rate.
//! Unlike the live tick there is no hold band for health: a pet that is not
//! in critical need recovers while away.

use crate::config::Rules;
use crate::stats::{self, clamp};
use crate::GameState;
use chrono::{DateTime, Utc};

/// Outcome of reconciling a saved snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation {
    pub state: GameState,
    pub coins_earned: u64,
    /// Raw wall-clock seconds since `last_login`
    pub seconds_away: f64,
    /// Seconds actually simulated after the cap
    pub effective_seconds: f64,
}

/// Bring `saved` up to `now`
///
/// Pure in `(saved, now)`. The returned state has `last_login = now`, so
/// feeding it back in with the same `now` simulates nothing further. A clock
/// that went backwards simulates zero seconds.
pub fn reconcile(saved: &GameState, now: DateTime<Utc>, rules: &Rules) -> Reconciliation {
    let offline = &rules.offline;
    let decay = &rules.decay;

    let seconds_away = (now - saved.last_login).num_milliseconds() as f64 / 1000.0;
    let effective = seconds_away.max(0.0).min(offline.max_away_secs);

    let before = saved.stats.clamped();
    let mut after = before;
    let decay_time = effective * offline.decay_factor;
    after.hunger = clamp(after.hunger - decay.hunger * decay_time);
    after.hygiene = clamp(after.hygiene - decay.hygiene * decay_time);
    after.energy = clamp(after.energy - decay.energy * decay_time);
    after.happiness = clamp(after.happiness - decay.happiness * decay_time);

    let health_time = effective * offline.health_factor;
    if stats::is_critical_need(&after) {
        after.health = clamp(after.health - decay.health_damage * health_time);
    } else {
        after.health = clamp(after.health + decay.health_recovery * health_time);
    }

    // Earnings follow the condition the pet was left in
    let coin_rate = if before.health < stats::SICK_TRIGGER {
        0.0
    } else if before.happiness < offline.unhappy_below {
        rules.rewards.coin_base * offline.unhappy_coin_factor
    } else {
        rules.rewards.coin_base
    };
    let coins_earned = (effective * coin_rate * offline.coin_factor).floor() as u64;

    tracing::info!(
        "Reconciled {:.0}s away ({:.0}s simulated): +{} coins, health {:.1} -> {:.1}",
        seconds_away,
        effective,
        coins_earned,
        before.health,
        after.health
    );

    let state = GameState {
        stats: after,
        coins: saved.coins + coins_earned as f64,
        last_login: now,
        ..saved.clone()
    }
    .settled();

    Reconciliation {
        state,
        coins_earned,
        seconds_away,
        effective_seconds: effective,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HealthState, PetStats};
    use chrono::Duration;

    fn saved_at(last_login: DateTime<Utc>, stats: PetStats) -> GameState {
        GameState {
            stats,
            last_login,
            ..GameState::initial(last_login)
        }
    }

    #[test]
    fn test_two_hours_away() {
        let now = Utc::now();
        let saved = saved_at(
            now - Duration::milliseconds(7_200_000),
            PetStats {
                hunger: 80.0,
                hygiene: 50.0,
                energy: 100.0,
                happiness: 60.0,
                health: 80.0,
            },
        );

        let result = reconcile(&saved, now, &Rules::default());

        assert_eq!(result.seconds_away, 7200.0);
        assert_eq!(result.effective_seconds, 7200.0);
        // 7200 * 0.03 * 0.5 = 108 lost
        assert_eq!(result.state.stats.hygiene, 0.0);
        assert_eq!(result.coins_earned, 360);
        assert_eq!(result.state.coins, saved.coins + 360.0);
        assert_eq!(result.state.last_login, now);
        assert!(result.state.has_pooped);
        // Hygiene hit critical, so health dropped by 7200 * 0.2 * 0.1 = 144
        assert_eq!(result.state.stats.health, 0.0);
        assert_eq!(result.state.health_state, HealthState::SickSerious);
    }

    #[test]
    fn test_absence_capped_at_one_day() {
        let now = Utc::now();
        let saved = saved_at(
            now - Duration::milliseconds(200_000_000),
            PetStats::default(),
        );

        let result = reconcile(&saved, now, &Rules::default());
        assert_eq!(result.seconds_away, 200_000.0);
        assert_eq!(result.effective_seconds, 86_400.0);
        // floor(86400 * 0.5 * 0.1)
        assert_eq!(result.coins_earned, 4320);
    }

    #[test]
    fn test_unhappy_pet_earns_half() {
        let now = Utc::now();
        let saved = saved_at(
            now - Duration::seconds(1000),
            PetStats {
                happiness: 30.0,
                ..PetStats::default()
            },
        );

        let result = reconcile(&saved, now, &Rules::default());
        // floor(1000 * 0.25 * 0.1)
        assert_eq!(result.coins_earned, 25);
    }

    #[test]
    fn test_sick_pet_earns_nothing() {
        let now = Utc::now();
        let saved = saved_at(
            now - Duration::seconds(1000),
            PetStats {
                health: 39.0,
                ..PetStats::default()
            },
        );

        let result = reconcile(&saved, now, &Rules::default());
        assert_eq!(result.coins_earned, 0);
        assert_eq!(result.state.coins, saved.coins);
    }

    #[test]
    fn test_thriving_pet_recovers_gently() {
        let now = Utc::now();
        let saved = saved_at(
            now - Duration::seconds(100),
            PetStats {
                hunger: 90.0,
                hygiene: 90.0,
                energy: 90.0,
                happiness: 90.0,
                health: 50.0,
            },
        );

        let result = reconcile(&saved, now, &Rules::default());
        // 100 * 0.1 * 0.1 = 1 point of health
        assert!((result.state.stats.health - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_middling_needs_still_recover_offline() {
        let now = Utc::now();
        let saved = saved_at(
            now - Duration::seconds(100),
            PetStats {
                hunger: 40.0,
                hygiene: 40.0,
                energy: 90.0,
                happiness: 90.0,
                health: 70.0,
            },
        );

        let result = reconcile(&saved, now, &Rules::default());
        // Neither critical nor thriving: 70 + 100 * 0.1 * 0.1
        assert!((result.state.stats.health - 71.0).abs() < 1e-9);
    }

    #[test]
    fn test_offline_decay_runs_at_half_rate() {
        let now = Utc::now();
        let saved = saved_at(
            now - Duration::seconds(100),
            PetStats {
                hunger: 90.0,
                hygiene: 90.0,
                energy: 90.0,
                happiness: 90.0,
                health: 100.0,
            },
        );

        let result = reconcile(&saved, now, &Rules::default());
        let stats = result.state.stats;
        // 100 s * rate * 0.5
        assert!((stats.hunger - 87.5).abs() < 1e-9);
        assert!((stats.hygiene - 88.5).abs() < 1e-9);
        assert!((stats.energy - 89.0).abs() < 1e-9);
        assert!((stats.happiness - 88.0).abs() < 1e-9);
    }

    #[test]
    fn test_clock_skew_simulates_nothing() {
        let now = Utc::now();
        let saved = saved_at(now + Duration::seconds(500), PetStats::default());

        let result = reconcile(&saved, now, &Rules::default());
        assert_eq!(result.effective_seconds, 0.0);
        assert_eq!(result.coins_earned, 0);
        assert_eq!(result.state.stats, saved.stats);
    }

    #[test]
    fn test_reconcile_is_pure() {
        let now = Utc::now();
        let saved = saved_at(now - Duration::seconds(4321), PetStats::default());
        let rules = Rules::default();

        assert_eq!(reconcile(&saved, now, &rules), reconcile(&saved, now, &rules));
    }

    #[test]
    fn test_second_reconcile_with_updated_login_is_a_no_op() {
        let now = Utc::now();
        let saved = saved_at(now - Duration::seconds(4321), PetStats::default());
        let rules = Rules::default();

        let first = reconcile(&saved, now, &rules);
        let second = reconcile(&first.state, now, &rules);
        assert_eq!(second.coins_earned, 0);
        assert_eq!(second.state, first.state);
    }
}
