//! Stat model: clamping, thresholds and derived classifications.
//!
//! Everything here is a pure function of its arguments. The engine modules
//! call [`GameState::settled`] on the way out of every transition so the
//! cached `health_state` / `has_pooped` fields can never drift from the
//! stats they are derived from.

use crate::{GameState, HealthState, PetStats};

pub const STAT_MIN: f64 = 0.0;
pub const STAT_MAX: f64 = 100.0;

/// Hunger or hygiene below this is a critical need
pub const CRITICAL: f64 = 20.0;
/// Hunger and hygiene above this mean the pet is thriving
pub const THRIVING: f64 = 50.0;
/// Hygiene below this leaves a mess
pub const POOP_TRIGGER: f64 = 30.0;
/// Health below this is a serious illness
pub const SICK_TRIGGER: f64 = 40.0;
/// Health below this is a mild illness
pub const MILD_TRIGGER: f64 = 60.0;

/// Happiness below this reads as sad
pub const SAD_BELOW: f64 = 40.0;
/// Energy below this reads as sleeping, and play is not advised
pub const TIRED_BELOW: f64 = 20.0;
/// Hygiene below this reads as dirty
pub const DIRTY_BELOW: f64 = 40.0;

/// Restrict a stat to `[0, 100]`
///
/// NaN collapses to 0 so a tampered record cannot poison later arithmetic.
pub fn clamp(v: f64) -> f64 {
    v.max(STAT_MIN).min(STAT_MAX)
}

pub fn classify_health(health: f64) -> HealthState {
    if health < SICK_TRIGGER {
        HealthState::SickSerious
    } else if health < MILD_TRIGGER {
        HealthState::SickMild
    } else {
        HealthState::Healthy
    }
}

pub fn should_poop(hygiene: f64) -> bool {
    hygiene < POOP_TRIGGER
}

pub fn is_critical_need(stats: &PetStats) -> bool {
    stats.hunger < CRITICAL || stats.hygiene < CRITICAL
}

pub fn is_thriving(stats: &PetStats) -> bool {
    stats.hunger > THRIVING && stats.hygiene > THRIVING
}

/// Whether playing is sensible right now. Advisory only.
pub fn play_advised(stats: &PetStats) -> bool {
    stats.energy >= TIRED_BELOW
}

/// Flags presentation uses to pick a pose for the pet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct VisualState {
    pub sad: bool,
    pub sleeping: bool,
    pub dirty: bool,
    pub pooped: bool,
}

pub fn visual_state(stats: &PetStats) -> VisualState {
    VisualState {
        sad: stats.happiness < SAD_BELOW || classify_health(stats.health) != HealthState::Healthy,
        sleeping: stats.energy < TIRED_BELOW,
        dirty: stats.hygiene < DIRTY_BELOW,
        pooped: should_poop(stats.hygiene),
    }
}

/// Tier of the care score
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CareRating {
    ExpertHandler,
    ResponsibleOwner,
    Learning,
    NeedsImprovement,
}

impl CareRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            CareRating::ExpertHandler
        } else if score >= 70.0 {
            CareRating::ResponsibleOwner
        } else if score >= 40.0 {
            CareRating::Learning
        } else {
            CareRating::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CareRating::ExpertHandler => "Expert Handler",
            CareRating::ResponsibleOwner => "Responsible Owner",
            CareRating::Learning => "Learning",
            CareRating::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl PetStats {
    /// Copy with every field clamped to `[0, 100]`
    pub fn clamped(&self) -> Self {
        Self {
            hunger: clamp(self.hunger),
            hygiene: clamp(self.hygiene),
            energy: clamp(self.energy),
            happiness: clamp(self.happiness),
            health: clamp(self.health),
        }
    }
}

impl GameState {
    /// Clamp every bounded field and recompute the derived caches.
    ///
    /// Every transition function exits through here.
    pub(crate) fn settled(mut self) -> Self {
        self.stats = self.stats.clamped();
        self.coins = if self.coins.is_finite() {
            self.coins.max(0.0)
        } else {
            0.0
        };
        self.care_score = clamp(self.care_score);
        self.health_state = classify_health(self.stats.health);
        self.has_pooped = should_poop(self.stats.hygiene);
        self
    }

    pub fn visual_state(&self) -> VisualState {
        visual_state(&self.stats)
    }

    pub fn care_rating(&self) -> CareRating {
        CareRating::from_score(self.care_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(hunger: f64, hygiene: f64) -> PetStats {
        PetStats {
            hunger,
            hygiene,
            ..PetStats::default()
        }
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(-5.0), 0.0);
        assert_eq!(clamp(500.0), 100.0);
        assert_eq!(clamp(42.5), 42.5);
        assert_eq!(clamp(f64::NAN), 0.0);
    }

    #[test]
    fn test_classify_health_thresholds() {
        assert_eq!(classify_health(0.0), HealthState::SickSerious);
        assert_eq!(classify_health(39.99), HealthState::SickSerious);
        assert_eq!(classify_health(40.0), HealthState::SickMild);
        assert_eq!(classify_health(59.99), HealthState::SickMild);
        assert_eq!(classify_health(60.0), HealthState::Healthy);
        assert_eq!(classify_health(100.0), HealthState::Healthy);
    }

    #[test]
    fn test_should_poop_threshold() {
        assert!(should_poop(29.9));
        assert!(!should_poop(30.0));
    }

    #[test]
    fn test_critical_and_thriving() {
        assert!(is_critical_need(&stats(19.0, 80.0)));
        assert!(is_critical_need(&stats(80.0, 19.0)));
        assert!(!is_critical_need(&stats(20.0, 20.0)));

        assert!(is_thriving(&stats(51.0, 51.0)));
        assert!(!is_thriving(&stats(50.0, 90.0)));

        // Dead zone: neither critical nor thriving
        let middle = stats(35.0, 45.0);
        assert!(!is_critical_need(&middle));
        assert!(!is_thriving(&middle));
    }

    #[test]
    fn test_visual_state() {
        let tired_and_dirty = PetStats {
            hunger: 80.0,
            hygiene: 25.0,
            energy: 10.0,
            happiness: 90.0,
            health: 100.0,
        };
        let visual = visual_state(&tired_and_dirty);
        assert!(!visual.sad);
        assert!(visual.sleeping);
        assert!(visual.dirty);
        assert!(visual.pooped);
        assert!(!play_advised(&tired_and_dirty));

        // Illness alone is enough to look sad
        let ill = PetStats {
            health: 50.0,
            ..PetStats::default()
        };
        assert!(visual_state(&ill).sad);
    }

    #[test]
    fn test_care_rating_tiers() {
        assert_eq!(CareRating::from_score(95.0), CareRating::ExpertHandler);
        assert_eq!(CareRating::from_score(70.0), CareRating::ResponsibleOwner);
        assert_eq!(CareRating::from_score(50.0), CareRating::Learning);
        assert_eq!(CareRating::from_score(10.0).label(), "Needs Improvement");
    }

    #[test]
    fn test_settled_heals_tampered_state() {
        let mut state = GameState::initial(chrono::Utc::now());
        state.stats.hunger = 500.0;
        state.stats.health = 30.0;
        state.stats.hygiene = 10.0;
        state.coins = -20.0;
        state.care_score = 140.0;
        state.health_state = HealthState::Healthy;

        let settled = state.settled();
        assert_eq!(settled.stats.hunger, 100.0);
        assert_eq!(settled.coins, 0.0);
        assert_eq!(settled.care_score, 100.0);
        assert_eq!(settled.health_state, HealthState::SickSerious);
        assert!(settled.has_pooped);
    }
}
