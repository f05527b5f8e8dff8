//! Game session: the owner of the live snapshot.
//!
//! The session sequences every engine call on a single execution context.
//! The tick loop, user actions and periodic saves all go through `&mut self`,
//! and each of them swaps in a whole new [`GameState`].

use crate::actions::{self, ActionOutcome};
use crate::catalog::{food_slot, get_default_catalog};
use crate::config::{Config, Rules, SessionConfig};
use crate::offline::reconcile;
use crate::store::SnapshotStore;
use crate::tick::advance;
use crate::{
    ActionEvent, ActionKind, Catalog, Error, GameState, ItemKind, Result, Species,
};
use chrono::{DateTime, Duration, Utc};

/// Earnings shown once after a long absence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OfflineReport {
    pub coins: u64,
    pub seconds_away: f64,
}

/// Callback notified with every new snapshot
pub type Observer = Box<dyn FnMut(&GameState)>;

pub struct GameSession<S: SnapshotStore> {
    state: GameState,
    rules: Rules,
    settings: SessionConfig,
    catalog: &'static Catalog,
    store: S,
    latest_action: Option<ActionEvent>,
    offline_report: Option<OfflineReport>,
    last_saved_at: DateTime<Utc>,
    observers: Vec<Observer>,
}

impl<S: SnapshotStore> GameSession<S> {
    /// Load the saved snapshot (if any) and catch it up to `now`
    ///
    /// A missing or unusable snapshot starts a fresh pet; the session never
    /// fails to start.
    pub fn start(store: S, config: &Config, now: DateTime<Utc>) -> Self {
        let saved = match store.load() {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!("Failed to load snapshot: {}. Starting fresh.", e);
                None
            }
        };

        let mut offline_report = None;
        let state = match saved {
            Some(saved) => {
                let caught_up = reconcile(&saved, now, &config.rules);
                if caught_up.seconds_away > config.session.offline_report_threshold_secs as f64 {
                    tracing::info!(
                        "Welcome back after {:.0}s: {} coins earned",
                        caught_up.seconds_away,
                        caught_up.coins_earned
                    );
                    offline_report = Some(OfflineReport {
                        coins: caught_up.coins_earned,
                        seconds_away: caught_up.seconds_away,
                    });
                }
                caught_up.state
            }
            None => {
                tracing::info!("Starting with a new pet");
                GameState::initial(now)
            }
        };

        Self {
            state,
            rules: config.rules.clone(),
            settings: config.session.clone(),
            catalog: get_default_catalog(),
            store,
            latest_action: None,
            offline_report,
            last_saved_at: now,
            observers: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Query surface
    // ------------------------------------------------------------------

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn latest_action(&self) -> Option<&ActionEvent> {
        self.latest_action.as_ref()
    }

    pub fn offline_report(&self) -> Option<&OfflineReport> {
        self.offline_report.as_ref()
    }

    /// Clear the pending offline report, returning it
    pub fn acknowledge_offline_report(&mut self) -> Option<OfflineReport> {
        self.offline_report.take()
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn settings(&self) -> &SessionConfig {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn subscribe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// One live tick (one second of simulated time), then a save if due
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.replace(advance(&self.state, 1.0, &self.rules));
        self.maybe_save(now);
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Perform a care action
    ///
    /// VET is always charged the catalog vet price, and refused if the
    /// catalog has none. Returns false when the action had no effect (empty
    /// food bowl, or no affordable vet visit).
    pub fn perform_action(&mut self, kind: ActionKind, now: DateTime<Utc>) -> bool {
        if kind == ActionKind::Vet {
            let Some(price) = self.catalog.vet_price() else {
                tracing::warn!("Catalog has no vet visit; refusing VET");
                return false;
            };
            return self.perform_priced_action(kind, f64::from(price), now);
        }
        self.perform_priced_action(kind, 0.0, now)
    }

    /// Charge `cost` coins and perform `kind`, or do nothing at all
    pub fn perform_priced_action(
        &mut self,
        kind: ActionKind,
        cost: f64,
        now: DateTime<Utc>,
    ) -> bool {
        let Some(charged) = self.charged(&format!("{:?}", kind), cost) else {
            return false;
        };
        let ActionOutcome { state, applied } = actions::apply(&charged, kind, &self.rules);
        if !applied {
            return false;
        }

        self.latest_action = Some(ActionEvent { kind, at: now });
        self.replace(state);
        true
    }

    /// Spend `price` coins on an item kind
    ///
    /// Food ids restock their inventory slot; other kinds are only charged.
    pub fn buy_item(&mut self, price: f64, item_kind: &str) -> bool {
        let Some(mut next) = self.charged(item_kind, price) else {
            return false;
        };
        if let Some(slot) = food_slot(item_kind) {
            next.inventory = next.inventory.restocked(slot);
        }
        tracing::info!("Bought {} for {} coins", item_kind, price);
        self.replace(next.settled());
        true
    }

    /// Buy an item from the catalog by id
    ///
    /// Food goes to the inventory, a vet visit cures at once, and a toy's
    /// effect is applied right away. `Ok(false)` means not enough coins.
    pub fn buy_catalog_item(&mut self, id: &str, now: DateTime<Utc>) -> Result<bool> {
        let catalog = self.catalog;
        let item = catalog
            .get(id)
            .ok_or_else(|| Error::UnknownItem(id.to_string()))?;
        let price = f64::from(item.price);

        let bought = match item.kind {
            ItemKind::Food | ItemKind::Cosmetic => self.buy_item(price, &item.id),
            ItemKind::Vet => self.perform_priced_action(ActionKind::Vet, price, now),
            ItemKind::Toy => match self.charged(&item.id, price) {
                Some(charged) => {
                    self.replace(actions::apply_effect(&charged, &item.effect));
                    tracing::info!("Played with {}", item.name);
                    true
                }
                None => false,
            },
        };
        Ok(bought)
    }

    /// Replace the pet with a newly adopted one
    pub fn adopt(&mut self, name: &str, species: Species, now: DateTime<Utc>) {
        tracing::info!("Adopting {} the {:?}", name, species);
        self.latest_action = None;
        self.offline_report = None;
        self.replace(GameState::new_pet(name, species, now));
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Persist the current snapshot, stamped with `now` as last login
    pub fn save(&mut self, now: DateTime<Utc>) -> Result<()> {
        let record = GameState {
            last_login: now,
            ..self.state.clone()
        };
        self.store.save(&record)?;
        self.last_saved_at = now;
        Ok(())
    }

    /// Save if the save interval has elapsed. Failures are logged, not fatal.
    pub fn maybe_save(&mut self, now: DateTime<Utc>) {
        // Intervals past chrono's range saturate to "never"
        let interval = i64::try_from(self.settings.save_interval_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        if now - self.last_saved_at < interval {
            return;
        }
        if let Err(e) = self.save(now) {
            tracing::warn!("Periodic save failed: {}", e);
        }
    }

    /// The current snapshot with `price` deducted, or `None` if the price is
    /// invalid or unaffordable
    fn charged(&self, what: &str, price: f64) -> Option<GameState> {
        if !price.is_finite() || price < 0.0 || self.state.coins < price {
            tracing::info!(
                "Cannot afford {}: costs {}, have {:.1}",
                what,
                price,
                self.state.coins
            );
            return None;
        }
        Some(GameState {
            coins: self.state.coins - price,
            ..self.state.clone()
        })
    }

    fn replace(&mut self, next: GameState) {
        self.state = next;
        for observer in &mut self.observers {
            observer(&self.state);
        }
    }
}
