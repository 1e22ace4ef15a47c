//! The live game: state, tuning, storage and clock in one owned value.
//!
//! The shell holds a single [`Session`] and forwards user actions and frame
//! timestamps to it. Every mutation goes through the pure functions in
//! [`crate::logic`]; user actions persist immediately, production persists on
//! the autosave interval.

use log::debug;

use crate::config::EconomyConfig;
use crate::logic::{self, ForkOutcome};
use crate::save::{self, KeyValueStore};
use crate::state::{ProgressState, UpgradeKind};
use crate::time::{Elapsed, GameClock};

pub struct Session<S: KeyValueStore> {
    pub state: ProgressState,
    pub config: EconomyConfig,
    store: S,
    clock: GameClock,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the saved game from `store`, or start a fresh one.
    pub fn start(mut store: S, config: EconomyConfig) -> Self {
        let state = save::load_or_reset(&mut store);
        let clock = GameClock::new(config.production_interval_ms, config.autosave_interval_ms);
        Self {
            state,
            config,
            store,
            clock,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Feed a frame timestamp. Applies any due production ticks and writes a
    /// snapshot when the autosave interval has passed.
    pub fn advance(&mut self, now_ms: f64) -> Elapsed {
        let elapsed = self.clock.update(now_ms);
        for _ in 0..elapsed.ticks {
            logic::apply_production(&self.config, &mut self.state);
        }
        if elapsed.save_due {
            self.persist();
        }
        elapsed
    }

    pub fn buy(&mut self, kind: UpgradeKind) -> bool {
        let bought = logic::apply_purchase(&self.config, &mut self.state, kind);
        if bought {
            self.persist();
        }
        bought
    }

    pub fn write_code(&mut self) -> u64 {
        logic::write_code(&self.config, &mut self.state)
    }

    pub fn fork(&mut self) -> ForkOutcome {
        let outcome = logic::fork(&self.config, &mut self.state);
        if outcome != ForkOutcome::Rejected {
            self.persist();
        }
        outcome
    }

    /// Wipe the save and start over from zero.
    pub fn reset(&mut self) {
        self.state = save::reset(&mut self.store);
    }

    pub fn persist(&mut self) {
        save::save(&mut self.store, &self.state);
        debug!("saved ({} LoC)", self.state.lines_of_code);
    }

    // ── Read-only views for the shell ──────────────────────────

    pub fn cost_of(&self, kind: UpgradeKind) -> u64 {
        logic::cost_of(&self.config, &self.state, kind)
    }

    pub fn can_afford(&self, kind: UpgradeKind) -> bool {
        logic::can_afford(&self.config, &self.state, kind)
    }

    pub fn production_per_tick(&self) -> u64 {
        logic::production_per_tick(&self.config, &self.state)
    }

    pub fn fork_requirement(&self) -> u64 {
        logic::fork_requirement(&self.config, &self.state)
    }

    pub fn can_fork(&self) -> bool {
        logic::can_fork(&self.config, &self.state)
    }

    pub fn manual_gain(&self) -> u64 {
        logic::manual_gain(&self.config, &self.state)
    }
}
