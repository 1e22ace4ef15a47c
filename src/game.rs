//! Paper Forker — input dispatch and message log on top of a [`Session`].

use crate::actions::{BUY_UPGRADE_BASE, CANCEL_RESET, FORK_PAPER, RESET_GAME, WRITE_CODE};
use crate::input::InputEvent;
use crate::logic::{format_number, ForkOutcome};
use crate::save::KeyValueStore;
use crate::session::Session;
use crate::state::UpgradeKind;

const MAX_LOG: usize = 50;

/// Log entry shown in the side panel.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

pub struct PaperForkerGame<S: KeyValueStore> {
    pub session: Session<S>,
    pub log: Vec<LogEntry>,
    /// Reset was requested once and is waiting for confirmation.
    pub confirm_reset: bool,
    /// Previous key press. Writing code needs a different key each time.
    last_key: Option<char>,
}

impl<S: KeyValueStore> PaperForkerGame<S> {
    pub fn new(session: Session<S>) -> Self {
        let mut game = Self {
            session,
            log: Vec::new(),
            confirm_reset: false,
            last_key: None,
        };
        if game.session.state.is_unlocked() {
            game.add_log("Welcome back.", true);
        } else {
            game.add_log("Fork a paper to get started.", true);
        }
        game
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let action = match event {
            InputEvent::Key(c) => {
                let previous = self.last_key.replace(*c);
                match key_to_action(*c) {
                    // Held keys auto-repeat; only a fresh key writes.
                    Some(WRITE_CODE) if previous == Some(*c) => return false,
                    Some(a) => a,
                    None => return false,
                }
            }
            InputEvent::Click(id) => *id,
        };
        self.dispatch(action)
    }

    fn dispatch(&mut self, action: u16) -> bool {
        if action == RESET_GAME {
            self.request_reset();
            return true;
        }
        if action == CANCEL_RESET {
            self.confirm_reset = false;
            return true;
        }
        // Any other action cancels a pending reset.
        self.confirm_reset = false;

        if action == FORK_PAPER {
            self.fork();
            return true;
        }

        // Until the first fork only the fork button exists.
        if !self.session.state.is_unlocked() {
            return false;
        }

        if action == WRITE_CODE {
            self.session.write_code();
            return true;
        }

        let kind = action
            .checked_sub(BUY_UPGRADE_BASE)
            .and_then(|idx| UpgradeKind::all().get(idx as usize).copied());
        match kind {
            Some(kind) => {
                self.buy(kind);
                true
            }
            None => false,
        }
    }

    fn buy(&mut self, kind: UpgradeKind) {
        let cost = self.session.cost_of(kind);
        if self.session.buy(kind) {
            let level = kind.level(&self.session.state);
            self.add_log(
                &format!("{} → {} ({} LoC)", kind.name(), level, format_number(cost)),
                false,
            );
        } else {
            self.add_log(
                &format!(
                    "Need {} more LoC for {}",
                    format_number(cost.saturating_sub(self.session.state.lines_of_code)),
                    kind.name()
                ),
                false,
            );
        }
    }

    fn fork(&mut self) {
        match self.session.fork() {
            ForkOutcome::Unlocked => self.add_log("Forked your first paper!", true),
            ForkOutcome::Completed => {
                let msg = format!("Fork #{} finished. Starting anew.", self.session.state.forks);
                self.add_log(&msg, true);
            }
            ForkOutcome::Rejected => {
                let msg = format!(
                    "This fork needs {} lines of code.",
                    format_number(self.session.fork_requirement())
                );
                self.add_log(&msg, false);
            }
        }
    }

    fn request_reset(&mut self) {
        if self.confirm_reset {
            self.confirm_reset = false;
            self.session.reset();
            self.log.clear();
            self.add_log("Save wiped. Fork a paper to get started.", true);
        } else {
            self.confirm_reset = true;
            self.add_log("Press [X] again to wipe your save.", true);
        }
    }

    /// Advance the clock to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        self.session.advance(now_ms);
    }
}

/// Keyboard shortcuts.
pub fn key_to_action(key: char) -> Option<u16> {
    match key {
        'f' | 'F' => Some(FORK_PAPER),
        'w' | ' ' => Some(WRITE_CODE),
        'x' | 'X' => Some(RESET_GAME),
        'n' => Some(CANCEL_RESET),
        c => UpgradeKind::from_key(c).map(|k| BUY_UPGRADE_BASE + k.index() as u16),
    }
}
