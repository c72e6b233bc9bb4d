//! BMC Clicker: click the coach and buy upgrades to earn points faster.

pub mod actions;
pub mod logic;
pub mod render;
pub mod save;
pub mod simulator;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::console;
use crate::input::{ClickState, InputEvent};
use crate::time::SECONDS_PER_TICK;

use actions::*;
use logic::{format_display, PurchaseError};
use save::{Autosave, KeyValueStore};
use state::{GameState, Particle, UiState};

/// Owns the economy state, the UI feedback state and the save slot.
/// Every mutation of `state` goes through this type.
pub struct ClickerGame {
    pub state: GameState,
    pub ui: UiState,
    store: Box<dyn KeyValueStore>,
    autosave: Autosave,
}

impl ClickerGame {
    /// Start a session, restoring progress from `store` if a save exists.
    pub fn new(mut store: Box<dyn KeyValueStore>) -> Self {
        let mut state = GameState::new();
        let mut ui = UiState::new();
        if save::load_game(store.as_mut(), &mut state) {
            console::log("セーブデータを読み込みました");
            ui.add_log("Welcome back! Progress restored.", true);
        } else {
            ui.add_log("Welcome to BMC Clicker! Click the coach.", true);
        }
        Self {
            state,
            ui,
            store,
            autosave: Autosave::new(),
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.ui.confirm_reset {
            match event {
                InputEvent::Key('y' | 'Y') | InputEvent::Click(RESET_CONFIRM) => self.reset(),
                _ => {
                    self.ui.confirm_reset = false;
                    self.ui.add_log("Reset cancelled.", false);
                }
            }
            return true;
        }

        match event {
            InputEvent::Key(' ') | InputEvent::Key('c') | InputEvent::Click(CLICK_IMAGE) => {
                self.click();
                true
            }
            InputEvent::Key(c @ '1'..='9') => {
                let idx = (*c as u8 - b'1') as usize;
                if idx < self.state.upgrades.len() {
                    self.buy(idx);
                    true
                } else {
                    false
                }
            }
            InputEvent::Click(id)
                if *id >= BUY_UPGRADE_BASE
                    && ((*id - BUY_UPGRADE_BASE) as usize) < self.state.upgrades.len() =>
            {
                self.buy((*id - BUY_UPGRADE_BASE) as usize);
                true
            }
            InputEvent::Key('r' | 'R') | InputEvent::Click(RESET_REQUEST) => {
                self.ui.confirm_reset = true;
                true
            }
            _ => false,
        }
    }

    /// Advance by `delta_ticks` 100ms ticks: passive income, effects, autosave.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        logic::tick(&mut self.state, delta_ticks as f64 * SECONDS_PER_TICK);
        self.ui.age(delta_ticks);
        if self.autosave.advance(delta_ticks) {
            self.save();
        }
    }

    /// Write a checkpoint now.
    pub fn save(&mut self) {
        save::save_game(self.store.as_mut(), &self.state);
        self.autosave.restart();
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, &self.ui, f, area, click_state);
    }

    fn click(&mut self) {
        let delta = logic::click(&mut self.state);
        self.ui.click_flash = 3;

        let col_offset = (self.ui.next_random() % 13) as i16 - 6; // -6..+6
        let life = 8 + (self.ui.next_random() % 5); // 8-12 ticks
        self.ui.add_particle(Particle {
            text: format!("+{}", format_display(delta)),
            col_offset,
            life,
            max_life: life,
        });
    }

    fn buy(&mut self, idx: usize) {
        let id = self.state.upgrades[idx].id.clone();
        match logic::purchase(&mut self.state, &id) {
            Ok(()) => {
                let u = &self.state.upgrades[idx];
                let msg = format!("Bought {}! ({} owned)", u.name, u.owned);
                self.ui.add_log(&msg, false);
                self.ui.purchase_flash = Some((idx, 5));
            }
            Err(PurchaseError::InsufficientFunds { price, .. }) => {
                let msg = format!(
                    "Not enough points for {} (need {})",
                    self.state.upgrades[idx].name,
                    format_display(price)
                );
                self.ui.add_log(&msg, false);
            }
            Err(e @ PurchaseError::UnknownUpgrade(_)) => {
                console::warn(&e.to_string());
            }
        }
    }

    /// Discard the save slot and start over in place.
    fn reset(&mut self) {
        save::delete_save(self.store.as_mut());
        self.state = GameState::new();
        self.ui = UiState::new();
        self.ui.add_log("Progress reset. Fresh start!", true);
        self.autosave.restart();
        console::log("セーブデータを削除しました");
    }
}
