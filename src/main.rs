mod clicker;
mod console;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use clicker::save::KeyValueStore;
use clicker::ClickerGame;
use input::{ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::{GameTime, TICKS_PER_SECOND};

/// Milliseconds from `performance.now()`, falling back to the wall clock.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

#[cfg(target_arch = "wasm32")]
fn open_store() -> Box<dyn KeyValueStore> {
    match clicker::save::browser_storage() {
        Some(storage) => Box::new(storage),
        None => {
            console::warn("localStorage が使えません。進行状況は保存されません");
            Box::new(clicker::save::MemoryStore::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_store() -> Box<dyn KeyValueStore> {
    Box::new(clicker::save::MemoryStore::new())
}

/// Flush a final checkpoint when the page is closed or reloaded.
#[cfg(target_arch = "wasm32")]
fn register_exit_flush(game: Rc<RefCell<ClickerGame>>) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };
    let on_unload = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if let Ok(mut g) = game.try_borrow_mut() {
            g.save();
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    if window
        .add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref())
        .is_err()
    {
        console::warn("beforeunload リスナーを登録できませんでした");
    }
    // Lives for the rest of the page.
    on_unload.forget();
}

#[cfg(not(target_arch = "wasm32"))]
fn register_exit_flush(_game: Rc<RefCell<ClickerGame>>) {}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(ClickerGame::new(open_store())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    register_exit_flush(game.clone());

    // Mouse/touch click handler. ratzilla reports the grid cell directly.
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.kind != MouseEventKind::ButtonDown(MouseButton::Left) {
                return;
            }

            let matched = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                cs.hit_test(mouse_event.col, mouse_event.row)
            };

            if let Some(action_id) = matched {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    })?;

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    })?;

    terminal.draw_web({
        let mut game_time = GameTime::new(TICKS_PER_SECOND);
        move |f| {
            let size = f.area();

            // Update terminal dimensions and clear click targets
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            let ticks = game_time.update(now_ms());
            if game_time.lagged() {
                console::warn("フレーム間隔が1秒を超えました");
            }

            let mut g = game.borrow_mut();
            g.tick(ticks);
            g.render(f, size, &click_state);
        }
    });

    Ok(())
}
