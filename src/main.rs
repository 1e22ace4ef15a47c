use std::{cell::RefCell, io, rc::Rc};

use log::LevelFilter;
use paper_forker::config::EconomyConfig;
use paper_forker::game::PaperForkerGame;
use paper_forker::input::{pixel_to_cell, ClickState, GridBounds, InputEvent};
use paper_forker::logger;
use paper_forker::render;
use paper_forker::session::Session;
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

#[cfg(target_arch = "wasm32")]
type Store = paper_forker::save::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
type Store = paper_forker::save::MemoryStore;

/// Milliseconds since page load, falling back to the wall clock.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Convert a mouse position to a terminal cell using the grid's on-page box.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;

    // DomBackend renders the grid as a <div> directly inside <body>.
    let rect = document
        .query_selector("body > div")
        .ok()??
        .get_bounding_client_rect();
    let bounds = GridBounds {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    };
    pixel_to_cell(
        f64::from(mouse_x),
        f64::from(mouse_y),
        &bounds,
        cs.grid.width,
        cs.grid.height,
    )
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Info);

    let session = Session::start(Store::new(), EconomyConfig::default());
    let game = Rc::new(RefCell::new(PaperForkerGame::new(session)));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let action = {
                let cs = click_state.borrow();
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(action_id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                game.borrow_mut().handle_input(&InputEvent::Key(c));
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut gs = game.borrow_mut();
            gs.tick(now_ms());

            let size = f.area();
            click_state.borrow_mut().begin_frame(size);

            render::render(&*gs, f, size, &click_state);
        }
    });

    Ok(())
}
