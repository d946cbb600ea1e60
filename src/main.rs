mod config;
mod dungeon;
mod input;
mod logger;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use config::Config;
use dungeon::DungeonGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};

/// Map a mouse position to a terminal cell using the grid container's
/// bounding rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();
    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;

    log::debug!("click: pixel=({}, {}) cell=({}, {}) targets={}", mouse_x, mouse_y, col, row, cs.targets.len());
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let (config, config_error) = Config::resolve(Config::from_location());
    logger::init(config.debug);
    if let Some(e) = config_error {
        log::warn!("{}; using defaults", e);
    }
    let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

    let game = Rc::new(RefCell::new(DungeonGame::new(seed, config.log_lines)));
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

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c),
                KeyCode::Backspace => InputEvent::Backspace,
                KeyCode::Enter => InputEvent::Enter,
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }
            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
