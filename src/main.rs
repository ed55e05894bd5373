//! Terminal hexpop runner (default binary).
//!
//! crossterm raw mode with mouse capture: press/release pairs become taps
//! and swipes in world coordinates, the session ticks on a fixed 16 ms
//! cadence, and the view redraws after every tick.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use glam::Vec2;

use hexpop::core::session::GameSession;
use hexpop::term::view::{GridView, Terminal};
use hexpop::types::{GameConfig, TICK_MS};

fn main() -> Result<()> {
    let mut term = Terminal::enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut Terminal) -> Result<()> {
    let seed = std::time::UNIX_EPOCH
        .elapsed()
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut session = GameSession::new(GameConfig::default(), seed);
    let view = GridView::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut pointer_down: Option<Vec2> = None;

    loop {
        view.draw(term.writer(), &session)?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') => session.restart(),
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    let at = view.term_to_world(mouse.column, mouse.row);
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            pointer_down = Some(at);
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            if let Some(down) = pointer_down.take() {
                                session.pointer_up(down, at);
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick();
        }
    }
}
