//! Terminal view of the honeycomb.
//!
//! Full redraws every frame; the grid is 8x9, so diffing buys nothing. The
//! view owns the mapping between terminal character cells and world
//! coordinates: each column is three characters wide, each row two lines
//! tall, and odd columns drop one line to mimic the half-cell offset.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};
use glam::Vec2;

use crate::core::animate::Visual;
use crate::core::grid::{Coord, HexGrid, Tile, TileKind};
use crate::core::handle::HandleState;
use crate::core::session::GameSession;
use crate::types::{ColorId, COLUMN_PITCH};

const MARGIN_X: u16 = 2;
const MARGIN_Y: u16 = 1;
const CELL_W: u16 = 3;
const CELL_H: u16 = 2;

const PALETTE: [Color; 7] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

fn color_of(color: ColorId) -> Color {
    PALETTE[color as usize % PALETTE.len()]
}

fn glyph_of(tile: Tile) -> char {
    match tile.kind {
        TileKind::Normal => '⬢',
        // Bombs show their remaining fuse.
        TileKind::Bomb { countdown, .. } => char::from_digit(countdown.min(9) as u32, 10)
            .unwrap_or('9'),
    }
}

#[derive(Debug, Default)]
pub struct GridView;

impl GridView {
    pub fn new() -> Self {
        Self
    }

    /// Terminal position of a cell's glyph.
    fn cell_pos(coord: Coord) -> (u16, u16) {
        let x = MARGIN_X + coord.col as u16 * CELL_W;
        let y = MARGIN_Y + coord.row as u16 * CELL_H + (coord.col as u16 % 2);
        (x, y)
    }

    /// Terminal position of an arbitrary world point.
    fn world_pos(point: Vec2) -> (u16, u16) {
        let x = MARGIN_X as f32 + point.x / COLUMN_PITCH * CELL_W as f32;
        let y = MARGIN_Y as f32 + point.y * CELL_H as f32;
        (x.round().max(0.0) as u16, y.round().max(0.0) as u16)
    }

    /// Inverse mapping: a mouse click back to world coordinates.
    pub fn term_to_world(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f32 - MARGIN_X as f32) / CELL_W as f32 * COLUMN_PITCH,
            (row as f32 - MARGIN_Y as f32) / CELL_H as f32,
        )
    }

    pub fn draw(&self, out: &mut impl Write, session: &GameSession) -> Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        // Cells whose tile is still visually in flight are drawn empty; the
        // gliding tile is drawn separately at its interpolated position.
        // Popping tiles keep showing, dimmed, until their ticket retires.
        let mut in_flight: Vec<Coord> = Vec::new();
        let mut popping: Vec<(Coord, Tile)> = Vec::new();
        for ticket in session.scheduler().tickets() {
            match ticket.visual {
                Visual::Migrate { target, .. } => in_flight.push(target),
                Visual::Pop { at, tile } => popping.push((at, tile)),
            }
        }

        let grid = session.grid();
        let held = session.handle().cells();
        for coord in grid.coords() {
            let (x, y) = Self::cell_pos(coord);
            out.queue(cursor::MoveTo(x, y))?;
            match grid.get(coord) {
                Some(tile) if !in_flight.contains(&coord) => {
                    let is_held = held.is_some_and(|cells| cells.contains(&coord));
                    if is_held {
                        out.queue(SetAttribute(Attribute::Reverse))?;
                    }
                    out.queue(SetForegroundColor(color_of(tile.color)))?;
                    out.queue(Print(glyph_of(tile)))?;
                    out.queue(ResetColor)?;
                    if is_held {
                        out.queue(SetAttribute(Attribute::Reset))?;
                    }
                }
                _ => {
                    if let Some(&(_, tile)) = popping.iter().find(|(at, _)| *at == coord) {
                        out.queue(SetAttribute(Attribute::Dim))?;
                        out.queue(SetForegroundColor(color_of(tile.color)))?;
                        out.queue(Print(glyph_of(tile)))?;
                        out.queue(ResetColor)?;
                        out.queue(SetAttribute(Attribute::Reset))?;
                    } else {
                        out.queue(SetForegroundColor(Color::DarkGrey))?;
                        out.queue(Print('·'))?;
                        out.queue(ResetColor)?;
                    }
                }
            }
        }

        for ticket in session.scheduler().tickets() {
            if let Visual::Migrate { tile, from, target } = ticket.visual {
                let at = from.lerp(HexGrid::cell_center(target), ticket.progress());
                let (x, y) = Self::world_pos(at);
                if y >= MARGIN_Y {
                    out.queue(cursor::MoveTo(x, y))?;
                    out.queue(SetForegroundColor(color_of(tile.color)))?;
                    out.queue(Print(glyph_of(tile)))?;
                    out.queue(ResetColor)?;
                }
            }
        }

        let status_y = MARGIN_Y + session.config().rows as u16 * CELL_H + 1;
        out.queue(cursor::MoveTo(MARGIN_X, status_y))?;
        out.queue(Print(format!(
            "score {}  moves {}",
            session.score(),
            session.moves()
        )))?;
        out.queue(cursor::MoveTo(MARGIN_X, status_y + 1))?;
        let status = if session.is_game_over() {
            "game over - r to restart, q to quit".to_string()
        } else {
            match session.handle().state() {
                HandleState::Spinning | HandleState::BetweenTurns => {
                    format!("spinning {}...", session.handle().direction().as_str())
                }
                HandleState::Locked => "swipe to spin, tap to relocate".to_string(),
                _ => "tap three touching tiles to lock".to_string(),
            }
        };
        out.queue(Print(status))?;

        out.flush()?;
        Ok(())
    }
}

/// Raw-mode terminal guard used by the runner.
pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn enter() -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.queue(terminal::EnterAlternateScreen)?;
        stdout.queue(crossterm::event::EnableMouseCapture)?;
        stdout.queue(cursor::Hide)?;
        stdout.flush()?;
        Ok(Self { stdout })
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(crossterm::event::DisableMouseCapture)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn writer(&mut self) -> &mut io::Stdout {
        &mut self.stdout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_and_world_positions_agree() {
        // The glyph position of a cell and the projected position of its
        // world center must be the same character.
        let grid = HexGrid::new(9, 8);
        for coord in grid.coords() {
            let direct = GridView::cell_pos(coord);
            let projected = GridView::world_pos(HexGrid::cell_center(coord));
            assert_eq!(direct, projected, "at {:?}", coord);
        }
    }

    #[test]
    fn test_popping_tiles_are_drawn_dimmed_until_their_ticket_retires() {
        use crate::input::gesture::Gesture;
        use crate::types::{GameConfig, SpinDirection};

        let mut grid = HexGrid::from_fn(9, 8, |c| {
            Some(Tile::normal(100 + (c.row as u8 * 8 + c.col as u8)))
        });
        let center = Coord::new(4, 4);
        let cells = [
            center,
            HexGrid::neighbor(center, 0),
            HexGrid::neighbor(center, 1),
        ];
        for c in cells {
            grid.set(c, Some(Tile::normal(42)));
        }
        let mut session = GameSession::with_grid(GameConfig::default(), 7, grid);
        let at = cells
            .iter()
            .map(|&c| HexGrid::cell_center(c))
            .fold(Vec2::ZERO, |acc, p| acc + p)
            / 3.0;
        session.apply_gesture(Gesture::Tap { at });
        session.apply_gesture(Gesture::Spin(SpinDirection::Clockwise));

        let view = GridView::new();
        let dim = "\u{1b}[2m";

        // Nothing is popping yet, so nothing draws dimmed.
        let mut before = Vec::new();
        view.draw(&mut before, &session).unwrap();
        assert!(!String::from_utf8_lossy(&before).contains(dim));

        // One 120-degree turn (12 ticks) pops the monochrome triplet; its
        // shrink tickets are still in flight on the next tick.
        for _ in 0..13 {
            session.tick();
        }
        let mut during = Vec::new();
        view.draw(&mut during, &session).unwrap();
        assert!(String::from_utf8_lossy(&during).contains(dim));
    }

    #[test]
    fn test_term_to_world_round_trips_cell_centers() {
        let view = GridView::new();
        let grid = HexGrid::new(9, 8);
        for coord in grid.coords() {
            let (x, y) = GridView::cell_pos(coord);
            let world = view.term_to_world(x, y);
            let center = HexGrid::cell_center(coord);
            assert!(world.distance(center) < 0.3, "at {:?}", coord);
        }
    }
}
