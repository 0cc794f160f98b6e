//! Application state and main UI controller

use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use delve_core::GameRng;
use delve_core::dungeon::{DungeonBuilder, LevelDescriptor, RoomMap, content::sample_level};
use delve_core::geometry::GridPos;
use delve_core::pathfind::{PenaltyGrid, find_path};

use crate::display::layout_lines;

/// What the event loop should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// TUI application state
pub struct App {
    level: LevelDescriptor,
    builder: DungeonBuilder,
    seed: u64,
    rooms: Option<RoomMap>,
    error: Option<String>,
    show_path: bool,
    demo_path: Vec<GridPos>,
}

impl App {
    /// Build the first layout and set up state
    pub fn new(seed: u64) -> Self {
        let mut app = Self {
            level: sample_level(),
            builder: DungeonBuilder::new(),
            seed,
            rooms: None,
            error: None,
            show_path: false,
            demo_path: Vec::new(),
        };
        app.rebuild(seed);
        app
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rooms(&self) -> Option<&RoomMap> {
        self.rooms.as_ref()
    }

    /// Generate a fresh layout from the given seed
    pub fn rebuild(&mut self, seed: u64) {
        self.seed = seed;
        let mut rng = GameRng::new(seed);
        match self.builder.generate(&self.level, &mut rng) {
            Ok(rooms) => {
                self.demo_path = demo_path(&rooms);
                self.rooms = Some(rooms);
                self.error = None;
            }
            Err(err) => {
                self.rooms = None;
                self.demo_path.clear();
                self.error = Some(err.to_string());
            }
        }
    }

    /// Map keys to actions: q quits, r regenerates, p toggles the path
    /// demo overlay.
    pub fn handle_event(&mut self, event: &Event) -> AppAction {
        let Event::Key(key) = event else {
            return AppAction::Continue;
        };
        if key.kind != KeyEventKind::Press {
            return AppAction::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            KeyCode::Char('r') => {
                self.rebuild(self.seed.wrapping_add(1));
                AppAction::Continue
            }
            KeyCode::Char('p') => {
                self.show_path = !self.show_path;
                AppAction::Continue
            }
            _ => AppAction::Continue,
        }
    }

    /// Draw the map pane and the status line
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(frame.area());

        let lines: Vec<Line> = match &self.rooms {
            Some(rooms) => {
                let overlay = self.show_path.then_some(self.demo_path.as_slice());
                layout_lines(rooms, overlay)
                    .into_iter()
                    .map(Line::from)
                    .collect()
            }
            None => vec![Line::from(format!(
                "build failed: {}",
                self.error.as_deref().unwrap_or("unknown")
            ))],
        };

        let map = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("delve"));
        frame.render_widget(map, chunks[0]);

        let room_count = self.rooms.as_ref().map_or(0, |r| r.len());
        let status = Paragraph::new(format!(
            "seed {}  rooms {}  [r]egenerate  [p]ath demo {}  [q]uit",
            self.seed,
            room_count,
            if self.show_path { "on" } else { "off" },
        ))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[1]);
    }
}

/// Corner-to-corner demo path through the largest placed room, as
/// world-grid cells for the map overlay.
fn demo_path(rooms: &RoomMap) -> Vec<GridPos> {
    let Some(room) = rooms
        .values()
        .max_by_key(|r| r.world_rect().width() * r.world_rect().height())
    else {
        return Vec::new();
    };

    let grid = PenaltyGrid::for_room(room);
    let Some(path) = find_path(
        room,
        &grid,
        room.template_lower_bounds,
        room.template_upper_bounds,
    ) else {
        return Vec::new();
    };

    path.iter()
        .rev()
        .map(|w| room.template_to_world(w.to_grid()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_builds_on_startup() {
        let app = App::new(42);
        assert!(app.rooms().is_some());
        assert!(!app.demo_path.is_empty());
    }

    #[test]
    fn test_rebuild_changes_seed() {
        let mut app = App::new(1);
        app.rebuild(2);
        assert_eq!(app.seed(), 2);
        assert!(app.rooms().is_some());
    }

    #[test]
    fn test_demo_path_stays_inside_its_room() {
        let app = App::new(9);
        let rooms = app.rooms().unwrap();
        for cell in &app.demo_path {
            assert!(
                rooms.values().any(|r| r.world_rect().contains(*cell)),
                "demo path cell {cell} outside all rooms"
            );
        }
    }
}
