//! Interactive editor and run front-end, independent of the terminal.

use std::io;

use gridwalk_core::{CellState, Error, Point, Range};
use gridwalk_run::{
    MAX_SPEED_MILLIS, MIN_SPEED_MILLIS, Renderer, RunConfig, RunController, RunStatus,
};
use gridwalk_search::AlgorithmKind;
use rand::rngs::StdRng;

use crate::term::{Key, Terminal};

/// Fraction of cells turned into walls by [`Action::Scatter`].
const WALL_DENSITY: f64 = 0.3;
const SPEED_STEP: u64 = 5;

pub const HELP: &str = "arrows move | s start | e end | w wall | r random | 1-4 algorithm | +/- speed | enter run | c cancel | x reset | q quit";

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Point),
    SetStart,
    SetEnd,
    ToggleWall,
    Scatter,
    Algorithm(AlgorithmKind),
    Faster,
    Slower,
    Run,
    Cancel,
    Reset,
    Quit,
}

pub fn action_for(key: Key) -> Option<Action> {
    let action = match key {
        Key::Up => Action::Move(Point::new(-1, 0)),
        Key::Down => Action::Move(Point::new(1, 0)),
        Key::Left => Action::Move(Point::new(0, -1)),
        Key::Right => Action::Move(Point::new(0, 1)),
        Key::Enter => Action::Run,
        Key::Escape => Action::Quit,
        Key::Char(c) => match c.to_ascii_lowercase() {
            's' => Action::SetStart,
            'e' => Action::SetEnd,
            'w' | ' ' => Action::ToggleWall,
            'r' => Action::Scatter,
            '1'..='4' => {
                let i = c as usize - '1' as usize;
                Action::Algorithm(AlgorithmKind::ALL[i])
            }
            '+' | '=' => Action::Faster,
            '-' => Action::Slower,
            'c' => Action::Cancel,
            'x' => Action::Reset,
            'q' => Action::Quit,
            _ => return None,
        },
    };
    Some(action)
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Collects run notices between frames.
#[derive(Debug, Default)]
struct Screen {
    dirty: Vec<(Point, CellState)>,
    finished: Option<(bool, usize)>,
}

impl Renderer for Screen {
    fn cell_changed(&mut self, pos: Point, state: CellState) {
        self.dirty.push((pos, state));
    }

    fn finished(&mut self, found: bool, path_len: usize) {
        self.finished = Some((found, path_len));
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    ctl: RunController,
    bounds: Range,
    cursor: Point,
    drawn_cursor: Point,
    config: RunConfig,
    rng: StdRng,
    message: String,
    screen: Screen,
    full_redraw: bool,
}

impl App {
    pub fn new(rows: i32, cols: i32, rng: StdRng) -> Self {
        let ctl = RunController::with_size(rows, cols);
        let bounds = ctl.read(|g| g.bounds());
        Self {
            ctl,
            bounds,
            cursor: Point::ZERO,
            drawn_cursor: Point::ZERO,
            config: RunConfig::default(),
            rng,
            message: String::from("set a start and an end, then press enter"),
            screen: Screen::default(),
            full_redraw: true,
        }
    }

    /// Apply an action. Returns `false` when the user asked to quit.
    pub fn handle(&mut self, action: Action) -> bool {
        let cursor = self.cursor;
        let edited = match action {
            Action::Quit => return false,
            Action::Move(d) => {
                let next = cursor + d;
                if self.bounds.contains(next) {
                    self.cursor = next;
                }
                return true;
            }
            Action::SetStart => self.ctl.edit(|g| g.set_start(cursor)),
            Action::SetEnd => self.ctl.edit(|g| g.set_end(cursor)),
            Action::ToggleWall => self.ctl.edit(|g| {
                let next = if g.at(cursor) == Some(CellState::Wall) {
                    CellState::Empty
                } else {
                    CellState::Wall
                };
                g.set_cell(cursor, next)
            }),
            Action::Scatter => {
                let rng = &mut self.rng;
                self.ctl.edit(|g| g.scatter_walls(rng, WALL_DENSITY))
            }
            Action::Algorithm(kind) => {
                self.config.algorithm = kind;
                self.message = format!("algorithm: {kind}");
                return true;
            }
            Action::Faster | Action::Slower => {
                let speed = if action == Action::Faster {
                    self.config.speed_millis.saturating_sub(SPEED_STEP)
                } else {
                    self.config.speed_millis + SPEED_STEP
                };
                self.config.speed_millis = speed.clamp(MIN_SPEED_MILLIS, MAX_SPEED_MILLIS);
                self.message = format!("speed: {}ms per step", self.config.speed_millis);
                return true;
            }
            Action::Run => self.ctl.start(self.config).map(|()| {
                self.screen = Screen::default();
                self.message = format!("running {}", self.config.algorithm);
            }),
            Action::Cancel => {
                self.ctl.cancel();
                Ok(())
            }
            Action::Reset => self.ctl.reset().map(|()| {
                self.message = String::from("grid cleared");
            }),
        };
        match edited {
            Ok(()) => self.full_redraw = true,
            Err(e) => self.message = describe(&e),
        }
        true
    }

    /// Drain queued notices. Returns how many arrived.
    pub fn tick(&mut self) -> usize {
        let n = self.ctl.pump(&mut self.screen);
        if let Some((found, path_len)) = self.screen.finished.take() {
            let (algorithm, visited) = self
                .ctl
                .report()
                .map_or((self.config.algorithm, 0), |r| (r.algorithm, r.visited.len()));
            self.message = if found {
                format!("{algorithm}: path of {path_len} cells, {visited} visited")
            } else {
                format!("{algorithm}: no path, {visited} visited")
            };
        }
        n
    }

    pub fn status_line(&self) -> String {
        format!(
            "[{}] {} {}ms | {}",
            self.ctl.status(),
            self.config.algorithm,
            self.config.speed_millis,
            self.message
        )
    }

    pub fn draw(&mut self, term: &mut Terminal) -> io::Result<()> {
        let cursor = self.cursor;
        if self.full_redraw {
            self.full_redraw = false;
            self.screen.dirty.clear();
            let cells: Vec<(Point, CellState)> = self.ctl.read(|g| g.iter().collect());
            for (p, state) in cells {
                term.draw_cell(p, state, p == cursor)?;
            }
        } else {
            for (p, state) in self.screen.dirty.drain(..) {
                term.draw_cell(p, state, p == cursor)?;
            }
            for p in [self.drawn_cursor, cursor] {
                if let Some(state) = self.ctl.read(|g| g.at(p)) {
                    term.draw_cell(p, state, p == cursor)?;
                }
            }
        }
        self.drawn_cursor = cursor;

        let row = self.bounds.height() as u16;
        term.draw_line(row + 1, &self.status_line())?;
        term.draw_line(row + 2, HELP)?;
        term.flush()
    }
}

fn describe(e: &Error) -> String {
    match e {
        Error::GridLocked => String::from("grid is locked while running; press c to cancel"),
        Error::Busy => String::from("already running; press c to cancel"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn app() -> App {
        App::new(4, 6, StdRng::seed_from_u64(7))
    }

    fn press(app: &mut App, actions: &[Action]) {
        for &a in actions {
            assert!(app.handle(a));
        }
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(action_for(Key::Char('q')), Some(Action::Quit));
        assert_eq!(
            action_for(Key::Char('4')),
            Some(Action::Algorithm(AlgorithmKind::Astar))
        );
        assert_eq!(
            action_for(Key::Char('2')),
            Some(Action::Algorithm(AlgorithmKind::Dfs))
        );
        assert_eq!(action_for(Key::Left), Some(Action::Move(Point::new(0, -1))));
        assert_eq!(action_for(Key::Char('z')), None);
    }

    #[test]
    fn cursor_stays_on_the_grid() {
        let mut app = app();
        press(&mut app, &[Action::Move(Point::new(-1, 0)), Action::Move(Point::new(0, -1))]);
        assert_eq!(app.cursor, Point::ZERO);
        for _ in 0..10 {
            app.handle(Action::Move(Point::new(1, 1)));
        }
        assert_eq!(app.cursor, Point::new(3, 3));
    }

    #[test]
    fn speed_stays_in_range() {
        let mut app = app();
        for _ in 0..20 {
            app.handle(Action::Slower);
        }
        assert_eq!(app.config.speed_millis, MAX_SPEED_MILLIS);
        for _ in 0..20 {
            app.handle(Action::Faster);
        }
        assert_eq!(app.config.speed_millis, MIN_SPEED_MILLIS);
        assert!(app.config.validate().is_ok());
    }

    #[test]
    fn run_without_endpoints_reports_the_error() {
        let mut app = app();
        app.handle(Action::Run);
        assert_eq!(app.message, Error::PreconditionFailed.to_string());
        assert_eq!(app.ctl.status(), RunStatus::Idle);
    }

    #[test]
    fn edit_run_and_finish() {
        let mut app = app();
        let right = Action::Move(Point::new(0, 1));
        press(
            &mut app,
            &[
                Action::SetStart,
                right,
                Action::ToggleWall,
                right,
                right,
                Action::SetEnd,
                Action::Algorithm(AlgorithmKind::Bfs),
                Action::Faster,
                Action::Faster,
                Action::Run,
            ],
        );
        assert_eq!(app.ctl.status(), RunStatus::Running);
        assert_eq!(app.ctl.wait(&mut app.screen), RunStatus::Completed);
        app.tick();
        assert!(app.message.starts_with("bfs: path of 6 cells"), "{}", app.message);
        assert!(app.screen.dirty.iter().any(|&(_, s)| s == CellState::Path));
    }

    #[test]
    fn finish_message_names_the_algorithm_that_ran() {
        let mut app = app();
        press(
            &mut app,
            &[
                Action::SetStart,
                Action::Move(Point::new(3, 5)),
                Action::SetEnd,
                Action::Algorithm(AlgorithmKind::Dijkstra),
                Action::Run,
                Action::Algorithm(AlgorithmKind::Dfs),
            ],
        );
        assert_eq!(app.ctl.wait(&mut app.screen), RunStatus::Completed);
        app.tick();
        assert!(
            app.message.starts_with("dijkstra: path of 9 cells"),
            "{}",
            app.message
        );
    }

    #[test]
    fn edits_while_running_are_refused() {
        let mut app = app();
        press(
            &mut app,
            &[
                Action::SetStart,
                Action::Move(Point::new(3, 5)),
                Action::SetEnd,
            ],
        );
        for _ in 0..10 {
            app.handle(Action::Slower);
        }
        press(&mut app, &[Action::Run, Action::ToggleWall]);
        assert!(app.message.contains("press c to cancel"));
        press(&mut app, &[Action::Cancel]);
        assert_eq!(app.ctl.status(), RunStatus::Cancelled);
        press(&mut app, &[Action::Reset]);
        assert_eq!(app.ctl.status(), RunStatus::Idle);
        assert_eq!(app.ctl.read(|g| g.start()), None);
    }

    #[test]
    fn scatter_spares_the_endpoints() {
        let mut app = app();
        press(&mut app, &[Action::SetStart, Action::Move(Point::new(1, 1)), Action::SetEnd]);
        for _ in 0..5 {
            app.handle(Action::Scatter);
            assert_eq!(app.ctl.read(|g| g.at(Point::ZERO)), Some(CellState::Start));
            assert_eq!(app.ctl.read(|g| g.at(Point::new(1, 1))), Some(CellState::End));
        }
    }
}
