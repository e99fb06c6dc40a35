//! Terminal grid path-search visualizer.
//!
//! Run: cargo run --bin gridwalk [-- --seed N]

mod app;
mod term;

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use app::{App, action_for};
use term::Terminal;

const FRAME: Duration = Duration::from_millis(16);
const MAX_ROWS: u16 = 30;
const MAX_COLS: u16 = 80;

fn seed_from_args() -> Result<Option<u64>, String> {
    let mut args = std::env::args().skip(1);
    match (args.next().as_deref(), args.next()) {
        (None, _) => Ok(None),
        (Some("--seed"), Some(n)) => n
            .parse()
            .map(Some)
            .map_err(|e| format!("invalid seed {n:?}: {e}")),
        (Some(other), _) => Err(format!("usage: gridwalk [--seed N] (got {other:?})")),
    }
}

fn run(app: &mut App, term: &mut Terminal) -> Result<(), Box<dyn std::error::Error>> {
    term.init()?;
    loop {
        app.tick();
        app.draw(term)?;
        let Some(key) = term.poll_key(FRAME)? else {
            continue;
        };
        if let Some(action) = action_for(key) {
            if !app.handle(action) {
                return Ok(());
            }
        }
    }
}

fn main() {
    let seed = match seed_from_args() {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    let rng = match seed {
        Some(n) => StdRng::seed_from_u64(n),
        None => StdRng::from_os_rng(),
    };

    // Leave three rows for the status and help lines.
    let (cols, rows) = crossterm::terminal::size().unwrap_or((MAX_COLS, 24));
    let rows = rows.saturating_sub(3).clamp(2, MAX_ROWS);
    let cols = cols.clamp(2, MAX_COLS);

    let mut app = App::new(i32::from(rows), i32::from(cols), rng);
    let mut term = Terminal::new();
    let result = run(&mut app, &mut term);
    term.close();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
