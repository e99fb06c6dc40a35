//! Crossterm terminal driver for the gridwalk demo.
//!
//! Owns raw mode and the alternate screen, maps crossterm key events to
//! [`Key`]s and paints grid cells as coloured glyphs.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridwalk_core::{CellState, Point};

/// A key press the demo reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Escape),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        _ => None,
    }
}

/// Glyph and colours for a cell.
fn cell_style(state: CellState) -> (char, Color, Color) {
    match state {
        CellState::Empty => ('.', Color::DarkGrey, Color::Reset),
        CellState::Wall => ('#', Color::Grey, Color::DarkGrey),
        CellState::Start => ('S', Color::Black, Color::Green),
        CellState::End => ('E', Color::Black, Color::Red),
        CellState::Visited => ('.', Color::Cyan, Color::DarkBlue),
        CellState::Path => ('*', Color::Black, Color::Yellow),
    }
}

/// Terminal back-end. Call [`init`](Self::init) before drawing and
/// [`close`](Self::close) before exiting; dropping also restores the
/// terminal.
pub struct Terminal {
    out: Stdout,
    active: bool,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            active: false,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )
    }

    /// Wait up to `timeout` for a key press.
    pub fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<Key>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => Ok(to_key(code, modifiers)),
            _ => Ok(None),
        }
    }

    /// Queue one grid cell, highlighted if it is under the cursor.
    pub fn draw_cell(&mut self, p: Point, state: CellState, cursor: bool) -> io::Result<()> {
        let (ch, fg, bg) = cell_style(state);
        let bg = if cursor { Color::Magenta } else { bg };
        queue!(
            self.out,
            cursor::MoveTo(p.col as u16, p.row as u16),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(ch),
            ResetColor
        )
    }

    /// Queue a line of text at `row`, clearing the rest of the line.
    pub fn draw_line(&mut self, row: u16, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = execute!(self.out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}
