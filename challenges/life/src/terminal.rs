//! Console output, keypress polling and pacing behind one narrow trait.

use std::io::{self, Stderr, Stdout, Write};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    /// Ctrl+C, which raw mode delivers as a key instead of a signal.
    Interrupt,
    Other,
}

impl KeyPress {
    pub fn is_quit(self) -> bool {
        matches!(self, KeyPress::Char('q' | 'Q') | KeyPress::Interrupt)
    }
}

pub trait Terminal {
    /// Replace whatever was shown before with `grid`.
    fn render(&mut self, grid: &Grid, generation: u64) -> io::Result<()>;

    /// Pending keypresses, without blocking. Empty when none are waiting.
    fn poll_keys(&mut self) -> io::Result<Vec<KeyPress>>;

    /// Block for roughly `delay`.
    fn pause(&mut self, delay: Duration);
}

/// Text of one frame: a status line followed by one line per grid row.
pub fn frame(grid: &Grid, generation: u64, newline: &str) -> String {
    let line = grid.cols() + newline.len();
    let mut buf = String::with_capacity(line * (grid.rows() + 1) + 64);
    buf.push_str(&format!(
        "Generation: {generation}  Population: {}  (q to quit){newline}",
        grid.population()
    ));
    for row in grid.iter_rows() {
        buf.extend(row.iter().map(|cell| cell.glyph()));
        buf.push_str(newline);
    }
    buf
}

/// Draws on the alternate screen in raw mode. Dropping it puts the terminal
/// back the way it was found.
pub struct CrosstermTerminal {
    out: Stdout,
}

impl CrosstermTerminal {
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        if let Err(err) = execute!(out, EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { out })
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Terminal for CrosstermTerminal {
    fn render(&mut self, grid: &Grid, generation: u64) -> io::Result<()> {
        // Raw mode does not turn '\n' into a carriage return.
        let text = frame(grid, generation, "\r\n");
        queue!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn poll_keys(&mut self) -> io::Result<Vec<KeyPress>> {
        let mut keys = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    keys.push(translate(key));
                }
            }
        }
        Ok(keys)
    }

    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

/// Log sink for stderr. While raw mode is on, bare '\n' is sent as "\r\n" so
/// log lines start at the left margin instead of drifting right.
pub struct RawSafeStderr {
    inner: Stderr,
}

impl Default for RawSafeStderr {
    fn default() -> Self {
        Self {
            inner: io::stderr(),
        }
    }
}

impl Write for RawSafeStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if terminal::is_raw_mode_enabled().unwrap_or(false) {
            self.inner.write_all(&raw_newlines(buf))?;
            Ok(buf.len())
        } else {
            self.inner.write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Put a '\r' in front of every '\n' that lacks one.
pub fn raw_newlines(buf: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len() + 8);
    let mut prev = None;
    for &byte in buf {
        if byte == b'\n' && prev != Some(b'\r') {
            out.push(b'\r');
        }
        out.push(byte);
        prev = Some(byte);
    }
    out
}

fn translate(key: KeyEvent) -> KeyPress {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyPress::Interrupt
        }
        KeyCode::Char(c) => KeyPress::Char(c),
        _ => KeyPress::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_frame_layout() {
        let mut grid = Grid::new(2, 3).unwrap();
        grid.set(0, 0, Cell::Alive);
        grid.set(1, 2, Cell::Alive);
        assert_eq!(
            frame(&grid, 4, "\n"),
            "Generation: 4  Population: 2  (q to quit)\n#..\n..#\n"
        );
    }

    #[test]
    fn test_frame_raw_newlines() {
        let grid = Grid::new(1, 1).unwrap();
        assert!(frame(&grid, 0, "\r\n").ends_with(".\r\n"));
    }

    #[test]
    fn test_raw_newlines() {
        assert_eq!(raw_newlines(b"a\nb\n"), b"a\r\nb\r\n");
        assert_eq!(raw_newlines(b"a\r\nb"), b"a\r\nb");
        assert_eq!(raw_newlines(b"\n\n"), b"\r\n\r\n");
        assert!(raw_newlines(b"").is_empty());
    }

    #[test]
    fn test_quit_keys() {
        assert!(KeyPress::Char('q').is_quit());
        assert!(KeyPress::Char('Q').is_quit());
        assert!(KeyPress::Interrupt.is_quit());
        assert!(!KeyPress::Char('x').is_quit());
        assert!(!KeyPress::Other.is_quit());
    }

    #[test]
    fn test_translate_ctrl_c() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(ctrl_c), KeyPress::Interrupt);
        let plain = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(translate(plain), KeyPress::Char('c'));
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(translate(esc), KeyPress::Other);
    }
}
