//! Interactive confirmation before purging the registry

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, warn};

const YES: char = 'y';
const NO: char = 'n';

/// Interpretation of a single keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Not decisive; ask again
    Undecided,
}

/// Something that yields one answer per keystroke.
///
/// `Ok(None)` means input is exhausted.
pub trait KeySource {
    fn next_answer(&mut self) -> io::Result<Option<Answer>>;

    /// Keys are read without echo, leaving the cursor on the prompt line
    fn is_raw(&self) -> bool {
        false
    }
}

/// Maps a typed character to an answer, ignoring case
pub fn answer_for_char(c: char) -> Answer {
    match c.to_ascii_lowercase() {
        YES => Answer::Yes,
        NO => Answer::No,
        _ => Answer::Undecided,
    }
}

/// Maps a raw terminal key event to an answer
pub fn answer_for_key_event(key: KeyEvent) -> Answer {
    match (key.code, key.modifiers) {
        // Ctrl+C is a decline, not a keystroke
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Answer::No,
        (KeyCode::Esc, _) => Answer::No,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            answer_for_char(c)
        }
        _ => Answer::Undecided,
    }
}

/// Asks whether to clear recent files until a decisive answer arrives.
///
/// Any key other than y/n re-prompts without limit. Exhausted input or a
/// read error counts as a decline. Prompts are written to `out` unless `quiet`.
pub fn confirm_purge<K, W>(keys: &mut K, quiet: bool, out: &mut W) -> bool
where
    K: KeySource + ?Sized,
    W: Write,
{
    if !quiet {
        write!(out, "Are you sure you want to clear recent files ({}/{}) ", YES, NO).ok();
        out.flush().ok();
    }

    loop {
        let answer = match keys.next_answer() {
            Ok(Some(answer)) => answer,
            Ok(None) => {
                debug!("confirmation input exhausted, declining");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "could not read confirmation, declining");
                return false;
            }
        };

        if !quiet && keys.is_raw() {
            writeln!(out).ok();
        }

        match answer {
            Answer::Yes => return true,
            Answer::No => return false,
            Answer::Undecided => {
                if !quiet {
                    writeln!(out, "Please press {} or {}", YES, NO).ok();
                    out.flush().ok();
                }
            }
        }
    }
}

/// Reads answers from a line-oriented stream, one line per answer.
///
/// The first non-whitespace character of each line decides; a blank line is undecided.
pub struct LineKeys<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineKeys<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> KeySource for LineKeys<R> {
    fn next_answer(&mut self) -> io::Result<Option<Answer>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(
            line.trim()
                .chars()
                .next()
                .map(answer_for_char)
                .unwrap_or(Answer::Undecided),
        ))
    }
}

/// Fixed sequence of keystrokes, for scripted confirmations
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<char>,
}

impl ScriptedKeys {
    pub fn new(keys: &str) -> Self {
        Self {
            keys: keys.chars().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_answer(&mut self) -> io::Result<Option<Answer>> {
        Ok(self.keys.pop_front().map(answer_for_char))
    }
}

/// Keystrokes from the controlling terminal.
///
/// Reads single keys in raw mode when stdin is a terminal, and falls back to
/// line input when stdin is piped.
pub struct TerminalKeys {
    interactive: bool,
}

impl TerminalKeys {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for TerminalKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for TerminalKeys {
    fn next_answer(&mut self) -> io::Result<Option<Answer>> {
        if !self.interactive {
            return LineKeys::new(io::stdin().lock()).next_answer();
        }

        let key = {
            let _raw = RawMode::enable()?;
            read_key_press()?
        };
        Ok(Some(answer_for_key_event(key)))
    }

    fn is_raw(&self) -> bool {
        self.interactive
    }
}

fn read_key_press() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

/// Restores cooked mode when dropped
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        disable_raw_mode().ok();
    }
}
