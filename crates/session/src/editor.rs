//! Single-line terminal editor used to change a value in place.
//!
//! Only the local terminal session uses it: the current value is put in the
//! input line and can be edited with the usual keys before Enter.

use std::io::{self, Write};

use crossterm::QueueableCommand;
use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};

/// Result of feeding one key to a [`LineDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Editing,
    Submit,
    /// Esc or Ctrl-C: give the original value back.
    Cancel,
    /// Ctrl-D on an empty line.
    Eof,
}

/// Text being edited plus a cursor counted in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDraft {
    buffer: String,
    cursor: usize,
}

impl LineDraft {
    /// Start with `initial` and the cursor at its end.
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            cursor: initial.chars().count(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(index, _)| index)
    }

    pub fn apply(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Editing;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter => return KeyOutcome::Submit,
            KeyCode::Esc => return KeyOutcome::Cancel,
            KeyCode::Char('c') if ctrl => return KeyOutcome::Cancel,
            KeyCode::Char('d') if ctrl && self.buffer.is_empty() => return KeyOutcome::Eof,
            KeyCode::Home => self.cursor = 0,
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Char('e') if ctrl => self.cursor = self.len(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Backspace if self.cursor > 0 => {
                let start = self.byte_index(self.cursor - 1);
                let end = self.byte_index(self.cursor);
                self.buffer.replace_range(start..end, "");
                self.cursor -= 1;
            }
            KeyCode::Delete if self.cursor < self.len() => {
                let start = self.byte_index(self.cursor);
                let end = self.byte_index(self.cursor + 1);
                self.buffer.replace_range(start..end, "");
            }
            KeyCode::Char('u') if ctrl => {
                let end = self.byte_index(self.cursor);
                self.buffer.replace_range(..end, "");
                self.cursor = 0;
            }
            KeyCode::Char('k') if ctrl => {
                let start = self.byte_index(self.cursor);
                self.buffer.truncate(start);
            }
            KeyCode::Char(ch) if !ctrl => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        KeyOutcome::Editing
    }
}

struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn render(
    out: &mut impl Write,
    prompt: &str,
    prompt_width: usize,
    draft: &LineDraft,
) -> io::Result<()> {
    let column = u16::try_from(prompt_width + draft.cursor()).unwrap_or(u16::MAX);
    out.queue(MoveToColumn(0))?
        .queue(Clear(ClearType::CurrentLine))?
        .queue(Print(prompt))?
        .queue(Print(draft.text()))?
        .queue(MoveToColumn(column))?;
    out.flush()
}

/// Show `prompt` followed by `initial` as editable text and block until Enter.
///
/// `prompt_width` is the visible width of `prompt` (it may carry escape codes).
/// Returns `Ok(None)` on Ctrl-D with an empty line.
///
/// # Errors
///
/// Returns the I/O error if the terminal cannot be switched to raw mode,
/// drawn on, or read from.
pub fn edit_line(prompt: &str, prompt_width: usize, initial: &str) -> io::Result<Option<String>> {
    let _guard = RawModeGuard::acquire()?;
    let mut stdout = io::stdout();
    let mut draft = LineDraft::new(initial);

    let edited = loop {
        render(&mut stdout, prompt, prompt_width, &draft)?;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match draft.apply(key) {
            KeyOutcome::Editing => {}
            KeyOutcome::Submit => break Some(draft.buffer),
            KeyOutcome::Cancel => {
                draft = LineDraft::new(initial);
                render(&mut stdout, prompt, prompt_width, &draft)?;
                break Some(draft.buffer);
            }
            KeyOutcome::Eof => break None,
        }
    };

    stdout.queue(Print("\r\n"))?;
    stdout.flush()?;
    Ok(edited)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn feed(draft: &mut LineDraft, keys: &[KeyEvent]) -> KeyOutcome {
        let mut outcome = KeyOutcome::Editing;
        for key in keys {
            outcome = draft.apply(*key);
        }
        outcome
    }

    #[test]
    fn starts_with_the_current_value_and_cursor_at_end() {
        let draft = LineDraft::new("Roma");
        assert_eq!(draft.text(), "Roma");
        assert_eq!(draft.cursor(), 4);
    }

    #[test]
    fn edits_in_place() {
        let mut draft = LineDraft::new("Roma");
        let outcome = feed(
            &mut draft,
            &[
                key(KeyCode::Backspace),
                key(KeyCode::Char('e')),
                key(KeyCode::Home),
                key(KeyCode::Delete),
                key(KeyCode::Char('R')),
                key(KeyCode::Enter),
            ],
        );
        assert_eq!(outcome, KeyOutcome::Submit);
        assert_eq!(draft.text(), "Rome");
    }

    #[test]
    fn cursor_stays_in_bounds_on_multibyte_text() {
        let mut draft = LineDraft::new("né");
        feed(&mut draft, &[key(KeyCode::Right), key(KeyCode::Backspace)]);
        assert_eq!(draft.text(), "n");
        let keys = [key(KeyCode::Left), key(KeyCode::Left), key(KeyCode::Char('ü'))];
        feed(&mut draft, &keys);
        assert_eq!(draft.text(), "ün");
        assert_eq!(draft.cursor(), 1);
    }

    #[test]
    fn kill_keys_cut_around_the_cursor() {
        let mut draft = LineDraft::new("Capital of Italy");
        feed(&mut draft, &[ctrl('a'), key(KeyCode::Right), ctrl('k')]);
        assert_eq!(draft.text(), "C");
        feed(&mut draft, &[ctrl('e'), ctrl('u')]);
        assert_eq!(draft.text(), "");
        assert_eq!(draft.cursor(), 0);
    }

    #[test]
    fn cancel_and_eof() {
        let mut draft = LineDraft::new("old");
        assert_eq!(draft.apply(key(KeyCode::Esc)), KeyOutcome::Cancel);
        assert_eq!(draft.apply(ctrl('c')), KeyOutcome::Cancel);
        // Ctrl-D only ends input on an empty line.
        assert_eq!(draft.apply(ctrl('d')), KeyOutcome::Editing);
        feed(&mut draft, &[ctrl('u')]);
        assert_eq!(draft.apply(ctrl('d')), KeyOutcome::Eof);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut draft = LineDraft::new("a");
        let mut release = key(KeyCode::Backspace);
        release.kind = KeyEventKind::Release;
        assert_eq!(draft.apply(release), KeyOutcome::Editing);
        assert_eq!(draft.text(), "a");
    }
}
