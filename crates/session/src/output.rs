//! Line formatting for session output.
//!
//! Every styled token goes through [`Style`], so a plain (uncolored) session
//! produces exactly the same text minus the escape codes.

use std::sync::OnceLock;

use crossterm::style::{Color, Stylize};
use figlet_rs::FIGfont;
use quiz_core::model::QuizId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self::colored()
    }
}

impl Style {
    #[must_use]
    pub fn colored() -> Self {
        Self { color: true }
    }

    #[must_use]
    pub fn plain() -> Self {
        Self { color: false }
    }

    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// `[id]` token used wherever a record is named.
    #[must_use]
    pub fn id(&self, id: QuizId) -> String {
        self.id_label(&id.to_string())
    }

    /// `[id]` token for an id as the client typed it.
    #[must_use]
    pub fn id_label(&self, id: &str) -> String {
        format!("[{}]", self.paint(id, Color::Magenta))
    }

    /// Separator between a question and its answer.
    #[must_use]
    pub fn separator(&self) -> String {
        self.paint("=>", Color::Magenta)
    }

    #[must_use]
    pub fn accent(&self, text: &str) -> String {
        self.paint(text, Color::Magenta)
    }

    #[must_use]
    pub fn success(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    /// Prompt text shown before reading a reply.
    #[must_use]
    pub fn question(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    /// Command prompt.
    #[must_use]
    pub fn prompt(&self, text: &str) -> String {
        if self.color {
            text.with(Color::Green).bold().to_string()
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn error(&self, message: &str) -> String {
        format!(
            "{}: {}",
            self.paint("Error", Color::Red),
            self.paint(message, Color::Red)
        )
    }

    /// Large banner rendering, used only for results that end a quiz.
    #[must_use]
    pub fn big(&self, text: &str, color: Color) -> String {
        let banner = render_banner(text);
        if self.color {
            banner
                .lines()
                .map(|line| line.with(color).to_string())
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            banner
        }
    }
}

fn banner_font() -> Option<&'static FIGfont> {
    static FONT: OnceLock<Option<FIGfont>> = OnceLock::new();
    FONT.get_or_init(|| match FIGfont::standard() {
        Ok(font) => Some(font),
        Err(err) => {
            tracing::warn!(%err, "figlet font unavailable, banners fall back to plain text");
            None
        }
    })
    .as_ref()
}

/// Figlet rendering of `text` without trailing blank lines.
#[must_use]
pub fn render_banner(text: &str) -> String {
    let rendered = banner_font()
        .and_then(|font| font.convert(text))
        .map_or_else(|| text.to_string(), |figure| figure.to_string());
    rendered.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_has_no_escape_codes() {
        let style = Style::plain();
        assert_eq!(style.id(QuizId::new(3)), "[3]");
        assert_eq!(style.separator(), "=>");
        assert_eq!(style.error("boom"), "Error: boom");
        assert!(!style.question("Q? ").contains('\u{1b}'));
    }

    #[test]
    fn colored_style_wraps_tokens() {
        let style = Style::colored();
        let id = style.id(QuizId::new(3));
        assert!(id.contains('\u{1b}'));
        assert!(id.contains('3'));
    }

    #[test]
    fn banner_spans_several_lines() {
        let banner = render_banner("Correcta");
        assert!(banner.lines().count() > 1);
        assert_ne!(banner, render_banner("Incorrecta"));
        assert_eq!(Style::plain().big("7", Color::Magenta), render_banner("7"));
    }
}
