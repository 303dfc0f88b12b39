//! Status bar widget for the bottom of the viewer.
//!
//! Format: `● Title │ bullet │ direction │ position │ notice │ → hint`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// Status bar content.
#[derive(Debug, Clone, Default)]
pub struct StatusBarContent {
    /// Document title.
    pub title: String,
    /// Current bullet kind name.
    pub bullet: String,
    /// Current layout direction.
    pub direction: String,
    /// Scroll position (e.g. "12%").
    pub position: Option<String>,
    /// Transient message, such as the last tapped image.
    pub notice: Option<String>,
    /// Key hint.
    pub hint: Option<String>,
}

impl StatusBarContent {
    /// Create a "terminal too small" warning.
    pub fn too_small() -> Self {
        Self {
            title: "Terminal too small".into(),
            hint: Some("Resize to at least 20x5".into()),
            ..Self::default()
        }
    }
}

/// Status bar widget.
pub struct StatusBar<'a> {
    content: &'a StatusBarContent,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget.
    pub fn new(content: &'a StatusBarContent, theme: &'a Theme) -> Self {
        Self { content, theme }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let separator = || Span::styled(" │ ", Style::default().fg(self.theme.muted));

        let mut spans = vec![
            Span::styled("● ", Style::default().fg(self.theme.primary)),
            Span::styled(&self.content.title, Style::default().fg(self.theme.text)),
        ];

        for field in [&self.content.bullet, &self.content.direction] {
            if !field.is_empty() {
                spans.push(separator());
                spans.push(Span::styled(field, Style::default().fg(self.theme.subtext)));
            }
        }

        if let Some(ref position) = self.content.position {
            spans.push(separator());
            spans.push(Span::styled(position, Style::default().fg(self.theme.muted)));
        }

        if let Some(ref notice) = self.content.notice {
            spans.push(separator());
            spans.push(Span::styled(notice, Style::default().fg(self.theme.image)));
        }

        if let Some(ref hint) = self.content.hint {
            spans.push(separator());
            spans.push(Span::styled(
                format!("→ {hint}"),
                Style::default().fg(self.theme.secondary),
            ));
        }

        let line = Line::from(spans);
        let paragraph = Paragraph::new(line).style(Style::default().bg(self.theme.surface));
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use insta::assert_snapshot;

    #[test]
    fn test_too_small_content() {
        let content = StatusBarContent::too_small();
        assert!(content.title.contains("too small"));
        assert!(content.hint.is_some());
    }

    #[test]
    fn test_renders_fields_in_order() {
        let content = StatusBarContent {
            title: "holidays.json".into(),
            bullet: "diamond".into(),
            direction: "ltr".into(),
            position: Some("0%".into()),
            notice: Some("Tapped heart.png".into()),
            hint: Some("q quit".into()),
        };
        let theme = Theme::default();
        let area = Rect::new(0, 0, 100, 1);
        let mut buffer = Buffer::empty(area);
        StatusBar::new(&content, &theme).render(area, &mut buffer);
        assert_snapshot!(
            buffer_to_string(&buffer),
            @"● holidays.json │ diamond │ ltr │ 0% │ Tapped heart.png │ → q quit"
        );
    }

    #[test]
    fn test_skips_empty_fields() {
        let content = StatusBarContent {
            title: "t".into(),
            ..StatusBarContent::default()
        };
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 1);
        let mut buffer = Buffer::empty(area);
        StatusBar::new(&content, &theme).render(area, &mut buffer);
        assert_eq!(buffer_to_string(&buffer), "● t");
    }
}
