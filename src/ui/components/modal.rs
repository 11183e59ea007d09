use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::explorer::dialogs::NoticeLevel;
use crate::ui::layout::centered_rect;
use crate::ui::line_input::PathInput;
use crate::ui::theme::Theme;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: &str, message: &str) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

fn popup(area: Rect, lines: u16) -> Rect {
    centered_rect(60, 30, 44, lines + 4, area)
}

fn frame<'b>(title: &'b str, theme: &Theme, accent: ratatui::style::Color) -> Block<'b> {
    Block::bordered()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(accent))
        .style(Style::default().bg(theme.colors.bg()).fg(theme.colors.fg()))
}

pub struct MessageBox<'a> {
    notice: &'a Notice,
    theme: &'a Theme,
}

impl<'a> MessageBox<'a> {
    pub fn new(notice: &'a Notice, theme: &'a Theme) -> Self {
        Self { notice, theme }
    }
}

impl Widget for MessageBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let accent = match self.notice.level {
            NoticeLevel::Info => colors.success(),
            NoticeLevel::Warning => colors.warning(),
            NoticeLevel::Error => colors.error(),
        };
        let rect = popup(area, self.notice.message.lines().count() as u16 + 2);
        Clear.render(rect, buf);

        let mut lines: Vec<Line> = self.notice.message.lines().map(Line::from).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] OK",
            Style::default().fg(colors.text_dim()),
        )));
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center)
            .block(frame(&self.notice.title, self.theme, accent))
            .render(rect, buf);
    }
}

pub struct ConfirmBox<'a> {
    title: &'a str,
    message: &'a str,
    theme: &'a Theme,
}

impl<'a> ConfirmBox<'a> {
    pub fn new(title: &'a str, message: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            message,
            theme,
        }
    }
}

impl Widget for ConfirmBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let rect = popup(area, self.message.lines().count() as u16 + 2);
        Clear.render(rect, buf);

        let mut lines: Vec<Line> = self.message.lines().map(Line::from).collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("[y] Yes", Style::default().fg(colors.error()).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("[n] No", Style::default().fg(colors.accent())),
        ]));
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .alignment(Alignment::Center)
            .block(frame(self.title, self.theme, colors.warning()))
            .render(rect, buf);
    }
}

pub struct PathPrompt<'a> {
    title: &'a str,
    input: &'a PathInput,
    theme: &'a Theme,
}

impl<'a> PathPrompt<'a> {
    pub fn new(title: &'a str, input: &'a PathInput, theme: &'a Theme) -> Self {
        Self {
            title,
            input,
            theme,
        }
    }
}

impl Widget for PathPrompt<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let rect = centered_rect(70, 30, 56, 8, area);
        Clear.render(rect, buf);

        let (before, at, after) = self.input.render_parts();
        let cursor = at.map(String::from).unwrap_or_else(|| " ".to_string());
        let mut lines = vec![
            Line::from(vec![
                Span::styled(before, Style::default().fg(colors.path())),
                Span::styled(
                    cursor,
                    Style::default().fg(colors.selected_fg()).bg(colors.selected_bg()),
                ),
                Span::styled(after, Style::default().fg(colors.path())),
            ]),
            Line::from(""),
        ];
        if self.input.has_filters() {
            lines.push(Line::from(Span::styled(
                format!("Filter: {}  [Ctrl-T] change", self.input.active_filter().label),
                Style::default().fg(colors.text_dim()),
            )));
        }
        if self.input.completion_error {
            lines.push(Line::from(Span::styled(
                "Cannot read that directory",
                Style::default().fg(colors.error()),
            )));
        }
        lines.push(Line::from(Span::styled(
            "[Tab] Complete  [Enter] Confirm  [Esc] Cancel",
            Style::default().fg(colors.text_dim()),
        )));

        Paragraph::new(lines)
            .block(frame(self.title, self.theme, colors.border_focused()))
            .render(rect, buf);
    }
}
