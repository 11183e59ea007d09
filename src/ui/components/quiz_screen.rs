use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::quiz::session::Phase;
use crate::quiz_app::QuizApp;
use crate::ui::components::modal::MessageBox;
use crate::ui::components::progress_bar::ProgressBar;
use crate::ui::layout::{AppLayout, centered_rect, pack_hint_lines};

pub struct QuizScreen<'a> {
    app: &'a QuizApp,
}

impl<'a> QuizScreen<'a> {
    pub fn new(app: &'a QuizApp) -> Self {
        Self { app }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.app.theme.colors;
        let session = &self.app.session;
        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(30)])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                " QUIZ",
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" Score: {}", session.score()),
                Style::default().fg(colors.success()).add_modifier(Modifier::BOLD),
            )),
        ])
        .style(Style::default().bg(colors.header_bg()));
        title.render(parts[0], buf);

        ProgressBar::new("Score", session.score_ratio(), self.app.theme).render(parts[1], buf);
    }

    fn render_status_row(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.app.theme.colors;
        let session = &self.app.session;
        let parts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(16)])
            .split(area);

        let left = session.time_left();
        Paragraph::new(Span::styled(
            format!(" Time left: {left}s"),
            Style::default()
                .fg(colors.timer_for(left))
                .add_modifier(Modifier::BOLD),
        ))
        .render(parts[0], buf);

        if let Some(feedback) = &self.app.feedback {
            Paragraph::new(Span::styled(
                feedback.label(),
                Style::default()
                    .fg(feedback.foreground())
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .style(Style::default().bg(feedback.background()))
            .render(parts[1], buf);
        }
    }

    fn render_question(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.app.theme.colors;
        let session = &self.app.session;
        let Some(question) = session.current_question() else {
            return;
        };
        let answered = match session.phase() {
            Phase::Answered(_) => true,
            Phase::Idle | Phase::Finished => false,
        };

        let block = Block::bordered()
            .title(" Question ")
            .border_style(Style::default().fg(colors.border_focused()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(Span::styled(
                question.text.as_str(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (i, option) in question.options.iter().enumerate() {
            let selected = session.selected_option() == Some(i);
            let marker = if selected { "(*)" } else { "( )" };
            let mut style = Style::default().fg(colors.fg());
            if answered && i == question.correct_index {
                style = style.fg(colors.success()).add_modifier(Modifier::BOLD);
            } else if selected {
                style = style.fg(colors.selected_fg()).bg(colors.selected_bg());
            } else if answered {
                style = style.fg(colors.text_dim());
            }
            lines.push(Line::from(Span::styled(
                format!(" {marker} {}. {option}", i + 1),
                style,
            )));
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }

    fn render_result(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.app.theme.colors;
        let summary = self.app.session.summary();
        let rect = centered_rect(50, 40, 40, 9, area);
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Final Result",
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Score: {}/{} ({:.0}%)",
                summary.score,
                summary.total,
                summary.percent()
            )),
            Line::from(""),
            Line::from("Thanks for taking the quiz!"),
            Line::from(Span::styled(
                "Press any key to exit",
                Style::default().fg(colors.text_dim()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .title(" Finished ")
                    .border_style(Style::default().fg(colors.border_focused())),
            )
            .render(rect, buf);
    }
}

impl Widget for QuizScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.app.theme.colors;
        Block::default()
            .style(Style::default().bg(colors.bg()).fg(colors.fg()))
            .render(area, buf);

        if self.app.session.is_finished() {
            self.render_result(area, buf);
            return;
        }

        let layout = AppLayout::new(area);
        self.render_header(layout.header, buf);

        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(4)])
            .split(layout.main);
        self.render_status_row(body[0], buf);
        self.render_question(body[1], buf);

        let session = &self.app.session;
        let mut footer = vec![Line::from(Span::styled(
            format!(" Question {}/{}", session.current_index() + 1, session.total()),
            Style::default().fg(colors.text_dim()),
        ))];
        let hints: &[&str] = if session.is_answered() {
            &["[Enter] Next", "[q] Quit"]
        } else {
            &["[1-4] Choose", "[Enter] Submit", "[Esc] Skip", "[q] Quit"]
        };
        footer.extend(
            pack_hint_lines(hints, layout.footer.width as usize)
                .into_iter()
                .take(1)
                .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_dim())))),
        );
        Paragraph::new(footer).render(layout.footer, buf);

        if let Some(notice) = &self.app.notice {
            MessageBox::new(notice, self.app.theme).render(area, buf);
        }
    }
}
