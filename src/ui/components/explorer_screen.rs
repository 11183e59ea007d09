use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::explorer_app::{ExplorerApp, Modal, Pane};
use crate::ui::components::modal::{ConfirmBox, MessageBox, PathPrompt};
use crate::ui::layout::{AppLayout, pack_hint_lines, two_panes};

const HINTS: &[&str] = &[
    "[o] Open file",
    "[d] Open directory",
    "[n] New file",
    "[x] Delete",
    "[r] Refresh",
    "[Tab] Switch pane",
    "[q] Quit",
];

pub struct ExplorerScreen<'a> {
    app: &'a ExplorerApp,
}

impl<'a> ExplorerScreen<'a> {
    pub fn new(app: &'a ExplorerApp) -> Self {
        Self { app }
    }

    fn render_pane(&self, title: &str, text: &str, pane: Pane, area: Rect, buf: &mut Buffer) {
        let colors = &self.app.theme.colors;
        let border = if self.app.focus == pane {
            colors.border_focused()
        } else {
            colors.border()
        };
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .scroll((self.app.scroll[pane as usize], 0))
            .block(
                Block::bordered()
                    .title(format!(" {title} "))
                    .border_style(Style::default().fg(border)),
            )
            .render(area, buf);
    }
}

impl Widget for ExplorerScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.app.theme.colors;
        Block::default()
            .style(Style::default().bg(colors.bg()).fg(colors.fg()))
            .render(area, buf);

        let layout = AppLayout::new(area);
        let state = self.app.controller.state();
        Paragraph::new(vec![
            Line::from(Span::styled(
                " FILE EXPLORER",
                Style::default()
                    .fg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(" Current Directory: ", Style::default().fg(colors.header_fg())),
                Span::styled(
                    state.current_directory.display().to_string(),
                    Style::default().fg(colors.path()),
                ),
            ]),
        ])
        .style(Style::default().bg(colors.header_bg()))
        .render(layout.header, buf);

        let panes = self.app.controller.panes();
        let (left, right) = two_panes(layout.main);
        self.render_pane("File Information", &panes.info, Pane::Info, left, buf);
        self.render_pane("File Preview", &panes.preview, Pane::Preview, right, buf);

        let mut footer: Vec<Line> = Vec::new();
        if let Some(status) = &self.app.status {
            footer.push(Line::from(Span::styled(
                format!(" {status}"),
                Style::default().fg(colors.success()),
            )));
        }
        footer.extend(
            pack_hint_lines(HINTS, layout.footer.width as usize)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_dim())))),
        );
        Paragraph::new(footer).render(layout.footer, buf);

        match &self.app.modal {
            Modal::None => {}
            Modal::Notice(notice) => MessageBox::new(notice, self.app.theme).render(area, buf),
            Modal::Confirm { title, message, .. } => {
                ConfirmBox::new(title, message, self.app.theme).render(area, buf)
            }
            Modal::Prompt { title, input, .. } => {
                PathPrompt::new(title, input, self.app.theme).render(area, buf)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::Theme;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_panes_and_path() {
        let dir = tempfile::tempdir().unwrap();
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        let app = ExplorerApp::new(dir.path().to_path_buf(), theme);
        let area = Rect::new(0, 0, 120, 30);
        let mut buf = Buffer::empty(area);
        ExplorerScreen::new(&app).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("FILE EXPLORER"));
        assert!(text.contains("File Information"));
        assert!(text.contains("File Preview"));
        assert!(text.contains("DIRECTORY CONTENTS"));
    }
}
