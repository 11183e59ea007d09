use std::path::{MAIN_SEPARATOR, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};

use crate::explorer::controller::{Action, ExplorerController};
use crate::explorer::dialogs::{Dialogs, NoticeLevel, PickKind, PickRequest};
use crate::ui::components::modal::Notice;
use crate::ui::line_input::{CompletionMode, InputResult, PathInput};
use crate::ui::theme::Theme;

/// Answers already collected from the user for one controller action.
#[derive(Default)]
struct Answers {
    path: Option<PathBuf>,
    confirm: Option<bool>,
}

enum Pending {
    Pick(PickRequest),
    Confirm { title: String, message: String },
}

/// `Dialogs` for a non-blocking UI. A question without a prepared answer is
/// recorded as pending and answered negatively; the app then shows the
/// matching overlay and reruns the action with the user's answer.
struct DeferredDialogs {
    answers: Answers,
    pending: Option<Pending>,
    notices: Vec<Notice>,
}

impl DeferredDialogs {
    fn new(answers: Answers) -> Self {
        Self {
            answers,
            pending: None,
            notices: Vec::new(),
        }
    }
}

impl Dialogs for DeferredDialogs {
    fn pick_path(&mut self, request: &PickRequest) -> Option<PathBuf> {
        let picked = self.answers.path.take();
        if picked.is_none() {
            self.pending = Some(Pending::Pick(request.clone()));
        }
        picked
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        match self.answers.confirm.take() {
            Some(answer) => answer,
            None => {
                self.pending = Some(Pending::Confirm {
                    title: title.to_string(),
                    message: message.to_string(),
                });
                false
            }
        }
    }

    fn notify(&mut self, level: NoticeLevel, title: &str, message: &str) {
        self.notices.push(Notice::new(level, title, message));
    }
}

pub enum Modal {
    None,
    Prompt {
        action: Action,
        title: &'static str,
        input: PathInput,
    },
    Confirm {
        action: Action,
        title: String,
        message: String,
    },
    Notice(Notice),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Info,
    Preview,
}

pub struct ExplorerApp {
    pub controller: ExplorerController,
    pub theme: &'static Theme,
    pub modal: Modal,
    pub status: Option<String>,
    pub focus: Pane,
    pub scroll: [u16; 2],
    pub should_quit: bool,
}

impl ExplorerApp {
    pub fn new(start_dir: PathBuf, theme: &'static Theme) -> Self {
        let mut app = Self {
            controller: ExplorerController::new(start_dir.clone()),
            theme,
            modal: Modal::None,
            status: None,
            focus: Pane::Info,
            scroll: [0, 0],
            should_quit: false,
        };
        if let Err(e) = app.controller.open_directory(&start_dir) {
            app.modal = Modal::Notice(Notice::new(NoticeLevel::Error, "Error", &e.to_string()));
        }
        app
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match std::mem::replace(&mut self.modal, Modal::None) {
            Modal::None => self.handle_main_key(key),
            Modal::Notice(notice) => {
                if !matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.modal = Modal::Notice(notice);
                }
            }
            Modal::Confirm {
                action,
                title,
                message,
            } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.dispatch(
                    action,
                    Answers {
                        confirm: Some(true),
                        ..Default::default()
                    },
                ),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                _ => {
                    self.modal = Modal::Confirm {
                        action,
                        title,
                        message,
                    }
                }
            },
            Modal::Prompt {
                action,
                title,
                mut input,
            } => match input.handle(key) {
                InputResult::Cancel => {}
                InputResult::Submit => match input.path() {
                    Some(path) => self.dispatch(
                        action,
                        Answers {
                            path: Some(path),
                            ..Default::default()
                        },
                    ),
                    None => {
                        self.modal = Modal::Prompt {
                            action,
                            title,
                            input,
                        }
                    }
                },
                InputResult::Continue => {
                    self.modal = Modal::Prompt {
                        action,
                        title,
                        input,
                    }
                }
            },
        }
    }

    fn handle_main_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('o') => self.dispatch(Action::OpenFile, Answers::default()),
            KeyCode::Char('d') => self.dispatch(Action::OpenDirectory, Answers::default()),
            KeyCode::Char('n') => self.dispatch(Action::CreateFile, Answers::default()),
            KeyCode::Char('x') | KeyCode::Delete => {
                self.dispatch(Action::DeleteFile, Answers::default())
            }
            KeyCode::Char('r') | KeyCode::F(5) => self.dispatch(Action::Refresh, Answers::default()),
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Pane::Info => Pane::Preview,
                    Pane::Preview => Pane::Info,
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown => self.scroll_by(10),
            KeyCode::PageUp => self.scroll_by(-10),
            _ => {}
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let idx = self.focus as usize;
        self.scroll[idx] = (self.scroll[idx] as i32 + delta).clamp(0, u16::MAX as i32) as u16;
    }

    fn dispatch(&mut self, action: Action, answers: Answers) {
        let before = self.controller.panes().clone();
        let mut dialogs = DeferredDialogs::new(answers);
        self.controller.run(action, &mut dialogs);
        if self.controller.panes() != &before {
            self.scroll = [0, 0];
        }

        match dialogs.pending {
            Some(Pending::Pick(request)) => {
                self.modal = Modal::Prompt {
                    action,
                    title: request.kind.title(),
                    input: prompt_input(&request),
                };
                return;
            }
            Some(Pending::Confirm { title, message }) => {
                self.modal = Modal::Confirm {
                    action,
                    title,
                    message,
                };
                return;
            }
            None => {}
        }

        for notice in dialogs.notices {
            match notice.level {
                NoticeLevel::Info => self.status = Some(notice.message),
                NoticeLevel::Warning | NoticeLevel::Error => {
                    self.status = None;
                    self.modal = Modal::Notice(notice);
                }
            }
        }
    }
}

fn prompt_input(request: &PickRequest) -> PathInput {
    let mut seed = request.initial_dir.display().to_string();
    if !seed.ends_with(MAIN_SEPARATOR) {
        seed.push(MAIN_SEPARATOR);
    }
    let mode = match request.kind {
        PickKind::OpenDirectory => CompletionMode::DirectoriesOnly,
        PickKind::OpenFile | PickKind::SaveFile => CompletionMode::Files,
    };
    PathInput::new(&seed, mode, request.kind.filters())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::fs;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut ExplorerApp, text: &str) {
        for ch in text.chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn clear_prompt(app: &mut ExplorerApp) {
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    }

    fn new_app(dir: &std::path::Path) -> ExplorerApp {
        let theme: &'static Theme = Box::leak(Box::new(Theme::default()));
        ExplorerApp::new(dir.to_path_buf(), theme)
    }

    #[test]
    fn starts_with_directory_listing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        let app = new_app(dir.path());
        assert!(matches!(app.modal, Modal::None));
        assert!(app.controller.panes().info.contains("0 folders, 1 files"));
    }

    #[test]
    fn open_file_through_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        fs::write(&path, "hello").unwrap();
        let mut app = new_app(dir.path());

        app.handle_key(key(KeyCode::Char('o')));
        match &app.modal {
            Modal::Prompt { input, .. } => {
                assert!(input.value().starts_with(&dir.path().display().to_string()))
            }
            _ => panic!("expected prompt"),
        }
        clear_prompt(&mut app);
        type_text(&mut app, &path.display().to_string());
        app.handle_key(key(KeyCode::Enter));

        assert!(matches!(app.modal, Modal::None));
        assert_eq!(app.controller.panes().preview, "hello");
        assert_eq!(app.status.as_deref(), Some("File opened: a.txt"));
    }

    #[test]
    fn cancelled_prompt_changes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        let before = app.controller.state().clone();
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Esc));
        assert!(matches!(app.modal, Modal::None));
        assert_eq!(app.controller.state(), &before);
        assert!(!app.should_quit);
    }

    #[test]
    fn delete_asks_then_removes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        fs::write(&path, "x").unwrap();
        let mut app = new_app(dir.path());
        app.controller.open_file(&path).unwrap();

        app.handle_key(key(KeyCode::Char('x')));
        match &app.modal {
            Modal::Confirm { message, .. } => assert!(message.contains("gone.txt")),
            _ => panic!("expected confirmation"),
        }
        assert!(path.exists());

        app.handle_key(key(KeyCode::Char('y')));
        assert!(!path.exists());
        assert!(app.controller.state().current_file.is_none());
        assert_eq!(app.status.as_deref(), Some("File 'gone.txt' has been deleted"));
    }

    #[test]
    fn delete_declined_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.txt");
        fs::write(&path, "x").unwrap();
        let mut app = new_app(dir.path());
        app.controller.open_file(&path).unwrap();

        app.handle_key(key(KeyCode::Char('x')));
        app.handle_key(key(KeyCode::Char('n')));
        assert!(matches!(app.modal, Modal::None));
        assert!(path.exists());
    }

    #[test]
    fn delete_without_selection_shows_warning() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.handle_key(key(KeyCode::Char('x')));
        match &app.modal {
            Modal::Notice(n) => assert_eq!(n.level, NoticeLevel::Warning),
            _ => panic!("expected warning"),
        }
        // Other keys don't dismiss the notice
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.modal, Modal::None));
    }

    #[test]
    fn failed_open_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.handle_key(key(KeyCode::Char('d')));
        type_text(&mut app, "missing_zzz");
        app.handle_key(key(KeyCode::Enter));
        match &app.modal {
            Modal::Notice(n) => assert_eq!(n.level, NoticeLevel::Error),
            _ => panic!("expected error notice"),
        }
        assert_eq!(app.controller.state().current_directory, dir.path());
    }

    #[test]
    fn scroll_is_per_pane() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = new_app(dir.path());
        app.handle_key(key(KeyCode::Char('j')));
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::PageDown));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.scroll, [1, 9]);
        app.handle_key(key(KeyCode::PageUp));
        assert_eq!(app.scroll, [1, 0]);
    }
}
