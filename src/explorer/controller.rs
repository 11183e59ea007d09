use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::ExplorerError;
use crate::explorer::dialogs::{
    DEFAULT_SAVE_EXTENSION, Dialogs, NoticeLevel, PickKind, PickRequest, with_default_extension,
};
use crate::explorer::listing::DirectoryListing;
use crate::explorer::metadata::FileInfo;
use crate::explorer::preview::preview_file;

pub const SELECT_FILE_HINT: &str = "Select a file to preview its contents";
pub const NO_FILE_SELECTED: &str = "No file selected";
pub const NEW_FILE_CREATED: &str = "New empty file created";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplorerState {
    pub current_directory: PathBuf,
    pub current_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    File,
    Directory,
    Empty,
}

/// Text shown in the two read-only panes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaneText {
    pub info: String,
    pub preview: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    OpenFile,
    OpenDirectory,
    CreateFile,
    DeleteFile,
    Refresh,
}

pub struct ExplorerController {
    state: ExplorerState,
    panes: PaneText,
    view: ViewKind,
}

impl ExplorerController {
    pub fn new(start_dir: PathBuf) -> Self {
        Self {
            state: ExplorerState {
                current_directory: start_dir,
                current_file: None,
            },
            panes: PaneText {
                info: String::new(),
                preview: String::new(),
            },
            view: ViewKind::Empty,
        }
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    pub fn panes(&self) -> &PaneText {
        &self.panes
    }

    pub fn view(&self) -> ViewKind {
        self.view
    }

    /// Shows metadata and a bounded preview of `path` and selects it.
    pub fn open_file(&mut self, path: &Path) -> Result<(), ExplorerError> {
        let info = FileInfo::read(path)?;
        // Preview failures are shown in the pane rather than failing the open.
        let preview = match preview_file(path) {
            Ok(p) => p.render(),
            Err(e) => format!("Error previewing file: {e}"),
        };
        self.state.current_directory = info.directory.clone();
        self.state.current_file = Some(path.to_path_buf());
        self.panes = PaneText {
            info: info.render(),
            preview,
        };
        self.view = ViewKind::File;
        tracing::info!(path = %path.display(), "opened file");
        Ok(())
    }

    pub fn open_directory(&mut self, path: &Path) -> Result<(), ExplorerError> {
        let listing = DirectoryListing::read(path)?;
        self.state.current_directory = path.to_path_buf();
        // The selection must live in the directory being shown.
        if self
            .state
            .current_file
            .as_deref()
            .is_some_and(|f| f.parent() != Some(path))
        {
            self.state.current_file = None;
        }
        self.panes = PaneText {
            info: listing.render(),
            preview: SELECT_FILE_HINT.to_string(),
        };
        self.view = ViewKind::Directory;
        tracing::info!(path = %path.display(), counts = %listing.counts(), "opened directory");
        Ok(())
    }

    pub fn create_file(&mut self, path: &Path) -> Result<(), ExplorerError> {
        if path.is_dir() {
            return Err(ExplorerError::IsADirectory(path.to_path_buf()));
        }
        File::create(path).map_err(|e| ExplorerError::io("create", path, e))?;
        let info = FileInfo::read(path)?;
        self.state.current_directory = info.directory.clone();
        self.state.current_file = Some(path.to_path_buf());
        self.panes = PaneText {
            info: info.render(),
            preview: NEW_FILE_CREATED.to_string(),
        };
        self.view = ViewKind::File;
        tracing::info!(path = %path.display(), "created file");
        Ok(())
    }

    /// Deletes the selected file after confirmation. Returns `Ok(None)` when
    /// the user declined, otherwise the removed path.
    pub fn delete_file(
        &mut self,
        dialogs: &mut dyn Dialogs,
    ) -> Result<Option<PathBuf>, ExplorerError> {
        let path = self
            .state
            .current_file
            .clone()
            .ok_or(ExplorerError::NoFileSelected)?;
        let name = display_name(&path);
        let confirmed = dialogs.confirm(
            "Confirm Delete",
            &format!("Are you sure you want to delete '{name}'?\n\nThis action cannot be undone."),
        );
        if !confirmed {
            return Ok(None);
        }
        fs::remove_file(&path).map_err(|e| ExplorerError::io("delete", &path, e))?;
        self.state.current_file = None;
        self.panes = PaneText {
            info: "File deleted successfully".to_string(),
            preview: NO_FILE_SELECTED.to_string(),
        };
        self.view = ViewKind::Empty;
        tracing::info!(path = %path.display(), "deleted file");
        Ok(Some(path))
    }

    /// Re-renders the last active view, falling back to the directory
    /// listing when the file is gone and to home when the directory is too.
    pub fn refresh(&mut self) -> Result<(), ExplorerError> {
        if self.view == ViewKind::File {
            if let Some(file) = self.state.current_file.clone() {
                if file.exists() {
                    return self.open_file(&file);
                }
            }
        }
        let dir = self.state.current_directory.clone();
        if dir.is_dir() {
            self.open_directory(&dir)?;
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
            tracing::warn!(missing = %dir.display(), home = %home.display(), "directory vanished, falling back to home");
            self.open_directory(&home)?;
        }
        // A selection that no longer exists cannot be deleted or previewed.
        if self.state.current_file.as_ref().is_some_and(|f| !f.exists()) {
            self.state.current_file = None;
        }
        Ok(())
    }

    /// Runs a user action end to end: asks for input through `dialogs`,
    /// performs it and reports the result.
    pub fn run(&mut self, action: Action, dialogs: &mut dyn Dialogs) {
        let result = match action {
            Action::OpenFile => self.pick(PickKind::OpenFile, dialogs).map(|p| {
                self.open_file(&p)
                    .map(|_| format!("File opened: {}", display_name(&p)))
            }),
            Action::OpenDirectory => self.pick(PickKind::OpenDirectory, dialogs).map(|p| {
                self.open_directory(&p)
                    .map(|_| format!("Directory opened: {}", p.display()))
            }),
            Action::CreateFile => self.pick(PickKind::SaveFile, dialogs).map(|p| {
                let p = with_default_extension(p, DEFAULT_SAVE_EXTENSION);
                self.create_file(&p)
                    .map(|_| format!("File created: {}", display_name(&p)))
            }),
            Action::DeleteFile => match self.delete_file(dialogs) {
                Ok(Some(p)) => Some(Ok(format!("File '{}' has been deleted", display_name(&p)))),
                Ok(None) => None,
                Err(e) => Some(Err(e)),
            },
            Action::Refresh => Some(
                self.refresh()
                    .map(|_| "View refreshed successfully".to_string()),
            ),
        };

        match result {
            None => {}
            Some(Ok(message)) => dialogs.notify(NoticeLevel::Info, "Success", &message),
            Some(Err(e)) if e.is_warning() => {
                dialogs.notify(NoticeLevel::Warning, "Warning", &e.to_string())
            }
            Some(Err(e)) => {
                tracing::warn!(?action, error = %e, "explorer action failed");
                dialogs.notify(NoticeLevel::Error, "Error", &e.to_string());
            }
        }
    }

    fn pick(&self, kind: PickKind, dialogs: &mut dyn Dialogs) -> Option<PathBuf> {
        let request = PickRequest {
            kind,
            initial_dir: self.state.current_directory.clone(),
        };
        dialogs.pick_path(&request)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
