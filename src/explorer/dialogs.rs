use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    /// Extensions without the dot. Empty means any file.
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    pub fn matches(&self, name: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        Path::new(name)
            .extension()
            .map(|e| {
                let e = e.to_string_lossy().to_ascii_lowercase();
                self.extensions.iter().any(|x| *x == e)
            })
            .unwrap_or(false)
    }
}

pub const ALL_FILES: FileFilter = FileFilter {
    label: "All files",
    extensions: &[],
};

pub const OPEN_FILTERS: &[FileFilter] = &[
    FileFilter { label: "Text files", extensions: &["txt"] },
    FileFilter { label: "Python files", extensions: &["py"] },
    FileFilter { label: "JSON files", extensions: &["json"] },
    FileFilter { label: "CSV files", extensions: &["csv"] },
    ALL_FILES,
];

pub const SAVE_FILTERS: &[FileFilter] = &[
    FileFilter { label: "Text files", extensions: &["txt"] },
    FileFilter { label: "Python files", extensions: &["py"] },
    FileFilter { label: "JSON files", extensions: &["json"] },
    ALL_FILES,
];

pub const DEFAULT_SAVE_EXTENSION: &str = "txt";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickKind {
    OpenFile,
    OpenDirectory,
    SaveFile,
}

impl PickKind {
    pub fn title(self) -> &'static str {
        match self {
            PickKind::OpenFile => "Select a file to open",
            PickKind::OpenDirectory => "Select a directory",
            PickKind::SaveFile => "Create new file",
        }
    }

    pub fn filters(self) -> &'static [FileFilter] {
        match self {
            PickKind::OpenFile => OPEN_FILTERS,
            PickKind::OpenDirectory => &[],
            PickKind::SaveFile => SAVE_FILTERS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickRequest {
    pub kind: PickKind,
    pub initial_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Modal interaction the explorer needs from its host.
pub trait Dialogs {
    /// Returns `None` when the user cancels.
    fn pick_path(&mut self, request: &PickRequest) -> Option<PathBuf>;
    fn confirm(&mut self, title: &str, message: &str) -> bool;
    fn notify(&mut self, level: NoticeLevel, title: &str, message: &str);
}

/// Appends the default extension when the entered name has none.
pub fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matching() {
        let text = OPEN_FILTERS[0];
        assert!(text.matches("notes.TXT"));
        assert!(!text.matches("main.py"));
        assert!(!text.matches("README"));
        assert!(ALL_FILES.matches("README"));
    }

    #[test]
    fn default_extension_applied_once() {
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/new"), "txt"),
            PathBuf::from("/tmp/new.txt")
        );
        assert_eq!(
            with_default_extension(PathBuf::from("/tmp/new.py"), "txt"),
            PathBuf::from("/tmp/new.py")
        );
    }
}
