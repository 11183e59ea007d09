use std::io;
use std::path::{MAIN_SEPARATOR, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::expand_tilde;
use crate::explorer::dialogs::{ALL_FILES, FileFilter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionMode {
    /// Directories plus files accepted by the active filter.
    Files,
    DirectoriesOnly,
}

const SCAN_BUDGET: usize = 1000;
const MAX_COMPLETIONS: usize = 100;

/// Single-line path editor with tab completion, used as the file picker.
pub struct PathInput {
    text: String,
    /// Cursor position as a char index.
    cursor: usize,
    mode: CompletionMode,
    filters: &'static [FileFilter],
    filter_index: usize,
    completions: Vec<String>,
    completion_index: Option<usize>,
    /// True if the last directory scan failed.
    pub completion_error: bool,
}

impl PathInput {
    pub fn new(text: &str, mode: CompletionMode, filters: &'static [FileFilter]) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            mode,
            filters,
            filter_index: 0,
            completions: Vec::new(),
            completion_index: None,
            completion_error: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    /// Entered path with `~` expanded. `None` when blank.
    pub fn path(&self) -> Option<PathBuf> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(expand_tilde(trimmed))
        }
    }

    pub fn active_filter(&self) -> FileFilter {
        self.filters
            .get(self.filter_index)
            .copied()
            .unwrap_or(ALL_FILES)
    }

    pub fn has_filters(&self) -> bool {
        self.filters.len() > 1
    }

    pub fn completion_count(&self) -> usize {
        self.completions.len()
    }

    /// (before cursor, char under cursor, after cursor) for styled rendering.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let at = self.byte_at(self.cursor);
        match self.text[at..].chars().next() {
            Some(ch) => (&self.text[..at], Some(ch), &self.text[at + ch.len_utf8()..]),
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Tab => {
                self.complete(true);
                return InputResult::Continue;
            }
            KeyCode::BackTab => {
                self.complete(false);
                return InputResult::Continue;
            }
            _ => {}
        }

        self.reset_completion();
        let len = self.text.chars().count();
        match key.code {
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len,
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_at(self.cursor);
            }
            KeyCode::Delete if self.cursor < len => self.remove_at(self.cursor),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = len,
            KeyCode::Char('u') if ctrl => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char('t') if ctrl => {
                if !self.filters.is_empty() {
                    self.filter_index = (self.filter_index + 1) % self.filters.len();
                }
            }
            KeyCode::Char(ch) if !ctrl => {
                let at = self.byte_at(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_at(&mut self, char_idx: usize) {
        let at = self.byte_at(char_idx);
        if let Some(ch) = self.text[at..].chars().next() {
            self.text.replace_range(at..at + ch.len_utf8(), "");
        }
    }

    fn reset_completion(&mut self) {
        self.completions.clear();
        self.completion_index = None;
        self.completion_error = false;
    }

    fn complete(&mut self, forward: bool) {
        if self.cursor < self.text.chars().count() {
            return;
        }
        match self.completion_index {
            None => {
                self.completions = self.scan();
                if !self.completions.is_empty() {
                    self.apply(0);
                }
            }
            Some(idx) => {
                let count = self.completions.len();
                let next = if forward {
                    (idx + 1) % count
                } else {
                    (idx + count - 1) % count
                };
                self.apply(next);
            }
        }
    }

    fn apply(&mut self, idx: usize) {
        self.completion_index = Some(idx);
        self.text = self.completions[idx].clone();
        self.cursor = self.text.chars().count();
    }

    fn scan(&mut self) -> Vec<String> {
        let seed = self.text.clone();
        let split = seed.rfind(['/', '\\']).map(|p| p + 1).unwrap_or(0);
        let (dir_part, partial) = seed.split_at(split);

        let dir = if dir_part.is_empty() {
            PathBuf::from(".")
        } else {
            expand_tilde(dir_part)
        };

        match std::fs::read_dir(&dir) {
            Ok(entries) => {
                let entries = entries.map(|r| {
                    r.map(|e| {
                        let is_dir = e.file_type().map(|t| t.is_dir()).unwrap_or(false);
                        (e.file_name().to_string_lossy().to_string(), is_dir)
                    })
                });
                self.collect(entries, dir_part, partial)
            }
            Err(_) => {
                self.completion_error = true;
                Vec::new()
            }
        }
    }

    /// Filters and orders scanned entries: directories first, then names.
    fn collect(
        &mut self,
        entries: impl Iterator<Item = io::Result<(String, bool)>>,
        dir_part: &str,
        partial: &str,
    ) -> Vec<String> {
        let show_hidden = partial.starts_with('.');
        let filter = self.active_filter();
        let mut found: Vec<(bool, String)> = Vec::new();

        for entry in entries.take(SCAN_BUDGET) {
            let Ok((name, is_dir)) = entry else {
                self.completion_error = true;
                return Vec::new();
            };
            if !name.starts_with(partial) || (!show_hidden && name.starts_with('.')) {
                continue;
            }
            let keep = is_dir
                || (self.mode == CompletionMode::Files && filter.matches(&name));
            if !keep {
                continue;
            }
            let full = if is_dir {
                format!("{dir_part}{name}{MAIN_SEPARATOR}")
            } else {
                format!("{dir_part}{name}")
            };
            found.push((is_dir, full));
        }

        found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        found.truncate(MAX_COMPLETIONS);
        found.into_iter().map(|(_, p)| p).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::dialogs::OPEN_FILTERS;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn files(text: &str) -> PathInput {
        PathInput::new(text, CompletionMode::Files, &[])
    }

    #[test]
    fn insert_and_cursor_movement() {
        let mut input = files("ac");
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Char('b')));
        assert_eq!(input.value(), "abc");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Char('>')));
        assert_eq!(input.value(), ">abc");
        input.handle(key(KeyCode::End));
        input.handle(key(KeyCode::Right));
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn backspace_and_delete_handle_multibyte() {
        let mut input = files("aéb");
        input.handle(key(KeyCode::Left));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "ab");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn ctrl_u_clears() {
        let mut input = files("/tmp/x");
        input.handle(ctrl('u'));
        assert_eq!(input.value(), "");
        assert_eq!(input.path(), None);
    }

    #[test]
    fn submit_and_cancel() {
        let mut input = files("x");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
        assert_eq!(input.handle(key(KeyCode::Char('y'))), InputResult::Continue);
    }

    #[test]
    fn render_parts_split_on_cursor() {
        let mut input = files("abc");
        assert_eq!(input.render_parts(), ("abc", None, ""));
        input.handle(key(KeyCode::Left));
        assert_eq!(input.render_parts(), ("ab", Some('c'), ""));
    }

    #[test]
    fn tab_completion_dirs_first_and_cycles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("alpha.txt"), "").unwrap();
        std::fs::write(dir.path().join("beta.txt"), "").unwrap();
        std::fs::create_dir(dir.path().join("gamma")).unwrap();
        let mut input = files(&format!("{}/", dir.path().display()));

        input.handle(key(KeyCode::Tab));
        assert_eq!(input.completion_count(), 3);
        assert!(input.value().ends_with(&format!("gamma{MAIN_SEPARATOR}")));
        input.handle(key(KeyCode::Tab));
        assert!(input.value().ends_with("alpha.txt"));
        input.handle(key(KeyCode::BackTab));
        assert!(input.value().ends_with(&format!("gamma{MAIN_SEPARATOR}")));
    }

    #[test]
    fn completion_respects_filter_and_mode() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::write(dir.path().join("b.py"), "").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let seed = format!("{}/", dir.path().display());

        // First filter is text files
        let mut input = PathInput::new(&seed, CompletionMode::Files, OPEN_FILTERS);
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.completion_count(), 2);

        // Cycle to Python files
        let mut input = PathInput::new(&seed, CompletionMode::Files, OPEN_FILTERS);
        input.handle(ctrl('t'));
        assert_eq!(input.active_filter().label, "Python files");
        input.handle(key(KeyCode::Tab));
        input.handle(key(KeyCode::Tab));
        assert!(input.value().ends_with("b.py"));

        let mut input = PathInput::new(&seed, CompletionMode::DirectoriesOnly, &[]);
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.completion_count(), 1);
    }

    #[test]
    fn hidden_entries_need_dot_prefix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".hidden"), "").unwrap();
        std::fs::write(dir.path().join("shown"), "").unwrap();

        let mut input = files(&format!("{}/", dir.path().display()));
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.completion_count(), 1);

        let mut input = files(&format!("{}/.h", dir.path().display()));
        input.handle(key(KeyCode::Tab));
        assert!(input.value().ends_with(".hidden"));
    }

    #[test]
    fn bad_directory_sets_error_until_next_edit() {
        let mut input = files("/nonexistent_zzz_dir/");
        input.handle(key(KeyCode::Tab));
        assert!(input.completion_error);
        input.handle(key(KeyCode::Char('x')));
        assert!(!input.completion_error);
    }

    #[test]
    fn collect_stops_on_entry_error() {
        let mut input = files("");
        let entries: Vec<io::Result<(String, bool)>> = vec![
            Ok(("a".to_string(), false)),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "mock")),
        ];
        assert!(input.collect(entries.into_iter(), "", "").is_empty());
        assert!(input.completion_error);
    }

    #[test]
    fn collect_caps_candidates() {
        let mut input = files("");
        let entries = (0..300).map(|i| Ok((format!("f{i:03}"), false)));
        assert_eq!(input.collect(entries, "", "").len(), MAX_COMPLETIONS);
    }
}
