use std::fs::{self, File, Metadata, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use crate::error::ExplorerError;
use crate::explorer::format::{extension_of, file_type_name, format_file_size};

const RULE_WIDTH: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permissions {
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
}

#[derive(Clone, Debug)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    pub directory: PathBuf,
    pub size: u64,
    pub extension: String,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub permissions: Permissions,
    pub type_name: &'static str,
}

impl FileInfo {
    pub fn read(path: &Path) -> Result<Self, ExplorerError> {
        let meta = fs::metadata(path).map_err(|e| ExplorerError::io("stat", path, e))?;
        if meta.is_dir() {
            return Err(ExplorerError::IsADirectory(path.to_path_buf()));
        }
        Ok(Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            directory: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            size: meta.len(),
            extension: extension_of(path),
            created: meta.created().ok().map(local_time),
            modified: meta.modified().ok().map(local_time),
            permissions: permissions_of(path, &meta),
            type_name: file_type_name(path),
        })
    }

    pub fn render(&self) -> String {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };
        let extension = if self.extension.is_empty() {
            "No extension"
        } else {
            self.extension.as_str()
        };
        format!(
            "FILE INFORMATION\n{rule}\n\n \
             File Name: {name}\n \
             Full Path: {path}\n \
             Directory: {dir}\n\n \
             File Size: {size}\n \
             Extension: {extension}\n\n \
             Created: {created}\n \
             Modified: {modified}\n\n \
             Permissions:\n \
             - Readable: {r}\n \
             - Writable: {w}\n \
             - Executable: {x}\n\n \
             File Type: {kind}\n",
            rule = "=".repeat(RULE_WIDTH),
            name = self.name,
            path = self.path.display(),
            dir = self.directory.display(),
            size = format_file_size(self.size),
            created = format_time(self.created),
            modified = format_time(self.modified),
            r = yes_no(self.permissions.readable),
            w = yes_no(self.permissions.writable),
            x = yes_no(self.permissions.executable),
            kind = self.type_name,
        )
    }
}

fn local_time(t: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(t)
}

fn format_time(t: Option<DateTime<Local>>) -> String {
    t.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Unavailable".to_string())
}

/// Readable and writable are what this process can open, not the mode bits.
/// A write-only open does not truncate.
fn permissions_of(path: &Path, meta: &Metadata) -> Permissions {
    Permissions {
        readable: File::open(path).is_ok(),
        writable: OpenOptions::new().write(true).open(path).is_ok(),
        executable: is_executable(meta),
    }
}

#[cfg(unix)]
fn is_executable(meta: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_meta: &Metadata) -> bool {
    false
}
