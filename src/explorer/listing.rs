use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExplorerError;
use crate::explorer::format::{extension_of, format_file_size};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    /// `None` when the entry could not be measured.
    pub size: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct DirectoryListing {
    pub directory: PathBuf,
    pub folders: Vec<ListingEntry>,
    pub files: Vec<ListingEntry>,
}

impl DirectoryListing {
    /// Lists the immediate children of `dir`. Folder sizes are a recursive,
    /// best-effort walk; a failure inside one subtree never aborts the listing.
    pub fn read(dir: &Path) -> Result<Self, ExplorerError> {
        let meta = fs::metadata(dir).map_err(|e| ExplorerError::io("open directory", dir, e))?;
        if !meta.is_dir() {
            return Err(ExplorerError::NotADirectory(dir.to_path_buf()));
        }
        let entries = fs::read_dir(dir).map_err(|e| ExplorerError::io("read directory", dir, e))?;

        let mut folders = Vec::new();
        let mut files = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path();
            if path.is_dir() {
                folders.push(ListingEntry {
                    name,
                    size: Some(directory_size(&path)),
                });
            } else {
                files.push(ListingEntry {
                    name,
                    size: fs::metadata(&path).ok().map(|m| m.len()),
                });
            }
        }

        folders.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            directory: dir.to_path_buf(),
            folders,
            files,
        })
    }

    pub fn total(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    pub fn counts(&self) -> String {
        format!(
            "{} folders, {} files",
            self.folders.len(),
            self.files.len()
        )
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "DIRECTORY CONTENTS\n{}\n\n Directory: {}\n Total Items: {} ({})\n\n FOLDERS ({}):\n {}\n",
            "=".repeat(50),
            self.directory.display(),
            self.total(),
            self.counts(),
            self.folders.len(),
            "-".repeat(30),
        );
        for folder in &self.folders {
            match folder.size {
                Some(size) => {
                    out.push_str(&format!("[D] {} ({})\n", folder.name, format_file_size(size)))
                }
                None => out.push_str(&format!("[D] {} (Size unknown)\n", folder.name)),
            }
        }

        out.push_str(&format!("\nFILES ({}):\n{}\n", self.files.len(), "-".repeat(30)));
        for file in &self.files {
            match file.size {
                Some(size) => out.push_str(&format!(
                    "[F] {} ({}) {}\n",
                    file.name,
                    format_file_size(size),
                    extension_of(Path::new(&file.name))
                )),
                None => out.push_str(&format!("[F] {} (Size unknown)\n", file.name)),
            }
        }
        out
    }
}

/// Total size of regular files below `dir`. Unreadable entries count as 0.
/// Symlinks are not followed.
pub fn directory_size(dir: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    let mut total = 0;
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if file_type.is_dir() {
            total += directory_size(&entry.path());
        } else if file_type.is_file() {
            total += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }
    }
    total
}
