use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::error::ExplorerError;
use crate::explorer::format::format_file_size;

pub const MAX_PREVIEW_BYTES: u64 = 1024 * 1024;
pub const MAX_PREVIEW_CHARS: usize = 5000;
pub const HEX_PREVIEW_BYTES: usize = 500;
pub const TRUNCATION_MARKER: &str = "\n\n... (Content truncated for preview)";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Preview {
    Text { content: String, truncated: bool },
    Binary { head: Vec<u8> },
    TooLarge { size: u64 },
}

impl Preview {
    pub fn render(&self) -> String {
        match self {
            Preview::Text { content, truncated } => {
                if *truncated {
                    format!("{content}{TRUNCATION_MARKER}")
                } else {
                    content.clone()
                }
            }
            Preview::Binary { head } => {
                let hex: Vec<String> = head.iter().map(|b| format!("{b:02x}")).collect();
                format!(
                    "Binary file detected. Showing first {HEX_PREVIEW_BYTES} bytes as hex:\n\n{}",
                    hex.join(" ")
                )
            }
            Preview::TooLarge { size } => format!(
                "File too large for preview ({})\nPlease use an appropriate application to view this file.",
                format_file_size(*size)
            ),
        }
    }
}

/// Bounded preview of a file. Files above `MAX_PREVIEW_BYTES` are never read.
pub fn preview_file(path: &Path) -> Result<Preview, ExplorerError> {
    let meta = fs::metadata(path).map_err(|e| ExplorerError::io("preview", path, e))?;
    if meta.is_dir() {
        return Err(ExplorerError::IsADirectory(path.to_path_buf()));
    }
    let size = meta.len();
    if size > MAX_PREVIEW_BYTES {
        return Ok(Preview::TooLarge { size });
    }

    let mut bytes = Vec::with_capacity(size as usize);
    File::open(path)
        .and_then(|f| f.take(MAX_PREVIEW_BYTES).read_to_end(&mut bytes))
        .map_err(|e| ExplorerError::io("preview", path, e))?;

    Ok(preview_bytes(bytes))
}

pub fn preview_bytes(bytes: Vec<u8>) -> Preview {
    match String::from_utf8(bytes) {
        Ok(text) => match text.char_indices().nth(MAX_PREVIEW_CHARS) {
            Some((cut, _)) => Preview::Text {
                content: text[..cut].to_string(),
                truncated: true,
            },
            None => Preview::Text {
                content: text,
                truncated: false,
            },
        },
        Err(err) => {
            let mut head = err.into_bytes();
            head.truncate(HEX_PREVIEW_BYTES);
            Preview::Binary { head }
        }
    }
}
