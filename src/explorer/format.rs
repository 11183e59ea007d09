use std::path::Path;

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;

pub fn format_file_size(size: u64) -> String {
    if size < KB {
        format!("{size} bytes")
    } else if size < MB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else if size < GB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else {
        format!("{:.1} GB", size as f64 / GB as f64)
    }
}

/// Extension including the leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

pub fn file_type_name(path: &Path) -> &'static str {
    match extension_of(path).to_ascii_lowercase().as_str() {
        ".txt" => "Text Document",
        ".py" => "Python Script",
        ".rs" => "Rust Source",
        ".json" => "JSON Data",
        ".csv" => "CSV Data",
        ".html" => "HTML Document",
        ".css" => "CSS Stylesheet",
        ".js" => "JavaScript",
        ".jpg" => "JPEG Image",
        ".png" => "PNG Image",
        ".pdf" => "PDF Document",
        ".docx" => "Word Document",
        ".xlsx" => "Excel Spreadsheet",
        _ => "Unknown File Type",
    }
}
