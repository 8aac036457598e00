use crate::constants::{TAB_TITLE_KEEP_CHARS, TAB_TITLE_MAX_CHARS};
use std::path::Path;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Human-readable size: bytes below 1 KiB, otherwise KB/MB with one decimal.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

pub fn zoom_percent(zoom: f32) -> i32 {
    (zoom * 100.0).round() as i32
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn tab_title(path: &Path) -> String {
    let name = file_name(path);
    if name.chars().count() > TAB_TITLE_MAX_CHARS {
        let kept: String = name.chars().take(TAB_TITLE_KEEP_CHARS).collect();
        format!("{}...", kept)
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_size_in_bytes() {
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
    }

    #[test]
    fn test_size_in_kilobytes() {
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(1024), "1.0 KB");
    }

    #[test]
    fn test_size_in_megabytes() {
        assert_eq!(format_file_size(2_300_000), "2.2 MB");
        assert_eq!(format_file_size(MIB), "1.0 MB");
    }

    #[test]
    fn test_zoom_percent_rounds() {
        assert_eq!(zoom_percent(1.0), 100);
        assert_eq!(zoom_percent(1.25), 125);
        assert_eq!(zoom_percent(0.8), 80);
        assert_eq!(zoom_percent(1.0 / 1.25 / 1.25), 64);
    }

    #[test]
    fn test_short_tab_title_kept() {
        let path = PathBuf::from("/home/user/report.pdf");
        assert_eq!(tab_title(&path), "report.pdf");
    }

    #[test]
    fn test_long_tab_title_truncated() {
        let path = PathBuf::from("/tmp/a_very_long_document_name.pdf");
        assert_eq!(tab_title(&path), "a_very_long_docum...");
    }

    #[test]
    fn test_tab_title_counts_characters() {
        let path = PathBuf::from("年度报告年度报告年度报告年度报告年度报告年度.pdf");
        let title = tab_title(&path);
        assert_eq!(title.chars().count(), TAB_TITLE_KEEP_CHARS + 3);
        assert!(title.ends_with("..."));
    }
}
