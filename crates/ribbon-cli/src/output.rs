//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use ribbon_core::view::EMPTY_MESSAGE;
use ribbon_core::{Bookmark, ListView};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single bookmark
    pub fn print_bookmark(&self, index: usize, bookmark: &Bookmark) {
        match self.format {
            OutputFormat::Human => {
                println!("Index:   {}", index);
                println!("Title:   {}", bookmark.title);
                println!("URL:     {}", bookmark.url);
                println!(
                    "Added:   {}",
                    bookmark.date_added.as_datetime().format("%Y-%m-%d %H:%M")
                );
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "index": index,
                        "title": bookmark.title,
                        "url": bookmark.url,
                        "dateAdded": bookmark.date_added,
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", bookmark.url);
            }
        }
    }

    /// Print a rendered bookmark list
    pub fn print_view(&self, view: &ListView) {
        match self.format {
            OutputFormat::Human => {
                if view.is_empty() {
                    println!("{}", EMPTY_MESSAGE);
                    return;
                }
                let width = view
                    .items()
                    .iter()
                    .map(|item| item.index.to_string().len())
                    .max()
                    .unwrap_or(1);
                for item in view.items() {
                    println!(
                        "{:>width$} | {} | {} | {}",
                        item.index,
                        truncate(&item.title, 35),
                        truncate(&item.url, 45),
                        item.date_added.format("%Y-%m-%d"),
                        width = width
                    );
                }
                println!("\n{} bookmark(s)", view.len());
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(view.items()).unwrap_or_else(|_| "[]".into())
                );
            }
            OutputFormat::Quiet => {
                for item in view.items() {
                    println!("{}", item.url);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (suppressed in quiet mode)
    pub fn warn(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Truncate a string to max characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("ünïcödé tïtlé", 8), "ünïcö...");
        assert_eq!(truncate("日本語", 3), "日本語");
    }
}
