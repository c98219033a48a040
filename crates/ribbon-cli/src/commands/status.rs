//! Status command handler

use anyhow::Result;

use ribbon_core::theme::load_theme;
use ribbon_core::{BookmarkStore, Config, FileStorage, LoadOutcome};

use crate::output::{Output, OutputFormat};

fn describe(outcome: &LoadOutcome) -> String {
    match outcome {
        LoadOutcome::Fresh => "no saved bookmarks".to_string(),
        LoadOutcome::Restored { count } => format!("restored {} bookmark(s)", count),
        LoadOutcome::Recovered(e) => format!("recovered from unreadable data ({})", e),
    }
}

/// Show status information
pub fn show(
    store: &BookmarkStore<FileStorage>,
    config: &Config,
    outcome: &LoadOutcome,
    output: &Output,
) -> Result<()> {
    let stats = store.storage().stats();
    let theme = load_theme(store.storage());

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "bookmarks": store.len(),
                    "theme": theme,
                    "load": describe(outcome),
                    "storage": {
                        "bookmarks_exists": stats.bookmarks_exists,
                        "theme_exists": stats.theme_exists,
                        "backup_exists": stats.backup_exists,
                        "bookmarks_size": stats.bookmarks_size,
                        "theme_size": stats.theme_size,
                        "backup_size": stats.backup_size,
                        "total_size": stats.total_size()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.len());
        }
        OutputFormat::Human => {
            println!("Ribbon Status");
            println!("=============");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!("  Size:     {}", stats.total_size_human());
            println!("  Load:     {}", describe(outcome));
            if stats.backup_exists {
                println!(
                    "  Backup:   {}",
                    store
                        .storage()
                        .dir()
                        .join(ribbon_core::storage::BOOKMARKS_BACKUP_SLOT)
                        .display()
                );
            }
            println!();
            println!("Contents:");
            println!("  Bookmarks: {}", store.len());
            println!("  Theme:     {}", theme);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ribbon_core::SlotStorage;
    use tempfile::TempDir;

    #[test]
    fn test_describe_outcomes() {
        assert_eq!(describe(&LoadOutcome::Fresh), "no saved bookmarks");
        assert_eq!(
            describe(&LoadOutcome::Restored { count: 2 }),
            "restored 2 bookmark(s)"
        );
    }

    #[test]
    fn test_show_reads_file_storage() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            log_file: None,
        };

        let mut storage = config.storage();
        storage.set("bookmarks", "not json").unwrap();

        let (store, outcome) = BookmarkStore::open(config.storage());
        assert!(outcome.is_recovered());
        assert!(describe(&outcome).starts_with("recovered"));
        assert!(store.storage().stats().backup_exists);

        show(&store, &config, &outcome, &Output::new(OutputFormat::Quiet)).unwrap();
    }
}
