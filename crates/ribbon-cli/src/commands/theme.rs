//! Theme command handlers

use anyhow::{anyhow, Context, Result};

use ribbon_core::theme::{load_theme, save_theme};
use ribbon_core::{SlotStorage, Theme};

use crate::output::{Output, OutputFormat};

fn print_theme(theme: Theme, output: &Output) {
    match output.format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "theme": theme })),
        OutputFormat::Quiet | OutputFormat::Human => println!("{}", theme),
    }
}

/// Show the saved theme
pub fn show(storage: &impl SlotStorage, output: &Output) -> Result<()> {
    print_theme(load_theme(storage), output);
    Ok(())
}

/// Switch to the other theme
pub fn toggle(storage: &mut impl SlotStorage, output: &Output) -> Result<()> {
    let theme = load_theme(storage).toggle();
    save_theme(storage, theme).context("Failed to save theme")?;

    output.success(&format!("Theme set to {}", theme));
    Ok(())
}

/// Set the theme by name
pub fn set(storage: &mut impl SlotStorage, name: &str, output: &Output) -> Result<()> {
    let theme: Theme = name.parse().map_err(|e: String| anyhow!(e))?;
    save_theme(storage, theme).context("Failed to save theme")?;

    output.success(&format!("Theme set to {}", theme));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ribbon_core::MemoryStorage;

    #[test]
    fn test_toggle_and_set() {
        let output = Output::new(OutputFormat::Quiet);
        let mut storage = MemoryStorage::new();

        toggle(&mut storage, &output).unwrap();
        assert_eq!(load_theme(&storage), Theme::Dark);

        set(&mut storage, "LIGHT", &output).unwrap();
        assert_eq!(load_theme(&storage), Theme::Light);

        assert!(set(&mut storage, "sepia", &output).is_err());
        assert_eq!(load_theme(&storage), Theme::Light);
    }
}
