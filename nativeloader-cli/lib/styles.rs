use std::sync::LazyLock;

use clap::builder::styling::{AnsiColor, Effects, Styles};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// A green check mark for successful steps.
pub static CHECKMARK: LazyLock<String> =
    LazyLock::new(|| format!("{}", console::style("✓").green()));

//--------------------------------------------------------------------------------------------------
// Traits
//--------------------------------------------------------------------------------------------------

/// Styling for text printed by the CLI, consistent with the help output.
pub trait AnsiStyles {
    /// Styles the text as a header.
    fn header(&self) -> String;

    /// Styles the text as a literal value.
    fn literal(&self) -> String;

    /// Styles the text as a placeholder.
    fn placeholder(&self) -> String;

    /// Styles the text as an error.
    fn error(&self) -> String;
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl<T: AsRef<str>> AnsiStyles for T {
    fn header(&self) -> String {
        console::style(self.as_ref()).yellow().bold().to_string()
    }

    fn literal(&self) -> String {
        console::style(self.as_ref()).blue().bold().to_string()
    }

    fn placeholder(&self) -> String {
        console::style(self.as_ref()).cyan().to_string()
    }

    fn error(&self) -> String {
        console::style(self.as_ref()).red().bold().to_string()
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Returns the styles for the CLI's help output.
pub fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}
