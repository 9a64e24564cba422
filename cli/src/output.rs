//! Terminal output utilities for styled CLI output.

use std::fmt::Display;

use console::{Term, style};
use fileshelf_business::PaginationState;

/// Terminal output helper for consistent styled output.
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output helper writing to stdout.
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        drop(self.term.write_line(text));
    }

    pub fn success(&self, message: impl Display) {
        self.line(&format!("{} {}", style("✓").green().bold(), message));
    }

    pub fn error(&self, message: impl Display) {
        self.line(&format!("{} {}", style("✗").red().bold(), message));
    }

    pub fn warning(&self, message: impl Display) {
        self.line(&format!("{} {}", style("⚠").yellow().bold(), message));
    }

    pub fn info(&self, message: impl Display) {
        self.line(&format!("{} {}", style("ℹ").blue().bold(), message));
    }

    /// Print a plain message without any prefix.
    pub fn print(&self, message: impl Display) {
        self.line(&message.to_string());
    }

    pub fn newline(&self) {
        self.line("");
    }

    pub fn header(&self, message: impl Display) {
        self.line(&style(message).bold().cyan().to_string());
    }

    pub fn dim(&self, message: impl Display) {
        self.line(&style(message).dim().to_string());
    }

    /// Print a labeled value with indentation.
    pub fn labeled(&self, label: impl Display, value: impl Display) {
        self.line(&format!("  {}: {}", style(label).dim(), value));
    }

    /// Print the "Showing 11-20 of 42 files, page 2 of 5" footer.
    pub fn page_summary(&self, state: &PaginationState) {
        self.line(&page_summary(state));
    }
}

pub fn page_summary(state: &PaginationState) -> String {
    match state.item_range() {
        Some((first, last)) => format!(
            "Showing {}-{} of {} file(s), page {} of {}",
            style(first).cyan(),
            style(last).cyan(),
            style(state.total_files).cyan().bold(),
            state.current_page,
            state.total_pages
        ),
        None => format!("{} file(s)", style(state.total_files).cyan().bold()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_summary() {
        console::set_colors_enabled(false);

        let state = PaginationState::new(2, 10, 42);
        assert_eq!(
            page_summary(&state),
            "Showing 11-20 of 42 file(s), page 2 of 5"
        );
        assert_eq!(page_summary(&PaginationState::new(1, 10, 0)), "0 file(s)");
    }
}
