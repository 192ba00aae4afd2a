//! Colored terminal output utilities.

use std::path::Path;

use console::{Style, Term};
use taia_site::Warning;

/// Terminal output formatter. Everything goes to stderr.
pub(crate) struct Output {
    term: Term,
    dim: Style,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            dim: Style::new().dim(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Print a labelled path, e.g. `Source: database/chronicle.taia`.
    pub(crate) fn path(&self, label: &str, path: &Path) {
        let _ = self.term.write_line(&format!(
            "{} {}",
            self.dim.apply_to(format!("{label}:")),
            path.display()
        ));
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print build warnings (yellow) and return how many there were.
    pub(crate) fn warnings(&self, warnings: &[Warning]) -> usize {
        for warning in warnings {
            let line = format!("warning: {warning}");
            let _ = self.term.write_line(&self.yellow.apply_to(line).to_string());
        }
        warnings.len()
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
