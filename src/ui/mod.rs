//! User interface abstraction
//!
//! Commands write through the UI trait so tests can capture what would go
//! to stdout and stderr.

use crate::error::Result;
use std::io::{self, Write};

#[cfg(test)]
pub mod test_ui;

/// Abstract UI trait for command interaction
pub trait UI {
    /// Output a message to the user
    fn output(&mut self, message: &str) -> Result<()>;

    /// Output an error message
    fn error(&mut self, message: &str) -> Result<()>;

    /// Output a warning message
    fn warning(&mut self, message: &str) -> Result<()>;
}

/// Command-line UI implementation
pub struct CliUI {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl CliUI {
    /// Creates a new command-line UI instance using stdout and stderr.
    pub fn new() -> Self {
        CliUI {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }
}

impl Default for CliUI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI for CliUI {
    fn output(&mut self, message: &str) -> Result<()> {
        writeln!(self.stdout, "{}", message)?;
        Ok(())
    }

    fn error(&mut self, message: &str) -> Result<()> {
        writeln!(self.stderr, "Error: {}", message)?;
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        writeln!(self.stderr, "Warning: {}", message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_ui_writes_to_buffers() {
        let mut ui = CliUI {
            stdout: Box::new(Vec::new()),
            stderr: Box::new(Vec::new()),
        };
        ui.output("Build succeeded").unwrap();
        ui.warning("No test results found in output").unwrap();
        ui.error("boom").unwrap();
    }
}
