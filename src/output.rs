//! Output of the appliance's response

use crate::config::OutputConfig;
use crate::error::Result;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Output writer that handles file vs stdout
pub struct OutputWriter {
    config: OutputConfig,
}

impl OutputWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write the response body to the configured output.
    pub fn write(&self, body: &[u8]) -> Result<()> {
        if let Some(file_path) = &self.config.file {
            self.write_to_file(body, file_path)
        } else {
            self.write_to_stdout(body)
        }
    }

    /// Write verbose information (if enabled)
    pub fn write_verbose(&self, message: &str) {
        if self.config.verbose {
            eprintln!("* {}", message);
        }
    }

    fn write_to_file(&self, body: &[u8], file_path: &Path) -> Result<()> {
        let mut file = File::create(file_path)?;
        file.write_all(body)?;
        Ok(())
    }

    /// Body as-is plus a trailing newline, like a line-oriented print.
    fn write_to_stdout(&self, body: &[u8]) -> Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(body)?;
        handle.write_all(b"\n")?;
        handle.flush()?;
        Ok(())
    }
}
