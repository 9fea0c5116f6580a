//! Terminal presenter for the `dogedex` binary

use crate::error::ErrorKind;
use crate::models::CollectionEntry;
use crate::status::{CollectionStatus, ResponseStatus};
use crate::view_model::ResultPresenter;
use std::io::{self, Write};

/// Output format of [`TerminalPresenter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Writes collection statuses to a terminal (or any writer)
///
/// Owned entries show their name and category; unowned entries show only
/// their position.
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
    format: OutputFormat,
    last_error: Option<ErrorKind>,
    write_error: Option<io::Error>,
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            last_error: None,
            write_error: None,
        }
    }

    /// Error kind of the most recent error status, cleared by later statuses
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// Flush and hand back the writer, surfacing any write failure
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.write_error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn render(&mut self, status: &CollectionStatus) -> io::Result<()> {
        match status {
            ResponseStatus::Loading => {
                self.last_error = None;
                // Progress goes nowhere in JSON mode so stdout stays parseable
                if self.format == OutputFormat::Table {
                    writeln!(self.out, "Loading collection...")?;
                }
            }
            ResponseStatus::Success(entries) => {
                self.last_error = None;
                match self.format {
                    OutputFormat::Table => self.render_table(entries)?,
                    OutputFormat::Json => {
                        serde_json::to_writer_pretty(&mut self.out, entries)?;
                        writeln!(self.out)?;
                    }
                }
            }
            ResponseStatus::Error(kind) => {
                self.last_error = Some(*kind);
                if self.format == OutputFormat::Table {
                    writeln!(self.out, "Error: {} [{}]", kind.user_message(), kind.message_id())?;
                }
            }
        }
        Ok(())
    }

    fn render_table(&mut self, entries: &[CollectionEntry]) -> io::Result<()> {
        for entry in entries {
            if entry.owned {
                if entry.category.is_empty() {
                    writeln!(self.out, "#{:>3}  {}", entry.index, entry.name)?;
                } else {
                    writeln!(self.out, "#{:>3}  {} ({})", entry.index, entry.name, entry.category)?;
                }
            } else {
                writeln!(self.out, "#{:>3}  ???", entry.index)?;
            }
        }
        let owned = entries.iter().filter(|e| e.owned).count();
        writeln!(self.out, "{} of {} collected", owned, entries.len())
    }
}

impl<W: Write + Send> ResultPresenter for TerminalPresenter<W> {
    fn present(&mut self, status: Option<&CollectionStatus>) {
        // Keep only the first write failure; later output is best-effort.
        let Some(status) = status else { return };
        if let Err(e) = self.render(status) {
            self.write_error.get_or_insert(e);
        }
    }
}
