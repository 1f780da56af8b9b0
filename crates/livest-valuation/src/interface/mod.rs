//! User-facing layer: command parsing, rendering and the interactive session

pub mod commands;
pub mod formatter;
pub mod session;

pub use commands::Command;
pub use formatter::{CliFormatter, Formatter, FormatterFactory, JsonFormatter, OutputFormat};
pub use session::{Reply, ValuationSession};
