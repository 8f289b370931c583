pub mod csv;

// Re-export commonly used items
pub use csv::{parse_rows, Field, ImportError, ParsedCsv, RawRow};
