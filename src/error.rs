use thiserror::Error;

/// Errors raised by the pure conflict functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictError {
    #[error("Conflict region ends at line {end} but content has {line_count} lines")]
    RegionOutOfBounds { end: usize, line_count: usize },

    #[error("Malformed conflict region: start={start}, middle={middle}, end={end}")]
    InvalidRegion {
        start: usize,
        middle: usize,
        end: usize,
    },
}
