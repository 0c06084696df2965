use std::num::ParseIntError;

/// Errors from the fallible conversions of the crate. Searching itself never fails: a missing
/// path is reported as [None].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("key {0:?} has no `_` separator")]
    MissingSeparator(String),
    #[error("key {key:?} has a non-integer component")]
    InvalidComponent {
        key: String,
        #[source]
        source: ParseIntError,
    },
    #[error("key {0:?} is not in canonical `x_y` form")]
    NonCanonicalKey(String),
    #[error("unknown move mode {0}")]
    UnknownMoveMode(u8),
    #[error("unknown move mode name {0:?}")]
    UnknownMoveModeName(String),
}
