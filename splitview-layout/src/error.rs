use std::fmt;

use thiserror::Error;

/// Why a layout blob could not be decoded. `offset` is the byte position
/// where the offending field starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("not a layout blob: magic {found:#06x} at offset 0, expected {expected:#06x}")]
    FormatMismatch { found: i32, expected: i32 },

    #[error("unsupported layout version {found:#06x}, expected {expected:#06x}")]
    UnsupportedVersion { found: i32, expected: i32 },

    #[error("unknown view kind {code} at offset {offset}")]
    UnknownViewKind { code: i32, offset: usize },

    #[error("truncated layout blob: {field} needs {needed} bytes at offset {offset}, {available} left")]
    TruncatedStream {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("unknown node tag {tag:#06x} at offset {offset}")]
    UnknownNodeTag { tag: i32, offset: usize },

    #[error("unknown split orientation {code} at offset {offset}")]
    UnknownOrientation { code: i32, offset: usize },

    #[error("split ratio {value} at offset {offset} is outside [0, 1]")]
    InvalidRatio { value: f32, offset: usize },

    #[error("layout nested deeper than {limit} splits at offset {offset}")]
    TooDeep { limit: usize, offset: usize },
}

/// Child indices (0 = first, 1 = second) from the root to a pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanePath(pub Vec<u8>);

impl fmt::Display for PanePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for step in &self.0 {
            write!(f, "/{}", step)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("pane at {path} is neither a split nor a view")]
    InvalidPaneWidget { path: PanePath },
    #[error("split at {path} is nested deeper than {limit} splits")]
    TooDeep { limit: usize, path: PanePath },
}

/// Failure of a decode-then-apply restore.
#[derive(Debug, Error)]
pub enum RestoreError<E> {
    /// The blob was rejected; no instruction was applied.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The sink refused an instruction; earlier instructions were applied.
    #[error("pane sink rejected instruction {index}: {source}")]
    Sink {
        index: usize,
        #[source]
        source: E,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("split ratio {0} is outside [0, 1]")]
pub struct RatioError(pub f32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_path_display() {
        assert_eq!(PanePath::default().to_string(), "root");
        assert_eq!(PanePath(vec![0, 1, 1]).to_string(), "root/0/1/1");
    }

    #[test]
    fn test_format_mismatch_message() {
        let err = DecodeError::FormatMismatch {
            found: 0x1234,
            expected: 0x0abc,
        };
        assert_eq!(
            err.to_string(),
            "not a layout blob: magic 0x1234 at offset 0, expected 0x0abc"
        );
    }
}
