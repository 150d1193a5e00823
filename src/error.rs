//! Errors shared by every stage of the resynthesis pipeline.

/// Unrecoverable failure while loading, transforming or synthesizing an
/// utterance.
///
/// A parametric synthesis run has no meaningful partial result, so every
/// variant aborts the run before any output is written. Nothing is retried
/// or recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// Run configuration that can never produce valid output.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A parameter stream ended before the expected number of values.
    #[error("{stream} stream ended after {actual} of {expected} values")]
    TruncatedInput {
        stream: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A loaded array does not match the parameter store's fixed dimensions.
    #[error("expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Non-positive magnitude encountered during a log-domain warp.
    #[error("non-positive spectral magnitude at frame {frame}, bin {bin}")]
    InvalidSpectrum { frame: usize, bin: usize },

    /// The utterance is too short to produce any samples.
    #[error("utterance of {frame_count} frames produces no samples")]
    EmptyUtterance { frame_count: usize },

    /// Reading a parameter stream failed.
    #[error("failed to read parameter stream")]
    Io(#[from] std::io::Error),
}
