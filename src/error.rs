//! Error types.
//!
//! Every failure the engine reports is a precondition violation: the caller
//! handed in a shape, range or parameter the algorithm cannot work with.
//! Nothing here is retried internally.

/// Which kind of index a count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Node,
    Label,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Node => f.write_str("node"),
            IndexKind::Label => f.write_str("label"),
        }
    }
}

/// Failures raised while building or solving a [`ChainProblem`](crate::ChainProblem).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("a chain needs at least one node")]
    EmptyChain,

    #[error("a chain needs at least one label")]
    NoLabels,

    #[error("{count} {kind}s cannot be addressed by the {kind} index type")]
    IndexOverflow { kind: IndexKind, count: usize },

    #[error("vertex table is {found:?} (nodes, labels) but the chain declares {expected:?}")]
    VertexShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("edge table is {found:?} (edges, labels) but the chain declares {expected:?}")]
    EdgeShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Failures raised by the scanline stereo cost builder.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StereoError {
    #[error("left image is {left:?} but right image is {right:?} (width, height)")]
    SizeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("pixel buffer holds {len} samples, expected {width}x{height}")]
    BufferSize {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("maximum disparity must be in 1..={max} but got {value}")]
    DisparityOutOfRange { value: usize, max: usize },

    #[error("smoothness weight must be finite and non-negative but got {0}")]
    InvalidSmoothness(f32),

    #[error("boundary penalty must be finite and non-negative but got {0}")]
    InvalidPenalty(f32),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = ChainError::IndexOverflow {
            kind: IndexKind::Label,
            count: 300,
        };
        assert_eq!(
            err.to_string(),
            "300 labels cannot be addressed by the label index type"
        );
        let err = StereoError::DisparityOutOfRange {
            value: 0,
            max: 255,
        };
        assert!(err.to_string().contains("1..=255"));
    }

    #[test]
    fn chain_errors_convert_into_stereo_errors() {
        let err: StereoError = ChainError::EmptyChain.into();
        assert_eq!(err, StereoError::Chain(ChainError::EmptyChain));
    }
}
