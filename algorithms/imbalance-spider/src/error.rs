use imbalance_nn::{BuildError, NnError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpiderError>;

/// Errors found while checking [`SpiderParams`](crate::SpiderParams), before any resampling
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpiderParamsError {
    #[error("k must be at least 1")]
    InvalidK,
    #[error("no majority, intermediate or minority classes were given")]
    EmptyPartition,
    #[error("class {0} appears more than once in the class lists")]
    DuplicateClass(String),
    #[error("cost matrix must be {expected}x{expected} to match the classes, but is {rows}x{cols}")]
    CostMatrixShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },
    #[error("cost matrix entries must be finite")]
    NonFiniteCost,
    #[error("tolerance must be non-negative and finite, but is {0}")]
    InvalidTolerance(f32),
    #[error("max_amplifications must be at least 1")]
    InvalidMaxAmplifications,
}

#[derive(Error, Debug)]
pub enum SpiderError {
    #[error(transparent)]
    Params(#[from] SpiderParamsError),
    #[error("class {0} is not one of the majority, intermediate or minority classes")]
    UnrecognizedClass(String),
    #[error("example of class {class} is still not cost-optimal after {cap} copies")]
    AmplificationLimit { class: String, cap: usize },
    #[error(transparent)]
    NearestNeighbour(#[from] NnError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    BaseCrate(#[from] imbalance::error::Error),
}
