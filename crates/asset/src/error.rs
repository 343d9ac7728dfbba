use thiserror::Error;

use crate::readiness::{RequestId, ResourceKind};
use crate::report::LineIssue;

/// Failure to pull a value out of a scanned line.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("expected another token")]
    MissingToken,
    #[error("unparsable number: '{token}'")]
    InvalidNumber { token: String },
}

/// Reasons a single `f` line is rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FaceError {
    #[error("face has {0} corner(s), at least 3 are required")]
    TooFewCorners(usize),
    #[error("malformed corner reference '{0}'")]
    MalformedReference(String),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("OBJ indices are 1-based; found 0")]
    ZeroIndex,
    #[error("{pool} index {raw} out of bounds (len={len})")]
    OutOfRange {
        pool: &'static str,
        raw: i32,
        len: usize,
    },
}

/// Errors surfaced to callers of the model API.
#[derive(Debug, Error)]
pub enum ObjError {
    #[error("OBJ input is empty")]
    EmptyInput,
    #[error("strict parse failed: {0}")]
    Line(LineIssue),
    #[error("no load request with id {0:?}")]
    UnknownRequest(RequestId),
    #[error("request {id:?} is a {expected:?} load, got a different payload")]
    CompletionMismatch { id: RequestId, expected: ResourceKind },
}

pub type ObjResult<T> = Result<T, ObjError>;
