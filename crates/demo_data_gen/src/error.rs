//! Errors raised when a generator is handed an unusable context.

use crate::records::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionError {
    #[error("cannot generate {kind}: context has no inserted {parent}")]
    MissingParents {
        kind: EntityKind,
        parent: EntityKind,
    },
    #[error("cannot generate {kind}: invalid range {min}..={max}")]
    InvalidRange {
        kind: EntityKind,
        min: usize,
        max: usize,
    },
}
