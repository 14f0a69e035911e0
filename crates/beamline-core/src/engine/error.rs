use thiserror::Error;

use crate::sequences::metadata::MetadataError;

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error(
        "Placement of '{element}' in sequence '{sequence}' did not reach a fixed point within {iterations} iterations"
    )]
    Unresolvable {
        sequence: String,
        element: String,
        iterations: usize,
    },

    #[error("Placement hints for '{element}' in sequence '{sequence}' disagree with its length")]
    InconsistentPlacement { sequence: String, element: String },

    #[error(
        "Element '{element}' in sequence '{sequence}' has no length attribute '{key}' but its placement needs one"
    )]
    MissingLength {
        sequence: String,
        element: String,
        key: String,
    },

    #[error("Element '{element}' is already placed in sequence '{sequence}'")]
    DuplicateElement { sequence: String, element: String },

    #[error("Sequence '{sequence}' has invalid metadata: {source}")]
    Metadata {
        sequence: String,
        #[source]
        source: MetadataError,
    },
}
