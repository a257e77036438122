use scroll_stabilizer::Edge;
use thiserror::Error;

/// Errors returned by [`crate::StabilizerSet::attach`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AttachError {
    /// The container is not an element, or is no longer in the document.
    #[error("{edge:?} stabilizer: container must be a live element")]
    NotAnElement { edge: Edge },
}
