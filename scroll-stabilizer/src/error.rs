use thiserror::Error;

/// A failed geometry read or style write on the host side.
///
/// These are never surfaced to callers of [`crate::Stabilizer`]: the stabilizer logs them and
/// treats the step as a no-op, relying on the next event to recompute from live geometry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HostError {
    /// The node is no longer part of the document.
    #[error("node is detached from the document")]
    Detached,
    /// The host could not measure something.
    #[error("geometry unavailable: {0}")]
    Geometry(&'static str),
    /// The host refused a style or scroll write.
    #[error("write rejected: {0}")]
    Write(&'static str),
}
