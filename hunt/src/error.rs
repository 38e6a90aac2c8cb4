use thiserror::Error;

/// Errors returned by [`crate::VisibilityTracker::track`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TrackError {
    /// The targets or the options passed to `track` have the wrong shape or value.
    ///
    /// Nothing is registered when this is returned.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
