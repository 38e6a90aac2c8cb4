/// The scrollable surface elements are tracked against.
///
/// In a browser this is the window: `innerHeight` and `scrollY`.
pub trait Viewport {
    /// Height of the visible area.
    fn viewport_height(&self) -> f64;

    /// Distance the surface is scrolled from its top.
    fn scroll_y(&self) -> f64;
}

/// Requests a callback on the host's next paint opportunity.
///
/// The tracker calls [`request_frame`](Self::request_frame) at most once per pending evaluation.
/// The host is responsible for calling [`crate::VisibilityTracker::evaluate`] when the frame
/// arrives (e.g. from a `requestAnimationFrame` callback).
pub trait FrameScheduler {
    fn request_frame(&mut self);
}
