use crate::geometry::ElementMetrics;
use crate::{Callback, LayoutNode, ResolvedConfig, Visibility};

/// A registered element together with its cached geometry and tracking behavior.
///
/// Records are created by [`crate::VisibilityTracker::track`] and only mutated by the tracker's
/// metrics refresh and evaluation pass.
pub struct TrackedElement<E> {
    element: E,
    top: f64,
    height: f64,
    offset: f64,
    persist: bool,
    visible: bool,
    on_enter: Callback<E>,
    on_leave: Callback<E>,
}

impl<E: LayoutNode> TrackedElement<E> {
    /// Captures `element`, probes its geometry and applies `config`.
    ///
    /// The record always starts out hidden, whatever its position; the first evaluation pass
    /// decides whether it enters.
    pub fn new(element: E, config: &ResolvedConfig<E>) -> Self {
        let ElementMetrics { top, height } = ElementMetrics::probe(&element);
        Self {
            element,
            top,
            height,
            offset: config.offset,
            persist: config.persist,
            visible: false,
            on_enter: config.on_enter.clone(),
            on_leave: config.on_leave.clone(),
        }
    }

    /// Re-probes `top` and `height`. Visibility is left untouched.
    pub fn refresh_metrics(&mut self) {
        let ElementMetrics { top, height } = ElementMetrics::probe(&self.element);
        self.top = top;
        self.height = height;
    }
}

impl<E> TrackedElement<E> {
    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn metrics(&self) -> ElementMetrics {
        ElementMetrics {
            top: self.top,
            height: self.height,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn persist(&self) -> bool {
        self.persist
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn visibility(&self) -> Visibility {
        if self.visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        }
    }

    /// The exclusive trigger window `(lower, upper)` for a given viewport height.
    ///
    /// The tracker's scroll position is the viewport's bottom edge, so the element is on screen
    /// while that edge is below the element's top and the viewport's top edge is above the
    /// element's bottom.
    pub fn window(&self, viewport_height: f64) -> (f64, f64) {
        (
            self.top - self.offset,
            self.top + self.height + viewport_height + self.offset,
        )
    }

    pub fn should_enter(&self, scroll_position: f64, viewport_height: f64) -> bool {
        let (lower, upper) = self.window(viewport_height);
        !self.visible && scroll_position > lower && scroll_position < upper
    }

    pub fn should_leave(&self, scroll_position: f64, viewport_height: f64) -> bool {
        let (lower, upper) = self.window(viewport_height);
        self.visible && (scroll_position <= lower || scroll_position >= upper)
    }

    pub(crate) fn enter(&mut self) {
        (self.on_enter)(&self.element);
        self.visible = true;
    }

    pub(crate) fn leave(&mut self) {
        (self.on_leave)(&self.element);
        self.visible = false;
    }
}

impl<E: core::fmt::Debug> core::fmt::Debug for TrackedElement<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackedElement")
            .field("element", &self.element)
            .field("top", &self.top)
            .field("height", &self.height)
            .field("offset", &self.offset)
            .field("persist", &self.persist)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}
