use alloc::vec::Vec;

use crate::{
    FrameScheduler, LayoutNode, Metrics, TrackError, TrackOptions, TrackedElement, Targets,
    Viewport, apply_defaults,
};

/// Tracks a set of elements against a single scrollable viewport.
///
/// This type is intentionally host-agnostic:
/// - Element geometry comes from the [`LayoutNode`] implementation of `E`.
/// - Viewport height and scroll offset come from `V`.
/// - Frame scheduling is delegated to `S`; when the requested frame arrives, the host calls
///   [`evaluate`](Self::evaluate).
///
/// Wire the host's events to [`on_scroll`](Self::on_scroll) and [`on_resize`](Self::on_resize).
/// Any number of scroll events within one frame collapse into a single evaluation pass.
pub struct VisibilityTracker<E, V, S> {
    viewport: V,
    scheduler: S,
    tracked: Vec<TrackedElement<E>>,
    viewport_height: f64,
    scroll_position: f64,
    evaluation_pending: bool,
}

impl<E, V, S> VisibilityTracker<E, V, S>
where
    E: LayoutNode + 'static,
    V: Viewport,
    S: FrameScheduler,
{
    /// Creates an empty tracker and reads the initial viewport metrics.
    pub fn new(viewport: V, scheduler: S) -> Self {
        let viewport_height = viewport.viewport_height();
        let scroll_position = viewport_height + viewport.scroll_y();
        hdebug!(viewport_height, scroll_position, "VisibilityTracker::new");
        Self {
            viewport,
            scheduler,
            tracked: Vec::new(),
            viewport_height,
            scroll_position,
            evaluation_pending: false,
        }
    }

    /// Registers one or more elements and immediately evaluates them.
    ///
    /// Elements that are already inside their trigger window fire `on_enter` before this returns.
    /// Options are validated before anything is inserted. Returns the number of elements
    /// registered.
    pub fn track(
        &mut self,
        targets: impl Into<Targets<E>>,
        options: TrackOptions<E>,
    ) -> Result<usize, TrackError> {
        options.validate()?;
        let config = apply_defaults(options);

        let elements = targets.into().into_vec();
        let added = elements.len();
        self.tracked.reserve(added);
        for element in elements {
            self.tracked.push(TrackedElement::new(element, &config));
        }
        hdebug!(
            added,
            tracked = self.tracked.len(),
            offset = config.offset,
            persist = config.persist,
            "VisibilityTracker::track"
        );

        self.evaluate();
        Ok(added)
    }

    /// Re-reads the viewport metrics and re-probes every tracked element.
    ///
    /// No callbacks fire here; visibility is only re-evaluated by the next pass.
    pub fn update_metrics(&mut self) {
        self.viewport_height = self.viewport.viewport_height();
        self.scroll_position = self.read_scroll_position();
        self.evict_detached();
        for h in &mut self.tracked {
            h.refresh_metrics();
        }
        htrace!(
            viewport_height = self.viewport_height,
            scroll_position = self.scroll_position,
            tracked = self.tracked.len(),
            "VisibilityTracker::update_metrics"
        );
    }

    /// Runs one evaluation pass over every tracked element.
    ///
    /// Elements are visited from the back so a non-persistent element can be removed in place
    /// without skipping the one after it.
    pub fn evaluate(&mut self) {
        if !self.tracked.is_empty() {
            self.scroll_position = self.read_scroll_position();
            let pos = self.scroll_position;
            let vh = self.viewport_height;

            let mut i = self.tracked.len();
            while i > 0 {
                i -= 1;

                if !self.tracked[i].element().is_connected() {
                    self.tracked.remove(i);
                    hdebug!(index = i, "evaluate: evicted detached element");
                    continue;
                }

                let h = &mut self.tracked[i];
                if h.should_enter(pos, vh) {
                    htrace!(index = i, top = h.top(), pos, "evaluate: enter");
                    h.enter();
                }
                if h.should_leave(pos, vh) {
                    htrace!(index = i, top = h.top(), pos, "evaluate: leave");
                    h.leave();
                    if !h.persist() {
                        self.tracked.remove(i);
                    }
                }
            }
        }

        self.evaluation_pending = false;
    }

    /// Asks the scheduler for a frame unless one is already pending.
    pub fn request_evaluation(&mut self) {
        if self.evaluation_pending {
            return;
        }
        self.evaluation_pending = true;
        self.scheduler.request_frame();
    }

    /// Call this when the host reports a scroll.
    pub fn on_scroll(&mut self) {
        self.request_evaluation();
    }

    /// Call this when the host reports a viewport resize.
    pub fn on_resize(&mut self) {
        self.update_metrics();
    }

    fn read_scroll_position(&self) -> f64 {
        self.viewport_height + self.viewport.scroll_y()
    }

    fn evict_detached(&mut self) {
        let before = self.tracked.len();
        self.tracked.retain(|h| h.element().is_connected());
        let evicted = before - self.tracked.len();
        if evicted > 0 {
            hdebug!(evicted, "update_metrics: evicted detached elements");
        }
    }
}

impl<E, V, S> VisibilityTracker<E, V, S> {
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Tracked records in storage order.
    pub fn elements(&self) -> &[TrackedElement<E>] {
        &self.tracked
    }

    pub fn is_evaluation_pending(&self) -> bool {
        self.evaluation_pending
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// The cached bottom edge of the viewport, as of the last metrics read.
    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            viewport_height: self.viewport_height,
            scroll_position: self.scroll_position,
        }
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<E: core::fmt::Debug, V, S> core::fmt::Debug for VisibilityTracker<E, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VisibilityTracker")
            .field("tracked", &self.tracked)
            .field("viewport_height", &self.viewport_height)
            .field("scroll_position", &self.scroll_position)
            .field("evaluation_pending", &self.evaluation_pending)
            .finish_non_exhaustive()
    }
}
