use std::cell::RefCell;
use std::collections::VecDeque;

use hunt::{
    FrameScheduler, LayoutNode, Targets, TrackError, TrackOptions, Viewport, VisibilityTracker,
};

type Registration<E> = (Targets<E>, TrackOptions<E>);

/// A [`VisibilityTracker`] shared between event handlers and user callbacks.
///
/// Enter/leave callbacks run while the tracker is mutably borrowed. A registration made from
/// inside one of them is queued and applied, with its own inline evaluation, as soon as the
/// outer operation releases the tracker.
pub struct SharedTracker<E, V, S> {
    tracker: RefCell<VisibilityTracker<E, V, S>>,
    pending: RefCell<VecDeque<Registration<E>>>,
}

impl<E, V, S> SharedTracker<E, V, S>
where
    E: LayoutNode + 'static,
    V: Viewport,
    S: FrameScheduler,
{
    pub fn new(tracker: VisibilityTracker<E, V, S>) -> Self {
        Self {
            tracker: RefCell::new(tracker),
            pending: RefCell::new(VecDeque::new()),
        }
    }

    /// Registers elements, or queues them if the tracker is busy running callbacks.
    ///
    /// Options are validated up front either way, so a queued registration never fails later.
    pub fn track(
        &self,
        targets: impl Into<Targets<E>>,
        options: TrackOptions<E>,
    ) -> Result<usize, TrackError> {
        let targets = targets.into();
        let added = match self.tracker.try_borrow_mut() {
            Ok(mut tracker) => tracker.track(targets, options)?,
            Err(_) => {
                options.validate()?;
                let added = targets.len();
                self.pending.borrow_mut().push_back((targets, options));
                wdebug!(added, "SharedTracker: registration queued");
                return Ok(added);
            }
        };
        self.drain();
        Ok(added)
    }

    /// Runs `f` on the tracker, then applies any registrations its callbacks queued.
    ///
    /// Returns `None` (and drops the event) when the tracker is already borrowed.
    pub fn update<R>(&self, f: impl FnOnce(&mut VisibilityTracker<E, V, S>) -> R) -> Option<R> {
        let out = match self.tracker.try_borrow_mut() {
            Ok(mut tracker) => f(&mut tracker),
            Err(_) => {
                wwarn!("tracker busy; event dropped");
                return None;
            }
        };
        self.drain();
        Some(out)
    }

    /// Runs `f` with shared access to the tracker.
    pub fn inspect<R>(&self, f: impl FnOnce(&VisibilityTracker<E, V, S>) -> R) -> Option<R> {
        let tracker = self.tracker.try_borrow().ok()?;
        Some(f(&tracker))
    }

    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    fn drain(&self) {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some((targets, options)) = next else {
                return;
            };
            let Ok(mut tracker) = self.tracker.try_borrow_mut() else {
                self.pending.borrow_mut().push_front((targets, options));
                return;
            };
            // Options were validated when queued.
            if let Err(_err) = tracker.track(targets, options) {
                wwarn!(error = %_err, "queued registration rejected");
            }
        }
    }
}

impl<E: core::fmt::Debug, V, S> core::fmt::Debug for SharedTracker<E, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedTracker")
            .field("tracker", &self.tracker)
            .field("pending", &self.pending.borrow().len())
            .finish()
    }
}
