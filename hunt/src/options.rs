use alloc::rc::Rc;

use crate::TrackError;

/// A transition callback. Receives the tracked element handle.
///
/// Callbacks are shared by every element registered in the same `track` call, and run on the
/// thread that drives the tracker.
pub type Callback<E> = Rc<dyn Fn(&E)>;

/// Trigger margin used when [`TrackOptions::offset`] is not set.
pub const DEFAULT_OFFSET: f64 = 0.0;

/// Persistence used when [`TrackOptions::persist`] is not set.
pub const DEFAULT_PERSIST: bool = false;

/// Per-registration configuration for [`crate::VisibilityTracker::track`].
///
/// Every field is optional; unset fields fall back to the defaults documented on each field when
/// resolved through [`apply_defaults`].
pub struct TrackOptions<E> {
    /// Margin added symmetrically to both ends of the trigger window.
    ///
    /// Positive values fire `on_enter` earlier and `on_leave` later; negative values shrink the
    /// window. Defaults to [`DEFAULT_OFFSET`].
    pub offset: Option<f64>,
    /// Keep tracking the element after its first enter/leave cycle. Defaults to
    /// [`DEFAULT_PERSIST`].
    pub persist: Option<bool>,
    /// Called when the element enters the trigger window. Defaults to a no-op.
    pub on_enter: Option<Callback<E>>,
    /// Called when the element leaves the trigger window. Defaults to a no-op.
    pub on_leave: Option<Callback<E>>,
}

impl<E> Default for TrackOptions<E> {
    fn default() -> Self {
        Self {
            offset: None,
            persist: None,
            on_enter: None,
            on_leave: None,
        }
    }
}

impl<E> Clone for TrackOptions<E> {
    fn clone(&self) -> Self {
        Self {
            offset: self.offset,
            persist: self.persist,
            on_enter: self.on_enter.clone(),
            on_leave: self.on_leave.clone(),
        }
    }
}

impl<E> TrackOptions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_persist(mut self, persist: bool) -> Self {
        self.persist = Some(persist);
        self
    }

    pub fn with_on_enter(mut self, on_enter: impl Fn(&E) + 'static) -> Self {
        self.on_enter = Some(Rc::new(on_enter));
        self
    }

    pub fn with_on_leave(mut self, on_leave: impl Fn(&E) + 'static) -> Self {
        self.on_leave = Some(Rc::new(on_leave));
        self
    }

    /// Checks the options without resolving them.
    pub fn validate(&self) -> Result<(), TrackError> {
        match self.offset {
            Some(offset) if !offset.is_finite() => {
                hwarn!(offset, "TrackOptions: offset must be finite");
                Err(TrackError::InvalidArgument("offset must be a finite number"))
            }
            _ => Ok(()),
        }
    }
}

impl<E> core::fmt::Debug for TrackOptions<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackOptions")
            .field("offset", &self.offset)
            .field("persist", &self.persist)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .finish()
    }
}

/// [`TrackOptions`] with every default filled in.
pub struct ResolvedConfig<E> {
    pub offset: f64,
    pub persist: bool,
    pub on_enter: Callback<E>,
    pub on_leave: Callback<E>,
}

impl<E> Clone for ResolvedConfig<E> {
    fn clone(&self) -> Self {
        Self {
            offset: self.offset,
            persist: self.persist,
            on_enter: Rc::clone(&self.on_enter),
            on_leave: Rc::clone(&self.on_leave),
        }
    }
}

impl<E> core::fmt::Debug for ResolvedConfig<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("offset", &self.offset)
            .field("persist", &self.persist)
            .finish_non_exhaustive()
    }
}

/// Overlays `options` onto the defaults: `offset = 0`, `persist = false`, no-op callbacks.
pub fn apply_defaults<E: 'static>(options: TrackOptions<E>) -> ResolvedConfig<E> {
    ResolvedConfig {
        offset: options.offset.unwrap_or(DEFAULT_OFFSET),
        persist: options.persist.unwrap_or(DEFAULT_PERSIST),
        on_enter: options.on_enter.unwrap_or_else(noop),
        on_leave: options.on_leave.unwrap_or_else(noop),
    }
}

fn noop<E: 'static>() -> Callback<E> {
    Rc::new(|_: &E| {})
}
