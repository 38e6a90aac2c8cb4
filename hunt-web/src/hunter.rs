use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use hunt::{Targets, TrackOptions, VisibilityTracker};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, Window};

use crate::raf::FrameClosure;
use crate::{DomNode, Error, RafScheduler, SharedTracker, WindowViewport, js};

/// The tracker type driven by [`WebHunter`].
pub type WebTracker = VisibilityTracker<DomNode, WindowViewport, RafScheduler>;

type ListenerClosure = Closure<dyn FnMut(Event)>;

/// A [`VisibilityTracker`] bound to the browser window.
///
/// Creating one registers `scroll` and `resize` listeners on `window`; dropping it removes them.
/// Scroll events are coalesced into one evaluation per animation frame, resize events refresh
/// cached geometry immediately.
pub struct WebHunter {
    inner: Rc<Inner>,
}

struct Inner {
    window: Window,
    shared: SharedTracker<DomNode, WindowViewport, RafScheduler>,
    listeners: RefCell<Vec<(&'static str, ListenerClosure)>>,
}

impl WebHunter {
    pub fn new() -> Result<Self, Error> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;

        let frame: Rc<OnceCell<FrameClosure>> = Rc::new(OnceCell::new());
        let tracker = VisibilityTracker::new(
            WindowViewport::new(window.clone()),
            RafScheduler::new(Rc::clone(&frame)),
        );
        let inner = Rc::new(Inner {
            window,
            shared: SharedTracker::new(tracker),
            listeners: RefCell::new(Vec::new()),
        });

        let weak = Rc::downgrade(&inner);
        let on_frame = FrameClosure::new(move |_timestamp_ms: f64| {
            update(&weak, WebTracker::evaluate);
        });
        if frame.set(on_frame).is_err() {
            wwarn!("frame callback installed twice");
        }

        let hunter = Self { inner };
        hunter.listen("scroll", WebTracker::on_scroll)?;
        hunter.listen("resize", WebTracker::on_resize)?;
        wdebug!("WebHunter::new");
        Ok(hunter)
    }

    fn listen(&self, event: &'static str, handler: fn(&mut WebTracker)) -> Result<(), Error> {
        let weak = Rc::downgrade(&self.inner);
        let closure = ListenerClosure::new(move |_event: Event| {
            update(&weak, handler);
        });
        self.inner
            .window
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(Error::from_js)?;
        self.inner.listeners.borrow_mut().push((event, closure));
        Ok(())
    }

    /// Registers elements. See [`VisibilityTracker::track`].
    ///
    /// From inside an enter/leave callback the registration is queued and applied once the
    /// current pass finishes; see [`SharedTracker::track`].
    pub fn track(
        &self,
        targets: impl Into<Targets<DomNode>>,
        options: TrackOptions<DomNode>,
    ) -> Result<usize, Error> {
        Ok(self.inner.shared.track(targets, options)?)
    }

    /// Registers elements from untyped JS arguments.
    ///
    /// `elements` must be an `HTMLElement` or an array-like of them (`NodeList`, `HTMLCollection`,
    /// `Array`); `options` must be `null` or an object with optional `offset`, `persist`, `in`
    /// and `out` fields.
    pub fn track_js(&self, elements: &JsValue, options: &JsValue) -> Result<usize, Error> {
        let targets = js::parse_targets(elements)?;
        let options = js::parse_options(options)?;
        self.track(targets, options)
    }

    /// Runs `f` with shared access to the underlying tracker.
    pub fn with_tracker<R>(&self, f: impl FnOnce(&WebTracker) -> R) -> Result<R, Error> {
        self.inner.shared.inspect(f).ok_or(Error::Busy)
    }
}

impl core::fmt::Debug for WebHunter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebHunter")
            .field("shared", &self.inner.shared)
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for (event, closure) in self.listeners.get_mut().drain(..) {
            let _ = self
                .window
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}

/// Runs a tracker operation from a JS callback, if the hunter is still alive.
fn update(weak: &Weak<Inner>, f: fn(&mut WebTracker)) {
    if let Some(inner) = weak.upgrade() {
        inner.shared.update(f);
    }
}
