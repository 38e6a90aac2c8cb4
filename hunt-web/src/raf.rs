//! `requestAnimationFrame` frame scheduling.

use std::cell::OnceCell;
use std::rc::Rc;

use hunt::FrameScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global binding instead of `web_sys::Window::request_animation_frame_with_callback`,
// so scheduling never has to fetch the window.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;
}

pub(crate) type FrameClosure = Closure<dyn FnMut(f64)>;

/// Schedules a pre-built JS closure with `requestAnimationFrame`.
///
/// The closure lives in a shared slot so it can be installed after the tracker that owns this
/// scheduler has been created (the closure needs a handle back to that tracker).
pub struct RafScheduler {
    frame: Rc<OnceCell<FrameClosure>>,
}

impl RafScheduler {
    pub(crate) fn new(frame: Rc<OnceCell<FrameClosure>>) -> Self {
        Self { frame }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        match self.frame.get() {
            Some(closure) => {
                request_animation_frame(closure.as_ref());
            }
            None => {
                wwarn!("frame requested before the frame callback was installed");
            }
        }
    }
}

impl core::fmt::Debug for RafScheduler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafScheduler")
            .field("installed", &self.frame.get().is_some())
            .finish()
    }
}
