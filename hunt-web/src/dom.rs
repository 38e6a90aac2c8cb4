use hunt::{LayoutNode, Viewport};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{HtmlElement, Window};

/// A tracked `HTMLElement`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomNode(HtmlElement);

impl DomNode {
    pub fn new(element: HtmlElement) -> Self {
        Self(element)
    }

    pub fn element(&self) -> &HtmlElement {
        &self.0
    }

    pub fn into_inner(self) -> HtmlElement {
        self.0
    }
}

impl From<HtmlElement> for DomNode {
    fn from(element: HtmlElement) -> Self {
        Self(element)
    }
}

impl AsRef<JsValue> for DomNode {
    fn as_ref(&self) -> &JsValue {
        self.0.as_ref()
    }
}

impl LayoutNode for DomNode {
    fn offset_top(&self) -> f64 {
        f64::from(self.0.offset_top())
    }

    // `offsetParent` can be a non-HTML element (e.g. inside SVG); the walk stops there.
    fn offset_parent(&self) -> Option<Self> {
        self.0
            .offset_parent()?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(Self)
    }

    fn client_height(&self) -> f64 {
        f64::from(self.0.client_height())
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }
}

/// The browser window as a scroll surface.
///
/// Failing reads fall back to `0.0`.
#[derive(Clone, Debug)]
pub struct WindowViewport {
    window: Window,
}

impl WindowViewport {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Viewport for WindowViewport {
    fn viewport_height(&self) -> f64 {
        match self.window.inner_height() {
            Ok(height) => height.as_f64().unwrap_or(0.0),
            Err(_err) => {
                wwarn!(error = ?_err, "window.innerHeight unavailable");
                0.0
            }
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window
            .scroll_y()
            .or_else(|_| self.window.page_y_offset())
            .unwrap_or_else(|_err| {
                wwarn!(error = ?_err, "window.scrollY unavailable");
                0.0
            })
    }
}
