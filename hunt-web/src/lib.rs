//! Browser bindings for the `hunt` visibility tracker.
//!
//! This crate plugs the DOM into `hunt`'s host seams:
//!
//! - [`DomNode`] reads `offsetTop`/`offsetParent`/`clientHeight` from an `HTMLElement`
//! - [`WindowViewport`] reads `innerHeight`/`scrollY` from the window
//! - [`RafScheduler`] defers evaluation to `requestAnimationFrame`
//!
//! [`WebHunter`] wires all of that to the window's `scroll` and `resize` events. For JS callers
//! the crate also exports `hunt(elements, options)`, backed by one lazily created tracker per
//! thread:
//!
//! ```js
//! hunt(document.querySelectorAll('img[data-src]'), {
//!     offset: 200,
//!     in() { this.src = this.dataset.src; },
//! });
//! ```
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod dom;
mod error;
mod hunter;
mod js;
mod raf;
mod shared;


use std::cell::OnceCell;

use wasm_bindgen::prelude::*;

pub use dom::{DomNode, WindowViewport};
pub use error::Error;
pub use hunter::{WebHunter, WebTracker};
pub use raf::RafScheduler;
pub use shared::SharedTracker;

thread_local! {
    static GLOBAL: OnceCell<WebHunter> = const { OnceCell::new() };
}

/// Tracks an element (or an array-like of elements) with `{ offset, persist, in, out }`.
///
/// `options` may be `null`. Throws a `TypeError` when `elements` is neither an `HTMLElement` nor
/// an array-like of them, or when `options` is neither `null` nor an object. Calls made from
/// inside `in`/`out` are queued and take effect when the current pass finishes.
#[wasm_bindgen(js_name = hunt)]
pub fn hunt(elements: JsValue, options: JsValue) -> Result<(), JsValue> {
    GLOBAL.with(|cell| {
        let hunter = match cell.get() {
            Some(hunter) => hunter,
            None => {
                let hunter = WebHunter::new()?;
                cell.get_or_init(|| hunter)
            }
        };
        hunter.track_js(&elements, &options)?;
        Ok(())
    })
}
