//! Conversions from untyped JS arguments.
//!
//! The shape rules are written against [`ArgValue`] so they do not depend on a JS engine;
//! [`JsValue`] is the production implementation.

use std::rc::Rc;

use hunt::{Callback, Targets, TrackError, TrackOptions};
use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{HtmlElement, Node};

use crate::DomNode;

const NOT_TARGETS: TrackError =
    TrackError::InvalidArgument("expected an element or a collection of elements");

/// The operations argument parsing needs from a dynamically typed value.
pub(crate) trait ArgValue: Sized {
    type Element;

    /// The value as a trackable element, if it is one.
    fn as_element(&self) -> Option<Self::Element>;
    /// Any document node, trackable or not.
    fn is_node(&self) -> bool;
    fn is_object(&self) -> bool;
    fn is_null(&self) -> bool;
    fn is_undefined(&self) -> bool;
    fn is_truthy(&self) -> bool;
    fn as_f64(&self) -> Option<f64>;
    /// Property read. `None` when the read throws.
    fn get(&self, key: &str) -> Option<Self>;
    /// Indexed read. `None` when the read throws.
    fn get_index(&self, index: u32) -> Option<Self>;
    /// Wraps a callable value as a transition callback. `None` when it is not callable.
    fn as_callback(&self) -> Option<Callback<Self::Element>>;
}

/// Accepts a single element or an array-like (integral `length` plus indexed elements).
pub(crate) fn parse_targets<V: ArgValue>(value: &V) -> Result<Targets<V::Element>, TrackError> {
    if let Some(element) = value.as_element() {
        return Ok(Targets::One(element));
    }
    if value.is_node() {
        return Err(TrackError::InvalidArgument("only HTML elements can be tracked"));
    }
    if !value.is_object() {
        return Err(NOT_TARGETS);
    }

    let len = value
        .get("length")
        .and_then(|len| len.as_f64())
        .filter(|len| len.is_finite() && *len >= 0.0)
        .ok_or(NOT_TARGETS)?;
    if len.fract() != 0.0 || len > f64::from(u32::MAX) {
        return Err(TrackError::InvalidArgument(
            "collection length must be a non-negative integer",
        ));
    }
    let len = len as u32;

    let mut elements = Vec::with_capacity(len as usize);
    for i in 0..len {
        let element = value
            .get_index(i)
            .and_then(|item| item.as_element())
            .ok_or(TrackError::InvalidArgument(
                "collection items must be HTML elements",
            ))?;
        elements.push(element);
    }
    Ok(Targets::Many(elements))
}

/// Reads `{ offset, persist, in, out }`. Missing fields keep their defaults; `null` means no
/// options at all.
pub(crate) fn parse_options<V: ArgValue>(
    value: &V,
) -> Result<TrackOptions<V::Element>, TrackError> {
    let mut options = TrackOptions::new();
    if value.is_null() {
        return Ok(options);
    }
    if !value.is_object() {
        return Err(TrackError::InvalidArgument("options must be an object"));
    }

    let offset = field(value, "offset")?;
    if !offset.is_undefined() {
        let offset = offset
            .as_f64()
            .ok_or(TrackError::InvalidArgument("offset must be a number"))?;
        options.offset = Some(offset);
    }

    let persist = field(value, "persist")?;
    if !persist.is_undefined() {
        options.persist = Some(persist.is_truthy());
    }

    options.on_enter = callback(value, "in")?;
    options.on_leave = callback(value, "out")?;
    Ok(options)
}

fn field<V: ArgValue>(object: &V, name: &str) -> Result<V, TrackError> {
    object
        .get(name)
        .ok_or(TrackError::InvalidArgument("options must be readable"))
}

fn callback<V: ArgValue>(
    object: &V,
    name: &str,
) -> Result<Option<Callback<V::Element>>, TrackError> {
    let value = field(object, name)?;
    if value.is_undefined() {
        return Ok(None);
    }
    value
        .as_callback()
        .map(Some)
        .ok_or(TrackError::InvalidArgument("`in` and `out` must be functions"))
}

impl ArgValue for JsValue {
    type Element = DomNode;

    fn as_element(&self) -> Option<DomNode> {
        self.dyn_ref::<HtmlElement>()
            .map(|element| DomNode::from(element.clone()))
    }

    fn is_node(&self) -> bool {
        self.is_instance_of::<Node>()
    }

    fn is_object(&self) -> bool {
        JsValue::is_object(self)
    }

    fn is_null(&self) -> bool {
        JsValue::is_null(self)
    }

    fn is_undefined(&self) -> bool {
        JsValue::is_undefined(self)
    }

    fn is_truthy(&self) -> bool {
        JsValue::is_truthy(self)
    }

    fn as_f64(&self) -> Option<f64> {
        JsValue::as_f64(self)
    }

    fn get(&self, key: &str) -> Option<Self> {
        Reflect::get(self, &JsValue::from_str(key)).ok()
    }

    fn get_index(&self, index: u32) -> Option<Self> {
        Reflect::get_u32(self, index).ok()
    }

    /// Calls the function with the element as `this`. Exceptions are reported to the console.
    fn as_callback(&self) -> Option<Callback<DomNode>> {
        let function = self.dyn_ref::<Function>()?.clone();
        Some(Rc::new(move |node: &DomNode| {
            if let Err(err) = function.call0(node.as_ref()) {
                wwarn!(error = ?err, "enter/leave callback threw");
                web_sys::console::error_2(&JsValue::from_str("hunt: callback threw"), &err);
            }
        }))
    }
}
