use hunt::TrackError;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Track(#[from] TrackError),
    #[error("no global `window` object")]
    NoWindow,
    /// The tracker is mutably borrowed by a running pass, i.e. inspection was attempted from an
    /// enter/leave callback.
    #[error("tracker is busy running callbacks")]
    Busy,
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl Error {
    pub(crate) fn from_js(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        match err {
            Error::Track(_) => js_sys::TypeError::new(&err.to_string()).into(),
            _ => js_sys::Error::new(&err.to_string()).into(),
        }
    }
}
