use thiserror::Error;
use wasm_bindgen::JsValue;


#[derive(Debug, Error)]
pub enum HeroError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("`window` has no document")]
    NoDocument,

    /// A required page element was not found during the startup validation pass
    #[error("required element `{selector}` is missing from the page")]
    MissingElement { selector: String },

    #[error("element `{selector}` is not an HTML element")]
    NotHtmlElement { selector: String },

    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error("failed to create the render window: {0}")]
    Window(String),

    #[error("failed to load asset `{url}`: {reason}")]
    AssetLoad { url: String, reason: String },
}

impl From<JsValue> for HeroError {
    fn from(value: JsValue) -> Self {
        HeroError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<HeroError> for JsValue {
    fn from(e: HeroError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}


pub type Result<T> = std::result::Result<T, HeroError>;
