use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::config::Selectors;
use crate::error::{HeroError, Result};
use crate::timeline::{Property, Target};


/// Every element the scene touches, looked up and validated once at startup
pub struct HeroElements {
    pub mount: HtmlElement,
    pub title: HtmlElement,
    pub subtitles: Vec<HtmlElement>,
    pub home_link: HtmlElement,
    pub git_link: HtmlElement,
}

impl HeroElements {
    pub fn lookup(document: &Document, selectors: &Selectors) -> Result<Self> {
        Ok(Self {
            mount: query(document, &selectors.mount)?,
            title: query(document, &selectors.title)?,
            subtitles: query_all(document, &selectors.subtitles)?,
            home_link: query(document, &selectors.home_link)?,
            git_link: query(document, &selectors.git_link)?,
        })
    }

    pub fn element(&self, target: Target) -> Option<&HtmlElement> {
        match target {
            Target::Title => Some(&self.title),
            Target::Subtitle(i) => self.subtitles.get(i),
            Target::Surface => Some(&self.mount),
            Target::HomeLink => Some(&self.home_link),
            Target::GitLink => Some(&self.git_link),
            Target::Instance(_) => None,
        }
    }
}


fn query(document: &Document, selector: &str) -> Result<HtmlElement> {
    document
        .query_selector(selector)?
        .ok_or_else(|| HeroError::MissingElement { selector: selector.to_string() })?
        .dyn_into::<HtmlElement>()
        .map_err(|_| HeroError::NotHtmlElement { selector: selector.to_string() })
}


fn query_all(document: &Document, selector: &str) -> Result<Vec<HtmlElement>> {
    let list = document.query_selector_all(selector)?;
    if list.length() == 0 {
        return Err(HeroError::MissingElement { selector: selector.to_string() });
    }
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|node| {
            node.dyn_into::<HtmlElement>()
                .map_err(|_| HeroError::NotHtmlElement { selector: selector.to_string() })
        })
        .collect()
}


/// Lets pointer, wheel and touch input fall through the canvas to the page
pub const PASSIVE_OVERLAY_STYLE: [(&str, &str); 2] = [
    ("pointer-events", "none"),
    ("touch-action", "auto"),
];


pub fn make_passive(element: &HtmlElement) -> Result<()> {
    let style = element.style();
    for (name, value) in PASSIVE_OVERLAY_STYLE {
        style.set_property(name, value)?;
    }
    Ok(())
}


/// Reads the current computed value of a tweened style property
pub fn read_style(window: &Window, element: &HtmlElement, property: Property) -> f32 {
    let style = match window.get_computed_style(element) {
        Ok(Some(style)) => style,
        _ => return default_value(property),
    };
    match property {
        Property::TranslateY => style.get_property_value("transform")
            .map(|v| parse_translate_y(&v))
            .unwrap_or(0.0),
        Property::Opacity => style.get_property_value("opacity")
            .map(|v| parse_opacity(&v))
            .unwrap_or(1.0),
        Property::PositionY => 0.0,
    }
}


pub fn write_style(element: &HtmlElement, property: Property, value: f32) -> Result<()> {
    let style = element.style();
    match property {
        Property::TranslateY => style.set_property("transform", &translate_y(value))?,
        Property::Opacity => style.set_property("opacity", &value.to_string())?,
        Property::PositionY => {}
    }
    Ok(())
}


fn default_value(property: Property) -> f32 {
    match property {
        Property::Opacity => 1.0,
        _ => 0.0,
    }
}


/// Forced onto the compositor with a 3D translation
pub fn translate_y(value: f32) -> String {
    format!("translate3d(0px, {}px, 0px)", value)
}


/// Extracts the vertical translation from a computed `transform` value
pub fn parse_translate_y(transform: &str) -> f32 {
    let transform = transform.trim();
    let (args, index) = if let Some(rest) = transform.strip_prefix("matrix3d(") {
        (rest, 13)
    } else if let Some(rest) = transform.strip_prefix("matrix(") {
        (rest, 5)
    } else {
        return 0.0;
    };
    args.trim_end_matches(')')
        .split(',')
        .nth(index)
        .and_then(|v| v.trim().parse::<f32>().ok())
        .unwrap_or(0.0)
}


pub fn parse_opacity(opacity: &str) -> f32 {
    opacity.trim().parse::<f32>().unwrap_or(1.0)
}
