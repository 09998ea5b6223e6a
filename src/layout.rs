use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::config::BREAKPOINT_PX;
use crate::error::Result;
use crate::log; // macro import
use crate::state::HeroState;


#[inline(always)]
pub fn is_compact_width(width: f64) -> bool {
    width <= BREAKPOINT_PX
}


/// Old IE builds lack `MediaQueryList.addEventListener`
pub fn is_legacy_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    ua.contains("msie") || ua.contains("trident")
}


pub struct LayoutDetector {
    media: Option<MediaQueryList>,
    legacy: bool,
}

impl LayoutDetector {
    pub fn new(window: &web_sys::Window, query: &str, user_agent: &str) -> Self {
        let media = window.match_media(query).ok().flatten();
        if media.is_none() {
            log!("LayoutDetector::new(): matchMedia({}) unavailable", query);
        }
        Self {
            media,
            legacy: is_legacy_user_agent(user_agent),
        }
    }

    /// Evaluates the media query, falling back to the width rule
    pub fn is_compact(&self, fallback_width: f64) -> bool {
        match &self.media {
            Some(media) => media.matches(),
            None => is_compact_width(fallback_width),
        }
    }

    /// Registers the breakpoint-crossing listener. Returns false when the
    /// layout stays fixed for the session.
    pub fn listen(&self, state: Rc<RefCell<HeroState>>) -> Result<bool> {
        let media = match &self.media {
            Some(media) if !self.legacy => media,
            _ => return Ok(false),
        };

        let closure = Closure::wrap(Box::new(move |event: MediaQueryListEvent| {
            let compact = event.matches();
            log!("LayoutDetector: compact={}", compact);
            state.borrow_mut().viewport.set_compact(compact);
        }) as Box<dyn FnMut(MediaQueryListEvent)>);
        media.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(true)
    }
}
