use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::{prelude::*, JsCast};

use crate::utils::get_time_milliseconds;


#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Decision {
    /// Run the handler now
    Fire,
    /// Run the handler once after this many milliseconds
    Schedule(f64),
    /// A trailing call is already queued
    Skip,
}


/// Leading-edge throttle with one trailing call, so the last event in a
/// burst is never lost
#[derive(Clone, Debug)]
pub struct Throttle {
    interval_ms: f64,
    last_fire: Option<f64>,
    trailing: bool,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            last_fire: None,
            trailing: false,
        }
    }

    pub fn on_event(&mut self, now: f64) -> Decision {
        if self.trailing {
            return Decision::Skip;
        }
        match self.last_fire {
            Some(last) if now - last < self.interval_ms => {
                self.trailing = true;
                Decision::Schedule(self.interval_ms - (now - last))
            }
            _ => {
                self.last_fire = Some(now);
                Decision::Fire
            }
        }
    }

    /// Must be called when a scheduled call runs
    pub fn on_trailing(&mut self, now: f64) {
        self.trailing = false;
        self.last_fire = Some(now);
    }
}


/// Wraps `handler` in a throttled JS callback
pub fn throttled<F: Fn() + 'static>(interval_ms: f64, handler: F) -> Closure<dyn FnMut()> {
    let handler = Rc::new(handler);
    let throttle = Rc::new(RefCell::new(Throttle::new(interval_ms)));

    Closure::wrap(Box::new(move || {
        let decision = throttle.borrow_mut().on_event(get_time_milliseconds());
        match decision {
            Decision::Fire => handler(),
            Decision::Schedule(delay) => {
                let trailing = {
                    let handler = handler.clone();
                    let throttle = throttle.clone();
                    Closure::once_into_js(move || {
                        throttle.borrow_mut().on_trailing(get_time_milliseconds());
                        handler();
                    })
                };
                let scheduled = web_sys::window().map(|window| {
                    window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        trailing.unchecked_ref(),
                        delay.ceil() as i32,
                    )
                });
                if !matches!(scheduled, Some(Ok(_))) {
                    throttle.borrow_mut().on_trailing(get_time_milliseconds());
                    handler();
                }
            }
            Decision::Skip => {}
        }
    }) as Box<dyn FnMut()>)
}
