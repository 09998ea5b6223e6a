use wasm_bindgen::prelude::*;
use std::future::Future;


#[macro_export]
macro_rules! log {
    ( $( $t:tt )* ) => {
        $crate::utils::console_log(&format!( $( $t )* ))
    }
}


#[macro_export]
macro_rules! log_error {
    ( $( $t:tt )* ) => {
        $crate::utils::console_error(&format!( $( $t )* ))
    }
}


#[wasm_bindgen(module = "/helper.js")]
extern "C" {
    pub fn get_viewport_width() -> f64;
    pub fn get_viewport_height() -> f64;
    pub fn get_user_agent() -> String;
    pub fn get_time_milliseconds() -> f64;
}


/// Writes a line to the browser console (stderr when running natively)
pub fn console_log(s: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&s.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{}", s);
}


/// Writes an error line to the browser console (stderr when running natively)
pub fn console_error(s: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&s.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("ERROR: {}", s);
}


/// Enable better error messages if our code ever panics
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}


/// Executes an asyncs Future on the current thread
#[inline(always)]
pub fn execute_future<F: Future<Output = ()> + 'static>(f: F) {
    wasm_bindgen_futures::spawn_local(f);
}
