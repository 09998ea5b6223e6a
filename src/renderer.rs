use std::{cell::RefCell, rc::Rc};

use three_d::*;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{HtmlCanvasElement, PointerEvent};

use crate::config::HeroConfig;
use crate::dom::{self, HeroElements};
use crate::error::{HeroError, Result};
use crate::frame::{FrameLoop, Stage};
use crate::layout::LayoutDetector;
use crate::loader;
use crate::scene::SceneHandle;
use crate::state::{HeroState, PointerState, ViewportState};
use crate::throttle;
use crate::timeline::{Property, Target, TweenSink};
use crate::utils::*;
use crate::{log, log_error}; // macro import


/// What a frame writes to: the scene plus the page elements
struct HeroStage<'a> {
    scene: &'a mut SceneHandle,
    elements: &'a HeroElements,
    window: &'a web_sys::Window,
}

impl TweenSink for HeroStage<'_> {
    fn read(&self, target: Target, property: Property) -> f32 {
        match target {
            Target::Instance(instance) => self.scene.instances()
                .map(|i| i.get(instance).transform().position[1])
                .unwrap_or(0.0),
            _ => match self.elements.element(target) {
                Some(element) => dom::read_style(self.window, element, property),
                None => 0.0,
            },
        }
    }

    fn write(&mut self, target: Target, property: Property, value: f32) {
        match target {
            Target::Instance(instance) => {
                if let Some(instances) = self.scene.instances_mut() {
                    instances.get_mut(instance).set_position_y(value);
                }
            }
            _ => {
                if let Some(element) = self.elements.element(target) {
                    if let Err(e) = dom::write_style(element, property, value) {
                        log_error!("HeroStage::write(): {:?}: {}", target, e);
                    }
                }
            }
        }
    }
}

impl Stage for HeroStage<'_> {
    fn set_camera_y(&mut self, y: f32) {
        self.scene.set_camera_y(y);
    }

    fn set_primary_x(&mut self, x: f32) {
        if let Some(instances) = self.scene.instances_mut() {
            instances.primary.set_position_x(x);
        }
    }
}


/// WebGL context attributes for a canvas the page shows through
fn context_attributes(multisamples: u8) -> [(&'static str, bool); 3] {
    [
        ("alpha", true),
        ("premultipliedAlpha", true),
        ("antialias", multisamples > 0),
    ]
}


/// Creates the canvas' WebGL2 context with an alpha channel. The browser hands
/// the same context back to later `getContext` calls, so the window picks it up.
fn prepare_transparent_context(canvas: &HtmlCanvasElement, multisamples: u8) -> Result<()> {
    let options = js_sys::Object::new();
    for (key, value) in context_attributes(multisamples) {
        js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_bool(value))?;
    }
    canvas
        .get_context_with_context_options("webgl2", &options)?
        .ok_or_else(|| HeroError::Window("WebGL2 is not available".to_string()))?;
    Ok(())
}


fn listen_pointer(window: &web_sys::Window, state: Rc<RefCell<HeroState>>) -> Result<()> {
    let closure = Closure::wrap(Box::new(move |event: PointerEvent| {
        state.borrow_mut().on_pointer_move(event.client_x() as f64, event.client_y() as f64);
    }) as Box<dyn FnMut(PointerEvent)>);
    window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}


fn listen_resize(window: &web_sys::Window, state: Rc<RefCell<HeroState>>, interval_ms: f64) -> Result<()> {
    let closure = throttle::throttled(interval_ms, move || {
        let (w, h) = (get_viewport_width(), get_viewport_height());
        if state.borrow_mut().on_resize(w, h) {
            log!("resize: {}x{}", w, h);
        }
    });
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}


pub async fn main(config: HeroConfig) -> Result<()> {
    let window = web_sys::window().ok_or(HeroError::NoWindow)?;
    let document = window.document().ok_or(HeroError::NoDocument)?;
    let elements = HeroElements::lookup(&document, &config.selectors)?;
    log!("main(): {} subtitles", elements.subtitles.len());

    let (width, height) = (get_viewport_width(), get_viewport_height());
    let layout = LayoutDetector::new(&window, &config.compact_media_query, &get_user_agent());
    let compact = layout.is_compact(width);
    log!("main(): viewport {}x{}, compact={}", width, height, compact);

    let state = Rc::new(RefCell::new(HeroState::new(
        ViewportState::new(width, height, compact),
        PointerState::new(&config.pointer),
    )));
    if !layout.listen(state.clone())? {
        log!("main(): layout is fixed for this session");
    }

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| HeroError::Dom("created element is not a canvas".to_string()))?;
    elements.mount.append_child(&canvas)?;
    prepare_transparent_context(&canvas, config.multisamples)?;
    let overlay = canvas.clone();

    let three_window = Window::new(WindowSettings {
        title: "hero-scene".to_string(),
        #[cfg(target_arch = "wasm32")]
        canvas: Some(canvas),
        surface_settings: SurfaceSettings {
            multisamples: config.multisamples,
            ..Default::default()
        },
        ..Default::default()
    })
    .map_err(|e| HeroError::Window(e.to_string()))?;
    dom::make_passive(&overlay)?;

    let context = three_window.gl();
    log!("main(): OpenGL version: {:?}", context.version());

    let aspect = state.borrow().viewport.aspect();
    let mut scene = SceneHandle::new(&context, three_window.viewport(), aspect, &config);

    listen_pointer(&window, state.clone())?;
    listen_resize(&window, state.clone(), config.resize_throttle_ms)?;

    let mut rx_model = loader::spawn_load(config.asset_url.clone());
    let mut frame_loop = FrameLoop::new(config.pointer.clone());

    three_window.render_loop(move |frame_input| {
        // receive the loaded model from the async fetch
        if let Ok(Ok(cpu_model)) = rx_model.try_recv() {
            match loader::instantiate(&context, &cpu_model) {
                Ok((primary, clone)) => {
                    let mut state = state.borrow_mut();
                    let compact = state.viewport.is_compact;
                    scene.place(primary, clone, compact);
                    frame_loop.on_loaded(&mut state, compact, elements.subtitles.len());
                    log!("main(): model placed, compact={}", compact);
                }
                Err(e) => log_error!("main(): {}", e),
            }
        }

        {
            let mut state = state.borrow_mut();
            if state.take_resize() {
                scene.on_resize(frame_input.viewport);
            }
            let mut stage = HeroStage {
                scene: &mut scene,
                elements: &elements,
                window: &window,
            };
            frame_loop.tick(&mut state, (frame_input.elapsed_time / 1000.0) as f32, &mut stage);
        }

        scene.render(&frame_input.screen());

        FrameOutput::default()
    });

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_keeps_an_alpha_channel() {
        let attributes = context_attributes(4);
        assert!(attributes.contains(&("alpha", true)));
        assert!(attributes.contains(&("premultipliedAlpha", true)));
        assert!(attributes.contains(&("antialias", true)));
        assert!(context_attributes(0).contains(&("antialias", false)));
    }
}
