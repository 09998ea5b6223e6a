use crate::config::PointerConfig;
use crate::entrance;
use crate::log; // macro import
use crate::placement::{self, Instance};
use crate::state::HeroState;
use crate::timeline::{self, Timeline, TweenSink};


/// The parts of the scene a frame mutates
pub trait Stage: TweenSink {
    fn set_camera_y(&mut self, y: f32);
    fn set_primary_x(&mut self, x: f32);
}


/// Horizontal position of the primary instance for a smoothed pointer x.
///
/// The compact layout keeps its preset x; only the standard layout follows
/// the pointer.
pub fn primary_x(compact: bool, pointer_x: f64, config: &PointerConfig) -> f32 {
    let preset_x = placement::preset(Instance::Primary, compact).position[0];
    if compact {
        preset_x
    } else {
        (preset_x as f64 - pointer_x * config.primary_x_factor) as f32
    }
}


pub fn camera_y(pointer_y: f64, config: &PointerConfig) -> f32 {
    (pointer_y * config.camera_y_factor) as f32
}


pub struct FrameLoop {
    pointer: PointerConfig,
    /// Layout the instances were placed with
    placed_compact: bool,
    entrance: Option<Timeline>,
}

impl FrameLoop {
    pub fn new(pointer: PointerConfig) -> Self {
        Self {
            pointer,
            placed_compact: false,
            entrance: None,
        }
    }

    /// Marks the model as loaded and starts the entrance animation. Later
    /// calls are ignored; the animation is never rebuilt.
    pub fn on_loaded(&mut self, state: &mut HeroState, placed_compact: bool, subtitle_count: usize) {
        if !state.loaded.set() {
            return;
        }
        self.placed_compact = placed_compact;
        self.entrance = Some(entrance::build(subtitle_count));
    }

    /// The entrance animation while it is still running
    pub fn entrance(&self) -> Option<&Timeline> {
        self.entrance.as_ref()
    }

    /// Runs one frame. Returns false when nothing was updated.
    pub fn tick<S: Stage>(&mut self, state: &mut HeroState, dt_seconds: f32, stage: &mut S) -> bool {
        if !state.loaded.is_set() {
            return false;
        }

        state.pointer.step();
        stage.set_primary_x(primary_x(self.placed_compact, state.pointer.x, &self.pointer));
        stage.set_camera_y(camera_y(state.pointer.y, &self.pointer));

        if let Some(entrance) = self.entrance.as_mut() {
            entrance.advance(timeline::smooth_lag(dt_seconds), stage);
            if entrance.is_complete() {
                log!("FrameLoop::tick(): entrance finished after {:.2}s", entrance.time());
                self.entrance = None;
            }
        }
        true
    }
}
