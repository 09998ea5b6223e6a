use crate::config::PointerConfig;


#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    pub width: f64,
    pub height: f64,
    pub half_width: f64,
    pub half_height: f64,
    pub is_compact: bool,
}

impl ViewportState {
    pub fn new(width: f64, height: f64, is_compact: bool) -> Self {
        Self {
            width,
            height,
            half_width: width * 0.5,
            half_height: height * 0.5,
            is_compact,
        }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            (self.width / self.height) as f32
        } else {
            1.0
        }
    }

    /// Stores a new window size. Returns false and leaves the state untouched
    /// when the width did not change: height-only resizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if self.width == width {
            return false;
        }
        let is_compact = self.is_compact;
        *self = Self::new(width, height, is_compact);
        true
    }

    pub fn set_compact(&mut self, is_compact: bool) {
        self.is_compact = is_compact;
    }
}


/// Raw pointer samples and their per-frame smoothed approximation
#[derive(Clone, Debug, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
    ease_x: f64,
    ease_y: f64,
}

impl PointerState {
    pub fn new(config: &PointerConfig) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            target_x: 0.0,
            target_y: 0.0,
            ease_x: config.ease_x,
            ease_y: config.ease_y,
        }
    }

    /// Normalizes a client-space sample to [-1, 1] around the viewport center
    pub fn set_target(&mut self, client_x: f64, client_y: f64, viewport: &ViewportState) {
        self.target_x = (viewport.half_width - client_x) / viewport.half_width;
        self.target_y = (viewport.half_height - client_y) / viewport.half_height;
    }

    /// Moves the smoothed value a fixed fraction of the remaining gap
    pub fn step(&mut self) {
        self.x += (self.target_x - self.x) * self.ease_x;
        self.y += (self.target_y - self.y) * self.ease_y;
    }
}


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadedFlag(bool);

impl LoadedFlag {
    pub fn is_set(&self) -> bool {
        self.0
    }

    /// Returns true only on the first call
    pub fn set(&mut self) -> bool {
        let first = !self.0;
        self.0 = true;
        first
    }
}


#[derive(Clone, Debug)]
pub struct HeroState {
    pub viewport: ViewportState,
    pub pointer: PointerState,
    pub loaded: LoadedFlag,
    resize_pending: bool,
}

impl HeroState {
    pub fn new(viewport: ViewportState, pointer: PointerState) -> Self {
        Self {
            viewport,
            pointer,
            loaded: LoadedFlag::default(),
            resize_pending: false,
        }
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64) {
        self.pointer.set_target(client_x, client_y, &self.viewport);
    }

    /// Records a window resize; the camera is only told about it when the
    /// width changed
    pub fn on_resize(&mut self, width: f64, height: f64) -> bool {
        let changed = self.viewport.resize(width, height);
        self.resize_pending |= changed;
        changed
    }

    /// Consumes a pending camera/renderer update
    pub fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.resize_pending)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn state(width: f64, height: f64) -> HeroState {
        HeroState::new(
            ViewportState::new(width, height, false),
            PointerState::new(&PointerConfig::default()),
        )
    }

    #[test]
    fn viewport_halves_are_derived() {
        let v = ViewportState::new(1024.0, 768.0, false);
        assert_eq!(v.half_width, 512.0);
        assert_eq!(v.half_height, 384.0);
        assert!((v.aspect() - 1024.0 / 768.0).abs() < 1e-6);
    }

    #[test]
    fn height_only_resize_is_ignored() {
        let mut s = state(1024.0, 768.0);
        assert!(!s.on_resize(1024.0, 600.0));
        assert!(!s.take_resize());
        assert_eq!(s.viewport.height, 768.0);
        assert_eq!(s.viewport.half_height, 384.0);
    }

    #[test]
    fn width_change_updates_and_flags_once() {
        let mut s = state(1024.0, 768.0);
        assert!(s.on_resize(800.0, 600.0));
        assert_eq!(s.viewport, ViewportState::new(800.0, 600.0, false));
        assert!(s.take_resize());
        assert!(!s.take_resize());
    }

    #[test]
    fn resize_keeps_layout_flag() {
        let mut v = ViewportState::new(700.0, 900.0, true);
        v.resize(1200.0, 900.0);
        assert!(v.is_compact);
    }

    #[test]
    fn pointer_is_normalized_around_center() {
        let mut s = state(1000.0, 500.0);
        s.on_pointer_move(500.0, 250.0);
        assert_eq!((s.pointer.target_x, s.pointer.target_y), (0.0, 0.0));
        s.on_pointer_move(0.0, 0.0);
        assert_eq!((s.pointer.target_x, s.pointer.target_y), (1.0, 1.0));
        s.on_pointer_move(1000.0, 500.0);
        assert_eq!((s.pointer.target_x, s.pointer.target_y), (-1.0, -1.0));
    }

    #[test]
    fn last_pointer_sample_wins() {
        let mut s = state(1000.0, 500.0);
        s.on_pointer_move(0.0, 0.0);
        s.on_pointer_move(750.0, 125.0);
        assert_eq!(s.pointer.target_x, -0.5);
        assert_eq!(s.pointer.target_y, 0.5);
        assert_eq!((s.pointer.x, s.pointer.y), (0.0, 0.0));
    }

    #[test]
    fn smoothing_decays_geometrically() {
        let mut p = PointerState::new(&PointerConfig::default());
        p.target_x = 1.0;
        p.target_y = -1.0;
        let mut gap_x = 1.0_f64;
        let mut gap_y = 1.0_f64;
        for _ in 0..500 {
            p.step();
            let next_x = p.target_x - p.x;
            let next_y = p.y - p.target_y;
            assert!((next_x - gap_x * (1.0 - 0.004)).abs() < 1e-12);
            assert!((next_y - gap_y * (1.0 - 0.003)).abs() < 1e-12);
            assert!(next_x > 0.0 && next_x < gap_x);
            assert!(next_y > 0.0 && next_y < gap_y);
            gap_x = next_x;
            gap_y = next_y;
        }
    }

    #[test]
    fn smoothing_at_target_stays_put() {
        let mut p = PointerState::new(&PointerConfig::default());
        for _ in 0..10 {
            p.step();
        }
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn loaded_flag_sets_once() {
        let mut flag = LoadedFlag::default();
        assert!(!flag.is_set());
        assert!(flag.set());
        assert!(!flag.set());
        assert!(flag.is_set());
    }
}
