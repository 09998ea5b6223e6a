/// Viewports at or below this width use the compact (mobile) layout
pub const BREAKPOINT_PX: f64 = 768.0;

pub const DEFAULT_ASSET_URL: &str = "obj/apple.gltf";


/// Attribute selectors for the page elements the scene drives
#[derive(Clone, Debug)]
pub struct Selectors {
    pub mount: String,
    pub title: String,
    pub subtitles: String,
    pub home_link: String,
    pub git_link: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            mount: "[data-canvas]".to_string(),
            title: "[data-mv=\"title\"]".to_string(),
            subtitles: "[data-mv=\"subTitle\"]".to_string(),
            home_link: "[data-mv=\"homeLink\"]".to_string(),
            git_link: "[data-mv=\"gitLink\"]".to_string(),
        }
    }
}


#[derive(Clone, Debug)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub z_far: f32,
    /// Distance back along the view axis
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            z_far: 1000.0,
            distance: 9.0,
        }
    }
}


/// Pointer smoothing rates and how the smoothed value moves the scene
#[derive(Clone, Debug)]
pub struct PointerConfig {
    pub ease_x: f64,
    pub ease_y: f64,
    pub primary_x_factor: f64,
    pub camera_y_factor: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            ease_x: 0.004,
            ease_y: 0.003,
            primary_x_factor: 0.7,
            camera_y_factor: -0.9,
        }
    }
}


/// A white directional light shining from `position` toward the origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSpec {
    pub position: [f32; 3],
    pub intensity: f32,
    pub casts_shadow: bool,
}


pub const DIRECTIONAL_LIGHTS: [LightSpec; 5] = [
    LightSpec { position: [0.0, 5.0, 0.0], intensity: 2.0, casts_shadow: true },
    LightSpec { position: [-5.0, 3.0, 2.0], intensity: 2.0, casts_shadow: false },
    LightSpec { position: [5.0, 3.0, 2.0], intensity: 2.0, casts_shadow: true },
    LightSpec { position: [0.0, 3.0, 5.0], intensity: 1.0, casts_shadow: true },
    LightSpec { position: [0.0, 3.0, -5.0], intensity: 2.0, casts_shadow: false },
];


#[derive(Clone, Debug)]
pub struct HeroConfig {
    pub asset_url: String,
    pub selectors: Selectors,
    pub compact_media_query: String,
    pub camera: CameraConfig,
    pub pointer: PointerConfig,
    pub ambient_color: [u8; 3],
    pub ambient_intensity: f32,
    pub lights: Vec<LightSpec>,
    pub shadow_map_size: u32,
    pub multisamples: u8,
    pub resize_throttle_ms: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            asset_url: DEFAULT_ASSET_URL.to_string(),
            selectors: Selectors::default(),
            compact_media_query: format!("(max-width: {}px)", BREAKPOINT_PX),
            camera: CameraConfig::default(),
            pointer: PointerConfig::default(),
            ambient_color: [0x66, 0x66, 0x66],
            ambient_intensity: 1.0,
            lights: DIRECTIONAL_LIGHTS.to_vec(),
            shadow_map_size: 4096,
            multisamples: 4,
            resize_throttle_ms: 100.0,
        }
    }
}

impl HeroConfig {
    pub fn with_asset_url(mut self, url: impl Into<String>) -> Self {
        self.asset_url = url.into();
        self
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_query_matches_breakpoint() {
        assert_eq!(HeroConfig::default().compact_media_query, "(max-width: 768px)");
    }

    #[test]
    fn three_of_five_lights_cast_shadows() {
        let config = HeroConfig::default();
        assert_eq!(config.lights.len(), 5);
        let casting: Vec<usize> = config.lights.iter()
            .enumerate()
            .filter(|(_, l)| l.casts_shadow)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(casting, vec![0, 2, 3]);
    }

    #[test]
    fn asset_url_override() {
        let config = HeroConfig::default().with_asset_url("models/pear.glb");
        assert_eq!(config.asset_url, "models/pear.glb");
        assert_eq!(config.camera.distance, 9.0);
    }
}
