use three_d::*;

use crate::config::{CameraConfig, HeroConfig, LightSpec};
use crate::log; // macro import
use crate::placement::{Instance, PlacedInstance, SceneNode};


/// A loaded glTF model; every part keeps the node transform it was loaded
/// with and the placement matrix is applied on top of it
pub struct ModelNode {
    model: Model<PhysicalMaterial>,
    base: Vec<Mat4>,
}

impl ModelNode {
    pub fn new(model: Model<PhysicalMaterial>) -> Self {
        let base = model.iter().map(|part| part.transformation()).collect();
        Self { model, base }
    }
}

impl SceneNode for ModelNode {
    fn set_transformation(&mut self, transformation: Mat4) {
        for (part, base) in self.model.iter_mut().zip(self.base.iter()) {
            part.set_transformation(transformation * *base);
        }
    }
}


pub struct Instances {
    pub primary: PlacedInstance<ModelNode>,
    pub clone: PlacedInstance<ModelNode>,
}

impl Instances {
    pub fn get_mut(&mut self, instance: Instance) -> &mut PlacedInstance<ModelNode> {
        match instance {
            Instance::Primary => &mut self.primary,
            Instance::Clone => &mut self.clone,
        }
    }

    pub fn get(&self, instance: Instance) -> &PlacedInstance<ModelNode> {
        match instance {
            Instance::Primary => &self.primary,
            Instance::Clone => &self.clone,
        }
    }

    fn parts(&self) -> impl Iterator<Item = &ModelPart<PhysicalMaterial>> + Clone {
        self.primary.node.model.iter().chain(self.clone.node.model.iter())
    }
}


/// Direction of a light shining from `position` toward the origin
pub fn light_direction(light: &LightSpec) -> Vec3 {
    let [x, y, z] = light.position;
    vec3(-x, -y, -z)
}


/// Camera, lights and (once loaded) the placed instances
pub struct SceneHandle {
    camera: Camera,
    camera_config: CameraConfig,
    ambient: AmbientLight,
    directional: Vec<(DirectionalLight, bool)>,
    shadow_map_size: u32,
    instances: Option<Instances>,
}

impl SceneHandle {
    /// Builds the camera and the static lights. The near plane is the
    /// startup aspect ratio and stays fixed afterwards.
    pub fn new(context: &Context, viewport: Viewport, aspect: f32, config: &HeroConfig) -> Self {
        let camera = Camera::new_perspective(
            viewport,
            vec3(0.0, 0.0, config.camera.distance),
            vec3(0.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
            degrees(config.camera.fov_degrees),
            aspect,
            config.camera.z_far,
        );

        let [r, g, b] = config.ambient_color;
        let ambient = AmbientLight::new(context, config.ambient_intensity, Srgba::new_opaque(r, g, b));

        let directional = config.lights.iter()
            .map(|l| {
                let light = DirectionalLight::new(
                    context,
                    l.intensity,
                    Srgba::WHITE,
                    &light_direction(l),
                );
                (light, l.casts_shadow)
            })
            .collect::<Vec<_>>();
        log!(
            "SceneHandle::new(): {} directional lights, {} casting shadows",
            directional.len(),
            directional.iter().filter(|(_, s)| *s).count()
        );

        Self {
            camera,
            camera_config: config.camera.clone(),
            ambient,
            directional,
            shadow_map_size: config.shadow_map_size,
            instances: None,
        }
    }

    /// Updates the camera aspect for a new drawable size
    pub fn on_resize(&mut self, viewport: Viewport) {
        self.camera.set_viewport(viewport);
        log!("SceneHandle::on_resize(): {}x{}", viewport.width, viewport.height);
    }

    /// Moves the camera vertically, keeping it looking straight down -Z
    pub fn set_camera_y(&mut self, y: f32) {
        let z = self.camera_config.distance;
        self.camera.set_view(vec3(0.0, y, z), vec3(0.0, y, 0.0), vec3(0.0, 1.0, 0.0));
    }

    /// Adds both instances with the preset for `compact`
    pub fn place(&mut self, primary: ModelNode, clone: ModelNode, compact: bool) {
        self.instances = Some(Instances {
            primary: PlacedInstance::place(primary, Instance::Primary, compact),
            clone: PlacedInstance::place(clone, Instance::Clone, compact),
        });
        log!("SceneHandle::place(): compact={}", compact);
    }

    pub fn instances(&self) -> Option<&Instances> {
        self.instances.as_ref()
    }

    pub fn instances_mut(&mut self) -> Option<&mut Instances> {
        self.instances.as_mut()
    }

    /// Every part casts onto every shadow map and receives from all of them
    fn update_shadows(&mut self) {
        let Some(instances) = &self.instances else {
            return;
        };
        for (light, casts_shadow) in self.directional.iter_mut() {
            if *casts_shadow {
                light.generate_shadow_map(self.shadow_map_size, instances.parts());
            }
        }
    }

    pub fn render(&mut self, target: &RenderTarget) {
        self.update_shadows();

        let mut lights: Vec<&dyn Light> = vec![&self.ambient];
        lights.extend(self.directional.iter().map(|(light, _)| light as &dyn Light));

        target
            .clear(ClearState::color_and_depth(0.0, 0.0, 0.0, 0.0, 1.0))
            .render(
                &self.camera,
                self.instances.iter().flat_map(|instances| instances.parts()),
                &lights,
            );
    }
}
