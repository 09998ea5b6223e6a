use three_d::*;


/// Scale, position and XYZ Euler rotation (radians)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: [f32; 3],
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

impl Transform {
    /// Translation * Rx * Ry * Rz * Scale
    pub fn matrix(&self) -> Mat4 {
        let [sx, sy, sz] = self.scale;
        let [px, py, pz] = self.position;
        let [rx, ry, rz] = self.rotation;
        Mat4::from_translation(vec3(px, py, pz))
            * Mat4::from_angle_x(Rad(rx))
            * Mat4::from_angle_y(Rad(ry))
            * Mat4::from_angle_z(Rad(rz))
            * Mat4::from_nonuniform_scale(sx, sy, sz)
    }
}


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instance {
    Primary,
    Clone,
}


struct Preset {
    compact: Transform,
    standard: Transform,
}

const PRIMARY_PRESET: Preset = Preset {
    compact: Transform {
        scale: [0.5, 0.5, 0.5],
        position: [-0.6, 0.0, 0.0],
        rotation: [0.0, 0.4, 0.2],
    },
    standard: Transform {
        scale: [1.0, 1.0, 1.0],
        position: [2.0, 5.0, 0.0],
        rotation: [0.1, -0.4, 0.0],
    },
};

const CLONE_PRESET: Preset = Preset {
    compact: Transform {
        scale: [0.5, 0.5, 0.5],
        position: [1.0, 0.0, -1.6],
        rotation: [0.1, 0.0, -0.3],
    },
    standard: Transform {
        scale: [1.0, 1.0, 1.0],
        position: [4.9, -4.0, -1.3],
        rotation: [0.2, 0.7, 0.0],
    },
};


pub fn preset(instance: Instance, compact: bool) -> Transform {
    let preset = match instance {
        Instance::Primary => &PRIMARY_PRESET,
        Instance::Clone => &CLONE_PRESET,
    };
    if compact { preset.compact } else { preset.standard }
}


/// Anything in the scene graph that can take a model matrix
pub trait SceneNode {
    fn set_transformation(&mut self, transformation: Mat4);
}


/// A scene node plus the transform last applied to it
pub struct PlacedInstance<N> {
    pub node: N,
    transform: Transform,
}

impl<N: SceneNode> PlacedInstance<N> {
    pub fn place(node: N, instance: Instance, compact: bool) -> Self {
        let mut placed = Self {
            node,
            transform: preset(instance, compact),
        };
        placed.apply();
        placed
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_position_x(&mut self, x: f32) {
        self.transform.position[0] = x;
        self.apply();
    }

    pub fn set_position_y(&mut self, y: f32) {
        self.transform.position[1] = y;
        self.apply();
    }

    fn apply(&mut self) {
        self.node.set_transformation(self.transform.matrix());
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    /// Records every matrix it is given
    #[derive(Default)]
    struct RecordingNode {
        applied: Vec<Mat4>,
    }

    impl SceneNode for RecordingNode {
        fn set_transformation(&mut self, transformation: Mat4) {
            self.applied.push(transformation);
        }
    }

    fn translation(m: &Mat4) -> [f32; 3] {
        [m.w.x, m.w.y, m.w.z]
    }

    #[test]
    fn compact_clone_uses_compact_preset() {
        let placed = PlacedInstance::place(RecordingNode::default(), Instance::Clone, true);
        assert_eq!(placed.transform().position, [1.0, 0.0, -1.6]);
        assert_eq!(placed.transform().scale, [0.5, 0.5, 0.5]);
        assert_eq!(placed.transform().rotation, [0.1, 0.0, -0.3]);
        assert_eq!(placed.node.applied.len(), 1);
        assert_eq!(translation(&placed.node.applied[0]), [1.0, 0.0, -1.6]);
    }

    #[test]
    fn standard_primary_uses_standard_preset() {
        let placed = PlacedInstance::place(RecordingNode::default(), Instance::Primary, false);
        assert_eq!(
            *placed.transform(),
            Transform {
                scale: [1.0, 1.0, 1.0],
                position: [2.0, 5.0, 0.0],
                rotation: [0.1, -0.4, 0.0],
            }
        );
    }

    #[test]
    fn position_updates_keep_other_axes() {
        let mut placed = PlacedInstance::place(RecordingNode::default(), Instance::Clone, true);
        placed.set_position_y(0.0);
        placed.set_position_x(2.5);
        assert_eq!(placed.transform().position, [2.5, 0.0, -1.6]);
        assert_eq!(placed.transform().scale, [0.5, 0.5, 0.5]);
        assert_eq!(translation(placed.node.applied.last().unwrap()), [2.5, 0.0, -1.6]);
    }

    #[test]
    fn matrix_scales_before_translating() {
        let t = Transform {
            scale: [0.5, 0.5, 0.5],
            position: [1.0, 2.0, 3.0],
            rotation: [0.0, 0.0, 0.0],
        };
        let p = t.matrix() * vec4(2.0, 0.0, 0.0, 1.0);
        assert!((p.x - 2.0).abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
        assert!((p.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_is_applied_x_then_y_then_z_on_the_left() {
        // A quarter turn about Z maps +X to +Y before the X rotation sees it
        let t = Transform {
            scale: [1.0, 1.0, 1.0],
            position: [0.0, 0.0, 0.0],
            rotation: [std::f32::consts::FRAC_PI_2, 0.0, std::f32::consts::FRAC_PI_2],
        };
        let p = t.matrix() * vec4(1.0, 0.0, 0.0, 0.0);
        assert!(p.x.abs() < 1e-6);
        assert!(p.y.abs() < 1e-6);
        assert!((p.z - 1.0).abs() < 1e-6);
    }
}
