use crate::math::Transform;

/// Mesh wrapper provided by the rendering collaborator.
pub trait Renderable {
    fn set_world_transform(&mut self, transform: &Transform);
}

/// Primitive a joint is drawn with.
///
/// Meshes are expected to be unit sized and centered at the origin,
/// `extents` stretches them to the part's size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Shape {
    /// Unit cube scaled to `[width, height, depth]`.
    Box { width: f32, height: f32, depth: f32 },

    /// Unit sphere scaled by `radius` and then by `stretch` per axis.
    Sphere { radius: f32, stretch: [f32; 3] },
}

impl Shape {
    pub fn sphere(radius: f32) -> Self {
        Shape::Sphere {
            radius,
            stretch: [1.0; 3],
        }
    }

    pub fn extents(&self) -> [f32; 3] {
        match *self {
            Shape::Box {
                width,
                height,
                depth,
            } => [width, height, depth],
            Shape::Sphere { radius, stretch } => [
                radius * stretch[0],
                radius * stretch[1],
                radius * stretch[2],
            ],
        }
    }

    /// Matrix to hand to the renderer for a joint with given world matrix.
    pub fn mesh_matrix(&self, world: &Transform) -> Transform {
        let [x, y, z] = self.extents();
        world.scale(x, y, z)
    }
}
