use marionette::{Renderable, Shape, Transform};

/// Stand-in for a renderer mesh.
/// Remembers the last matrix it was given.
#[derive(Clone, Debug)]
pub struct MeshProxy {
    name: String,
    shape: Shape,
    transform: Transform,
}

impl MeshProxy {
    pub fn new(name: &str, shape: Shape) -> Self {
        MeshProxy {
            name: name.to_owned(),
            shape,
            transform: Transform::identity(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Mesh center in world space.
    pub fn center(&self) -> [f32; 3] {
        let t = self.transform.translation();
        [t.x, t.y, t.z]
    }
}

impl Renderable for MeshProxy {
    fn set_world_transform(&mut self, transform: &Transform) {
        tracing::trace!(mesh = %self.name, "Set world transform");
        self.transform = *transform;
    }
}

#[cfg(test)]
mod tests {
    use {super::*, marionette::Figure};

    #[test]
    fn proxies_follow_figure() {
        let mut figure = Figure::humanoid().unwrap();
        let mut meshes: Vec<_> = figure
            .shapes()
            .map(|(name, shape)| MeshProxy::new(name, shape))
            .collect();

        figure.walk(1.0);
        figure.present(&mut meshes).unwrap();

        let torso = &meshes[0];
        assert_eq!(torso.name(), "Torso");
        assert_eq!(torso.center()[2], 1.0);
    }
}
