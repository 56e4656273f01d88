use {
    crate::{
        command::{Command, Controls, InputSnapshot, Motion, Selection},
        config::{Config, Steps},
        error::Error,
        humanoid,
        joint::{Joint, LimitOutcome, LimitPolicy},
        math::{Axis, Transform},
        renderer::{Renderable, Shape},
        rig::Rig,
        skeleton::Skeleton,
    },
    nalgebra as na,
};

/// Description of one figure component before assembly.
#[derive(Clone, Debug)]
pub struct Part {
    pub parent: Option<String>,
    pub joint: Joint,
    pub shape: Shape,
    pub controls: Controls,
}

impl Part {
    pub fn root(joint: Joint, shape: Shape, controls: Controls) -> Self {
        Part {
            parent: None,
            joint,
            shape,
            controls,
        }
    }

    pub fn child(
        parent: &str,
        joint: Joint,
        shape: Shape,
        controls: Controls,
    ) -> Self {
        Part {
            parent: Some(parent.to_owned()),
            joint,
            shape,
            controls,
        }
    }
}

/// Articulated figure driven by discrete commands.
#[derive(Clone, Debug)]
pub struct Figure {
    rig: Rig,

    // Indexed by joint, in skeleton order.
    shapes: Box<[Shape]>,
    controls: Box<[Controls]>,

    selection: Selection,
    steps: Steps,
}

impl Figure {
    /// Builds the humanoid described by the configuration.
    pub fn new(config: &Config) -> Result<Self, Error> {
        Figure::from_parts(
            humanoid::parts(&config.dimensions),
            config.steps,
            config.limit_policy,
        )
    }

    pub fn humanoid() -> Result<Self, Error> {
        Figure::new(&Config::default())
    }

    pub fn from_parts(
        parts: Vec<Part>,
        steps: Steps,
        policy: LimitPolicy,
    ) -> Result<Self, Error> {
        let mut builder = Skeleton::builder();
        let mut bindings = Vec::with_capacity(parts.len());

        for part in parts {
            bindings.push((
                part.joint.name().to_owned(),
                part.shape,
                part.controls,
            ));
            builder = match &part.parent {
                None => builder.root(part.joint),
                Some(parent) => builder.child(parent, part.joint),
            };
        }

        let skeleton = builder.build()?;

        let mut shapes = vec![Shape::sphere(0.0); skeleton.len()];
        let mut controls =
            vec![Controls::new(Motion::Walk, Motion::Yaw); skeleton.len()];
        for (name, shape, control) in bindings {
            let index = skeleton.index_of(&name)?;
            shapes[index] = shape;
            controls[index] = control;
        }

        Ok(Figure {
            selection: Selection::new(skeleton.len()),
            rig: Rig::new(skeleton, policy),
            shapes: shapes.into_boxed_slice(),
            controls: controls.into_boxed_slice(),
            steps,
        })
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn skeleton(&self) -> &Skeleton {
        self.rig.skeleton()
    }

    /// Component names in selection order.
    pub fn joint_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.skeleton().names()
    }

    pub fn joint(&self, name: &str) -> Result<&Joint, Error> {
        let index = self.skeleton().index_of(name)?;
        Ok(self.skeleton().joint(index))
    }

    pub fn selected_component(&self) -> &str {
        self.skeleton().joint(self.selection.index()).name()
    }

    pub fn select(&mut self, name: &str) -> Result<(), Error> {
        let index = self.skeleton().index_of(name)?;
        while self.selection.index() != index {
            self.selection.next();
        }
        Ok(())
    }

    /// Applies a single command to completion.
    pub fn apply_command(&mut self, command: Command) {
        let selected = self.selection.index();

        match command {
            Command::NextComponent => self.selection.next(),
            Command::PrevComponent => self.selection.prev(),
            _ => {
                if let Some((motion, sign)) =
                    self.controls[selected].resolve(command)
                {
                    self.drive(selected, motion, sign);
                }
                return;
            }
        }

        tracing::debug!(
            component = self.selected_component(),
            "Component selected"
        );
    }

    /// Applies every active command of the frame in fixed order.
    pub fn apply_input(&mut self, input: &InputSnapshot) {
        for command in input.commands() {
            self.apply_command(command);
        }
    }

    fn drive(&mut self, index: usize, motion: Motion, sign: f32) {
        match motion {
            Motion::Walk => self.rig.translate_root(sign * self.steps.translation),
            Motion::Yaw => self.rig.yaw_root(sign * self.steps.rotation),
            Motion::Rotate(axis) => {
                self.rig
                    .rotate_joint(index, axis, sign * self.steps.rotation);
            }
        }
    }

    /// Rotates the named joint about its pivot.
    pub fn rotate(
        &mut self,
        name: &str,
        axis: Axis,
        delta: f32,
    ) -> Result<LimitOutcome, Error> {
        let index = self.skeleton().index_of(name)?;
        Ok(self.rig.rotate_joint(index, axis, delta))
    }

    /// Moves the whole figure along its heading.
    pub fn walk(&mut self, distance: f32) {
        self.rig.translate_root(distance);
    }

    /// Turns the whole figure about the vertical axis.
    pub fn turn(&mut self, angle: f32) {
        self.rig.yaw_root(angle);
    }

    pub fn facing(&self) -> &na::Vector3<f32> {
        self.rig.facing()
    }

    /// Returns every joint and the root motion to rest.
    /// Selection is kept.
    pub fn reset(&mut self) {
        self.rig.reset();
    }

    pub fn world_matrix(&self, name: &str) -> Result<Transform, Error> {
        let index = self.skeleton().index_of(name)?;
        Ok(self.rig.world_matrix(index))
    }

    /// Primitive per joint, in skeleton order.
    pub fn shapes(&self) -> impl Iterator<Item = (&str, Shape)> + '_ {
        self.joint_names().zip(self.shapes.iter().copied())
    }

    /// Hands current mesh matrices to the renderer,
    /// one mesh per joint in skeleton order.
    pub fn present<R: Renderable>(&self, meshes: &mut [R]) -> Result<(), Error> {
        if meshes.len() != self.shapes.len() {
            return Err(Error::MeshCountMismatch {
                expected: self.shapes.len(),
                actual: meshes.len(),
            });
        }

        let worlds = self.rig.world_matrices();
        for ((mesh, shape), world) in
            meshes.iter_mut().zip(self.shapes.iter()).zip(worlds.iter())
        {
            mesh.set_world_transform(&shape.mesh_matrix(world));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, approx::assert_relative_eq};

    #[derive(Default)]
    struct Recorder {
        transform: Option<Transform>,
    }

    impl Renderable for Recorder {
        fn set_world_transform(&mut self, transform: &Transform) {
            self.transform = Some(*transform);
        }
    }

    #[test]
    fn selection_cycles_through_joint_names() {
        let mut figure = Figure::humanoid().unwrap();
        assert_eq!(figure.selected_component(), "Torso");

        figure.apply_command(Command::PrevComponent);
        assert_eq!(figure.selected_component(), "LeftShin");

        figure.apply_command(Command::NextComponent);
        figure.apply_command(Command::NextComponent);
        assert_eq!(figure.selected_component(), "Head");
    }

    #[test]
    fn torso_commands_move_root() {
        let mut figure = Figure::humanoid().unwrap();
        figure.apply_command(Command::IncreaseSelected);
        figure.apply_command(Command::IncreaseSelected);

        assert_relative_eq!(
            figure.rig().displacement().translation(),
            na::Vector3::new(0.0, 0.0, 0.2),
            epsilon = 1e-6
        );

        figure.apply_command(Command::RotateSelectedPositive);
        assert_relative_eq!(
            *figure.facing(),
            na::Vector3::new(0.1f32.sin(), 0.0, 0.1f32.cos()),
            epsilon = 1e-6
        );
    }

    #[test]
    fn limb_commands_rotate_selected_joint() {
        let mut figure = Figure::humanoid().unwrap();
        figure.select("RightForearm").unwrap();

        figure.apply_command(Command::DecreaseSelected);
        figure.apply_command(Command::DecreaseSelected);
        figure.apply_command(Command::RotateSelectedNegative);

        let forearm = figure.joint("RightForearm").unwrap();
        assert_relative_eq!(forearm.angle(Axis::X), -0.2, epsilon = 1e-6);
        assert_relative_eq!(forearm.angle(Axis::Y), -0.1, epsilon = 1e-6);
        assert_eq!(figure.joint("RightArm").unwrap().angles(), [0.0; 3]);
    }

    #[test]
    fn increase_past_limit_snaps_back() {
        let mut figure = Figure::humanoid().unwrap();
        figure.select("RightForearm").unwrap();

        // Elbow does not hyperextend.
        figure.apply_command(Command::IncreaseSelected);
        assert_eq!(figure.joint("RightForearm").unwrap().angle(Axis::X), 0.0);
    }

    #[test]
    fn unknown_names_fail() {
        let mut figure = Figure::humanoid().unwrap();
        let unknown = Error::UnknownJoint {
            name: "Tail".to_owned(),
        };

        assert_eq!(figure.world_matrix("Tail").unwrap_err(), unknown);
        assert_eq!(figure.rotate("Tail", Axis::X, 0.1).unwrap_err(), unknown);
        assert_eq!(figure.select("Tail").unwrap_err(), unknown);
    }

    #[test]
    fn present_applies_shape_scale() {
        let figure = Figure::humanoid().unwrap();
        let mut meshes: Vec<Recorder> =
            figure.shapes().map(|_| Recorder::default()).collect();

        figure.present(&mut meshes).unwrap();

        let torso = figure.world_matrix("Torso").unwrap();
        let [x, y, z] = figure.shapes[0].extents();
        assert_eq!(meshes[0].transform, Some(torso.scale(x, y, z)));
        assert!(meshes.iter().all(|mesh| mesh.transform.is_some()));
    }

    #[test]
    fn present_rejects_wrong_mesh_count() {
        let figure = Figure::humanoid().unwrap();
        let mut meshes: Vec<Recorder> = Vec::new();

        assert_eq!(
            figure.present(&mut meshes).unwrap_err(),
            Error::MeshCountMismatch {
                expected: 10,
                actual: 0,
            }
        );
    }

    #[test]
    fn feet_touch_the_ground() {
        let figure = Figure::humanoid().unwrap();
        let dims = crate::humanoid::Dimensions::default();

        for name in &["RightShin", "LeftShin"] {
            let world = figure.world_matrix(name).unwrap();
            let sole = world
                .transform_point(&na::Point3::new(0.0, -dims.shin_length / 2.0, 0.0));
            assert_relative_eq!(sole.y, 0.0, epsilon = 1e-5);
        }
    }
}
