use {
    crate::{
        joint::{LimitOutcome, LimitPolicy},
        math::{rotate_vector, Axis, Transform},
        skeleton::Skeleton,
    },
    nalgebra as na,
    smallvec::SmallVec,
};

/// Pose engine.
///
/// Owns the skeleton together with the root motion
/// and composes world matrices on demand.
#[derive(Clone, Debug)]
pub struct Rig {
    skeleton: Skeleton,
    displacement: Transform,
    facing: na::Vector3<f32>,
    policy: LimitPolicy,
}

impl Rig {
    pub fn new(skeleton: Skeleton, policy: LimitPolicy) -> Self {
        Rig {
            skeleton,
            displacement: Transform::identity(),
            facing: na::Vector3::z(),
            policy,
        }
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn policy(&self) -> LimitPolicy {
        self.policy
    }

    /// Accumulated walk translation and yaw of the whole figure.
    pub fn displacement(&self) -> &Transform {
        &self.displacement
    }

    /// Unit heading of the figure in world space.
    pub fn facing(&self) -> &na::Vector3<f32> {
        &self.facing
    }

    /// Composes the joint's world matrix from the root down.
    pub fn world_matrix(&self, index: usize) -> Transform {
        self.skeleton
            .chain(index)
            .iter()
            .fold(self.displacement, |world, &index| {
                world.multiply(&self.skeleton.joint(index).local())
            })
    }

    /// World matrices of all joints in skeleton order.
    pub fn world_matrices(&self) -> Vec<Transform> {
        let mut worlds: Vec<Transform> =
            Vec::with_capacity(self.skeleton.len());

        for joint in self.skeleton.joints() {
            let parent = match joint.parent() {
                Some(parent) => worlds[parent],
                None => self.displacement,
            };
            worlds.push(parent.multiply(&joint.local()));
        }
        worlds
    }

    /// Rotates a joint about its pivot.
    ///
    /// Children with their own rotation are unwound before
    /// and rewound after the update, so their axis state survives as is.
    pub fn rotate_joint(
        &mut self,
        index: usize,
        axis: Axis,
        delta: f32,
    ) -> LimitOutcome {
        let coupled: SmallVec<[usize; 4]> = self
            .skeleton
            .children(index)
            .filter(|&child| self.skeleton.joint(child).is_posed())
            .collect();

        let saved: SmallVec<[(usize, [f32; 3]); 4]> = coupled
            .iter()
            .map(|&child| (child, self.skeleton.joint_mut(child).unwind()))
            .collect();

        let joint = self.skeleton.joint_mut(index);
        tracing::trace!(joint = %joint.name(), ?axis, delta, "Rotate joint");
        let outcome = joint.rotate_about_pivot(axis, delta, self.policy);

        for &(child, angles) in saved.iter().rev() {
            self.skeleton.joint_mut(child).rewind(angles);
        }

        outcome
    }

    /// Moves the figure along its heading.
    pub fn translate_root(&mut self, distance: f32) {
        let step = self.facing * distance;
        tracing::trace!(distance, "Translate root");
        self.displacement = self.displacement.translate_by(&step);
    }

    /// Turns the figure in place about the vertical axis.
    pub fn yaw_root(&mut self, angle: f32) {
        tracing::trace!(angle, "Yaw root");
        self.displacement =
            self.displacement.multiply(&Transform::from_rotation(angle, Axis::Y));
        self.facing = rotate_vector(&self.facing, angle, Axis::Y);
    }

    /// Returns the figure to its rest pose at the origin.
    pub fn reset(&mut self) {
        self.skeleton.reset();
        self.displacement = Transform::identity();
        self.facing = na::Vector3::z();
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::joint::{Joint, Limit},
        approx::assert_relative_eq,
        std::f32::consts::FRAC_PI_2,
    };

    fn arm_rig() -> Rig {
        let skeleton = Skeleton::builder()
            .root(Joint::new("Torso", Transform::identity()))
            .child(
                "Torso",
                Joint::new("Arm", Transform::from_translation(1.0, 0.0, 0.0))
                    .with_pivot(na::Vector3::new(0.0, 0.5, 0.0)),
            )
            .child(
                "Arm",
                Joint::new(
                    "Forearm",
                    Transform::from_translation(0.0, -1.0, 0.0),
                )
                .with_pivot(na::Vector3::new(0.0, 0.5, 0.0))
                .with_limit(Axis::X, Limit::new(-2.0, 1.0)),
            )
            .build()
            .unwrap();

        Rig::new(skeleton, LimitPolicy::Reset)
    }

    #[test]
    fn rest_pose_composes_bind_transforms() {
        let rig = arm_rig();
        let skeleton = rig.skeleton();
        let forearm = skeleton.index_of("Forearm").unwrap();
        let arm = skeleton.index_of("Arm").unwrap();

        let expected = skeleton.joint(arm).bind() * skeleton.joint(forearm).bind();
        assert_eq!(rig.world_matrix(forearm), expected);
    }

    #[test]
    fn batch_matches_single_queries() {
        let mut rig = arm_rig();
        rig.yaw_root(0.4);
        rig.translate_root(2.0);
        rig.rotate_joint(1, Axis::Z, 0.3);
        rig.rotate_joint(2, Axis::X, -0.9);

        let worlds = rig.world_matrices();
        for (index, world) in worlds.iter().enumerate() {
            assert_relative_eq!(
                world.to_homogeneous(),
                rig.world_matrix(index).to_homogeneous(),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn parent_rotation_keeps_child_angles() {
        let mut rig = arm_rig();
        rig.rotate_joint(2, Axis::X, -1.0);
        rig.rotate_joint(1, Axis::X, 0.3);

        assert_eq!(rig.skeleton().joint(2).angle(Axis::X), -1.0);
        assert_relative_eq!(rig.skeleton().joint(1).angle(Axis::X), 0.3);
    }

    #[test]
    fn child_follows_parent_rotation() {
        let mut rig = arm_rig();
        rig.rotate_joint(2, Axis::X, -1.0);
        let local_before = rig.skeleton().joint(2).local();

        rig.rotate_joint(1, Axis::Z, 0.5);

        assert_relative_eq!(
            rig.skeleton().joint(2).local().to_homogeneous(),
            local_before.to_homogeneous(),
            epsilon = 1e-5
        );

        // Elbow stays attached to the upper arm's lower end.
        let elbow = na::Point3::new(0.0, -0.5, 0.0);
        let from_arm = rig.world_matrix(1).transform_point(&elbow);
        let from_forearm = rig
            .world_matrix(2)
            .transform_point(&na::Point3::new(0.0, 0.5, 0.0));
        assert_relative_eq!(from_arm, from_forearm, epsilon = 1e-5);
    }

    #[test]
    fn yaw_turns_heading() {
        let mut rig = arm_rig();
        rig.yaw_root(FRAC_PI_2);
        assert_relative_eq!(*rig.facing(), na::Vector3::x(), epsilon = 1e-6);

        rig.translate_root(1.0);
        assert_relative_eq!(
            rig.displacement().translation(),
            na::Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn turning_in_place_keeps_position() {
        let mut rig = arm_rig();
        rig.translate_root(3.0);
        rig.yaw_root(1.2);

        assert_relative_eq!(
            rig.displacement().translation(),
            na::Vector3::new(0.0, 0.0, 3.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn reset_restores_rest_pose() {
        let mut rig = arm_rig();
        let rest = rig.world_matrices();

        rig.yaw_root(0.7);
        rig.translate_root(1.5);
        rig.rotate_joint(2, Axis::X, -0.5);
        rig.reset();

        assert_eq!(rig.world_matrices(), rest);
        assert_eq!(*rig.facing(), na::Vector3::z());
    }
}
