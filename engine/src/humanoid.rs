//! Fixed humanoid topology.
//!
//! ```text
//! Torso ─┬─ Head
//!        ├─ RightArm ── RightForearm
//!        ├─ LeftArm ── LeftForearm
//!        ├─ RightThigh ── RightShin
//!        └─ LeftThigh ── LeftShin
//! ```
//!
//! The figure stands on the `y = 0` plane facing `+z` with limbs hanging
//! straight down. Every limb rotates about the end it is attached with.

use {
    crate::{
        command::{Controls, Motion},
        figure::Part,
        joint::{Joint, Limit},
        math::{Axis, Transform},
        renderer::Shape,
    },
    nalgebra as na,
};

/// Geometric parameters the bind pose is derived from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Dimensions {
    pub torso_height: f32,
    pub torso_radius: f32,
    pub head_radius: f32,

    /// Shoulder height above the torso center, relative to torso height.
    pub shoulder_ratio: f32,
    pub arm_radius: f32,
    pub upper_arm_length: f32,
    pub forearm_length: f32,

    /// Distance from the torso center line to a hip.
    pub hip_offset: f32,
    pub leg_radius: f32,
    pub thigh_length: f32,
    pub shin_length: f32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions {
            torso_height: 1.5,
            torso_radius: 0.75,
            head_radius: 0.32,
            shoulder_ratio: 0.38,
            arm_radius: 0.35,
            upper_arm_length: 1.4,
            forearm_length: 0.77,
            hip_offset: 0.4,
            leg_radius: 0.3,
            thigh_length: 1.0,
            shin_length: 0.9,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Right,
    Left,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Right => "Right",
            Side::Left => "Left",
        }
    }

    /// Right limbs sit on `+x`.
    fn sign(self) -> f32 {
        match self {
            Side::Right => 1.0,
            Side::Left => -1.0,
        }
    }

    /// Limit on `z` with `outward` radians away from the body
    /// and `inward` radians across it.
    fn abduction(self, outward: f32, inward: f32) -> Limit {
        match self {
            Side::Right => Limit::new(-inward, outward),
            Side::Left => Limit::new(-outward, inward),
        }
    }
}

/// Component names in selection order.
pub const JOINT_NAMES: [&str; 10] = [
    "Torso",
    "Head",
    "RightArm",
    "RightForearm",
    "LeftArm",
    "LeftForearm",
    "RightThigh",
    "RightShin",
    "LeftThigh",
    "LeftShin",
];

/// Builds part descriptions for the humanoid.
pub fn parts(dims: &Dimensions) -> Vec<Part> {
    let torso = Joint::new(
        "Torso",
        Transform::from_translation(
            0.0,
            dims.thigh_length + dims.shin_length + dims.torso_height / 2.0,
            0.0,
        ),
    );

    let head = Joint::new(
        "Head",
        Transform::from_translation(
            0.0,
            dims.torso_height / 2.0 + dims.head_radius,
            0.0,
        ),
    )
    .with_limit(Axis::X, Limit::symmetric(0.6))
    .with_limit(Axis::Y, Limit::symmetric(1.2));

    let mut parts = vec![
        Part::root(
            torso,
            Shape::Box {
                width: 2.0 * dims.torso_radius,
                height: dims.torso_height,
                depth: dims.torso_radius,
            },
            Controls::new(Motion::Walk, Motion::Yaw),
        ),
        Part::child(
            "Torso",
            head,
            Shape::Box {
                width: 2.0 * dims.head_radius,
                height: dims.head_radius,
                depth: dims.head_radius,
            },
            Controls::new(Motion::Rotate(Axis::X), Motion::Rotate(Axis::Y)),
        ),
    ];

    for &side in &[Side::Right, Side::Left] {
        parts.extend(arm(dims, side));
    }
    for &side in &[Side::Right, Side::Left] {
        parts.extend(leg(dims, side));
    }
    parts
}

fn limb_shape(radius: f32, length: f32) -> Shape {
    Shape::Sphere {
        radius,
        stretch: [0.5, length / (2.0 * radius), 0.5],
    }
}

/// Segment hanging from a pivot at its upper end.
fn segment(
    name: String,
    offset: na::Vector3<f32>,
    length: f32,
) -> Joint {
    Joint::new(name, Transform::from_translation(offset.x, offset.y, offset.z))
        .with_pivot(na::Vector3::new(0.0, length / 2.0, 0.0))
}

fn arm(dims: &Dimensions, side: Side) -> [Part; 2] {
    let arm_name = format!("{}Arm", side.name());
    let shoulder = dims.torso_height * dims.shoulder_ratio;

    let upper = segment(
        arm_name.clone(),
        na::Vector3::new(
            side.sign() * (dims.torso_radius + dims.arm_radius),
            shoulder - dims.upper_arm_length / 2.0,
            0.0,
        ),
        dims.upper_arm_length,
    )
    .with_limit(Axis::X, Limit::new(-3.0, 1.0))
    .with_limit(Axis::Z, side.abduction(3.0, 0.2));

    let forearm = segment(
        format!("{}Forearm", side.name()),
        na::Vector3::new(
            0.0,
            -(dims.upper_arm_length + dims.forearm_length) / 2.0,
            0.0,
        ),
        dims.forearm_length,
    )
    .with_limit(Axis::X, Limit::new(-2.5, 0.0))
    .with_limit(Axis::Y, Limit::symmetric(1.0));

    [
        Part::child(
            "Torso",
            upper,
            limb_shape(dims.arm_radius, dims.upper_arm_length),
            Controls::new(Motion::Rotate(Axis::X), Motion::Rotate(Axis::Z)),
        ),
        Part::child(
            &arm_name,
            forearm,
            limb_shape(dims.arm_radius * 0.9, dims.forearm_length),
            Controls::new(Motion::Rotate(Axis::X), Motion::Rotate(Axis::Y)),
        ),
    ]
}

fn leg(dims: &Dimensions, side: Side) -> [Part; 2] {
    let thigh_name = format!("{}Thigh", side.name());

    let thigh = segment(
        thigh_name.clone(),
        na::Vector3::new(
            side.sign() * dims.hip_offset,
            -(dims.torso_height + dims.thigh_length) / 2.0,
            0.0,
        ),
        dims.thigh_length,
    )
    .with_limit(Axis::X, Limit::new(-2.0, 0.6))
    .with_limit(Axis::Z, side.abduction(1.2, 0.3));

    let shin = segment(
        format!("{}Shin", side.name()),
        na::Vector3::new(
            0.0,
            -(dims.thigh_length + dims.shin_length) / 2.0,
            0.0,
        ),
        dims.shin_length,
    )
    .with_limit(Axis::X, Limit::new(0.0, 2.2))
    .with_limit(Axis::Y, Limit::symmetric(0.3));

    [
        Part::child(
            "Torso",
            thigh,
            limb_shape(dims.leg_radius, dims.thigh_length),
            Controls::new(Motion::Rotate(Axis::X), Motion::Rotate(Axis::Z)),
        ),
        Part::child(
            &thigh_name,
            shin,
            limb_shape(dims.leg_radius * 0.9, dims.shin_length),
            Controls::new(Motion::Rotate(Axis::X), Motion::Rotate(Axis::Y)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_follow_selection_order() {
        let parts = parts(&Dimensions::default());
        let names: Vec<_> = parts.iter().map(|part| part.joint.name()).collect();
        assert_eq!(names, JOINT_NAMES);
    }

    #[test]
    fn only_torso_and_head_pivot_at_origin() {
        for part in parts(&Dimensions::default()) {
            let centered = part.joint.pivot() == &na::Vector3::zeros();
            let expected = matches!(part.joint.name(), "Torso" | "Head");
            assert_eq!(centered, expected, "{}", part.joint.name());
        }
    }

    #[test]
    fn sides_mirror_each_other() {
        let parts = parts(&Dimensions::default());
        let find = |name: &str| {
            parts
                .iter()
                .find(|part| part.joint.name() == name)
                .map(|part| part.joint.clone())
                .unwrap()
        };

        let right = find("RightArm");
        let left = find("LeftArm");
        assert_eq!(
            right.bind().translation().x,
            -left.bind().translation().x
        );

        let right = right.limit(Axis::Z).unwrap();
        let left = left.limit(Axis::Z).unwrap();
        assert_eq!(right.min, -left.max);
        assert_eq!(right.max, -left.min);
    }
}
