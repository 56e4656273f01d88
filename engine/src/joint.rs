use {
    crate::math::{Axis, Transform},
    nalgebra as na,
};

/// Overshoot past a limit bound that is still accepted.
pub const LIMIT_EPSILON: f32 = 0.01;

/// Soft rotation limit on one axis, in radians.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Limit {
    pub min: f32,
    pub max: f32,
}

impl Limit {
    pub fn new(min: f32, max: f32) -> Self {
        debug_assert!(min <= max, "Limit bounds are swapped");
        Limit { min, max }
    }

    pub fn symmetric(bound: f32) -> Self {
        Limit::new(-bound, bound)
    }

    pub fn admits(&self, angle: f32) -> bool {
        angle >= self.min - LIMIT_EPSILON && angle <= self.max + LIMIT_EPSILON
    }

    pub fn clamp(&self, angle: f32) -> f32 {
        angle.max(self.min).min(self.max)
    }
}

/// What happens to an angle update that leaves the limit interval.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum LimitPolicy {
    /// Axis snaps back to its rest angle.
    Reset,

    /// Axis stops at the violated bound.
    Clamp,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        LimitPolicy::Reset
    }
}

/// Result of a single pivot rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LimitOutcome {
    /// Requested delta was applied as is.
    Accepted,

    /// Limit was exceeded and the axis returned to zero.
    Reset { overshoot: f32 },

    /// Limit was exceeded and the axis stopped at the bound.
    Clamped { bound: f32 },
}

/// Rotational node of a skeleton.
#[derive(Clone, Debug)]
pub struct Joint {
    name: String,
    parent: Option<usize>,
    bind: Transform,
    pose_delta: Transform,
    angles: [f32; 3],
    limits: [Option<Limit>; 3],
    pivot: na::Vector3<f32>,
}

impl Joint {
    pub fn new(name: impl Into<String>, bind: Transform) -> Self {
        Joint {
            name: name.into(),
            parent: None,
            bind,
            pose_delta: Transform::identity(),
            angles: [0.0; 3],
            limits: [None; 3],
            pivot: na::Vector3::zeros(),
        }
    }

    pub fn with_pivot(mut self, pivot: na::Vector3<f32>) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_limit(mut self, axis: Axis, limit: Limit) -> Self {
        self.limits[axis.index()] = Some(limit);
        self
    }

    pub(crate) fn set_parent(&mut self, parent: Option<usize>) {
        self.parent = parent;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn bind(&self) -> &Transform {
        &self.bind
    }

    pub fn pose_delta(&self) -> &Transform {
        &self.pose_delta
    }

    pub fn angle(&self, axis: Axis) -> f32 {
        self.angles[axis.index()]
    }

    pub fn angles(&self) -> [f32; 3] {
        self.angles
    }

    pub fn limit(&self, axis: Axis) -> Option<Limit> {
        self.limits[axis.index()]
    }

    pub fn pivot(&self) -> &na::Vector3<f32> {
        &self.pivot
    }

    /// Transform from parent frame to the joint's current frame.
    pub fn local(&self) -> Transform {
        self.bind.multiply(&self.pose_delta)
    }

    /// Checks whether any axis has moved away from rest.
    pub fn is_posed(&self) -> bool {
        self.angles.iter().any(|&a| a != 0.0)
    }

    /// Rotates the joint in place about its pivot,
    /// honoring the axis limit according to `policy`.
    pub fn rotate_about_pivot(
        &mut self,
        axis: Axis,
        delta: f32,
        policy: LimitPolicy,
    ) -> LimitOutcome {
        let old = self.angles[axis.index()];
        let new = old + delta;

        let (angle, outcome) = match self.limits[axis.index()] {
            Some(limit) if !limit.admits(new) => match policy {
                LimitPolicy::Reset => {
                    let overshoot = if new < limit.min {
                        new - limit.min
                    } else {
                        new - limit.max
                    };
                    (0.0, LimitOutcome::Reset { overshoot })
                }
                LimitPolicy::Clamp => {
                    let bound = limit.clamp(new);
                    (bound, LimitOutcome::Clamped { bound })
                }
            },
            _ => (new, LimitOutcome::Accepted),
        };

        if outcome != LimitOutcome::Accepted {
            tracing::debug!(
                joint = %self.name,
                ?axis,
                requested = new,
                angle,
                "Angle left limits"
            );
        }

        self.apply_pivot_rotation(axis, angle - old);
        self.angles[axis.index()] = angle;
        outcome
    }

    /// Removes this joint's own rotation, returning the angles to restore.
    ///
    /// Rotations are undone in x, y, z order so that `rewind`
    /// can put them back in reverse.
    pub(crate) fn unwind(&mut self) -> [f32; 3] {
        let saved = self.angles;
        for &axis in Axis::ALL.iter() {
            let angle = saved[axis.index()];
            if angle != 0.0 {
                self.apply_pivot_rotation(axis, -angle);
            }
        }
        self.angles = [0.0; 3];
        saved
    }

    pub(crate) fn rewind(&mut self, saved: [f32; 3]) {
        for &axis in Axis::ALL.iter().rev() {
            let angle = saved[axis.index()];
            if angle != 0.0 {
                self.apply_pivot_rotation(axis, angle);
            }
        }
        self.angles = saved;
    }

    /// Returns the joint to its rest pose.
    pub fn reset(&mut self) {
        self.pose_delta = Transform::identity();
        self.angles = [0.0; 3];
    }

    // delta <- T(pivot) ∘ R(angle) ∘ T(-pivot) ∘ delta
    fn apply_pivot_rotation(&mut self, axis: Axis, angle: f32) {
        let p = self.pivot;
        self.pose_delta = self
            .pose_delta
            .translate(-p.x, -p.y, -p.z)
            .rotate(angle, axis)
            .translate(p.x, p.y, p.z);
    }
}
