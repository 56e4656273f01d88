use {
    nalgebra as na,
    std::ops::{Mul, MulAssign},
};

/// Principal axis of a right-handed coordinate system.
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
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Rotation matrix about this axis by `angle` radians.
    pub fn rotation(self, angle: f32) -> na::Matrix4<f32> {
        let (s, c) = angle.sin_cos();

        #[rustfmt::skip]
        let m = match self {
            Axis::X => na::Matrix4::new(
                1.0, 0.0, 0.0, 0.0,
                0.0,   c,  -s, 0.0,
                0.0,   s,   c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ),
            Axis::Y => na::Matrix4::new(
                  c, 0.0,   s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                 -s, 0.0,   c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ),
            Axis::Z => na::Matrix4::new(
                  c,  -s, 0.0, 0.0,
                  s,   c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ),
        };
        m
    }
}

/// Affine transform in homogeneous coordinates.
///
/// Every constructor and operation here keeps the bottom row equal to
/// `[0, 0, 0, 1]`.
///
/// `translate` and `rotate` prepend the new factor, so the new operation is
/// applied after the existing content when transforming a point.
/// `scale` appends, so scaling happens before the existing content.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform(na::Matrix4<f32>);

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Transform(na::Matrix4::identity())
    }

    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Transform(na::Matrix4::new_translation(&na::Vector3::new(x, y, z)))
    }

    pub fn from_rotation(angle: f32, axis: Axis) -> Self {
        Transform(axis.rotation(angle))
    }

    pub fn from_scale(sx: f32, sy: f32, sz: f32) -> Self {
        Transform(na::Matrix4::new_nonuniform_scaling(&na::Vector3::new(
            sx, sy, sz,
        )))
    }

    /// Returns `T(x, y, z) ∘ self`.
    pub fn translate(&self, x: f32, y: f32, z: f32) -> Self {
        Transform::from_translation(x, y, z).multiply(self)
    }

    /// Returns `T(v) ∘ self`.
    pub fn translate_by(&self, v: &na::Vector3<f32>) -> Self {
        self.translate(v.x, v.y, v.z)
    }

    /// Returns `R_axis(angle) ∘ self`.
    pub fn rotate(&self, angle: f32, axis: Axis) -> Self {
        Transform::from_rotation(angle, axis).multiply(self)
    }

    /// Returns `self ∘ S(sx, sy, sz)`.
    pub fn scale(&self, sx: f32, sy: f32, sz: f32) -> Self {
        self.multiply(&Transform::from_scale(sx, sy, sz))
    }

    /// Returns `self ∘ rhs`, that is `rhs` is applied first.
    pub fn multiply(&self, rhs: &Transform) -> Self {
        Transform(self.0 * rhs.0)
    }

    /// Returns `None` if the transform is singular,
    /// e.g. was built with a zero scale factor.
    pub fn invert(&self) -> Option<Self> {
        let mut inverse = self.0.try_inverse()?;

        // Scrub rounding noise out of the affine row.
        inverse[(3, 0)] = 0.0;
        inverse[(3, 1)] = 0.0;
        inverse[(3, 2)] = 0.0;
        inverse[(3, 3)] = 1.0;
        Some(Transform(inverse))
    }

    pub fn transform_point(&self, p: &na::Point3<f32>) -> na::Point3<f32> {
        let h = self.0 * na::Vector4::new(p.x, p.y, p.z, 1.0);
        na::Point3::new(h.x, h.y, h.z)
    }

    pub fn transform_vector(&self, v: &na::Vector3<f32>) -> na::Vector3<f32> {
        let h = self.0 * na::Vector4::new(v.x, v.y, v.z, 0.0);
        na::Vector3::new(h.x, h.y, h.z)
    }

    /// Image of the origin.
    pub fn translation(&self) -> na::Vector3<f32> {
        na::Vector3::new(self.0[(0, 3)], self.0[(1, 3)], self.0[(2, 3)])
    }

    pub fn is_affine(&self) -> bool {
        self.0[(3, 0)] == 0.0
            && self.0[(3, 1)] == 0.0
            && self.0[(3, 2)] == 0.0
            && self.0[(3, 3)] == 1.0
    }

    pub fn to_homogeneous(&self) -> na::Matrix4<f32> {
        self.0
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.multiply(&rhs)
    }
}

impl Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Transform {
        self.multiply(rhs)
    }
}

impl MulAssign for Transform {
    fn mul_assign(&mut self, rhs: Transform) {
        *self = self.multiply(&rhs);
    }
}

/// Applies `R_axis(angle)` to a direction vector.
pub fn rotate_vector(
    v: &na::Vector3<f32>,
    angle: f32,
    axis: Axis,
) -> na::Vector3<f32> {
    Transform::from_rotation(angle, axis).transform_vector(v)
}

#[cfg(test)]
mod tests {
    use {super::*, approx::assert_relative_eq, std::f32::consts::FRAC_PI_2};

    fn sample() -> Transform {
        Transform::identity()
            .scale(2.0, 0.5, 0.5)
            .rotate(0.7, Axis::Z)
            .rotate(-0.3, Axis::X)
            .translate(0.75, 0.57, -1.0)
    }

    #[test]
    fn multiply_applies_right_factor_first() {
        let a = Transform::from_rotation(0.4, Axis::Y).translate(1.0, 2.0, 3.0);
        let b = sample();
        let p = na::Point3::new(0.3, -1.2, 2.5);

        let composed = a.multiply(&b).transform_point(&p);
        let nested = a.transform_point(&b.transform_point(&p));

        assert_relative_eq!(composed, nested, epsilon = 1e-5);
    }

    #[test]
    fn identity_is_neutral() {
        let m = sample();
        assert_relative_eq!(
            Transform::identity().multiply(&m).to_homogeneous(),
            m.to_homogeneous(),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            m.multiply(&Transform::identity()).to_homogeneous(),
            m.to_homogeneous(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn rotations_compose_in_parent_frame() {
        // X first, then Y about the parent's Y axis.
        let m = Transform::identity()
            .rotate(FRAC_PI_2, Axis::X)
            .rotate(FRAC_PI_2, Axis::Y);

        // +y -> +z under X, then +z -> +x under Y.
        let v = m.transform_vector(&na::Vector3::y());
        assert_relative_eq!(v, na::Vector3::x(), epsilon = 1e-6);
    }

    #[test]
    fn rotation_is_right_handed() {
        let v = rotate_vector(&na::Vector3::x(), FRAC_PI_2, Axis::Z);
        assert_relative_eq!(v, na::Vector3::y(), epsilon = 1e-6);

        let v = rotate_vector(&na::Vector3::z(), FRAC_PI_2, Axis::Y);
        assert_relative_eq!(v, na::Vector3::x(), epsilon = 1e-6);
    }

    #[test]
    fn scale_is_applied_before_existing_content() {
        let m = Transform::from_translation(1.0, 0.0, 0.0).scale(2.0, 1.0, 1.0);
        let p = m.transform_point(&na::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, na::Point3::new(3.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn inverse_undoes_transform() {
        let m = sample();
        let inv = m.invert().unwrap();

        assert!(inv.is_affine());
        assert_relative_eq!(
            (m * inv).to_homogeneous(),
            na::Matrix4::identity(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn singular_transform_has_no_inverse() {
        assert!(Transform::from_scale(1.0, 0.0, 1.0).invert().is_none());
    }

    #[test]
    fn operations_keep_affine_row() {
        assert!(sample().is_affine());
        assert!(sample().multiply(&sample()).is_affine());
    }

    #[test]
    fn translation_is_image_of_origin() {
        let m = sample();
        let origin = m.transform_point(&na::Point3::origin());
        assert_relative_eq!(m.translation(), origin.coords, epsilon = 1e-6);
    }
}
