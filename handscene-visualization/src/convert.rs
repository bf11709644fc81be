//! Conversions from handscene types to Bevy types
//!
//! The only module that knows both the nalgebra-based core types and Bevy's
//! math and colour types.

use bevy::prelude::*;
use handscene_core::{InstanceTransform, Point3f, Rgb, UnitQuaternion, Vector3f};

#[inline]
pub fn vec3_from_point(p: &Point3f) -> Vec3 {
    Vec3::new(p.x, p.y, p.z)
}

#[inline]
pub fn vec3_from_vector(v: &Vector3f) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[inline]
pub fn quat_from_unit_quaternion(q: &UnitQuaternion<f32>) -> Quat {
    let q = q.quaternion();
    Quat::from_xyzw(q.i, q.j, q.k, q.w)
}

pub fn transform_from_instance(instance: &InstanceTransform) -> Transform {
    Transform {
        translation: vec3_from_vector(&instance.translation),
        rotation: quat_from_unit_quaternion(&instance.rotation),
        scale: vec3_from_vector(&instance.scale),
    }
}

pub fn color_from_rgb(rgb: Rgb) -> Color {
    let [r, g, b] = rgb.to_f32();
    Color::srgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_transform_matches() {
        let start = Point3f::new(1.0, 0.0, 0.0);
        let end = Point3f::new(1.0, 0.0, 2.0);
        let instance = InstanceTransform::segment(&start, &end);
        let transform = transform_from_instance(&instance);

        // A unit cylinder along +Y, transformed, ends at the segment endpoints
        let top = transform.transform_point(Vec3::new(0.0, 0.5, 0.0));
        let bottom = transform.transform_point(Vec3::new(0.0, -0.5, 0.0));
        let expected_top = instance.transform_point(&Point3f::new(0.0, 0.5, 0.0));

        assert_relative_eq!(top.x, expected_top.x, epsilon = 1e-5);
        assert_relative_eq!(top.y, expected_top.y, epsilon = 1e-5);
        assert_relative_eq!(top.z, expected_top.z, epsilon = 1e-5);
        assert_relative_eq!((top - bottom).length(), 2.0, epsilon = 1e-5);
        assert_relative_eq!(transform.translation.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_hidden_instance() {
        let transform = transform_from_instance(&InstanceTransform::hidden());
        assert_eq!(transform.translation, Vec3::new(0.0, 0.0, 1000.0));
        assert_eq!(transform.scale, Vec3::ZERO);
    }

    #[test]
    fn test_colour() {
        let color = color_from_rgb(Rgb::new(255, 45, 85)).to_srgba();
        assert_relative_eq!(color.red, 1.0);
        assert_relative_eq!(color.green, 45.0 / 255.0);
        assert_relative_eq!(color.blue, 85.0 / 255.0);
    }
}
