//! Ray Intersection Module
//!
//! Ray-AABB and ray-triangle tests used by the terrain ground query.
//!
//! # Ray-AABB Intersection
//!
//! The slab method finds entry and exit times for each axis pair of planes;
//! the ray hits the box when the latest entry precedes the earliest exit.
//!
//! # Ray-Triangle Intersection
//!
//! Möller–Trumbore: solves for the barycentric coordinates of the hit point
//! directly, without computing the triangle's plane first.

use glam::Vec3;

/// Tolerance below which a ray is treated as parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-7;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }
}

/// Performs ray-AABB intersection using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb` - Box to test against
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the entry point (or exit point when
///   the origin is inside the box)
/// * `None` - No intersection, or the box is behind the origin
pub fn ray_aabb_intersect(ray_origin: Vec3, ray_dir: Vec3, aabb: &Aabb) -> Option<f32> {
    // Near-zero components get a huge reciprocal so that axis never limits the slab
    let inv = |d: f32| {
        if d.abs() > 1e-10 {
            1.0 / d
        } else {
            f32::MAX * d.signum()
        }
    };
    let inv_dir = Vec3::new(inv(ray_dir.x), inv(ray_dir.y), inv(ray_dir.z));

    let t1 = (aabb.min - ray_origin) * inv_dir;
    let t2 = (aabb.max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 { Some(t_min) } else { Some(t_max) }
    } else {
        None
    }
}

/// Performs ray-triangle intersection (Möller–Trumbore).
///
/// Both faces of the triangle are considered hittable.
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the hit point (t >= 0)
/// * `None` - The ray misses, is parallel, or the hit is behind the origin
pub fn ray_triangle_intersect(ray_origin: Vec3, ray_dir: Vec3, triangle: &[Vec3; 3]) -> Option<f32> {
    let [v0, v1, v2] = *triangle;
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let p = ray_dir.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray_origin - v0;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    if t >= 0.0 { Some(t) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_ray_aabb_hit_from_outside() {
        let t = ray_aabb_intersect(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, &unit_box());
        assert!((t.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_aabb_from_inside_returns_exit() {
        let t = ray_aabb_intersect(Vec3::ZERO, Vec3::Z, &unit_box());
        assert!((t.unwrap() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let result = ray_aabb_intersect(Vec3::new(0.0, 0.0, 5.0), Vec3::Z, &unit_box());
        assert!(result.is_none());
    }

    #[test]
    fn test_vertical_ray_misses_outside_footprint() {
        let result = ray_aabb_intersect(Vec3::new(3.0, 10.0, 0.0), Vec3::NEG_Y, &unit_box());
        assert!(result.is_none());
    }

    #[test]
    fn test_ray_triangle_straight_down() {
        let tri = [
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(4.0, 2.0, 0.0),
            Vec3::new(0.0, 2.0, 4.0),
        ];
        let t = ray_triangle_intersect(Vec3::new(1.0, 10.0, 1.0), Vec3::NEG_Y, &tri);
        assert!((t.unwrap() - 8.0).abs() < 1e-5);

        // Outside the hypotenuse
        assert!(ray_triangle_intersect(Vec3::new(3.0, 10.0, 3.0), Vec3::NEG_Y, &tri).is_none());
    }

    #[test]
    fn test_ray_triangle_parallel() {
        let tri = [Vec3::ZERO, Vec3::X, Vec3::Z];
        assert!(ray_triangle_intersect(Vec3::new(0.2, 0.0, 0.2), Vec3::X, &tri).is_none());
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points([Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 4.0, 0.0)]).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 3.0));
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }
}
