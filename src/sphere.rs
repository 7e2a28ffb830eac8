//! Sphere primitive.
//!
//! Intersection uses the half-b form of the quadratic, which saves a few
//! multiplies over the textbook discriminant.

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;
use glam::Vec3A;

/// Sphere defined by center, radius, and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center in world space.
    pub center: Vec3A,
    /// Radius; negative values are clamped to zero at construction.
    pub radius: f32,
    /// Surface material.
    pub material: MaterialType,
}

impl Sphere {
    /// Create a sphere. Negative radii collapse to zero.
    pub fn new(center: Vec3A, radius: f32, material: MaterialType) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let oc = self.center - r.origin;
        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }
        let sqrtd = discriminant.sqrt();

        // Nearest root inside the interval; fall back to the far root when
        // the origin sits inside the sphere.
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = r.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(r, outward_normal);
        rec.material = self.material;

        true
    }
}
