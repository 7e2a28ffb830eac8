//! Axis-aligned cube primitive.
//!
//! A cube is tested as six face planes, one pair per axis. Each candidate
//! plane hit is validated against the face bounds and the search interval;
//! the closest surviving face wins.

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;
use glam::Vec3A;

/// Tolerance on face bounds so grazing hits at edges and corners are not
/// lost to floating-point error.
const FACE_EPS: f32 = 1e-6;

/// Axis-aligned cube defined by center, half-extent, and material.
#[derive(Debug, Clone)]
pub struct Cube {
    /// Center in world space.
    pub center: Vec3A,
    /// Half the side length on every axis; negatives collapse to zero.
    pub half_extent: f32,
    /// Surface material.
    pub material: MaterialType,
}

impl Cube {
    /// Create a cube. Negative half-extents collapse to zero.
    pub fn new(center: Vec3A, half_extent: f32, material: MaterialType) -> Self {
        Self {
            center,
            half_extent: half_extent.max(0.0),
            material,
        }
    }

    /// Test one face plane and record the hit if it beats the current best.
    ///
    /// `plane` is the face's coordinate on its axis, `start`/`dir` the ray
    /// origin and direction components on that axis. The sign checks reject
    /// rays on the outward side moving further away and keep `dir` nonzero
    /// in the division below.
    #[allow(clippy::too_many_arguments)]
    fn hit_face(
        &self,
        plane: f32,
        start: f32,
        dir: f32,
        outward_normal: Vec3A,
        r: &Ray,
        ray_t: Interval,
        closest: &mut f32,
        rec: &mut HitRecord,
    ) -> bool {
        if start > plane && dir >= 0.0 {
            return false;
        }
        if start < plane && dir <= 0.0 {
            return false;
        }

        let t = (plane - start) / dir;
        if !ray_t.surrounds(t) || t >= *closest {
            return false;
        }

        // The plane hit must land on the face itself, not just the plane.
        let p = r.at(t);
        let lo = self.center - Vec3A::splat(self.half_extent + FACE_EPS);
        let hi = self.center + Vec3A::splat(self.half_extent + FACE_EPS);
        if p.x < lo.x || p.x > hi.x || p.y < lo.y || p.y > hi.y || p.z < lo.z || p.z > hi.z {
            return false;
        }

        *closest = t;
        rec.t = t;
        rec.p = p;
        rec.set_face_normal(r, outward_normal);
        rec.material = self.material;
        true
    }
}

impl Hittable for Cube {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let c = self.center;
        let h = self.half_extent;
        let o = r.origin;
        let d = r.direction;

        let mut closest = f32::INFINITY;
        let mut hit_any = false;

        hit_any |= self.hit_face(c.x - h, o.x, d.x, -Vec3A::X, r, ray_t, &mut closest, rec);
        hit_any |= self.hit_face(c.x + h, o.x, d.x, Vec3A::X, r, ray_t, &mut closest, rec);

        hit_any |= self.hit_face(c.y - h, o.y, d.y, -Vec3A::Y, r, ray_t, &mut closest, rec);
        hit_any |= self.hit_face(c.y + h, o.y, d.y, Vec3A::Y, r, ray_t, &mut closest, rec);

        hit_any |= self.hit_face(c.z - h, o.z, d.z, -Vec3A::Z, r, ray_t, &mut closest, rec);
        hit_any |= self.hit_face(c.z + h, o.z, d.z, Vec3A::Z, r, ray_t, &mut closest, rec);

        hit_any
    }
}
