//! Ray-object intersection interface.
//!
//! [`Hittable`] is the capability shared by every primitive; [`HitRecord`]
//! carries the data a scatter event needs; [`HittableList`] is the scene
//! aggregate resolving the globally nearest hit.

use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;
use glam::Vec3A;

/// Everything a material needs to know about an intersection.
#[derive(Debug, Clone)]
pub struct HitRecord {
    /// Intersection point in world space.
    pub p: Vec3A,
    /// Surface normal at the hit, always opposing the incoming ray.
    pub normal: Vec3A,
    /// Ray parameter at the intersection.
    pub t: f32,
    /// True when the ray struck the outside of the surface.
    pub front_face: bool,
    /// Material of the struck surface.
    pub material: MaterialType,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            p: Vec3A::ZERO,
            normal: Vec3A::ZERO,
            t: 0.0,
            front_face: false,
            material: MaterialType::Lambertian { albedo: Vec3A::ZERO },
        }
    }
}

impl HitRecord {
    /// Store the normal oriented against the incoming ray.
    ///
    /// `outward_normal` must be the unit geometric normal. The hit is a
    /// front-face hit when the ray direction opposes it.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3A) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Capability of being intersected by a ray.
///
/// Implementations report the nearest intersection whose parameter lies
/// strictly inside `ray_t`, overwriting `rec` and returning true.
pub trait Hittable: Sync + Send {
    /// Test for the nearest intersection within `ray_t`.
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;
}

/// Scene aggregate: an ordered collection of primitives.
///
/// Intersection is a linear scan; the far bound shrinks to the closest hit
/// found so far, so the result is the globally nearest surface regardless
/// of insertion order.
#[derive(Default)]
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a primitive to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Number of primitives in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let mut temp_rec = HitRecord::default();
        let mut hit_anything = false;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if object.hit(r, Interval::new(ray_t.min, closest_so_far), &mut temp_rec) {
                hit_anything = true;
                closest_so_far = temp_rec.t;
                *rec = temp_rec.clone();
            }
        }

        hit_anything
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sphere::Sphere;

    fn lambertian(gray: f32) -> MaterialType {
        MaterialType::Lambertian {
            albedo: Vec3A::splat(gray),
        }
    }

    #[test]
    fn face_normal_opposes_incoming_ray() {
        let mut rec = HitRecord::default();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));

        rec.set_face_normal(&r, Vec3A::new(0.0, 0.0, 1.0));
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3A::new(0.0, 0.0, 1.0));

        rec.set_face_normal(&r, Vec3A::new(0.0, 0.0, -1.0));
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3A::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn nearest_of_two_overlapping_spheres_wins() {
        // Both spheres straddle the ray; the near one is at z = -1, the far
        // one at z = -3. Regardless of insertion order, the near sphere's
        // hit and material must come back.
        for flipped in [false, true] {
            let near = Box::new(Sphere::new(Vec3A::new(0.0, 0.0, -1.0), 0.5, lambertian(0.25)));
            let far = Box::new(Sphere::new(Vec3A::new(0.0, 0.0, -3.0), 0.5, lambertian(0.75)));

            let mut world = HittableList::new();
            if flipped {
                world.add(far);
                world.add(near);
            } else {
                world.add(near);
                world.add(far);
            }

            let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
            let mut rec = HitRecord::default();
            assert!(world.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
            assert!((rec.t - 0.5).abs() < 1e-5);
            match rec.material {
                MaterialType::Lambertian { albedo } => {
                    assert_eq!(albedo, Vec3A::splat(0.25), "farther material attached");
                }
                _ => panic!("unexpected material variant"),
            }
        }
    }

    #[test]
    fn empty_list_never_hits() {
        let world = HittableList::new();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(!world.hit(&r, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!(world.is_empty());
    }
}
