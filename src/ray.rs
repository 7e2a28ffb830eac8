//! Ray representation for path tracing.
//!
//! A ray is the half-line r(t) = origin + t * direction. All intersection
//! queries and scatter events are expressed in terms of it.

use glam::Vec3A;

/// Ray defined by an origin point and a direction vector.
///
/// The direction is not required to be normalized; callers that need a unit
/// direction (sky gradient, refraction) normalize explicitly.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Starting point of the ray in world space.
    pub origin: Vec3A,
    /// Direction of travel. Not necessarily a unit vector.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter t along the ray: origin + t * direction.
    ///
    /// Negative t evaluates behind the origin; interval constraints are the
    /// caller's responsibility.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_walks_along_direction() {
        let r = Ray::new(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(0.0, 0.0, -2.0));
        assert_eq!(r.at(0.0), r.origin);
        assert_eq!(r.at(1.5), Vec3A::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn at_accepts_negative_t() {
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0));
        assert_eq!(r.at(-2.0), Vec3A::new(-2.0, 0.0, 0.0));
    }
}
