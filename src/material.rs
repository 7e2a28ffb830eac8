//! Surface materials.
//!
//! Four material kinds: Lambertian (diffuse), Metal (specular with fuzz),
//! Dielectric (refractive glass), and DiffuseLight (emissive, terminal).
//! A material is a pure function from an incoming ray and hit record to an
//! optional attenuated outgoing ray, plus a separate emission query.

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;
use glam::Vec3A;

/// RGB color, linear light.
pub type Color = Vec3A;

/// Closed set of surface materials, dispatched by exhaustive match.
///
/// Materials are immutable values; `Copy` lets primitives share them freely.
#[derive(Debug, Clone, Copy)]
pub enum MaterialType {
    /// Matte surface with cosine-ish diffuse scattering.
    Lambertian {
        /// Base reflective color; the fraction of energy kept per bounce.
        albedo: Vec3A,
    },
    /// Mirror reflection perturbed by surface roughness.
    Metal {
        /// Reflective color.
        albedo: Vec3A,
        /// Roughness in [0, 1]; 0 is a perfect mirror.
        fuzz: f32,
    },
    /// Clear refractive surface (glass, water).
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass).
        refraction_index: f32,
    },
    /// Light source; never scatters, only emits.
    DiffuseLight {
        /// Emission color, may exceed 1.0 per channel.
        emit: Vec3A,
    },
}

impl MaterialType {
    /// Metal constructor clamping fuzz into [0, 1].
    pub fn metal(albedo: Vec3A, fuzz: f32) -> Self {
        MaterialType::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Compute ray scattering at a hit.
    ///
    /// Returns true if the ray scatters, filling `attenuation` and
    /// `scattered`; false means the path is absorbed or terminates at an
    /// emitter.
    pub fn scatter(
        &self,
        r_in: &Ray,
        rec: &HitRecord,
        attenuation: &mut Color,
        scattered: &mut Ray,
    ) -> bool {
        match *self {
            MaterialType::Lambertian { albedo } => {
                scatter_lambertian(albedo, rec, attenuation, scattered)
            }
            MaterialType::Metal { albedo, fuzz } => {
                scatter_metal(albedo, fuzz, r_in, rec, attenuation, scattered)
            }
            MaterialType::Dielectric { refraction_index } => {
                scatter_dielectric(refraction_index, r_in, rec, attenuation, scattered)
            }
            MaterialType::DiffuseLight { .. } => false,
        }
    }

    /// Self-emitted radiance at a surface point.
    ///
    /// Black for everything but [`MaterialType::DiffuseLight`]. The point is
    /// unused today; it is the hook for textured emission.
    pub fn emitted(&self, _p: Vec3A) -> Color {
        match *self {
            MaterialType::DiffuseLight { emit } => emit,
            _ => Color::ZERO,
        }
    }
}

/// Diffuse scattering: normal plus a random unit vector.
fn scatter_lambertian(
    albedo: Vec3A,
    rec: &HitRecord,
    attenuation: &mut Color,
    scattered: &mut Ray,
) -> bool {
    let mut scatter_direction = rec.normal + random::random_unit_vector();

    // The random vector can cancel the normal; fall back to the normal
    // rather than tracing a degenerate zero-length ray.
    if near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    *scattered = Ray::new(rec.p, scatter_direction);
    *attenuation = albedo;
    true
}

/// Specular scattering: mirror reflection fuzzed by a point in the unit ball.
fn scatter_metal(
    albedo: Vec3A,
    fuzz: f32,
    r_in: &Ray,
    rec: &HitRecord,
    attenuation: &mut Color,
    scattered: &mut Ray,
) -> bool {
    let reflected = reflect(r_in.direction.normalize(), rec.normal);
    let direction = reflected + fuzz.min(1.0) * random::random_in_unit_sphere();
    *scattered = Ray::new(rec.p, direction);
    *attenuation = albedo;
    // Excess fuzz can push the ray below the surface; absorb it.
    scattered.direction.dot(rec.normal) > 0.0
}

/// Refractive scattering with Schlick-weighted reflection.
fn scatter_dielectric(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord,
    attenuation: &mut Color,
    scattered: &mut Ray,
) -> bool {
    // Clear glass absorbs nothing.
    *attenuation = Color::ONE;

    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    // Snell's law has no solution past the critical angle: total internal
    // reflection. Below it, Schlick reflectance decides probabilistically.
    let cannot_refract = ri * sin_theta > 1.0;
    let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f32() {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    *scattered = Ray::new(rec.p, direction);
    true
}

/// True when every component is negligibly small.
fn near_zero(v: Vec3A) -> bool {
    const EPS: f32 = 1e-8;
    v.x.abs() < EPS && v.y.abs() < EPS && v.z.abs() < EPS
}

/// Mirror reflection of v about the unit normal n.
fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refraction of the unit vector uv through a surface with normal n,
/// for the given ratio of refraction indices.
fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's approximation of the Fresnel reflection coefficient.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_at_origin(normal: Vec3A, front_face: bool) -> HitRecord {
        HitRecord {
            p: Vec3A::new(0.0, 0.0, -1.0),
            normal,
            t: 1.0,
            front_face,
            material: MaterialType::Lambertian { albedo: Vec3A::ZERO },
        }
    }

    #[test]
    fn lambertian_attenuates_by_albedo_from_hit_point() {
        let albedo = Vec3A::new(0.1, 0.4, 0.7);
        let mat = MaterialType::Lambertian { albedo };
        let rec = hit_at_origin(Vec3A::Z, true);
        let r_in = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));

        let mut attenuation = Vec3A::ZERO;
        let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert!(mat.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
        assert_eq!(attenuation, albedo);
        assert_eq!(scattered.origin, rec.p);
        // Scattered direction stays in the hemisphere of the normal.
        assert!(scattered.direction.dot(rec.normal) > -1e-6);
    }

    #[test]
    fn metal_with_zero_fuzz_is_an_exact_mirror() {
        let mat = MaterialType::metal(Vec3A::splat(0.9), 0.0);
        let rec = hit_at_origin(Vec3A::Y, true);
        // 45 degree incidence in the xy plane.
        let r_in = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, -1.0, 0.0).normalize());

        let mut attenuation = Vec3A::ZERO;
        let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert!(mat.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
        let expected = Vec3A::new(1.0, 1.0, 0.0).normalize();
        assert!((scattered.direction.normalize() - expected).length() < 1e-5);
    }

    #[test]
    fn metal_constructor_clamps_fuzz() {
        match MaterialType::metal(Vec3A::ONE, 7.0) {
            MaterialType::Metal { fuzz, .. } => assert_eq!(fuzz, 1.0),
            _ => unreachable!(),
        }
        match MaterialType::metal(Vec3A::ONE, -1.0) {
            MaterialType::Metal { fuzz, .. } => assert_eq!(fuzz, 0.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn dielectric_with_unit_index_passes_straight_through() {
        let mat = MaterialType::Dielectric { refraction_index: 1.0 };
        let rec = hit_at_origin(Vec3A::Z, true);
        // Normal incidence: Schlick reflectance is exactly zero, so the ray
        // must refract, and a ratio of 1 leaves it undeviated.
        let r_in = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));

        let mut attenuation = Vec3A::ZERO;
        let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert!(mat.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
        assert_eq!(attenuation, Vec3A::ONE);
        assert!((scattered.direction - Vec3A::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn dielectric_reflects_past_the_critical_angle() {
        let mat = MaterialType::Dielectric { refraction_index: 1.5 };
        // Exiting glass at 45 degrees: 1.5 * sin(45) > 1, total internal
        // reflection regardless of the random draw.
        let rec = hit_at_origin(Vec3A::Z, false);
        let incoming = Vec3A::new(1.0, 0.0, -1.0).normalize();
        let r_in = Ray::new(Vec3A::ZERO, incoming);

        let mut attenuation = Vec3A::ZERO;
        let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert!(mat.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
        let expected = Vec3A::new(1.0, 0.0, 1.0).normalize();
        assert!((scattered.direction.normalize() - expected).length() < 1e-5);
    }

    #[test]
    fn diffuse_light_never_scatters_and_emits_its_color() {
        let emit = Vec3A::new(4.0, 4.0, 4.0);
        let mat = MaterialType::DiffuseLight { emit };
        let rec = hit_at_origin(Vec3A::Z, true);
        let r_in = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));

        let mut attenuation = Vec3A::ZERO;
        let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);
        assert!(!mat.scatter(&r_in, &rec, &mut attenuation, &mut scattered));
        assert_eq!(mat.emitted(rec.p), emit);
    }

    #[test]
    fn non_lights_emit_black() {
        let p = Vec3A::ZERO;
        assert_eq!(
            MaterialType::Lambertian { albedo: Vec3A::ONE }.emitted(p),
            Vec3A::ZERO
        );
        assert_eq!(
            MaterialType::Dielectric { refraction_index: 1.5 }.emitted(p),
            Vec3A::ZERO
        );
    }

    #[test]
    fn reflect_preserves_angle() {
        let v = Vec3A::new(1.0, -2.0, 0.0);
        let n = Vec3A::Y;
        assert_eq!(reflect(v, n), Vec3A::new(1.0, 2.0, 0.0));
    }
}
