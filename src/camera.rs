//! Camera model and the render loop.
//!
//! A pinhole camera with optional defocus blur generates jittered rays per
//! pixel; `ray_color` resolves each ray's radiance by recursive scatter
//! under a bounce budget. The render loop is deliberately single-threaded;
//! the scene and materials are read-only during rendering, so parallelizing
//! by pixel would only require per-thread RNG, which `random` already has.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Color;
use crate::random;
use crate::ray::Ray;

/// Pinhole camera with multi-sample anti-aliasing and defocus blur.
///
/// Public fields are the user-facing configuration; derived quantities are
/// computed once by `initialize` before the first ray.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixels.
    pub image_width: u32,
    /// Rendered image height in pixels.
    pub image_height: u32,
    /// Random samples accumulated per pixel.
    pub samples_per_pixel: u32,
    /// Bounce budget per ray; recursion stops and returns black at zero.
    pub max_depth: u32,
    /// Vertical field of view in degrees.
    pub vfov: f32,
    /// Eye position.
    pub lookfrom: Vec3A,
    /// Target the camera looks at.
    pub lookat: Vec3A,
    /// Camera-relative up direction.
    pub vup: Vec3A,
    /// Cone angle of ray origins through each pixel; 0 disables blur.
    pub defocus_angle: f32,
    /// Distance to the plane of perfect focus.
    pub focus_dist: f32,

    // Derived state, filled in by initialize().
    center: Vec3A,
    pixel00_loc: Vec3A,
    pixel_delta_u: Vec3A,
    pixel_delta_v: Vec3A,
    pixel_samples_scale: f32,
    u: Vec3A,
    v: Vec3A,
    w: Vec3A,
    defocus_disk_u: Vec3A,
    defocus_disk_v: Vec3A,
    initialized: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Camera with the stock settings: 100x100 image, 50 samples, 50 bounces,
    /// 90 degree fov, no defocus blur.
    pub fn new() -> Self {
        Self {
            image_width: 100,
            image_height: 100,
            samples_per_pixel: 50,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
            center: Vec3A::ZERO,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            pixel_samples_scale: 0.02,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            w: Vec3A::ZERO,
            defocus_disk_u: Vec3A::ZERO,
            defocus_disk_v: Vec3A::ZERO,
            initialized: false,
        }
    }

    /// Render the scene and return a linear-light f32 RGB buffer.
    ///
    /// For every pixel, `samples_per_pixel` jittered rays are traced and
    /// averaged. Pixels are walked row-major from the top scanline.
    pub fn render(&mut self, world: &dyn Hittable) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        self.initialize();

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(self.image_width, self.image_height);

        info!(
            "Rendering {}x{} at {} spp, depth {}",
            self.image_width, self.image_height, self.samples_per_pixel, self.max_depth
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new((self.image_width * self.image_height) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        for (i, j, pixel) in image.enumerate_pixels_mut() {
            let mut pixel_color = Color::ZERO;
            for _sample in 0..self.samples_per_pixel {
                let r = self.get_ray(i, j);
                pixel_color += self.ray_color(&r, world, self.max_depth);
            }
            pixel_color *= self.pixel_samples_scale;
            *pixel = Rgb([pixel_color.x, pixel_color.y, pixel_color.z]);
            pb.inc(1);
        }

        pb.finish();
        info!("Image generated in {:.2?}", generation_start.elapsed());

        image
    }

    /// Compute the derived camera frame from the public configuration.
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.image_height = self.image_height.max(1);
        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;
        self.center = self.lookfrom;

        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Orthonormal camera frame: w opposes the view direction.
        self.w = (self.lookfrom - self.lookat).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        let viewport_upper_left =
            self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle.to_radians() / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;
    }

    /// Ray through pixel (i, j), jittered within the pixel square and with
    /// its origin sampled from the defocus disk when blur is enabled.
    fn get_ray(&self, i: u32, j: u32) -> Ray {
        let offset = self.sample_square();
        let pixel_sample = self.pixel00_loc
            + ((i as f32 + offset.x) * self.pixel_delta_u)
            + ((j as f32 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample()
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Random offset in [-0.5, 0.5]^2 for pixel jitter.
    fn sample_square(&self) -> Vec3A {
        Vec3A::new(
            random::random_f32() - 0.5,
            random::random_f32() - 0.5,
            0.0,
        )
    }

    /// Random ray origin on the defocus disk.
    fn defocus_disk_sample(&self) -> Vec3A {
        let p = random::random_in_unit_disk();
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Radiance carried by a ray, resolved recursively.
    ///
    /// A hit asks the material to scatter: emitted light is added, and the
    /// scattered ray's contribution is attenuated component-wise. Absorbed
    /// paths terminate with only their emission (black for non-lights).
    /// A miss returns the sky gradient. The depth ceiling truncates bounce
    /// chains by dropping their remaining energy.
    fn ray_color(&self, r: &Ray, world: &dyn Hittable, depth: u32) -> Color {
        if depth == 0 {
            return Color::ZERO;
        }

        let mut rec = HitRecord::default();

        // 0.001 lower bound: ignore hits right at the origin surface so a
        // scattered ray cannot re-intersect the point it just left.
        if world.hit(r, Interval::new(0.001, f32::INFINITY), &mut rec) {
            let emitted = rec.material.emitted(rec.p);
            let mut attenuation = Color::ZERO;
            let mut scattered = Ray::new(Vec3A::ZERO, Vec3A::ZERO);

            if rec.material.scatter(r, &rec, &mut attenuation, &mut scattered) {
                return emitted + attenuation * self.ray_color(&scattered, world, depth - 1);
            }
            return emitted;
        }

        sky_color(r)
    }
}

/// Background gradient: white at the horizon blending to sky blue upward.
pub fn sky_color(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use crate::material::MaterialType;
    use crate::sphere::Sphere;

    fn single_sphere_world() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -1.0),
            0.5,
            MaterialType::Lambertian {
                albedo: Vec3A::splat(0.5),
            },
        )));
        world
    }

    #[test]
    fn zero_depth_is_black_even_facing_the_sky() {
        let camera = Camera::new();
        let world = HittableList::new();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0));
        assert_eq!(camera.ray_color(&r, &world, 0), Vec3A::ZERO);
    }

    #[test]
    fn miss_reproduces_the_background_gradient_exactly() {
        let camera = Camera::new();
        let world = HittableList::new();
        let dir = Vec3A::new(0.3, -0.2, -1.0);
        let r = Ray::new(Vec3A::ZERO, dir);

        let a = 0.5 * (dir.normalize().y + 1.0);
        let expected =
            (1.0 - a) * Vec3A::new(1.0, 1.0, 1.0) + a * Vec3A::new(0.5, 0.7, 1.0);
        assert_eq!(camera.ray_color(&r, &world, 10), expected);
    }

    #[test]
    fn emissive_hit_terminates_with_its_emission() {
        let camera = Camera::new();
        let mut world = HittableList::new();
        let emit = Vec3A::new(2.0, 1.5, 1.0);
        world.add(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -1.0),
            0.5,
            MaterialType::DiffuseLight { emit },
        )));

        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(camera.ray_color(&r, &world, 10), emit);
    }

    #[test]
    fn sphere_silhouette_is_darker_than_the_sky() {
        let world = single_sphere_world();

        let mut camera = Camera::new();
        camera.image_width = 3;
        camera.image_height = 3;
        camera.samples_per_pixel = 16;
        camera.max_depth = 10;
        camera.vfov = 90.0;
        camera.lookfrom = Vec3A::ZERO;
        camera.lookat = Vec3A::new(0.0, 0.0, -1.0);
        camera.focus_dist = 1.0;

        let image = camera.render(&world);
        let luminance = |x: u32, y: u32| {
            let p = image.get_pixel(x, y);
            p[0] + p[1] + p[2]
        };

        // The sphere (half-angle ~30 degrees) covers the center pixel but
        // none of the 45-degree corners.
        let center = luminance(1, 1);
        for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert!(
                center < luminance(x, y),
                "center {} not darker than corner ({}, {}) = {}",
                center,
                x,
                y,
                luminance(x, y)
            );
        }
    }
}
