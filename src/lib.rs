//! Lumina path tracer
//!
//! An offline Monte-Carlo path tracer: spheres, axis-aligned cubes, and
//! triangle-mesh proxies under diffuse, metallic, refractive, and emissive
//! materials. Outputs PPM, PNG, and EXR, with optional TEV live viewing.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod cube;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod mesh;
pub mod output;
pub mod random;
pub mod ray;
pub mod sphere;
