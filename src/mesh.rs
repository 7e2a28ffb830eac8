//! Triangle-mesh collaborator interface.
//!
//! Meshes and their acceleration structures live behind [`MeshIntersector`];
//! the renderer only sees [`MeshProxy`], which translates a mesh hit into
//! the same [`HitRecord`] shape the analytic primitives produce. Mesh file
//! loading is the caller's problem; this module takes finished buffers.

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;
use glam::Vec3A;

/// Nearest-hit result reported by a mesh intersector.
#[derive(Debug, Clone, Copy)]
pub struct MeshHit {
    /// Ray parameter at the intersection.
    pub t: f32,
    /// Barycentric coordinate of the hit toward the triangle's second vertex.
    pub u: f32,
    /// Barycentric coordinate of the hit toward the triangle's third vertex.
    pub v: f32,
    /// Unit geometric normal of the struck triangle.
    pub normal: Vec3A,
}

/// Nearest-hit query over a triangle soup.
///
/// Implementations own the vertex/index data and whatever spatial index
/// they like; the renderer only asks for the closest hit inside `ray_t`.
pub trait MeshIntersector: Sync + Send {
    /// Nearest intersection with parameter strictly inside `ray_t`, if any.
    fn nearest_hit(&self, r: &Ray, ray_t: Interval) -> Option<MeshHit>;
}

/// Indexed triangle soup with a linear-scan nearest-hit query.
pub struct TriangleMesh {
    vertices: Vec<Vec3A>,
    indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Build a mesh from a vertex buffer and index triplets.
    ///
    /// Indices must be in range; out-of-range triangles would panic during
    /// intersection.
    pub fn new(vertices: Vec<Vec3A>, indices: Vec<[u32; 3]>) -> Self {
        Self { vertices, indices }
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}

impl MeshIntersector for TriangleMesh {
    fn nearest_hit(&self, r: &Ray, ray_t: Interval) -> Option<MeshHit> {
        let mut closest: Option<MeshHit> = None;
        let mut closest_t = ray_t.max;

        for tri in &self.indices {
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];

            // Moller-Trumbore
            let edge1 = v1 - v0;
            let edge2 = v2 - v0;
            let h = r.direction.cross(edge2);
            let det = edge1.dot(h);
            if det.abs() < 1e-8 {
                continue; // ray parallel to the triangle plane
            }

            let inv_det = 1.0 / det;
            let s = r.origin - v0;
            let u = inv_det * s.dot(h);
            if !(0.0..=1.0).contains(&u) {
                continue;
            }

            let q = s.cross(edge1);
            let v = inv_det * r.direction.dot(q);
            if v < 0.0 || u + v > 1.0 {
                continue;
            }

            let t = inv_det * edge2.dot(q);
            if t > ray_t.min && t < closest_t {
                closest_t = t;
                closest = Some(MeshHit {
                    t,
                    u,
                    v,
                    normal: edge1.cross(edge2).normalize(),
                });
            }
        }

        closest
    }
}

/// Adapter exposing any mesh intersector to the scene aggregate.
pub struct MeshProxy {
    mesh: Box<dyn MeshIntersector>,
    material: MaterialType,
}

impl MeshProxy {
    /// Wrap a mesh intersector with the material its surface scatters with.
    pub fn new(mesh: Box<dyn MeshIntersector>, material: MaterialType) -> Self {
        Self { mesh, material }
    }
}

impl Hittable for MeshProxy {
    fn hit(&self, r: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        match self.mesh.nearest_hit(r, ray_t) {
            Some(mesh_hit) => {
                rec.t = mesh_hit.t;
                rec.p = r.at(mesh_hit.t);
                rec.set_face_normal(r, mesh_hit.normal);
                rec.material = self.material;
                true
            }
            None => false,
        }
    }
}
