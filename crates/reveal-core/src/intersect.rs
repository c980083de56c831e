use crate::bvh::{closest_hit_linear, Bvh, TriangleHit};
use crate::camera::Camera;
use crate::mesh::Mesh;
use crate::ray::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Pickable part of a surface: triangles, their hierarchy and the
/// local-to-world transform.
#[derive(Clone, Debug)]
pub struct SurfaceGeometry {
    pub mesh: Mesh,
    pub bvh: Option<Bvh>,
    pub model: Mat4,
}

impl SurfaceGeometry {
    /// Wrap a mesh and build its hierarchy.
    pub fn new(mesh: Mesh) -> Self {
        let bvh = Bvh::build(&mesh);
        Self {
            mesh,
            bvh: Some(bvh),
            model: Mat4::IDENTITY,
        }
    }

    /// Wrap a mesh without a hierarchy; queries fall back to a linear scan.
    pub fn unaccelerated(mesh: Mesh) -> Self {
        Self {
            mesh,
            bvh: None,
            model: Mat4::IDENTITY,
        }
    }

    pub fn closest_local_hit(&self, local_ray: &Ray) -> Option<TriangleHit> {
        match &self.bvh {
            Some(bvh) => bvh.closest_hit(&self.mesh, local_ray),
            None => closest_hit_linear(&self.mesh, local_ray),
        }
    }
}

/// Outcome of one pointer ray against one surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntersectionResult {
    /// Nearest hit in the surface's local space.
    pub local_point: Option<Vec3>,
    /// Same hit in world space.
    pub world_point: Option<Vec3>,
    /// Distance from the camera eye to the hit along the pointer ray.
    pub distance: f32,
}

impl IntersectionResult {
    pub const MISS: IntersectionResult = IntersectionResult {
        local_point: None,
        world_point: None,
        distance: f32::INFINITY,
    };

    #[inline]
    pub fn hit(&self) -> bool {
        self.local_point.is_some()
    }
}

/// Cast a ray from the camera through `pointer_ndc` and return the nearest
/// hit on `geometry`, expressed in the geometry's local space.
///
/// The ray is carried into local space instead of transforming every
/// triangle, so the reported point does not move when the model rotates.
pub fn query(camera: &Camera, pointer_ndc: Vec2, geometry: &SurfaceGeometry) -> IntersectionResult {
    if geometry.mesh.triangle_count() == 0 {
        return IntersectionResult::MISS;
    }
    let det = geometry.model.determinant();
    if det == 0.0 || !det.is_finite() {
        return IntersectionResult::MISS;
    }
    let world_ray = camera.ray_from_ndc(pointer_ndc);
    if world_ray.direction == Vec3::ZERO {
        return IntersectionResult::MISS;
    }
    let local_ray = world_ray.transformed(&geometry.model.inverse());

    match geometry.closest_local_hit(&local_ray) {
        Some(hit) => {
            let local = local_ray.at(hit.t);
            IntersectionResult {
                local_point: Some(local),
                world_point: Some(geometry.model.transform_point3(local)),
                distance: hit.t,
            }
        }
        None => IntersectionResult::MISS,
    }
}
