// Host-side tests for pointer picking against meshes.

use glam::{Mat4, Vec2, Vec3};
use reveal_core::bvh::{closest_hit_linear, Bvh};
use reveal_core::ray::Ray;
use reveal_core::{query, Camera, Mesh, SurfaceGeometry};

fn unit_sphere() -> SurfaceGeometry {
    SurfaceGeometry::new(Mesh::uv_sphere(1.0, 32, 32))
}

/// Analytic ray/sphere hit for a sphere of `radius` at the origin.
fn ray_sphere(ray: &Ray, radius: f32) -> Option<Vec3> {
    let b = ray.origin.dot(ray.direction);
    let c = ray.origin.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t > 0.0).then(|| ray.at(t))
}

#[test]
fn center_ray_hits_front_of_unit_sphere() {
    let camera = Camera::with_aspect(800, 600);
    let geometry = unit_sphere();

    // Slightly off-axis so the ray lands inside a facet rather than on a vertex
    let ndc = Vec2::new(0.001, 0.0013);
    let result = query(&camera, ndc, &geometry);
    assert!(result.hit());

    let expected = ray_sphere(&camera.ray_from_ndc(ndc), 1.0).unwrap();
    let p = result.local_point.unwrap();
    assert!((p - expected).length() < 1e-3, "hit at {p:?}, expected {expected:?}");
    // Camera sits on +Z looking at the origin, so that is close to (0, 0, 1)
    assert!((p - Vec3::Z).length() < 1e-2);
    assert!((result.distance - (camera.eye.z - 1.0)).abs() < 1e-2);
}

#[test]
fn pointer_outside_silhouette_misses() {
    let camera = Camera::with_aspect(800, 600);
    let geometry = unit_sphere();

    for ndc in [
        Vec2::new(1.0, 1.0),
        Vec2::new(-1.0, -1.0),
        Vec2::new(0.9, 0.0),
        Vec2::new(0.0, -0.9),
    ] {
        let result = query(&camera, ndc, &geometry);
        assert!(!result.hit(), "unexpected hit at {ndc:?}");
        assert!(result.world_point.is_none());
    }
}

#[test]
fn empty_mesh_is_a_miss() {
    let camera = Camera::default();
    let geometry = SurfaceGeometry::new(Mesh::new(Vec::new(), None, None, None));
    assert!(!query(&camera, Vec2::ZERO, &geometry).hit());
}

#[test]
fn singular_model_matrix_is_a_miss() {
    let camera = Camera::default();
    let mut geometry = unit_sphere();
    geometry.model = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));
    assert!(!query(&camera, Vec2::ZERO, &geometry).hit());
}

#[test]
fn hit_is_reported_in_local_space() {
    let camera = Camera::default();
    let mut geometry = unit_sphere();
    let spin = Mat4::from_rotation_y(0.7) * Mat4::from_rotation_z(0.3);
    geometry.model = spin;

    let result = query(&camera, Vec2::ZERO, &geometry);
    let local = result.local_point.unwrap();
    let world = result.world_point.unwrap();

    // The visible point in front of the camera stays put in world space
    assert!((world - Vec3::Z).length() < 1e-2, "world {world:?}");
    // and the local point is the same spot carried back through the model
    let expected = spin.inverse().transform_point3(world);
    assert!((local - expected).length() < 1e-4);
    assert!((local.length() - 1.0).abs() < 1e-2);
}

#[test]
fn ray_through_a_vertex_hits_the_front() {
    let camera = Camera::with_aspect(800, 600);
    let geometry = unit_sphere();

    // dead centre lands on a vertex shared by several facets
    let result = query(&camera, Vec2::ZERO, &geometry);
    assert!(result.hit());
    let p = result.local_point.unwrap();
    assert!((p - Vec3::Z).length() < 1e-3, "hit at {p:?}");
}

#[test]
fn rays_along_the_equator_do_not_leak_between_facets() {
    let mesh = Mesh::uv_sphere(1.0, 32, 32);
    let bvh = Bvh::build(&mesh);
    let origin = Vec3::new(0.0, 0.0, 10.0);

    for i in 0..2000 {
        let x = 0.2 + 0.6 * i as f32 / 1999.0;
        let ray = Ray::new(origin, (Vec3::new(x, 0.0, 0.0) - origin).normalize());
        assert!(bvh.closest_hit(&mesh, &ray).is_some(), "bvh leak at x = {x}");
        assert!(closest_hit_linear(&mesh, &ray).is_some(), "linear leak at x = {x}");
    }
}

#[test]
fn translated_surface_shifts_the_silhouette() {
    let camera = Camera::default();
    let mut geometry = unit_sphere();
    geometry.model = Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0));

    assert!(!query(&camera, Vec2::ZERO, &geometry).hit());

    // Project the new centre to NDC and aim straight at it
    let clip = camera.view_proj() * Vec3::new(3.0, 0.0, 0.0).extend(1.0);
    let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
    let result = query(&camera, ndc, &geometry);
    assert!(result.hit());
    assert!(result.local_point.unwrap().z > 0.0);
}

#[test]
fn bvh_and_linear_scan_agree() {
    let mesh = Mesh::uv_sphere(1.0, 24, 16);
    let bvh = Bvh::build(&mesh);
    let origin = Vec3::new(0.0, 0.0, 5.0);

    for i in 0..9 {
        for j in 0..9 {
            let target = Vec3::new(i as f32 * 0.3 - 1.187, j as f32 * 0.3 - 1.211, 0.0);
            let ray = Ray::new(origin, (target - origin).normalize());
            let fast = bvh.closest_hit(&mesh, &ray);
            let slow = closest_hit_linear(&mesh, &ray);
            match (fast, slow) {
                (Some(a), Some(b)) => assert!((a.t - b.t).abs() < 1e-5),
                (None, None) => {}
                other => panic!("bvh and linear disagree for {target:?}: {other:?}"),
            }
        }
    }
}

#[test]
fn unaccelerated_geometry_matches_bvh_query() {
    let camera = Camera::default();
    let fast = unit_sphere();
    let slow = SurfaceGeometry::unaccelerated(Mesh::uv_sphere(1.0, 32, 32));

    for ndc in [Vec2::ZERO, Vec2::new(0.05, 0.02), Vec2::new(-0.08, 0.1)] {
        let a = query(&camera, ndc, &fast);
        let b = query(&camera, ndc, &slow);
        assert_eq!(a.hit(), b.hit());
        if let (Some(pa), Some(pb)) = (a.local_point, b.local_point) {
            assert!((pa - pb).length() < 1e-5);
        }
    }
}
