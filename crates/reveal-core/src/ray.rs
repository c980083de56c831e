use glam::{Mat4, Vec3};

const TRIANGLE_EPSILON: f32 = 1e-7;
// barycentric slack so rays along a shared edge are caught by at least one side
const BARYCENTRIC_EPSILON: f32 = 1e-5;
// widen the slab exit a few ulps so grazing rays are not culled before the triangle test
const SLAB_GROWTH: f32 = 1.0 + 4.0 * f32::EPSILON;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Per-axis reciprocal of the direction for slab tests. Zero components map
    /// to a huge finite value so a ray lying on a slab plane never yields NaN.
    pub fn inv_direction(&self) -> Vec3 {
        let d = self.direction;
        Vec3::select(d.cmpeq(Vec3::ZERO), Vec3::splat(f32::MAX), d.recip())
    }

    /// Carry the ray into another space. The direction is not renormalized,
    /// so parameters along the transformed ray name the same points as before.
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }

    /// Möller–Trumbore ray/triangle test, two-sided.
    ///
    /// Returns the ray parameter of the hit when it lies in `(0, t_max)`.
    pub fn intersect_triangle(&self, v0: Vec3, v1: Vec3, v2: Vec3, t_max: f32) -> Option<f32> {
        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let p = self.direction.cross(e2);
        let det = e1.dot(p);
        if det.abs() < TRIANGLE_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = self.origin - v0;
        let u = s.dot(p) * inv_det;
        if !(-BARYCENTRIC_EPSILON..=1.0 + BARYCENTRIC_EPSILON).contains(&u) {
            return None;
        }
        let q = s.cross(e1);
        let v = self.direction.dot(q) * inv_det;
        if v < -BARYCENTRIC_EPSILON || u + v > 1.0 + BARYCENTRIC_EPSILON {
            return None;
        }
        let t = e2.dot(q) * inv_det;
        (t > TRIANGLE_EPSILON && t < t_max).then_some(t)
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An inverted box that any `grow` call replaces.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().fold(Self::EMPTY, |mut b, p| {
            b.grow(*p);
            b
        })
    }

    pub fn grow(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Index (0 = x, 1 = y, 2 = z) of the widest extent.
    pub fn longest_axis(&self) -> usize {
        let d = self.max - self.min;
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    /// Slab test. `inv_dir` comes from [`Ray::inv_direction`], computed once per query.
    ///
    /// Returns the entry and exit parameters clipped to `[0, t_max)`.
    pub fn intersect_ray(&self, ray: &Ray, inv_dir: Vec3, t_max: f32) -> Option<(f32, f32)> {
        let t0 = (self.min - ray.origin) * inv_dir;
        let t1 = (self.max - ray.origin) * inv_dir;
        let t_near = t0.min(t1).max_element().max(0.0);
        let t_far = (t0.max(t1).min_element() * SLAB_GROWTH).min(t_max);
        (t_near <= t_far).then_some((t_near, t_far))
    }
}
