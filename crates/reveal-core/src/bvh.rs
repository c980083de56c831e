//! Bounding volume hierarchy over a mesh's triangles.
//!
//! Built top-down by splitting each node at the median triangle centroid
//! along the widest axis of the centroid bounds. Nodes are stored flat; the
//! closest-hit traversal visits the nearer child first and skips any node
//! whose entry distance is beyond the best hit found so far.

use crate::constants::{BVH_LEAF_TRIANGLES, BVH_STACK_INLINE};
use crate::mesh::Mesh;
use crate::ray::{Aabb, Ray};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleHit {
    /// Ray parameter of the hit.
    pub t: f32,
    /// Index of the triangle in the mesh's index buffer (in triangles).
    pub triangle: u32,
}

#[derive(Clone, Copy, Debug)]
enum NodeKind {
    Leaf { first: u32, count: u32 },
    Internal { left: u32, right: u32 },
}

#[derive(Clone, Copy, Debug)]
struct BvhNode {
    bounds: Aabb,
    kind: NodeKind,
}

#[derive(Clone, Debug, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    // triangle indices, permuted so each leaf owns a contiguous run
    order: Vec<u32>,
}

struct BuildItem {
    bounds: Aabb,
    centroid: Vec3,
}

impl Bvh {
    pub fn build(mesh: &Mesh) -> Self {
        let count = mesh.triangle_count();
        if count == 0 {
            return Self::default();
        }
        let items: Vec<BuildItem> = (0..count)
            .map(|i| {
                let bounds = Aabb::from_points(&mesh.triangle(i));
                BuildItem {
                    bounds,
                    centroid: bounds.centroid(),
                }
            })
            .collect();
        let mut order: Vec<u32> = (0..count as u32).collect();
        let mut nodes = Vec::with_capacity(2 * count / BVH_LEAF_TRIANGLES.max(1) + 1);
        build_node(&items, &mut order, 0, &mut nodes);
        log::debug!("[bvh] {} triangles, {} nodes", count, nodes.len());
        Self { nodes, order }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.nodes.first().map(|n| n.bounds)
    }

    /// Nearest triangle hit along `ray`. `mesh` must be the mesh the BVH was built from.
    pub fn closest_hit(&self, mesh: &Mesh, ray: &Ray) -> Option<TriangleHit> {
        if self.nodes.is_empty() {
            return None;
        }
        let inv_dir = ray.inv_direction();
        let mut best: Option<TriangleHit> = None;
        let mut best_t = f32::INFINITY;
        let mut stack: SmallVec<[u32; BVH_STACK_INLINE]> = SmallVec::new();
        stack.push(0);

        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            if node.bounds.intersect_ray(ray, inv_dir, best_t).is_none() {
                continue;
            }
            match node.kind {
                NodeKind::Leaf { first, count } => {
                    for &tri in &self.order[first as usize..(first + count) as usize] {
                        let [a, b, c] = mesh.triangle(tri as usize);
                        if let Some(t) = ray.intersect_triangle(a, b, c, best_t) {
                            best_t = t;
                            best = Some(TriangleHit { t, triangle: tri });
                        }
                    }
                }
                NodeKind::Internal { left, right } => {
                    let lt = self.entry(left, ray, inv_dir, best_t);
                    let rt = self.entry(right, ray, inv_dir, best_t);
                    // push the far child first so the near one is popped next
                    match (lt, rt) {
                        (Some(l), Some(r)) if l <= r => {
                            stack.push(right);
                            stack.push(left);
                        }
                        (Some(_), Some(_)) => {
                            stack.push(left);
                            stack.push(right);
                        }
                        (Some(_), None) => stack.push(left),
                        (None, Some(_)) => stack.push(right),
                        (None, None) => {}
                    }
                }
            }
        }
        best
    }

    fn entry(&self, node: u32, ray: &Ray, inv_dir: Vec3, t_max: f32) -> Option<f32> {
        self.nodes[node as usize]
            .bounds
            .intersect_ray(ray, inv_dir, t_max)
            .map(|(t_near, _)| t_near)
    }
}

/// Reference linear scan over every triangle. Used when no hierarchy exists.
pub fn closest_hit_linear(mesh: &Mesh, ray: &Ray) -> Option<TriangleHit> {
    let mut best: Option<TriangleHit> = None;
    let mut best_t = f32::INFINITY;
    for i in 0..mesh.triangle_count() {
        let [a, b, c] = mesh.triangle(i);
        if let Some(t) = ray.intersect_triangle(a, b, c, best_t) {
            best_t = t;
            best = Some(TriangleHit {
                t,
                triangle: i as u32,
            });
        }
    }
    best
}

fn build_node(items: &[BuildItem], order: &mut [u32], offset: u32, nodes: &mut Vec<BvhNode>) -> u32 {
    let bounds = order
        .iter()
        .fold(Aabb::EMPTY, |b, &i| b.union(&items[i as usize].bounds));
    let index = nodes.len() as u32;
    let leaf = BvhNode {
        bounds,
        kind: NodeKind::Leaf {
            first: offset,
            count: order.len() as u32,
        },
    };
    nodes.push(leaf);

    if order.len() <= BVH_LEAF_TRIANGLES {
        return index;
    }

    let mut centroid_bounds = Aabb::EMPTY;
    for &i in order.iter() {
        centroid_bounds.grow(items[i as usize].centroid);
    }
    let axis = centroid_bounds.longest_axis();
    if centroid_bounds.max[axis] - centroid_bounds.min[axis] <= f32::EPSILON {
        // all centroids coincide; splitting would not separate anything
        return index;
    }

    let mid = order.len() / 2;
    order.select_nth_unstable_by(mid, |&a, &b| {
        items[a as usize].centroid[axis].total_cmp(&items[b as usize].centroid[axis])
    });
    let (lo, hi) = order.split_at_mut(mid);
    let left = build_node(items, lo, offset, nodes);
    let right = build_node(items, hi, offset + mid as u32, nodes);
    nodes[index as usize].kind = NodeKind::Internal { left, right };
    index
}
