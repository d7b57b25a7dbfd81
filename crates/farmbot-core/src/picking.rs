//! Ray queries against a restricted candidate set.
//!
//! Candidates are always one layer's parts, never the whole scene, so
//! decoration in front of a control can not shadow it.

use crate::constants::RAY_EPSILON;
use crate::scene::{NodeId, Scene, Shape};
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// One intersection. `node` is the exact part struck, not the logical object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub node: NodeId,
    pub distance: f32,
    pub point: Vec3,
}

pub type Hits = SmallVec<[Hit; 4]>;

/// Intersect `ray` with every shaped, visible node under `candidates`
/// (searched recursively) and return the hits nearest first.
pub fn hit_test(scene: &Scene, ray: &Ray, candidates: &[NodeId]) -> Hits {
    let mut hits = Hits::new();
    if ray.direction == Vec3::ZERO {
        return hits;
    }
    for candidate in candidates {
        for id in scene.subtree(*candidate) {
            if hits.iter().any(|h| h.node == id) {
                continue;
            }
            let Some(shape) = scene.get(id).and_then(|n| n.shape) else {
                continue;
            };
            if !scene.is_visible(id) {
                continue;
            }
            let Some(world) = scene.world_matrix(id) else {
                continue;
            };
            if world.determinant().abs() < RAY_EPSILON {
                continue;
            }
            let inv = world.inverse();
            let o = inv.transform_point3(ray.origin);
            let d = inv.transform_vector3(ray.direction);
            // Affine maps keep the ray parameter, so `t` is a world distance.
            if let Some(t) = intersect_local(o, d, &shape) {
                hits.push(Hit {
                    node: id,
                    distance: t,
                    point: ray.at(t),
                });
            }
        }
    }
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// Nearest non-negative ray parameter at which `o + t * d` meets `shape`.
pub fn intersect_local(o: Vec3, d: Vec3, shape: &Shape) -> Option<f32> {
    match *shape {
        Shape::Box { size } => ray_aabb(o, d, -size * 0.5, size * 0.5),
        Shape::Cylinder { radius, height } => ray_cylinder(o, d, radius, height * 0.5),
        Shape::Sphere { radius } => ray_sphere(o, d, Vec3::ZERO, radius),
        Shape::Plane { width, height } => ray_plane_xy(o, d, width * 0.5, height * 0.5),
    }
}

// Slab method; a ray starting inside reports the exit distance.
pub fn ray_aabb(o: Vec3, d: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;
    for axis in 0..3 {
        if d[axis].abs() < RAY_EPSILON {
            if o[axis] < min[axis] || o[axis] > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d[axis];
        let mut t0 = (min[axis] - o[axis]) * inv;
        let mut t1 = (max[axis] - o[axis]) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        tmin = tmin.max(t0);
        tmax = tmax.min(t1);
        if tmin > tmax {
            return None;
        }
    }
    if tmax < 0.0 {
        return None;
    }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

pub fn ray_sphere(o: Vec3, d: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = o - center;
    let a = d.dot(d);
    if a < RAY_EPSILON {
        return None;
    }
    let b = oc.dot(d);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let near = (-b - sq) / a;
    let far = (-b + sq) / a;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

fn ray_cylinder(o: Vec3, d: Vec3, radius: f32, half_height: f32) -> Option<f32> {
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.map_or(true, |b| t < b) {
            best = Some(t);
        }
    };

    // Side wall
    let a = d.x * d.x + d.z * d.z;
    if a > RAY_EPSILON {
        let b = 2.0 * (o.x * d.x + o.z * d.z);
        let c = o.x * o.x + o.z * o.z - radius * radius;
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for t in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
                if (o.y + t * d.y).abs() <= half_height {
                    consider(t);
                }
            }
        }
    }

    // Caps
    if d.y.abs() > RAY_EPSILON {
        for y in [-half_height, half_height] {
            let t = (y - o.y) / d.y;
            let x = o.x + t * d.x;
            let z = o.z + t * d.z;
            if x * x + z * z <= radius * radius {
                consider(t);
            }
        }
    }
    best
}

fn ray_plane_xy(o: Vec3, d: Vec3, half_w: f32, half_h: f32) -> Option<f32> {
    if d.z.abs() < RAY_EPSILON {
        return None;
    }
    let t = -o.z / d.z;
    if t < 0.0 {
        return None;
    }
    let p = o + d * t;
    (p.x.abs() <= half_w && p.y.abs() <= half_h).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_hit_from_outside_and_inside() {
        let t = ray_aabb(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z, -Vec3::splat(0.5), Vec3::splat(0.5));
        assert!((t.unwrap() - 1.5).abs() < 1e-5);
        let inside = ray_aabb(Vec3::ZERO, Vec3::X, -Vec3::splat(0.5), Vec3::splat(0.5));
        assert!((inside.unwrap() - 0.5).abs() < 1e-5);
        let miss = ray_aabb(Vec3::new(2.0, 0.0, 2.0), Vec3::NEG_Z, -Vec3::splat(0.5), Vec3::splat(0.5));
        assert!(miss.is_none());
    }

    #[test]
    fn cylinder_cap_and_side() {
        // Looking down the axis hits the top cap.
        let cap = ray_cylinder(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, 1.0, 0.5).unwrap();
        assert!((cap - 4.5).abs() < 1e-5);
        // Looking across hits the wall.
        let side = ray_cylinder(Vec3::new(-5.0, 0.0, 0.0), Vec3::X, 1.0, 0.5).unwrap();
        assert!((side - 4.0).abs() < 1e-5);
        // Passing above the cap misses.
        assert!(ray_cylinder(Vec3::new(-5.0, 1.0, 0.0), Vec3::X, 1.0, 0.5).is_none());
    }

    #[test]
    fn sphere_behind_origin_is_ignored() {
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 1.0).is_none());
        let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 1.0).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn plane_is_double_sided() {
        let front = ray_plane_xy(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z, 1.0, 1.0);
        let back = ray_plane_xy(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, 1.0, 1.0);
        assert_eq!(front, Some(3.0));
        assert_eq!(back, Some(3.0));
        assert!(ray_plane_xy(Vec3::new(2.0, 0.0, 3.0), Vec3::NEG_Z, 1.0, 1.0).is_none());
    }
}
