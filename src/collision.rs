//! Ray queries against the colliders of the scene.

use macroquad::math::Vec3;

use crate::view::Ray;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId(u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Axis-aligned box, rotation of the owner is ignored.
    Box { half_extents: Vec3 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub collider: ColliderId,
    pub distance: f32,
    pub point: Vec3,
}

/// Anything that can answer "what does this ray hit first".
pub trait HitTest {
    /// Nearest hit along `ray` no further than `max_distance`.
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit>;
}

#[derive(Debug, Clone)]
struct Collider {
    id: ColliderId,
    shape: Shape,
    center: Vec3,
}

/// Flat list of colliders. Scenes here hold a handful of objects, so a
/// linear scan is all the acceleration there is.
#[derive(Debug, Clone, Default)]
pub struct Colliders {
    entries: Vec<Collider>,
    next_id: u32,
}

impl Colliders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape: Shape, center: Vec3) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.entries.push(Collider { id, shape, center });
        id
    }

    pub fn remove(&mut self, id: ColliderId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|c| c.id != id);
        self.entries.len() != before
    }

    /// Moves a collider. Returns false if the id is unknown.
    pub fn set_center(&mut self, id: ColliderId, center: Vec3) -> bool {
        match self.entries.iter_mut().find(|c| c.id == id) {
            Some(collider) => {
                collider.center = center;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HitTest for Colliders {
    fn raycast(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.entries
            .iter()
            .filter_map(|c| {
                let distance = match c.shape {
                    Shape::Sphere { radius } => ray_sphere(ray, c.center, radius),
                    Shape::Box { half_extents } => {
                        ray_aabb(ray, c.center - half_extents, c.center + half_extents)
                    }
                }?;
                (distance <= max_distance).then_some((c.id, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(collider, distance)| RayHit {
                collider,
                distance,
                point: ray.at(distance),
            })
    }
}

/// Entry distance of a ray into a sphere, 0 when the origin is inside.
fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    // Vector from the sphere centre to the ray origin.
    let m = ray.origin - center;
    let b = m.dot(ray.direction);
    let c = m.length_squared() - radius * radius;
    // Origin outside the sphere and the ray pointing away from it.
    if c > 0.0 && b > 0.0 {
        return None;
    }
    // A negative discriminant means the ray passes beside the sphere.
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    // Nearer of the two intersections, clamped for origins inside.
    Some((-b - discriminant.sqrt()).max(0.0))
}

/// Slab test. Entry distance, 0 when the origin is inside.
fn ray_aabb(ray: &Ray, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_near = 0.0f32;
    let mut t_far = f32::INFINITY;

    // Clip the ray against the pair of planes on each axis in turn.
    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];
        // Parallel to this slab: either always inside it or never.
        if direction.abs() < f32::EPSILON {
            if origin < min[axis] || origin > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / direction;
        let mut t0 = (min[axis] - origin) * inv;
        let mut t1 = (max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        // Keep the overlap of every slab's entry and exit.
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        // The overlap is empty, so the ray misses the box.
        if t_near > t_far {
            return None;
        }
    }
    Some(t_near)
}
