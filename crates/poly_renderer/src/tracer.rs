//! Whitted-style recursive ray tracing.

use crate::hittable::{Hit, ShadeRec};
use crate::{Colour, Object, Ray, World};

/// Evaluates the colour seen along a ray.
///
/// Borrows the world it traces against; the world must outlive the tracer.
#[derive(Clone, Copy)]
pub struct Tracer<'w> {
    world: &'w World,
}

impl<'w> Tracer<'w> {
    pub fn new(world: &'w World) -> Self {
        Self { world }
    }

    /// The world this tracer reads from.
    pub fn world(&self) -> &'w World {
        self.world
    }

    /// Compute the colour seen by a ray at recursion `depth`.
    ///
    /// Rays deeper than the view plane's `max_depth` return the background
    /// without touching the scene, which bounds any recursive material.
    pub fn trace_ray(&self, ray: &Ray, depth: u32) -> Colour {
        let world = self.world;
        if depth > world.view_plane().max_depth {
            return world.background();
        }

        let Some((object, hit)) = self.nearest_hit(ray) else {
            return world.background();
        };

        let sr = ShadeRec {
            world,
            ray: *ray,
            t: hit.t,
            hit_point: hit.point,
            normal: hit.normal,
            depth,
        };
        object.material().shade(&sr)
    }

    /// Linear scan for the closest hit; the earliest object wins ties.
    fn nearest_hit(&self, ray: &Ray) -> Option<(&'w Object, Hit)> {
        let mut nearest: Option<(&'w Object, Hit)> = None;

        for object in self.world.objects() {
            if let Some(hit) = object.hit(ray) {
                if nearest.map_or(true, |(_, best)| hit.t < best.t) {
                    nearest = Some((object, hit));
                }
            }
        }

        nearest
    }
}
