//! Scene objects and the records produced when a ray hits one.

use crate::{Material, Ray, Sphere, World};
use poly_math::Vec3;

/// Geometry of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit surface normal
    pub normal: Vec3,
}

/// Everything a material needs to shade one intersection.
///
/// Built by the tracer for each hit and dropped once shading returns.
#[derive(Clone, Copy)]
pub struct ShadeRec<'w> {
    pub world: &'w World,
    /// The incoming ray
    pub ray: Ray,
    pub t: f32,
    pub hit_point: Vec3,
    pub normal: Vec3,
    /// Recursion depth reached by `ray`
    pub depth: u32,
}

/// The closed set of renderable surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Sphere(Sphere),
}

impl Object {
    /// Nearest intersection in front of the ray origin, if any.
    pub fn hit(&self, ray: &Ray) -> Option<Hit> {
        match self {
            Object::Sphere(sphere) => sphere.hit(ray),
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Object::Sphere(sphere) => sphere.material(),
        }
    }
}

impl From<Sphere> for Object {
    fn from(sphere: Sphere) -> Self {
        Object::Sphere(sphere)
    }
}
