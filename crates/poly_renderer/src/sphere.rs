//! Sphere primitive for ray tracing.

use crate::error::{RenderError, RenderResult};
use crate::hittable::Hit;
use crate::{Material, Ray};
use poly_math::{Interval, Vec3};

/// Roots closer than this are ignored so secondary rays do not re-hit their origin.
pub const EPSILON: f32 = 1e-3;

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    centre: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(centre: Vec3, radius: f32, material: impl Into<Material>) -> RenderResult<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(RenderError::InvalidRadius(radius));
        }
        if !centre.is_finite() {
            return Err(RenderError::InvalidCentre(centre));
        }

        Ok(Self {
            centre,
            radius,
            material: material.into(),
        })
    }

    pub fn centre(&self) -> Vec3 {
        self.centre
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Both solutions of |o + t·d − c|² = r², smaller first.
    ///
    /// Returns `None` when the discriminant is negative.
    pub fn roots(&self, ray: &Ray) -> Option<(f32, f32)> {
        // The direction is unit length, so the quadratic's `a` term is 1.
        let oc = self.centre - ray.origin();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        Some((h - sqrtd, h + sqrtd))
    }

    /// Nearest intersection with t beyond [`EPSILON`].
    pub fn hit(&self, ray: &Ray) -> Option<Hit> {
        let (near, far) = self.roots(ray)?;
        let ray_t = Interval::beyond(EPSILON);

        let t = if ray_t.surrounds(near) {
            near
        } else if ray_t.surrounds(far) {
            far
        } else {
            return None;
        };

        let point = ray.at(t);
        Some(Hit {
            t,
            point,
            normal: (point - self.centre) / self.radius,
        })
    }
}
