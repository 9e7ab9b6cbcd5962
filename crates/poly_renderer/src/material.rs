//! Surface materials and the Lambertian BRDF they are built from.

use crate::error::{RenderError, RenderResult};
use crate::hittable::ShadeRec;
use poly_math::{Interval, Vec3};
use std::f32::consts::FRAC_1_PI;

/// Color type alias (RGB values, 0-1 once clamped for output)
pub type Colour = Vec3;

/// Direction-independent (Lambertian) reflectance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertianBrdf {
    /// Diffuse reflection coefficient
    kd: f32,
    /// Diffuse colour
    cd: Colour,
}

impl LambertianBrdf {
    /// Create a new BRDF. `kd` and every channel of `cd` must lie in [0, 1].
    pub fn new(kd: f32, cd: Colour) -> RenderResult<Self> {
        let in_unit = |x: f32| Interval::UNIT.contains(x);
        if !(in_unit(kd) && in_unit(cd.x) && in_unit(cd.y) && in_unit(cd.z)) {
            return Err(RenderError::InvalidReflectance { kd, colour: cd });
        }
        Ok(Self { kd, cd })
    }

    /// BRDF value; the same for every pair of directions.
    #[inline]
    pub fn f(&self) -> Colour {
        self.kd * self.cd * FRAC_1_PI
    }

    /// Bihemispherical reflectance.
    #[inline]
    pub fn rho(&self) -> Colour {
        self.kd * self.cd
    }
}

/// Matte surface: ambient plus unshadowed direct diffuse lighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matte {
    diffuse: LambertianBrdf,
}

impl Matte {
    /// Create a matte material from a diffuse coefficient and colour.
    pub fn new(kd: f32, colour: Colour) -> RenderResult<Self> {
        Ok(Self {
            diffuse: LambertianBrdf::new(kd, colour)?,
        })
    }

    pub fn diffuse(&self) -> &LambertianBrdf {
        &self.diffuse
    }

    fn shade(&self, sr: &ShadeRec<'_>) -> Colour {
        let world = sr.world;

        let ambient = world
            .ambient()
            .map_or(Colour::ZERO, |light| self.diffuse.rho() * light.radiance());

        // No occlusion test: a light contributes whenever it faces the surface.
        let mut direct = Colour::ZERO;
        for light in world.lights() {
            let Some(wi) = light.direction(sr) else {
                continue;
            };
            let cos = sr.normal.dot(wi);
            if cos > 0.0 {
                direct += self.diffuse.f() * light.radiance() * cos;
            }
        }

        ambient + direct
    }
}

/// The closed set of surface materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Matte(Matte),
}

impl Material {
    /// Colour leaving the surface towards the viewer at the hit in `sr`.
    pub fn shade(&self, sr: &ShadeRec<'_>) -> Colour {
        match self {
            Material::Matte(matte) => matte.shade(sr),
        }
    }
}

impl From<Matte> for Material {
    fn from(matte: Matte) -> Self {
        Material::Matte(matte)
    }
}
