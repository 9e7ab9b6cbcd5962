//! Light sources.

use crate::error::{RenderError, RenderResult};
use crate::hittable::ShadeRec;
use crate::material::Colour;
use poly_math::Vec3;

/// A point light with no distance falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    position: Vec3,
    colour: Colour,
    /// Radiance scale
    ls: f32,
}

impl PointLight {
    /// Create a white point light at `position` with intensity `ls`.
    pub fn new(position: Vec3, ls: f32) -> RenderResult<Self> {
        Self::with_colour(position, Colour::ONE, ls)
    }

    /// Create a coloured point light.
    pub fn with_colour(position: Vec3, colour: Colour, ls: f32) -> RenderResult<Self> {
        check_intensity(ls)?;
        Ok(Self {
            position,
            colour,
            ls,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }
}

/// Uniform light arriving from every direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    colour: Colour,
    ls: f32,
}

impl AmbientLight {
    pub fn new(colour: Colour, ls: f32) -> RenderResult<Self> {
        check_intensity(ls)?;
        Ok(Self { colour, ls })
    }

    pub fn radiance(&self) -> Colour {
        self.colour * self.ls
    }
}

fn check_intensity(ls: f32) -> RenderResult<()> {
    if ls.is_finite() && ls >= 0.0 {
        Ok(())
    } else {
        Err(RenderError::InvalidIntensity(ls))
    }
}

/// The closed set of light sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point(PointLight),
    Ambient(AmbientLight),
}

impl Light {
    /// Incident radiance at any shaded point.
    pub fn radiance(&self) -> Colour {
        match self {
            Light::Point(point) => point.colour * point.ls,
            Light::Ambient(ambient) => ambient.radiance(),
        }
    }

    /// Unit vector from the hit point towards the light.
    ///
    /// Ambient light has no direction and yields `None`.
    pub fn direction(&self, sr: &ShadeRec<'_>) -> Option<Vec3> {
        match self {
            Light::Point(point) => Some((point.position - sr.hit_point).normalize()),
            Light::Ambient(_) => None,
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}
