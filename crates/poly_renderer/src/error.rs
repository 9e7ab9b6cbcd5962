//! Errors raised while building or rendering a world.

use poly_math::Vec3;
use thiserror::Error;

use crate::world::Region;

/// Errors that can occur while constructing scene data or running a render.
///
/// Geometric degeneracies are rejected when the offending value is built,
/// so nothing downstream ever sees a NaN produced from bad input.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("Sphere centre must be finite, got {0}")]
    InvalidCentre(Vec3),

    #[error("Diffuse coefficient {kd} and colour {colour} must lie in [0, 1]")]
    InvalidReflectance { kd: f32, colour: Vec3 },

    #[error("Light intensity must be finite and non-negative, got {0}")]
    InvalidIntensity(f32),

    #[error("Samples per pixel must be a non-zero perfect square, got {0}")]
    InvalidSampleCount(u32),

    #[error("Sampler needs at least one sample set")]
    NoSampleSets,

    #[error("Degenerate camera: {0}")]
    DegenerateCamera(&'static str),

    #[error("Render needs at least one thread")]
    NoThreads,

    #[error("Render region {region:?} is empty or outside the {hres}x{vres} view plane")]
    InvalidRegion { region: Region, hres: u32, vres: u32 },

    #[error("Failed to start render threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for scene construction and rendering.
pub type RenderResult<T> = Result<T, RenderError>;
