//! Serde types mirroring the scene description document.
//!
//! Every polymorphic family is an internally tagged enum keyed on `type`, so
//! an unrecognised discriminator fails deserialization outright.

use serde::Deserialize;

/// Three floats: a point, a vector or an RGB colour.
pub type Triple = [f32; 3];

/// A complete render job as written on disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SceneDescription {
    /// View-plane horizontal resolution
    pub job_x: u32,
    /// View-plane vertical resolution
    pub job_y: u32,
    pub max_depth: u32,

    // Region bounds, half-open
    pub task_startx: u32,
    pub task_endx: u32,
    pub task_starty: u32,
    pub task_endy: u32,

    #[serde(alias = "max_threads")]
    pub threads: u32,

    /// Defaults to black when absent
    #[serde(default)]
    pub background: Option<Triple>,

    pub camera: CameraDescription,

    #[serde(default)]
    pub objects: Vec<ObjectDescription>,

    #[serde(default)]
    pub lights: Vec<LightDescription>,

    /// Where to write the image; the caller picks a default when absent
    #[serde(default)]
    pub output_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CameraDescription {
    pub distance: f32,
    pub eye: Triple,
    pub lookat: Triple,
    pub up: Triple,
    pub sampler: SamplerDescription,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SamplerDescription {
    Jittered {
        samples: u32,
        sets: u32,
        /// Fixed seed for reproducible renders; OS entropy otherwise
        #[serde(default)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectDescription {
    Sphere {
        centre: Triple,
        radius: f32,
        material: MaterialDescription,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDescription {
    Matte { diffuse: f32, colour: Triple },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightDescription {
    Point {
        position: Triple,
        intensity: f32,
        #[serde(default = "white")]
        colour: Triple,
    },
    Ambient {
        colour: Triple,
        intensity: f32,
    },
}

fn white() -> Triple {
    [1.0, 1.0, 1.0]
}
