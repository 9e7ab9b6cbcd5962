//! Poly Scene - scene description loading for the poly ray tracer.
//!
//! A scene description is a JSON document naming the view plane, the region
//! to render, the camera and sampler, and the objects and lights. Loading it
//! yields a [`RenderJob`]: a ready-to-render [`poly_renderer::World`] plus
//! its camera.
//!
//! # Example
//!
//! ```ignore
//! use poly_scene::load_scene;
//!
//! let mut job = load_scene("scene.json")?.build()?;
//! job.camera.render_scene(&mut job.world)?;
//! ```

pub mod description;
pub mod loader;

// Re-export commonly used types
pub use description::{
    CameraDescription, LightDescription, MaterialDescription, ObjectDescription,
    SamplerDescription, SceneDescription,
};
pub use loader::{load_scene, parse_scene, LoadError, LoadResult, RenderJob, DEFAULT_OUTPUT_FILE};
