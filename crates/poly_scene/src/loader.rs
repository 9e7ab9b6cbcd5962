//! Scene loading: document → description → ready-to-render job.

use std::path::{Path, PathBuf};

use poly_renderer::{
    AmbientLight, Colour, JitteredSampler, Matte, PinholeCamera, PointLight, Region, RenderError,
    Sphere, Vec3, ViewPlane, World,
};
use thiserror::Error;

use crate::description::{
    CameraDescription, LightDescription, MaterialDescription, ObjectDescription,
    SamplerDescription, SceneDescription,
};

/// Output path used when neither the document nor the caller names one.
pub const DEFAULT_OUTPUT_FILE: &str = "render.bmp";

/// Errors that can occur during scene loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON, a missing required field, or an unknown `type`.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Scene(#[from] RenderError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Everything needed to render and save one job.
#[derive(Debug)]
pub struct RenderJob {
    pub world: World,
    pub camera: PinholeCamera,
    pub output_file: PathBuf,
}

/// Read and parse a scene description file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let description = parse_scene(&text)?;
    log::info!("Loaded scene description from {}", path.display());
    Ok(description)
}

/// Parse a scene description from a JSON string.
///
/// A malformed document is reported and returned as an error rather than
/// being replaced by an empty scene.
pub fn parse_scene(text: &str) -> LoadResult<SceneDescription> {
    serde_json::from_str(text).map_err(|e| {
        log::error!("Failed to parse scene description: {e}");
        LoadError::Parse(e)
    })
}

impl SceneDescription {
    pub fn view_plane(&self) -> ViewPlane {
        ViewPlane::new(self.job_x, self.job_y, self.max_depth)
    }

    pub fn region(&self) -> Region {
        Region::new(self.task_startx, self.task_endx, self.task_starty, self.task_endy)
    }

    /// Build the world and camera. Nothing is rendered yet.
    pub fn build(&self) -> LoadResult<RenderJob> {
        let world = self.build_world()?;
        let camera = self.camera.build()?;
        let output_file = self.output_file.as_deref().unwrap_or(DEFAULT_OUTPUT_FILE).into();

        Ok(RenderJob {
            world,
            camera,
            output_file,
        })
    }

    fn build_world(&self) -> LoadResult<World> {
        let sampler = self.camera.sampler.build()?;
        let background = self.background.map_or(Colour::ZERO, Colour::from_array);
        let mut world = World::new(self.view_plane(), self.region(), self.threads, sampler)?
            .with_background(background);

        for object in &self.objects {
            match object {
                ObjectDescription::Sphere {
                    centre,
                    radius,
                    material,
                } => {
                    let sphere = Sphere::new(Vec3::from_array(*centre), *radius, material.build()?)?;
                    log::debug!("Sphere at {} with radius {}", sphere.centre(), sphere.radius());
                    world.add_object(sphere);
                }
            }
        }

        for light in &self.lights {
            match light {
                LightDescription::Point {
                    position,
                    intensity,
                    colour,
                } => world.add_light(PointLight::with_colour(
                    Vec3::from_array(*position),
                    Colour::from_array(*colour),
                    *intensity,
                )?),
                LightDescription::Ambient { colour, intensity } => {
                    world.add_light(AmbientLight::new(Colour::from_array(*colour), *intensity)?)
                }
            }
        }

        log::info!(
            "Built world: {} objects, {} direct lights, ambient {}",
            world.objects().len(),
            world.lights().len(),
            if world.ambient().is_some() { "on" } else { "off" }
        );
        Ok(world)
    }
}

impl CameraDescription {
    fn build(&self) -> LoadResult<PinholeCamera> {
        Ok(PinholeCamera::new(
            Vec3::from_array(self.eye),
            Vec3::from_array(self.lookat),
            Vec3::from_array(self.up),
            self.distance,
        )?)
    }
}

impl SamplerDescription {
    fn build(&self) -> LoadResult<JitteredSampler> {
        let sampler = match *self {
            SamplerDescription::Jittered {
                samples,
                sets,
                seed: Some(seed),
            } => JitteredSampler::from_seed(samples, sets, seed)?,
            SamplerDescription::Jittered {
                samples,
                sets,
                seed: None,
            } => JitteredSampler::from_entropy(samples, sets)?,
        };
        Ok(sampler)
    }
}

impl MaterialDescription {
    fn build(&self) -> LoadResult<Matte> {
        match *self {
            MaterialDescription::Matte { diffuse, colour } => {
                Ok(Matte::new(diffuse, Colour::from_array(colour))?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_renderer::Light;

    const SINGLE_SPHERE: &str = r#"{
        "job_x": 1000,
        "job_y": 1000,
        "max_depth": 5,
        "task_startx": 480,
        "task_endx": 520,
        "task_starty": 560,
        "task_endy": 590,
        "threads": 3,
        "camera": {
            "distance": 400,
            "eye": [0, 60, 300],
            "lookat": [0, 0, 0],
            "up": [0, 1, 0],
            "sampler": { "type": "jittered", "samples": 9, "sets": 1, "seed": 7 }
        },
        "objects": [
            {
                "type": "sphere",
                "centre": [0, 0, 150],
                "radius": 30,
                "material": { "type": "matte", "diffuse": 0.5, "colour": [0, 0, 1] }
            }
        ],
        "lights": [
            { "type": "point", "position": [0, 100, 150], "intensity": 5 },
            { "type": "ambient", "colour": [1, 1, 1], "intensity": 0.3 }
        ]
    }"#;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// The single-sphere scene with one JSON fragment swapped out.
    fn edited(from: &str, to: &str) -> String {
        assert!(SINGLE_SPHERE.contains(from), "fixture has no {from}");
        SINGLE_SPHERE.replace(from, to)
    }

    #[test]
    fn test_parse_single_sphere() {
        let description = parse_scene(SINGLE_SPHERE).unwrap();

        assert_eq!(description.view_plane(), ViewPlane::new(1000, 1000, 5));
        assert_eq!(description.region(), Region::new(480, 520, 560, 590));
        assert_eq!(description.threads, 3);
        assert_eq!(description.background, None);
        assert_eq!(description.objects.len(), 1);
        assert_eq!(
            description.lights[0],
            LightDescription::Point {
                position: [0.0, 100.0, 150.0],
                intensity: 5.0,
                colour: [1.0, 1.0, 1.0],
            }
        );
    }

    #[test]
    fn test_build_single_sphere() {
        init_logging();
        let job = parse_scene(SINGLE_SPHERE).unwrap().build().unwrap();
        let world = &job.world;

        assert_eq!(world.background(), Colour::ZERO);
        assert_eq!(world.objects().len(), 1);
        assert_eq!(world.lights().len(), 1);
        assert!(matches!(world.lights()[0], Light::Point(_)));
        assert_eq!(world.ambient().unwrap().radiance(), Colour::splat(0.3));
        assert_eq!(world.slab_size(), 40 / 3);
        assert_eq!(world.image().len(), 40 * 30);
        assert_eq!(world.sampler().samples_per_pixel(), 9);
        assert_eq!(job.output_file, PathBuf::from(DEFAULT_OUTPUT_FILE));
    }

    #[test]
    fn test_render_loaded_scene() {
        init_logging();
        let mut job = parse_scene(SINGLE_SPHERE).unwrap().build().unwrap();
        job.camera.render_scene(&mut job.world).unwrap();

        for &pixel in job.world.image() {
            assert!(pixel.z > pixel.x && pixel.z > pixel.y, "{pixel}");
        }
    }

    #[test]
    fn test_optional_fields() {
        let text = edited(
            r#""threads": 3,"#,
            r#""max_threads": 2, "background": [0.1, 0.2, 0.3], "output_file": "job7.bmp","#,
        );
        let job = parse_scene(&text).unwrap().build().unwrap();

        assert_eq!(job.world.threads(), 2);
        assert_eq!(job.world.background(), Colour::new(0.1, 0.2, 0.3));
        assert_eq!(job.output_file, PathBuf::from("job7.bmp"));
    }

    #[test]
    fn test_unknown_discriminators_are_fatal() {
        for (from, to) in [
            (r#""type": "sphere""#, r#""type": "cube""#),
            (r#""type": "matte""#, r#""type": "phong""#),
            (r#""type": "point""#, r#""type": "spot""#),
            (r#""type": "jittered""#, r#""type": "regular""#),
        ] {
            let result = parse_scene(&edited(from, to));
            assert!(matches!(result, Err(LoadError::Parse(_))), "{to} accepted");
        }
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        init_logging();
        assert!(matches!(parse_scene("{ \"job_x\": "), Err(LoadError::Parse(_))));
        assert!(matches!(parse_scene("{}"), Err(LoadError::Parse(_))));
        assert!(matches!(
            parse_scene(&edited(r#""job_x": 1000,"#, "")),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_degenerate_values_are_rejected() {
        for (from, to) in [
            (r#""radius": 30"#, r#""radius": 0"#),
            (r#""diffuse": 0.5"#, r#""diffuse": 1.5"#),
            (r#""samples": 9"#, r#""samples": 8"#),
            (r#""threads": 3"#, r#""threads": 0"#),
            (r#""task_endx": 520"#, r#""task_endx": 1200"#),
            (r#""lookat": [0, 0, 0]"#, r#""lookat": [0, 60, 300]"#),
        ] {
            let description = parse_scene(&edited(from, to)).unwrap();
            assert!(
                matches!(description.build(), Err(LoadError::Scene(_))),
                "{to} accepted"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, SINGLE_SPHERE).unwrap();

        let description = load_scene(&path).unwrap();
        assert_eq!(description, parse_scene(SINGLE_SPHERE).unwrap());

        let missing = load_scene(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(LoadError::Io(_))));
    }
}
