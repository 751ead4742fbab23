//! Scene assembly.
//!
//! A scene is a fully populated surface list plus the camera settings to
//! view it with. Scenes come either from a JSON description or from the
//! built-in random sphere field.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use lux_math::sampling::{gen_f32, gen_range, random_vec3, random_vec3_range};
use lux_math::Vec3;
use lux_renderer::{CameraSettings, Color, Dielectric, HittableList, Lambertian, Material, Metal, Sphere};
use rand::RngCore;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Sphere {index} has invalid radius {radius}")]
    InvalidSphere { index: usize, radius: f32 },
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A material entry in a scene file, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian {
        albedo: Color,
    },
    Metal {
        albedo: Color,
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        ior: f32,
        /// Reflect probabilistically using Schlick's approximation
        #[serde(default)]
        schlick: bool,
    },
}

impl MaterialDesc {
    fn build(&self) -> Arc<dyn Material> {
        match *self {
            MaterialDesc::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
            MaterialDesc::Metal { albedo, fuzz } => Arc::new(Metal::new(albedo, fuzz)),
            MaterialDesc::Dielectric { ior, schlick } => {
                Arc::new(Dielectric::new(ior).with_schlick_reflectance(schlick))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub material: String,
}

/// On-disk scene description.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneDesc {
    pub camera: CameraSettings,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

impl SceneDesc {
    /// Resolve material names and build the surface list.
    ///
    /// Each named material is instantiated once and shared by every sphere
    /// that references it.
    pub fn build(self) -> SceneResult<Scene> {
        let materials: BTreeMap<&str, Arc<dyn Material>> = self
            .materials
            .iter()
            .map(|(name, desc)| (name.as_str(), desc.build()))
            .collect();

        let mut world = HittableList::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidSphere {
                    index,
                    radius: sphere.radius,
                });
            }
            let material = materials
                .get(sphere.material.as_str())
                .ok_or_else(|| SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                })?;
            world.add(Arc::new(Sphere::new(sphere.center, sphere.radius, Arc::clone(material))));
        }

        log::debug!(
            "Built scene with {} materials and {} spheres",
            materials.len(),
            world.len()
        );

        Ok(Scene {
            camera: self.camera,
            world,
        })
    }
}

/// A populated world plus the camera settings it should be rendered with.
pub struct Scene {
    pub camera: CameraSettings,
    pub world: HittableList,
}

/// Parse a scene description from JSON text.
pub fn load_scene_from_str(json: &str) -> SceneResult<Scene> {
    let desc: SceneDesc = serde_json::from_str(json)?;
    desc.build()
}

/// Load a scene description from a JSON file.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<Scene> {
    let path = path.as_ref();
    log::info!("Loading scene from {}", path.display());
    let json = fs::read_to_string(path)?;
    load_scene_from_str(&json)
}

/// The random sphere field: a huge ground sphere, a grid of small spheres
/// with randomly chosen materials, and three large feature spheres.
pub fn random_scene(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)));

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let keep_clear = Vec3::new(4.0, 0.2, 0.0);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_vec3(rng) * random_vec3(rng);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vec3_range(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };
            world.add(Arc::new(Sphere::new(center, 0.2, material)));
        }
    }

    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass)));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    log::debug!("Random scene has {} spheres", world.len());

    let camera = CameraSettings::default()
        .with_image(1200, 16.0 / 9.0)
        .with_quality(500, 50)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    Scene { camera, world }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_math::{Interval, Ray};
    use lux_renderer::Hittable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCENE: &str = r#"{
        "camera": { "image_width": 64, "samples_per_pixel": 8, "look_from": [0.0, 0.0, 1.0] },
        "materials": {
            "ground": { "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            "mirror": { "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.1 },
            "glass": { "type": "dielectric", "ior": 1.5, "schlick": true }
        },
        "spheres": [
            { "center": [0.0, -100.5, -1.0], "radius": 100.0, "material": "ground" },
            { "center": [0.0, 0.0, -1.0], "radius": 0.5, "material": "glass" },
            { "center": [1.0, 0.0, -1.0], "radius": 0.5, "material": "mirror" },
            { "center": [-1.0, 0.0, -1.0], "radius": 0.5, "material": "mirror" }
        ]
    }"#;

    #[test]
    fn test_load_scene_from_str() {
        let scene = load_scene_from_str(SCENE).unwrap();

        assert_eq!(scene.world.len(), 4);
        assert_eq!(scene.camera.image_width, 64);
        assert_eq!(scene.camera.samples_per_pixel, 8);
        assert_eq!(scene.camera.look_from, Vec3::new(0.0, 0.0, 1.0));
        // Unspecified settings keep their defaults
        assert_eq!(scene.camera.max_depth, CameraSettings::default().max_depth);

        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let rec = scene
            .world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .expect("center sphere");
        assert!((rec.t - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_material_descriptions() {
        let desc: SceneDesc = serde_json::from_str(SCENE).unwrap();
        assert_eq!(
            desc.materials["glass"],
            MaterialDesc::Dielectric {
                ior: 1.5,
                schlick: true
            }
        );
        let metal: MaterialDesc = serde_json::from_str(r#"{ "type": "metal", "albedo": [1.0, 1.0, 1.0] }"#).unwrap();
        assert_eq!(
            metal,
            MaterialDesc::Metal {
                albedo: Vec3::ONE,
                fuzz: 0.0
            }
        );
    }

    #[test]
    fn test_spheres_share_named_materials() {
        let scene = load_scene_from_str(SCENE).unwrap();
        let ray_left = Ray::new(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let ray_right = Ray::new(Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let interval = Interval::new(0.001, f32::INFINITY);

        let left = scene.world.hit(&ray_left, interval).unwrap();
        let right = scene.world.hit(&ray_right, interval).unwrap();
        assert!(std::ptr::addr_eq(left.material, right.material));
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{ "spheres": [{ "center": [0.0, 0.0, 0.0], "radius": 1.0, "material": "nope" }] }"#;
        match load_scene_from_str(json) {
            Err(SceneError::UnknownMaterial { index, name }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "nope");
            }
            other => panic!("expected unknown material error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_invalid_sphere_radius() {
        let json = r#"{
            "materials": { "m": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] } },
            "spheres": [{ "center": [0.0, 0.0, 0.0], "radius": -1.0, "material": "m" }]
        }"#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(SceneError::InvalidSphere { index: 0, .. })
        ));
    }

    #[test]
    fn test_zero_sphere_radius_rejected() {
        let json = r#"{
            "materials": { "m": { "type": "lambertian", "albedo": [0.5, 0.5, 0.5] } },
            "spheres": [
                { "center": [0.0, 0.0, -1.0], "radius": 0.5, "material": "m" },
                { "center": [0.0, 0.0, 0.0], "radius": 0.0, "material": "m" }
            ]
        }"#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(SceneError::InvalidSphere { index: 1, radius }) if radius == 0.0
        ));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(load_scene_from_str("{ not json"), Err(SceneError::Parse(_))));
        let bad_type = r#"{ "materials": { "m": { "type": "plastic" } } }"#;
        assert!(matches!(load_scene_from_str(bad_type), Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_bundled_scene_loads() {
        let scene = load_scene_from_str(include_str!("../../../scenes/three_spheres.json")).unwrap();
        assert_eq!(scene.world.len(), 5);
        assert_eq!(scene.camera.defocus_angle, 10.0);
        assert!(lux_renderer::Camera::new(scene.camera).is_ok());
    }

    #[test]
    fn test_load_scene_missing_file() {
        assert!(matches!(
            load_scene("/nonexistent/lux/scene.json"),
            Err(SceneError::Io(_))
        ));
    }

    #[test]
    fn test_random_scene() {
        let mut rng = StdRng::seed_from_u64(0);
        let scene = random_scene(&mut rng);

        // Ground + three feature spheres + most of the 22x22 grid
        assert!(scene.world.len() > 400);
        assert!(scene.world.len() <= 1 + 22 * 22 + 3);
        assert_eq!(scene.camera.image_width, 1200);
        assert_eq!(scene.camera.look_from, Vec3::new(13.0, 2.0, 3.0));

        // Looking straight down from above always lands on something
        let ray = Ray::new(Vec3::new(0.0, 10.0, 0.0), -Vec3::Y);
        assert!(scene
            .world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .is_some());
    }

    #[test]
    fn test_random_scene_is_seeded() {
        let a = random_scene(&mut StdRng::seed_from_u64(12));
        let b = random_scene(&mut StdRng::seed_from_u64(12));
        assert_eq!(a.world.len(), b.world.len());
    }
}
