//! Resource manifests
//!
//! A manifest is an ordered list of resources to load or generate. It is a
//! plain [`Config`] type, so it can be written as RON or TOML:
//!
//! ```ron
//! (
//!     entries: [
//!         Load(kind: "Mesh", name: "cube", path: "models/cube.obj"),
//!         Torus(name: "ring", loop_radius: 1.0, circle_radius: 0.25, loop_samples: 32, circle_samples: 16),
//!     ],
//! )
//! ```

use std::path::PathBuf;

use engine_core::assets::{ResourceError, ResourceKind, ResourceManager};
use engine_core::backend::GraphicsBackend;
use engine_core::config::Config;
use engine_core::render::primitives::{crater_height_map, Crater};
use serde::{Deserialize, Serialize};

/// One resource to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ManifestEntry {
    /// Load a material, texture or mesh from disk
    Load {
        /// `"Material"`, `"Texture"` or `"Mesh"`
        kind: String,
        /// Registry name
        name: String,
        /// File, or shader prefix for materials
        path: String,
    },
    /// Generate a torus
    Torus {
        /// Registry name
        name: String,
        /// Radius of the large loop
        loop_radius: f32,
        /// Radius of the tube
        circle_radius: f32,
        /// Samples around the loop
        loop_samples: u32,
        /// Samples around the tube
        circle_samples: u32,
    },
    /// Generate a UV-sphere
    Sphere {
        /// Registry name
        name: String,
        /// Sphere radius
        radius: f32,
        /// Samples around the equator
        theta_samples: u32,
        /// Samples from pole to pole
        phi_samples: u32,
    },
    /// The unit wall quad
    Wall {
        /// Registry name
        name: String,
    },
    /// The unit ground quad
    Plane {
        /// Registry name
        name: String,
    },
    /// A height-field grid shaped by craters
    Craters {
        /// Registry name
        name: String,
        /// Extent along X
        grid_width: f32,
        /// Extent along Z
        grid_height: f32,
        /// Vertices along X
        samples_x: u32,
        /// Vertices along Z
        samples_z: u32,
        /// Depressions to carve
        #[serde(default)]
        craters: Vec<Crater>,
    },
    /// Six face images in +X, -X, +Y, -Y, +Z, -Z order
    CubeMap {
        /// Registry name
        name: String,
        /// Face image paths
        faces: Vec<PathBuf>,
    },
}

impl ManifestEntry {
    /// Load or generate this entry into `manager`
    pub fn apply(&self, manager: &mut ResourceManager, backend: &mut dyn GraphicsBackend) -> Result<(), ResourceError> {
        match self {
            Self::Load { kind, name, path } => {
                let kind: ResourceKind = kind.parse()?;
                manager.load_resource(backend, kind, name, path)?;
            }
            Self::Torus {
                name,
                loop_radius,
                circle_radius,
                loop_samples,
                circle_samples,
            } => {
                manager.create_torus(backend, name, *loop_radius, *circle_radius, *loop_samples, *circle_samples)?;
            }
            Self::Sphere {
                name,
                radius,
                theta_samples,
                phi_samples,
            } => {
                manager.create_sphere(backend, name, *radius, *theta_samples, *phi_samples)?;
            }
            Self::Wall { name } => {
                manager.create_wall(backend, name)?;
            }
            Self::Plane { name } => {
                manager.create_plane(backend, name)?;
            }
            Self::Craters {
                name,
                grid_width,
                grid_height,
                samples_x,
                samples_z,
                craters,
            } => {
                let heights = crater_height_map(*samples_x, *samples_z, *grid_width, *grid_height, craters)?;
                manager.create_plane_with_craters(backend, name, &heights, *grid_width, *grid_height, *samples_x, *samples_z)?;
            }
            Self::CubeMap { name, faces } => {
                manager.load_cube_map(backend, name, faces)?;
            }
        }
        Ok(())
    }
}

/// Ordered list of resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Entries, applied first to last
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

impl Config for Manifest {}

impl Manifest {
    /// Apply every entry, stopping at the first failure
    pub fn apply(&self, manager: &mut ResourceManager, backend: &mut dyn GraphicsBackend) -> Result<(), ResourceError> {
        for entry in &self.entries {
            entry.apply(manager, backend)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::assets::ErrorCategory;
    use engine_core::backend::HeadlessBackend;

    #[test]
    fn test_parse_ron_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.ron");
        std::fs::write(
            &path,
            r#"(
                entries: [
                    Wall(name: "wall"),
                    Torus(name: "ring", loop_radius: 1.0, circle_radius: 0.2, loop_samples: 8, circle_samples: 6),
                    Craters(
                        name: "ground",
                        grid_width: 10.0,
                        grid_height: 10.0,
                        samples_x: 5,
                        samples_z: 5,
                        craters: [(center_x: 5.0, center_z: 5.0, radius: 2.0, depth: 0.5)],
                    ),
                ],
            )"#,
        )
        .unwrap();

        let manifest = Manifest::load_from_file(&path).unwrap();
        assert_eq!(manifest.entries.len(), 3);
        assert_eq!(manifest.entries[0], ManifestEntry::Wall { name: "wall".to_string() });

        let mut backend = HeadlessBackend::new();
        let mut manager = ResourceManager::default();
        manifest.apply(&mut manager, &mut backend).unwrap();

        let names: Vec<&str> = manager.resources().map(|r| r.name()).collect();
        assert_eq!(names, vec!["wall", "ring", "ground"]);
        assert_eq!(manager.get_resource("ground").unwrap().size(), 6 * 4 * 4);
    }

    #[test]
    fn test_parse_toml_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.toml");
        std::fs::write(
            &path,
            r#"
[[entries]]
[entries.Sphere]
name = "ball"
radius = 2.0
theta_samples = 12
phi_samples = 6

[[entries]]
[entries.Plane]
name = "floor"
"#,
        )
        .unwrap();

        let manifest = Manifest::load_from_file(&path).unwrap();
        assert_eq!(
            manifest.entries[1],
            ManifestEntry::Plane { name: "floor".to_string() }
        );
        assert!(matches!(manifest.entries[0], ManifestEntry::Sphere { theta_samples: 12, .. }));
    }

    #[test]
    fn test_unknown_kind_stops_at_first_failure() {
        let manifest = Manifest {
            entries: vec![
                ManifestEntry::Plane { name: "floor".to_string() },
                ManifestEntry::Load {
                    kind: "Sound".to_string(),
                    name: "boom".to_string(),
                    path: "boom.wav".to_string(),
                },
                ManifestEntry::Wall { name: "wall".to_string() },
            ],
        };

        let mut backend = HeadlessBackend::new();
        let mut manager = ResourceManager::default();
        let err = manifest.apply(&mut manager, &mut backend).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Usage);
        assert_eq!(manager.len(), 1);
        assert!(manager.get_resource("wall").is_none());
    }
}
