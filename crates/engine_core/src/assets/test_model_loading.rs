//! Loads the sample models, shaders and textures shipped in `resources/`

#[cfg(test)]
mod tests {
    use crate::assets::{ErrorCategory, NormalSource, ObjLoader, ResourceKind, ResourceManager};
    use crate::backend::HeadlessBackend;
    use crate::config::ResourceConfig;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    fn resources_dir() -> PathBuf {
        // Workspace root is two levels up from crates/engine_core
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.pop();
        path.pop();
        path.push("resources");
        path
    }

    fn manager() -> ResourceManager {
        ResourceManager::new(ResourceConfig::default().with_search_path(resources_dir()))
    }

    #[test]
    fn test_cube_uses_explicit_normals() {
        let mesh = ObjLoader::load_obj(resources_dir().join("models/cube.obj")).unwrap();
        assert_eq!(mesh.positions.len(), 8);
        assert_eq!(mesh.faces.len(), 12);
        assert_eq!(mesh.normal_source, NormalSource::Explicit);

        let mut backend = HeadlessBackend::new();
        let mut resources = manager();
        let cube = resources
            .load_resource(&mut backend, ResourceKind::Mesh, "cube", "models/cube.obj")
            .unwrap();
        assert_eq!(cube.size(), 36);

        let vertices = backend.vertices(cube.primary()).unwrap();
        assert_eq!(vertices.len(), 36);
        // First quad faces +Z
        for vertex in &vertices[0..6] {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
        assert_eq!(vertices[2].tex_coord, [1.0, 1.0]);
    }

    #[test]
    fn test_pyramid_synthesizes_normals() {
        let mesh = ObjLoader::load_obj(resources_dir().join("models/pyramid.obj")).unwrap();
        assert_eq!(mesh.faces.len(), 6);
        assert_eq!(mesh.normal_source, NormalSource::Synthesized);

        // The apex only touches the four sides, which are symmetric
        let apex = mesh.normals[4];
        assert_relative_eq!(apex.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(apex.z, 0.0, epsilon = 1e-6);
        assert!(apex.y > 0.0);

        // Every base corner leans down and outward
        for (position, normal) in mesh.positions.iter().zip(&mesh.normals).take(4) {
            let outward = Vec3::new(position.x, 0.0, position.z);
            assert!(normal.dot(&outward) > 0.0);
        }
    }

    #[test]
    fn test_broken_model_is_format_error() {
        let mut backend = HeadlessBackend::new();
        let mut resources = manager();
        let err = resources
            .load_resource(&mut backend, ResourceKind::Mesh, "broken", "models/broken.obj")
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Format);
        assert!(err.to_string().contains("index for triangle 3 is out of bounds"));
        assert!(resources.get_resource("broken").is_none());
    }

    #[test]
    fn test_sample_material_texture_and_skybox() {
        let mut backend = HeadlessBackend::new();
        let mut resources = manager();

        let material = resources
            .load_resource(&mut backend, ResourceKind::Material, "textured", "shaders/textured")
            .unwrap()
            .primary();
        assert!(backend.is_program(material));

        let texture = resources
            .load_resource(&mut backend, ResourceKind::Texture, "checker", "textures/checker.png")
            .unwrap()
            .primary();
        let info = backend.texture_info(texture).unwrap();
        assert_eq!((info.width, info.height), (8, 8));

        let faces: Vec<PathBuf> = ["right", "left", "top", "bottom", "front", "back"]
            .iter()
            .map(|face| PathBuf::from(format!("textures/skybox/{face}.png")))
            .collect();
        let skybox = resources.load_cube_map(&mut backend, "skybox", &faces).unwrap().primary();
        assert_eq!(backend.cube_map_faces(skybox).unwrap().len(), 6);

        let names: Vec<&str> = resources.resources().map(|r| r.name()).collect();
        assert_eq!(names, vec!["textured", "checker", "skybox"]);
    }
}
