//! 2D texture and cube-map loading

use std::path::{Path, PathBuf};

use super::image_loader::ImageData;
use super::resource_manager::ResourceError;
use crate::backend::{GpuHandle, GraphicsBackend, SamplerConfig};

/// Decode an image file and upload it as a 2D texture
pub fn load_texture(backend: &mut dyn GraphicsBackend, path: &Path) -> Result<GpuHandle, ResourceError> {
    let image = ImageData::from_file(path).map_err(|reason| ResourceError::TextureLoad {
        path: path.to_path_buf(),
        reason,
    })?;
    Ok(backend.create_texture_2d(&image)?)
}

/// Build a cube map from face images in +X, -X, +Y, -Y, +Z, -Z order
///
/// Faces are uploaded as they are decoded and the face index is passed to
/// the backend unchanged. The first face that fails aborts the load; faces
/// already uploaded stay with the backend.
pub fn load_cube_map(backend: &mut dyn GraphicsBackend, faces: &[PathBuf]) -> Result<GpuHandle, ResourceError> {
    let cube_map = backend.create_cube_map()?;

    for (face, path) in (0u32..).zip(faces) {
        let image = ImageData::from_file_rgb(path).map_err(|reason| ResourceError::CubeMapFace {
            face,
            path: path.clone(),
            reason,
        })?;
        backend.upload_cube_map_face(cube_map, face, &image)?;
    }

    backend.set_sampler(cube_map, SamplerConfig::CUBE_MAP)?;
    log::debug!("Loaded cube map with {} faces", faces.len());
    Ok(cube_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::resource_manager::ErrorCategory;
    use crate::backend::{BackendCall, HeadlessBackend, TextureInfo};

    fn write_png(dir: &Path, name: &str, size: u32) -> PathBuf {
        let path = dir.join(name);
        image::RgbaImage::from_pixel(size, size, image::Rgba([200, 100, 50, 255]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_load_texture() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "checker.png", 8);
        let mut backend = HeadlessBackend::new();

        let texture = load_texture(&mut backend, &path).unwrap();
        assert_eq!(
            backend.texture_info(texture),
            Some(TextureInfo { width: 8, height: 8, channels: 4 })
        );
        // 2D textures keep the backend's default sampling
        assert_eq!(backend.sampler(texture), None);
    }

    #[test]
    fn test_missing_texture_reports_path_and_reason() {
        let mut backend = HeadlessBackend::new();
        let err = load_texture(&mut backend, Path::new("missing.png")).unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Backend);
        assert!(err.to_string().starts_with("Error loading texture missing.png: "));
        assert_eq!(backend.object_count(), 0);
    }

    #[test]
    fn test_load_cube_map() {
        let dir = tempfile::tempdir().unwrap();
        let faces: Vec<PathBuf> = ["px", "nx", "py", "ny", "pz", "nz"]
            .iter()
            .map(|name| write_png(dir.path(), &format!("{name}.png"), 4))
            .collect();
        let mut backend = HeadlessBackend::new();

        let cube = load_cube_map(&mut backend, &faces).unwrap();

        let uploaded = backend.cube_map_faces(cube).unwrap();
        assert_eq!(uploaded.len(), 6);
        for (expected, (face, info)) in (0u32..).zip(uploaded) {
            assert_eq!(*face, expected);
            assert_eq!(info.channels, 3);
        }
        assert_eq!(backend.sampler(cube), Some(SamplerConfig::CUBE_MAP));
    }

    #[test]
    fn test_cube_map_face_failure_keeps_earlier_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), "good.png", 2);
        let faces = vec![good.clone(), dir.path().join("absent.png"), good];
        let mut backend = HeadlessBackend::new();

        let err = load_cube_map(&mut backend, &faces).unwrap_err();

        assert!(matches!(err, ResourceError::CubeMapFace { face: 1, .. }));
        assert!(err.to_string().starts_with("Error loading cube map texture: "));
        // The first face was uploaded and is not rolled back
        assert!(backend.calls().iter().any(|c| matches!(c, BackendCall::UploadCubeMapFace(_, 0))));
        assert!(!backend.calls().iter().any(|c| matches!(c, BackendCall::SetSampler(_))));
    }

    #[test]
    fn test_upload_failure_is_backend_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "tex.png", 2);
        let mut backend = HeadlessBackend::new();
        backend.fail_uploads(true);

        let err = load_texture(&mut backend, &path).unwrap_err();
        assert!(matches!(err, ResourceError::Upload(_)));
        assert_eq!(err.category(), ErrorCategory::Backend);
    }
}
