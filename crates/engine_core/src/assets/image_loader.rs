//! Image loading utilities for texture data
//!
//! Decodes PNG and other image files with the `image` crate into tightly
//! packed 8-bit pixel data ready for backend upload.

use std::path::Path;

/// Decoded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw pixel data, row-major, 8 bits per channel
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (4 for RGBA, 3 for RGB)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path as RGBA8
    ///
    /// The error string is the decoder's own message (missing file,
    /// unsupported format, corrupt data).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref).map_err(|e| e.to_string())?;

        // Convert to RGBA8 format (standard for GPU upload)
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4, // RGBA
        })
    }

    /// Load an image from a file path as RGB8
    ///
    /// Cube-map faces are uploaded without alpha.
    pub fn from_file_rgb<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path_ref = path.as_ref();

        let img = image::open(path_ref).map_err(|e| e.to_string())?;
        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        log::debug!("Loaded RGB image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgb_img.into_raw(),
            width,
            height,
            channels: 3,
        })
    }

    /// Load image from memory (useful for embedded resources)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, String> {
        let img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from memory", width, height);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: 4,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * 4);

        for _ in 0..pixel_count {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
            channels: 4,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.channels, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4); // 4x4 pixels, 4 bytes each

        // Check first pixel is red
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_load_png_rgba_and_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "face.png", 3, 2);

        let rgba = ImageData::from_file(&path).unwrap();
        assert_eq!((rgba.width, rgba.height, rgba.channels), (3, 2, 4));
        assert_eq!(rgba.size_bytes(), 3 * 2 * 4);

        let rgb = ImageData::from_file_rgb(&path).unwrap();
        assert_eq!(rgb.channels, 3);
        assert_eq!(&rgb.data[0..3], &[10, 20, 30]);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(ImageData::from_bytes(b"definitely not an image").is_err());
    }

    #[test]
    fn test_nonexistent_file() {
        let result = ImageData::from_file("nonexistent_file.png");
        assert!(result.is_err(), "Should fail to load nonexistent file");
    }
}
