//! In-memory graphics backend
//!
//! [`HeadlessBackend`] implements [`GraphicsBackend`] without a GPU. Objects
//! live in a slot map keyed by their [`GpuHandle`], and every call is
//! appended to a log so tests can assert on ordering (for example that a
//! failed vertex compile never reaches the fragment stage).
//!
//! Shader "compilation" is a light check: a source is rejected when it is
//! empty or contains a line starting with `#error`, whose remaining text
//! becomes the compiler log. Linking requires both stages to be live shader
//! objects of the right stage, each defining `main(`.

use slotmap::{DefaultKey, Key, KeyData, SlotMap};

use super::graphics::{BackendError, BackendResult, GpuHandle, GraphicsBackend, SamplerConfig, ShaderStage};
use crate::assets::ImageData;
use crate::render::primitives::RawVertex;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    /// `compile_shader`
    CompileShader(ShaderStage),
    /// `link_program`
    LinkProgram(GpuHandle, GpuHandle),
    /// `delete_shader`
    DeleteShader(GpuHandle),
    /// `create_vertex_buffer` with the byte length
    CreateVertexBuffer(usize),
    /// `create_index_buffer` with the byte length
    CreateIndexBuffer(usize),
    /// `create_texture_2d`
    CreateTexture2d {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },
    /// `create_cube_map`
    CreateCubeMap,
    /// `upload_cube_map_face`
    UploadCubeMapFace(GpuHandle, u32),
    /// `set_sampler`
    SetSampler(GpuHandle),
}

/// Dimensions and channel count of a stored texture or face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Channels per pixel
    pub channels: u8,
}

impl From<&ImageData> for TextureInfo {
    fn from(image: &ImageData) -> Self {
        Self {
            width: image.width,
            height: image.height,
            channels: image.channels,
        }
    }
}

#[derive(Debug)]
enum BackendObject {
    Shader {
        stage: ShaderStage,
        source: String,
    },
    Program,
    VertexBuffer(Vec<u8>),
    IndexBuffer(Vec<u8>),
    Texture2d {
        info: TextureInfo,
        sampler: Option<SamplerConfig>,
    },
    CubeMap {
        faces: Vec<(u32, TextureInfo)>,
        sampler: Option<SamplerConfig>,
    },
}

/// Graphics backend that keeps every object in memory
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    objects: SlotMap<DefaultKey, BackendObject>,
    calls: Vec<BackendCall>,
    fail_uploads: bool,
}

impl HeadlessBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every buffer and texture creation fail with `AllocationFailed`
    pub fn fail_uploads(&mut self, fail: bool) {
        self.fail_uploads = fail;
    }

    /// All calls received so far, in order
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Number of live objects
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Whether the handle names a live object
    pub fn is_live(&self, handle: GpuHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Whether the handle names a linked program
    pub fn is_program(&self, handle: GpuHandle) -> bool {
        matches!(self.get(handle), Some(BackendObject::Program))
    }

    /// Vertices stored in a vertex buffer
    pub fn vertices(&self, handle: GpuHandle) -> Option<Vec<RawVertex>> {
        match self.get(handle)? {
            BackendObject::VertexBuffer(bytes) => Some(bytemuck::pod_collect_to_vec(bytes)),
            _ => None,
        }
    }

    /// Indices stored in an index buffer
    pub fn indices(&self, handle: GpuHandle) -> Option<Vec<u32>> {
        match self.get(handle)? {
            BackendObject::IndexBuffer(bytes) => Some(bytemuck::pod_collect_to_vec(bytes)),
            _ => None,
        }
    }

    /// Dimensions of a 2D texture
    pub fn texture_info(&self, handle: GpuHandle) -> Option<TextureInfo> {
        match self.get(handle)? {
            BackendObject::Texture2d { info, .. } => Some(*info),
            _ => None,
        }
    }

    /// Uploaded faces of a cube map, in upload order
    pub fn cube_map_faces(&self, handle: GpuHandle) -> Option<&[(u32, TextureInfo)]> {
        match self.get(handle)? {
            BackendObject::CubeMap { faces, .. } => Some(faces),
            _ => None,
        }
    }

    /// Sampler state applied to a texture, if any
    pub fn sampler(&self, handle: GpuHandle) -> Option<SamplerConfig> {
        match self.get(handle)? {
            BackendObject::Texture2d { sampler, .. } | BackendObject::CubeMap { sampler, .. } => *sampler,
            _ => None,
        }
    }

    fn key(handle: GpuHandle) -> DefaultKey {
        KeyData::from_ffi(handle.0).into()
    }

    fn get(&self, handle: GpuHandle) -> Option<&BackendObject> {
        if handle.is_null() {
            return None;
        }
        self.objects.get(Self::key(handle))
    }

    fn insert(&mut self, object: BackendObject) -> GpuHandle {
        let key = self.objects.insert(object);
        GpuHandle(key.data().as_ffi())
    }

    fn check_allocation(&self, what: &str) -> BackendResult<()> {
        if self.fail_uploads {
            return Err(BackendError::AllocationFailed(format!("{what} rejected by backend")));
        }
        Ok(())
    }

    fn compile_log(stage: ShaderStage, source: &str) -> Option<String> {
        if source.trim().is_empty() {
            return Some(format!("{stage}: no source"));
        }
        source
            .lines()
            .map(str::trim_start)
            .find(|line| line.starts_with("#error"))
            .map(|line| format!("{stage}: {}", line.trim_end()))
    }

    fn linked_stage(&self, handle: GpuHandle, expected: ShaderStage) -> BackendResult<&str> {
        match self.get(handle) {
            Some(BackendObject::Shader { stage, source }) if *stage == expected => Ok(source.as_str()),
            _ => Err(BackendError::InvalidHandle(handle)),
        }
    }
}

impl GraphicsBackend for HeadlessBackend {
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> BackendResult<GpuHandle> {
        self.calls.push(BackendCall::CompileShader(stage));
        if let Some(log) = Self::compile_log(stage, source) {
            return Err(BackendError::CompileFailed(log));
        }
        Ok(self.insert(BackendObject::Shader {
            stage,
            source: source.to_owned(),
        }))
    }

    fn link_program(&mut self, vertex: GpuHandle, fragment: GpuHandle) -> BackendResult<GpuHandle> {
        self.calls.push(BackendCall::LinkProgram(vertex, fragment));

        let vertex_source = self.linked_stage(vertex, ShaderStage::Vertex)?;
        let fragment_source = self.linked_stage(fragment, ShaderStage::Fragment)?;

        let missing: Vec<&str> = [("vertex", vertex_source), ("fragment", fragment_source)]
            .into_iter()
            .filter(|(_, source)| !source.contains("main("))
            .map(|(stage, _)| stage)
            .collect();
        if !missing.is_empty() {
            return Err(BackendError::LinkFailed(format!(
                "missing entry point main() in {} shader",
                missing.join(" and ")
            )));
        }

        Ok(self.insert(BackendObject::Program))
    }

    fn delete_shader(&mut self, shader: GpuHandle) {
        self.calls.push(BackendCall::DeleteShader(shader));
        if matches!(self.get(shader), Some(BackendObject::Shader { .. })) {
            self.objects.remove(Self::key(shader));
        }
    }

    fn create_vertex_buffer(&mut self, data: &[u8]) -> BackendResult<GpuHandle> {
        self.calls.push(BackendCall::CreateVertexBuffer(data.len()));
        self.check_allocation("vertex buffer")?;
        Ok(self.insert(BackendObject::VertexBuffer(data.to_vec())))
    }

    fn create_index_buffer(&mut self, data: &[u8]) -> BackendResult<GpuHandle> {
        self.calls.push(BackendCall::CreateIndexBuffer(data.len()));
        self.check_allocation("index buffer")?;
        Ok(self.insert(BackendObject::IndexBuffer(data.to_vec())))
    }

    fn create_texture_2d(&mut self, image: &ImageData) -> BackendResult<GpuHandle> {
        self.calls.push(BackendCall::CreateTexture2d {
            width: image.width,
            height: image.height,
        });
        self.check_allocation("texture")?;
        Ok(self.insert(BackendObject::Texture2d {
            info: image.into(),
            sampler: None,
        }))
    }

    fn create_cube_map(&mut self) -> BackendResult<GpuHandle> {
        self.calls.push(BackendCall::CreateCubeMap);
        self.check_allocation("cube map")?;
        Ok(self.insert(BackendObject::CubeMap {
            faces: Vec::new(),
            sampler: None,
        }))
    }

    fn upload_cube_map_face(&mut self, cube_map: GpuHandle, face: u32, image: &ImageData) -> BackendResult<()> {
        self.calls.push(BackendCall::UploadCubeMapFace(cube_map, face));
        self.check_allocation("cube map face")?;
        let key = Self::key(cube_map);
        match self.objects.get_mut(key) {
            Some(BackendObject::CubeMap { faces, .. }) if !cube_map.is_null() => {
                faces.push((face, image.into()));
                Ok(())
            }
            _ => Err(BackendError::InvalidHandle(cube_map)),
        }
    }

    fn set_sampler(&mut self, texture: GpuHandle, config: SamplerConfig) -> BackendResult<()> {
        self.calls.push(BackendCall::SetSampler(texture));
        let key = Self::key(texture);
        match self.objects.get_mut(key) {
            Some(BackendObject::Texture2d { sampler, .. } | BackendObject::CubeMap { sampler, .. })
                if !texture.is_null() =>
            {
                *sampler = Some(config);
                Ok(())
            }
            _ => Err(BackendError::InvalidHandle(texture)),
        }
    }
}
