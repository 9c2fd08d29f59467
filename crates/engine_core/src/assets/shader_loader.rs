//! Shader program building
//!
//! A material is a vertex and fragment stage pair stored next to each other
//! as `<prefix><vertex extension>` and `<prefix><fragment extension>`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::resource_manager::ResourceError;
use crate::backend::{GpuHandle, GraphicsBackend, ShaderStage};
use crate::config::ResourceConfig;

/// Read a text file line by line, terminating every line with `\n`
///
/// Carriage returns from CRLF files are dropped.
pub fn load_text_file(path: &Path) -> Result<String, ResourceError> {
    let io_error = |source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let mut content = String::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(io_error)?;
        content.push_str(line.strip_suffix('\r').unwrap_or(&line));
        content.push('\n');
    }
    Ok(content)
}

/// Compile and link the shader pair found at `prefix`
///
/// Both sources are read before anything is compiled. A vertex stage
/// failure returns before the fragment stage is touched. Stage objects are
/// released once the program links; on a failure path they are left to the
/// backend.
pub fn build_material(
    backend: &mut dyn GraphicsBackend,
    config: &ResourceConfig,
    prefix: &str,
) -> Result<GpuHandle, ResourceError> {
    let (vertex_path, fragment_path) = config.shader_paths(prefix);
    let vertex_source = load_text_file(&vertex_path)?;
    let fragment_source = load_text_file(&fragment_path)?;

    let vertex = compile_stage(backend, ShaderStage::Vertex, &vertex_source)?;
    let fragment = compile_stage(backend, ShaderStage::Fragment, &fragment_source)?;

    let program = backend
        .link_program(vertex, fragment)
        .map_err(|e| ResourceError::ShaderLink { log: e.to_string() })?;

    backend.delete_shader(vertex);
    backend.delete_shader(fragment);

    Ok(program)
}

fn compile_stage(
    backend: &mut dyn GraphicsBackend,
    stage: ShaderStage,
    source: &str,
) -> Result<GpuHandle, ResourceError> {
    log::debug!("Compiling {} shader ({} bytes)", stage, source.len());
    backend
        .compile_shader(stage, source)
        .map_err(|e| ResourceError::ShaderCompile {
            stage,
            log: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendCall, HeadlessBackend};
    use crate::assets::resource_manager::ErrorCategory;
    use std::fs;

    const VERTEX: &str = "#version 330\nvoid main() {\n    gl_Position = vec4(0.0);\n}\n";
    const FRAGMENT: &str = "#version 330\nout vec4 color;\nvoid main() {\n    color = vec4(1.0);\n}\n";

    fn write_pair(dir: &Path, name: &str, vertex: &str, fragment: &str) -> String {
        fs::write(dir.join(format!("{name}_vp.glsl")), vertex).unwrap();
        fs::write(dir.join(format!("{name}_fp.glsl")), fragment).unwrap();
        dir.join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_text_file_normalizes_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shader.glsl");
        fs::write(&path, "line one\r\nline two").unwrap();

        assert_eq!(load_text_file(&path).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_missing_source_is_io_error() {
        let err = load_text_file(Path::new("no/such/shader_vp.glsl")).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.to_string().starts_with("Error opening file no/such/shader_vp.glsl"));
    }

    #[test]
    fn test_build_material_links_and_releases_stages() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_pair(dir.path(), "plain", VERTEX, FRAGMENT);
        let mut backend = HeadlessBackend::new();

        let program = build_material(&mut backend, &ResourceConfig::default(), &prefix).unwrap();

        assert!(backend.is_program(program));
        // Only the program survives
        assert_eq!(backend.object_count(), 1);
        assert!(matches!(
            backend.calls(),
            [
                BackendCall::CompileShader(ShaderStage::Vertex),
                BackendCall::CompileShader(ShaderStage::Fragment),
                BackendCall::LinkProgram(..),
                BackendCall::DeleteShader(_),
                BackendCall::DeleteShader(_),
            ]
        ));
    }

    #[test]
    fn test_vertex_failure_skips_fragment_stage() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = write_pair(dir.path(), "broken", "#error missing attribute\n", FRAGMENT);
        let mut backend = HeadlessBackend::new();

        let err = build_material(&mut backend, &ResourceConfig::default(), &prefix).unwrap_err();

        assert!(matches!(err, ResourceError::ShaderCompile { stage: ShaderStage::Vertex, .. }));
        assert_eq!(err.category(), ErrorCategory::Backend);
        assert!(err.to_string().contains("vertex: #error missing attribute"));
        assert_eq!(backend.calls(), &[BackendCall::CompileShader(ShaderStage::Vertex)]);
    }

    #[test]
    fn test_fragment_failure_and_link_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = HeadlessBackend::new();
        let config = ResourceConfig::default();

        let prefix = write_pair(dir.path(), "bad_fragment", VERTEX, "#error no output\n");
        let err = build_material(&mut backend, &config, &prefix).unwrap_err();
        assert!(matches!(err, ResourceError::ShaderCompile { stage: ShaderStage::Fragment, .. }));

        let prefix = write_pair(dir.path(), "no_entry", VERTEX, "#version 330\n");
        let err = build_material(&mut backend, &config, &prefix).unwrap_err();
        assert!(matches!(err, ResourceError::ShaderLink { .. }));
        assert!(err.to_string().starts_with("Error linking shaders: "));
    }

    #[test]
    fn test_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sky.vert"), VERTEX).unwrap();
        fs::write(dir.path().join("sky.frag"), FRAGMENT).unwrap();
        let config = ResourceConfig {
            vertex_shader_extension: ".vert".to_string(),
            fragment_shader_extension: ".frag".to_string(),
            ..ResourceConfig::default()
        }
        .with_search_path(dir.path());
        let mut backend = HeadlessBackend::new();

        let program = build_material(&mut backend, &config, "sky").unwrap();
        assert!(backend.is_program(program));
    }
}
