use std::path::Path;

/// Read shader text from disk.
///
/// A missing or unreadable file yields an empty string; compiling that reports the error.
pub fn read_shader_source(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(source) => {
            log::debug!("Loaded {} bytes of shader source from {}", source.len(), path.display());
            source
        }
        Err(e) => {
            log::warn!("Failed to read shader source {}: {}", path.display(), e);
            String::new()
        }
    }
}
