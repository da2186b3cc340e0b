use thiserror::Error;

use crate::gl::ShaderStage;

/// Errors returned by the backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Device objects could not be set up, or the backend was used in the
    /// wrong lifecycle state.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A caller-supplied value violates a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{stage:?} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {log}")]
    ProgramLink { log: String },

    #[error("vertex attribute `{0}` not found in linked program")]
    MissingAttribute(&'static str),

    #[error("uniform `{0}` not found in linked program")]
    MissingUniform(&'static str),

    #[error("failed to create {what}: {reason}")]
    ResourceCreation { what: &'static str, reason: String },

    #[error("font atlas {width}x{height} needs {} bytes of RGBA8, got {len}", rgba_len(.width, .height))]
    InvalidFontAtlas { width: u32, height: u32, len: usize },

    #[error("backend is already initialized")]
    AlreadyInitialized,

    #[error("backend is not initialized")]
    NotInitialized,
}

impl BackendError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BackendError::InvalidArgument(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BackendError::InvalidArgument(_))
    }
}

fn rgba_len(width: &u32, height: &u32) -> usize {
    *width as usize * *height as usize * 4
}

pub type Result<T> = std::result::Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert_and_display() {
        let err: BackendError = ConfigError::MissingUniform("ProjMtx").into();
        assert!(matches!(err, BackendError::Config(ConfigError::MissingUniform("ProjMtx"))));
        assert_eq!(err.to_string(), "uniform `ProjMtx` not found in linked program");
    }

    #[test]
    fn atlas_error_reports_expected_len() {
        let err = ConfigError::InvalidFontAtlas { width: 2, height: 2, len: 3 };
        assert_eq!(err.to_string(), "font atlas 2x2 needs 16 bytes of RGBA8, got 3");
    }

    #[test]
    fn shader_error_names_stage() {
        let err = ConfigError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "bad".into(),
        };
        assert_eq!(err.to_string(), "Fragment shader failed to compile: bad");
    }
}
