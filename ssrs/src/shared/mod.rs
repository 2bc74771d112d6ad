mod config_load;
mod error;
mod logging;

pub mod prelude {
    pub use super::config_load::{
        FoundConfig, PROFILE_FILE_NAME, RUN_ID_ENV_VAR, RenderProfile, RendererConfig,
        RendererConfigBuilder, ServerOptions, default_profile_path, parse_duration,
    };
    pub use super::error::ConfigError;
    pub use super::logging::{LoggingOpts, STDOUT_WRITER};
}
