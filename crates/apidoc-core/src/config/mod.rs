//! Rendering-profile configuration (apidoc.toml)

pub mod model;

pub use model::{
    Config, FRONT_MATTER_DELIMITER, FrontMatterConfig, Layout, LineEnding, LinkStyle, Profile,
    RenderConfig, TextConfig,
};
