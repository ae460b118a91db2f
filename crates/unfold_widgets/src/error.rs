//! Widget errors

use thiserror::Error;
use unfold_animation::EasingError;
use unfold_layout::LayoutError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Easing(#[from] EasingError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid props: {0}")]
    Props(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
