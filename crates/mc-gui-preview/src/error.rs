use mc_gui_builder::BuildError;
use mc_gui_core::GuiError;
use mc_gui_net::NetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Gui(#[from] GuiError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Net(#[from] NetError),

    #[error("failed to encode snapshot: {0}")]
    Json(#[from] serde_json::Error),
}
