use mc_gui_core::GuiError;
use mc_gui_proto::error::ProtoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("protocol error: {0}")]
    Proto(#[from] ProtoError),

    #[error("failed to send packet: {0}")]
    Sink(String),

    #[error("unknown view {0}")]
    UnknownView(u32),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<NetError> for GuiError {
    fn from(err: NetError) -> Self {
        match err {
            NetError::InvalidArgument(msg) => GuiError::InvalidArgument(msg),
            other => GuiError::Adapter(other.to_string()),
        }
    }
}
