pub type InklineResult<T> = Result<T, InklineError>;

#[derive(thiserror::Error, Debug)]
pub enum InklineError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InklineError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
