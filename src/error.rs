use crate::{import::ImportError, pattern::{PatternError, VerifyError}};

#[derive(Debug, thiserror::Error)]
pub enum MifGenError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("{0}")]
    Message(String),

    #[error("{msg} >> {err}")]
    Context { msg: String, err: Box<dyn std::error::Error + Send + Sync> }
}

pub type MifGenResult<T> = Result<T, MifGenError>;

pub trait ErrorContext<T> {
    fn context<S: Into<String>>(self, msg: S) -> MifGenResult<T>;
    fn with_context<S: Into<String>>(self, f: impl Fn() -> S) -> MifGenResult<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ErrorContext<T> for Result<T, E> {
    fn context<S: Into<String>>(self, msg: S) -> MifGenResult<T> {
        self.map_err(|e| MifGenError::Context { msg: msg.into(), err: Box::new(e) })
    }

    fn with_context<S: Into<String>>(self, f: impl Fn() -> S) -> MifGenResult<T> {
        self.map_err(|e| MifGenError::Context { msg: f().into(), err: Box::new(e) })
    }
}

impl MifGenError {
    pub fn msg<S: Into<String>>(msg: S) -> Self {
        Self::Message(msg.into())
    }
}
