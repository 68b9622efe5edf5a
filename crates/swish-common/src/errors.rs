#[derive(Debug, thiserror::Error)]
pub enum SwishError {
    #[error("chat error: {0}")]
    Chat(String),

    #[error("auth error: {0}")]
    Auth(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SwishError::Chat("backend unreachable".into());
        assert_eq!(err.to_string(), "chat error: backend unreachable");

        let err = SwishError::Auth("token expired".into());
        assert_eq!(err.to_string(), "auth error: token expired");

        let err = SwishError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SwishError = io_err.into();
        assert!(matches!(err, SwishError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
