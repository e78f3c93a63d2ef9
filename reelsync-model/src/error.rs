use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug)]
pub enum ModelError {
    InvalidId(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidId(msg) => write!(f, "invalid id: {msg}"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VideoID;

    #[test]
    fn malformed_id_reports_the_input() {
        let err = VideoID::from_string("not-a-uuid").unwrap_err();
        assert!(matches!(err, ModelError::InvalidId(_)));
        assert!(err.to_string().contains("not-a-uuid"));
    }
}
