use thiserror::Error;

/// Raised when post data reaches a layer in a shape that earlier layers rule out.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("post invariant violated: {message}")]
    Invariant { message: String },
}

impl DomainError {
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_message_names_the_broken_rule() {
        let err = DomainError::invariant("slug is required");
        assert_eq!(err.to_string(), "post invariant violated: slug is required");
    }
}
