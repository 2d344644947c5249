use crate::domain::ports::AdminAuthorizer;

/// Accepts exactly one pre-shared admin token.
pub struct StaticTokenAuthorizer {
    token: String,
}

impl StaticTokenAuthorizer {
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

impl AdminAuthorizer for StaticTokenAuthorizer {
    /// Compares every byte regardless of where the first mismatch is, so
    /// response timing does not reveal a matching prefix. Only the length
    /// is allowed to short-circuit.
    fn is_authorized(&self, token: &str) -> bool {
        if self.token.is_empty() || token.len() != self.token.len() {
            return false;
        }
        self.token.bytes().zip(token.bytes()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_configured_token_is_accepted() {
        let auth = StaticTokenAuthorizer::new("s3cret".to_string());
        assert!(auth.is_authorized("s3cret"));
        assert!(!auth.is_authorized("s3cre"));
        assert!(!auth.is_authorized("S3cret"));
        assert!(!auth.is_authorized(""));
    }

    #[test]
    fn test_empty_configured_token_denies_everyone() {
        let auth = StaticTokenAuthorizer::new(String::new());
        assert!(!auth.is_authorized(""));
    }
}
