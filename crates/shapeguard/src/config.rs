/// Default cap on the size of a request body: 1 MiB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Limits applied while handling a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestConfig {
    /// Largest accepted body, in bytes. A longer body is a read failure.
    pub max_body_bytes: usize,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl RequestConfig {
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limit_is_one_mebibyte() {
        assert_eq!(RequestConfig::default().max_body_bytes, 1_048_576);
    }

    #[test]
    fn builder_overrides_limit() {
        let config = RequestConfig::default().with_max_body_bytes(16);
        assert_eq!(config.max_body_bytes, 16);
    }
}
