//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Duration, Utc};

/// A short code and the original URL it resolves to.
///
/// Links are immutable once created. They disappear when their TTL elapses;
/// there is no explicit deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link stamped with the current time and expiring after `ttl_seconds`.
    pub fn new(code: String, long_url: String, ttl_seconds: u64) -> Self {
        let created_at = Utc::now();
        let ttl = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        let expires_at = Duration::try_seconds(ttl)
            .and_then(|d| created_at.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            code,
            long_url,
            created_at,
            expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let link = Link::new(
            "abcd1234".to_string(),
            "https://example.com".to_string(),
            60,
        );

        assert_eq!(link.code, "abcd1234");
        assert_eq!(link.long_url, "https://example.com");
        assert_eq!(link.expires_at - link.created_at, Duration::seconds(60));
    }

    #[test]
    fn test_link_zero_ttl_expires_at_creation() {
        let link = Link::new("abcd1234".to_string(), "https://example.com".to_string(), 0);
        assert_eq!(link.expires_at, link.created_at);
    }

    #[test]
    fn test_link_huge_ttl_saturates() {
        let link = Link::new(
            "abcd1234".to_string(),
            "https://example.com".to_string(),
            u64::MAX,
        );
        assert_eq!(link.expires_at, DateTime::<Utc>::MAX_UTC);
    }
}
