//! Shared User-Agent string for catalog HTTP clients.

/// Default User-Agent for catalog search requests.
#[must_use]
pub(crate) fn default_catalog_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("booksearch/{version} (catalog-search)")
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_user_agent_contains_version_and_purpose() {
        let ua = default_catalog_user_agent();
        assert!(!ua.contains("://"), "UA must not advertise a project URL: {ua}");
        assert_eq!(
            env!("CARGO_PKG_VERSION"),
            ua.strip_prefix("booksearch/")
                .and_then(|s| s.split(' ').next())
                .expect("UA has version"),
            "UA must contain crate version"
        );
        assert!(ua.contains("catalog-search"), "UA must identify purpose: {ua}");
    }
}
