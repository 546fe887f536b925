// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for client configuration.

#[cfg(test)]
mod tests {
    use crate::config::{build_api_url, ClientConfig};
    use crate::constants::{ENV_API_ENDPOINT, ENV_API_KEY, ENV_API_TIMEOUT_SECS};
    use crate::errors::PdnsError;
    use std::io::Write;
    use std::time::Duration;

    // =====================================================
    // URL Building Tests
    // =====================================================

    #[test]
    fn test_build_api_url_with_http() {
        assert_eq!(
            build_api_url("http://localhost:8081/api/v1/servers/localhost"),
            "http://localhost:8081/api/v1/servers/localhost"
        );
    }

    #[test]
    fn test_build_api_url_without_scheme() {
        assert_eq!(build_api_url("localhost:8081"), "http://localhost:8081");
    }

    #[test]
    fn test_build_api_url_with_https() {
        assert_eq!(
            build_api_url("https://pdns.example.net/api/v1/servers/localhost"),
            "https://pdns.example.net/api/v1/servers/localhost"
        );
    }

    #[test]
    fn test_build_api_url_trailing_slashes() {
        assert_eq!(build_api_url("http://localhost:8081///"), "http://localhost:8081");
        assert_eq!(build_api_url(" localhost:8081/ "), "http://localhost:8081");
    }

    #[test]
    fn test_build_api_url_ipv6() {
        assert_eq!(build_api_url("[::1]:8081"), "http://[::1]:8081");
    }

    // =====================================================
    // Construction Tests
    // =====================================================

    #[test]
    fn test_new_rejects_empty_values() {
        assert!(matches!(
            ClientConfig::new("", "key"),
            Err(PdnsError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("http://localhost:8081", ""),
            Err(PdnsError::Config(_))
        ));
    }

    #[test]
    fn test_with_timeout() {
        let config = ClientConfig::new("localhost:8081", "key")
            .unwrap()
            .with_timeout(Duration::from_secs(7));

        assert_eq!(config.timeout(), Some(Duration::from_secs(7)));
        assert_eq!(config.base_url(), "http://localhost:8081");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new("localhost:8081", "super-secret").unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_from_file_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "endpoint: http://127.0.0.1:8081/api/v1/servers/localhost\napi_key: changeme\ntimeout_secs: 10"
        )
        .unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();

        assert_eq!(
            config.endpoint,
            "http://127.0.0.1:8081/api/v1/servers/localhost"
        );
        assert_eq!(config.api_key, "changeme");
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_from_file_without_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint: localhost:8081\napi_key: changeme").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_from_file_errors() {
        let err = ClientConfig::from_file("/nonexistent/pdns.yaml").unwrap_err();
        assert!(matches!(err, PdnsError::Config(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint: [not, a, string]").unwrap();
        assert!(matches!(
            ClientConfig::from_file(file.path()),
            Err(PdnsError::Config(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint: localhost:8081\napi_key: \"\"").unwrap();
        assert!(ClientConfig::from_file(file.path()).is_err());
    }

    // Only test touching the process environment
    #[test]
    fn test_from_env() {
        std::env::remove_var(ENV_API_ENDPOINT);
        std::env::remove_var(ENV_API_KEY);
        std::env::remove_var(ENV_API_TIMEOUT_SECS);
        assert!(ClientConfig::from_env().is_err());

        std::env::set_var(ENV_API_ENDPOINT, "http://localhost:8081/api/v1/servers/localhost");
        std::env::set_var(ENV_API_KEY, "env-key");
        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.timeout(), None);

        std::env::set_var(ENV_API_TIMEOUT_SECS, "abc");
        assert!(ClientConfig::from_env().is_err());

        std::env::set_var(ENV_API_TIMEOUT_SECS, "30");
        assert_eq!(
            ClientConfig::from_env().unwrap().timeout(),
            Some(Duration::from_secs(30))
        );

        std::env::remove_var(ENV_API_ENDPOINT);
        std::env::remove_var(ENV_API_KEY);
        std::env::remove_var(ENV_API_TIMEOUT_SECS);
    }
}
