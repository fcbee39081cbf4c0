// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print server connection settings.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{InkwireError, Result};
use crate::types::IppVersion;

/// Connection settings for a CUPS-class print server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host name or IP address of the server.
    pub host: String,
    /// TCP port (default 631).
    pub port: u16,
    /// Use TLS (`ipps://` / `https://`).
    pub secure: bool,
    /// HTTP basic-auth user, if the server requires authentication.
    pub username: Option<String>,
    /// HTTP basic-auth password.
    pub password: Option<String>,
    /// Sent as `requesting-user-name` when a request does not carry one.
    pub requesting_user_name: Option<String>,
    /// Per-request transport timeout in seconds.
    pub timeout_secs: u64,
    /// Protocol version written into every request.
    pub ipp_version: IppVersion,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 631,
            secure: false,
            username: None,
            password: None,
            requesting_user_name: None,
            timeout_secs: 30,
            ipp_version: IppVersion::V2_1,
        }
    }
}

impl ServerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Read `CUPS_SERVER_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), with the variable lookup supplied
    /// by the caller.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("CUPS_SERVER_IP").filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(port) = lookup("CUPS_SERVER_PORT").filter(|p| !p.is_empty()) {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| InkwireError::Config(format!("CUPS_SERVER_PORT '{port}': {e}")))?;
        }
        if let Some(secure) = lookup("CUPS_SERVER_SECURE") {
            config.secure = matches!(
                secure.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        config.username = lookup("CUPS_SERVER_USERNAME").filter(|u| !u.is_empty());
        config.password = lookup("CUPS_SERVER_PASSWORD").filter(|p| !p.is_empty());

        Ok(config)
    }

    /// `http://host:port` or `https://host:port`.
    pub fn base_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    /// The `printer-uri` for a named CUPS queue.
    pub fn printer_uri(&self, name: &str) -> String {
        format!("{}/printers/{name}", self.ipp_base())
    }

    /// The `job-uri` for a job id.
    pub fn job_uri(&self, job_id: i32) -> String {
        format!("{}/jobs/{job_id}", self.ipp_base())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn ipp_base(&self) -> String {
        let scheme = if self.secure { "ipps" } else { "ipp" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 631);
        assert!(!config.secure);
        assert_eq!(config.ipp_version, IppVersion::V2_1);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn uris_follow_scheme() {
        let mut config = ServerConfig {
            host: "print.local".into(),
            ..Default::default()
        };
        assert_eq!(config.base_url(), "http://print.local:631");
        assert_eq!(config.printer_uri("p1"), "ipp://print.local:631/printers/p1");
        assert_eq!(config.job_uri(42), "ipp://print.local:631/jobs/42");

        config.secure = true;
        assert_eq!(config.base_url(), "https://print.local:631");
        assert_eq!(config.printer_uri("p1"), "ipps://print.local:631/printers/p1");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ServerConfig::from_json_str(r#"{"host":"10.0.0.5","secure":true}"#).unwrap();
        assert_eq!(config.host, "10.0.0.5");
        assert!(config.secure);
        assert_eq!(config.port, 631);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn invalid_json_is_serialization_error() {
        let err = ServerConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, InkwireError::Serialization(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"host":"cups.example","port":8631,"username":"ops","ipp_version":{{"major":1,"minor":1}}}}"#
        )
        .unwrap();

        let config = ServerConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.host, "cups.example");
        assert_eq!(config.port, 8631);
        assert_eq!(config.username.as_deref(), Some("ops"));
        assert_eq!(config.ipp_version, IppVersion::V1_1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, InkwireError::Io(_)));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("CUPS_SERVER_IP", "192.168.1.20"),
            ("CUPS_SERVER_PORT", "8000"),
            ("CUPS_SERVER_SECURE", "true"),
            ("CUPS_SERVER_USERNAME", "admin"),
            ("CUPS_SERVER_PASSWORD", ""),
        ]))
        .unwrap();

        assert_eq!(config.host, "192.168.1.20");
        assert_eq!(config.port, 8000);
        assert!(config.secure);
        assert_eq!(config.username.as_deref(), Some("admin"));
        assert_eq!(config.password, None);
    }

    #[test]
    fn lookup_rejects_bad_port() {
        let err = ServerConfig::from_lookup(lookup_from(&[("CUPS_SERVER_PORT", "http")])).unwrap_err();
        assert!(matches!(err, InkwireError::Config(_)));
    }

    #[test]
    fn empty_lookup_is_default() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServerConfig::default());
    }
}
