//! HTTP server binding configuration.

use std::{env, path::Path};

const LOCAL_BIND_ADDRESS: &str = "127.0.0.1:8080";
const CONTAINER_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Where the HTTP server listens
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: LOCAL_BIND_ADDRESS.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// `BIND_ADDRESS` wins when set. Otherwise the server binds to all
    /// interfaces inside Kubernetes or Docker, and to localhost elsewhere.
    pub fn from_env() -> Self {
        let bind_override = env::var("BIND_ADDRESS").ok();
        let k8s_service_host = env::var("KUBERNETES_SERVICE_HOST").ok();
        let docker_container = env::var("DOCKER_CONTAINER").ok();
        let dockerenv_exists = Path::new("/.dockerenv").exists();

        let in_container = is_container_environment(
            k8s_service_host.as_deref(),
            docker_container.as_deref(),
            dockerenv_exists,
        );

        Self {
            bind_address: detect_bind_address(in_container, bind_override.as_deref()),
        }
    }
}

/// Whether the process appears to run inside a container
pub fn is_container_environment(
    k8s_service_host: Option<&str>,
    docker_container: Option<&str>,
    dockerenv_exists: bool,
) -> bool {
    k8s_service_host.is_some() || docker_container.is_some() || dockerenv_exists
}

/// Pick the bind address, honouring an explicit override
pub fn detect_bind_address(in_container: bool, bind_override: Option<&str>) -> String {
    if let Some(bind) = bind_override.filter(|b| !b.trim().is_empty()) {
        return bind.trim().to_string();
    }

    if in_container {
        CONTAINER_BIND_ADDRESS.to_string()
    } else {
        LOCAL_BIND_ADDRESS.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address_detection() {
        assert_eq!(
            detect_bind_address(false, None),
            "127.0.0.1:8080",
            "Should bind to localhost for local development"
        );
        assert_eq!(
            detect_bind_address(true, None),
            "0.0.0.0:8080",
            "Should bind to all interfaces in a container"
        );
        assert_eq!(
            detect_bind_address(true, Some("192.168.1.10:9090")),
            "192.168.1.10:9090",
            "Should use explicit override regardless of environment"
        );
        assert_eq!(detect_bind_address(false, Some("  ")), "127.0.0.1:8080");
    }

    #[test]
    fn test_container_environment_detection() {
        assert!(!is_container_environment(None, None, false));
        assert!(is_container_environment(Some("kubernetes.default.svc"), None, false));
        assert!(is_container_environment(None, Some("true"), false));
        assert!(is_container_environment(None, None, true));
    }
}
