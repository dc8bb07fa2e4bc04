// ── Runtime service configuration ──
//
// Describes *where* the backend lives and how to judge liveness. Core never
// reads config files; the CLI builds a `ServiceConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use meshmap_api::{Endpoints, TlsMode, TransportConfig};

use crate::liveness::LivenessThresholds;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-hosted backends with self-signed certs).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single map backend.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub endpoints: Endpoints,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    pub thresholds: LivenessThresholds,
}

impl ServiceConfig {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            thresholds: LivenessThresholds::default(),
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
