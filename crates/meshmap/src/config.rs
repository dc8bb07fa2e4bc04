//! Profile resolution: config file + global flags into a `ServiceConfig`.
//!
//! Precedence is flag > env var > profile > defaults.

use std::time::Duration;

use meshmap_config::{Config, Profile};
use meshmap_core::{ServiceConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ServiceConfig` from the config file, profile, and CLI overrides.
pub fn build_service_config(global: &GlobalOpts) -> Result<ServiceConfig, CliError> {
    let cfg = meshmap_config::load_config_or_default();
    resolve(global, &cfg)
}

fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<ServiceConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let profile = match (cfg.profiles.get(&profile_name), global.base_url.as_deref()) {
        (Some(profile), _) => profile.clone(),
        // No profile, but enough on the command line to go on
        (None, Some(base_url)) => Profile::new(base_url),
        // An explicitly requested profile that does not exist
        (None, None) if global.profile.is_some() => {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: meshmap_config::config_path().display().to_string(),
            });
        }
    };

    let profile = Profile {
        base_url: global.base_url.clone().unwrap_or(profile.base_url),
        main_url: global.main_url.clone().or(profile.main_url),
        ..profile
    };

    let mut service = meshmap_config::profile_to_service_config(&profile, &cfg.defaults)?;
    if global.insecure {
        service.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        service.timeout = Duration::from_secs(secs);
    }

    tracing::debug!(
        profile = %profile_name,
        devices = %service.endpoints.devices_url(),
        "resolved backend"
    );
    Ok(service)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["meshmap"];
        argv.extend_from_slice(args);
        argv.push("devices");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(name.into(), profile);
        cfg
    }

    #[test]
    fn flags_alone_are_enough() {
        let service = resolve(
            &global(&["--base-url", "https://map.example.org/api"]),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(service.endpoints.gps, "https://map.example.org/api/gps");
        assert_eq!(service.timeout, Duration::from_secs(30));
    }

    #[test]
    fn nothing_configured() {
        let err = resolve(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn unknown_profile() {
        let cfg = config_with("home", Profile::new("https://map.example.org/api"));
        let err = resolve(&global(&["--profile", "work"]), &cfg).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "home"));
    }

    #[test]
    fn flags_override_profile() {
        let mut profile = Profile::new("https://map.example.org/api");
        profile.timeout = Some(10);
        let cfg = config_with("default", profile);

        let service = resolve(
            &global(&[
                "--main-url",
                "https://main.example.org",
                "--timeout",
                "3",
                "--insecure",
            ]),
            &cfg,
        )
        .unwrap();
        assert_eq!(service.endpoints.devices_url(), "https://main.example.org/devices");
        assert_eq!(service.endpoints.gps, "https://map.example.org/api/gps");
        assert_eq!(service.timeout, Duration::from_secs(3));
        assert_eq!(service.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn profile_timeout_applies_without_flag() {
        let mut profile = Profile::new("https://map.example.org/api");
        profile.timeout = Some(10);
        let service = resolve(&global(&[]), &config_with("default", profile)).unwrap();
        assert_eq!(service.timeout, Duration::from_secs(10));
    }
}
