//! Config subcommand handlers.

use meshmap_config::Profile;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init {
            base_url,
            main_url,
            name,
            force,
        } => {
            let path = meshmap_config::config_path();
            let mut cfg = meshmap_config::load_config_or_default();

            if cfg.profiles.contains_key(&name) && !force {
                return Err(CliError::Conflict {
                    resource_type: "profile".into(),
                    identifier: name,
                });
            }

            let mut profile = Profile::new(base_url);
            profile.main_url = main_url;
            // Reject bad URLs before anything is written
            meshmap_config::profile_endpoints(&profile)?;

            cfg.profiles.insert(name.clone(), profile);
            if cfg.profiles.len() == 1 || cfg.default_profile.is_none() {
                cfg.default_profile = Some(name.clone());
            }
            meshmap_config::save_config_to(&cfg, &path)?;

            if !global.quiet {
                eprintln!("✓ Profile '{name}' written to {}", path.display());
                eprintln!("  Test it: meshmap devices --profile {name}");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = meshmap_config::load_config_or_default();
            let active = config::active_profile_name(global, &cfg);
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| format!("{c:#?}"),
                |_| active.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(
                &meshmap_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
    }
}
