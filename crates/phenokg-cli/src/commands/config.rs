//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::{Path, PathBuf};

/// Execute the config command.
///
/// `explicit` is the `--config` path, if one was given.
pub async fn execute_config(
    args: ConfigArgs,
    config: &Config,
    explicit: Option<&Path>,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", config_path(explicit)?.display());
            Ok(())
        }
        ConfigAction::Init { force } => {
            let path = config_path(explicit)?;
            init_config(&path, force)?;
            println!("{}", formatter.success(&format!("Configuration written to {}", path.display())));
            Ok(())
        }
    }
}

/// Write the default configuration to `path`
///
/// An existing file is kept unless `force` is set.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save(path)
}

fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_config(&path, false).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.settings.log_level, "info");
        assert_eq!(loaded.extractor.base_namespace, Config::default().extractor.base_namespace);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\ncolor = false\n").unwrap();

        assert!(init_config(&path, false).is_err());
        init_config(&path, true).unwrap();
        assert!(Config::load(Some(&path)).unwrap().settings.color);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = PathBuf::from("/tmp/phenokg.toml");
        assert_eq!(config_path(Some(&path)).unwrap(), path);
    }
}
