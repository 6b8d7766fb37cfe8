use crate::models::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".spdx-convert.toml";

/// Load configuration from file or use defaults
///
/// Search order:
/// 1. Custom path if provided via --config
/// 2. .spdx-convert.toml in current directory
/// 3. ~/.spdx-convert.toml in home directory
/// 4. Built-in defaults
pub fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let current_config = PathBuf::from(CONFIG_FILE_NAME);
    if current_config.exists() {
        match load_config_from_file(&current_config) {
            Ok(config) => return Ok(config),
            Err(e) => log::warn!("Ignoring {}: {:#}", current_config.display(), e),
        }
    }

    if let Some(home_config) = get_home_config_path() {
        if home_config.exists() {
            match load_config_from_file(&home_config) {
                Ok(config) => return Ok(config),
                Err(e) => log::warn!("Ignoring {}: {:#}", home_config.display(), e),
            }
        }
    }

    Ok(Config::default())
}

fn load_config_from_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

fn get_home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_custom_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
ignored_dirs = ["3rdparty", "build"]
preserve_spdx = ["Old Company"]
ignorable_suffixes = [".md", ".txt"]
authors_file = "CONTRIBUTORS.md"
"#;
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let config = load_config_from_file(temp_file.path()).unwrap();
        assert_eq!(config.ignored_dirs, vec!["3rdparty", "build"]);
        assert_eq!(config.preserve_spdx, vec!["Old Company"]);
        assert_eq!(config.ignorable_suffixes, vec![".md", ".txt"]);
        assert_eq!(config.authors_file, "CONTRIBUTORS.md");
        // Unset fields keep their defaults
        assert!(config.vendor_segments.contains(&"/tests/stubs/".to_string()));
    }

    #[test]
    fn test_explicit_config_errors_are_fatal() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"ignored_dirs = 42").unwrap();

        assert!(load_config(Some(temp_file.path())).is_err());
        assert!(load_config(Some(Path::new("/nonexistent/spdx.toml"))).is_err());
    }
}
