use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the paths to avoid repeated environment lookups
static MIRUS_HOME: OnceLock<PathBuf> = OnceLock::new();
static MIRUS_RELEASES_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the mirus home directory
/// Checks MIRUS_HOME environment variable, falls back to ${HOME}/.mirus
pub fn mirus_home() -> PathBuf {
    MIRUS_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("MIRUS_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME")
                    .unwrap_or_else(|_| std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string()));
                PathBuf::from(home).join(".mirus")
            }
        })
        .clone()
}

/// Get the release storage directory
/// Checks MIRUS_RELEASES_DIR environment variable, falls back to MIRUS_HOME/releases
pub fn mirus_releases_dir() -> PathBuf {
    MIRUS_RELEASES_DIR
        .get_or_init(|| {
            if let Ok(path) = std::env::var("MIRUS_RELEASES_DIR") {
                PathBuf::from(path)
            } else {
                mirus_home().join("releases")
            }
        })
        .clone()
}

/// Default config file location
pub fn config_file() -> PathBuf {
    mirus_home().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_dir_under_home() {
        let releases = mirus_releases_dir();
        if std::env::var("MIRUS_RELEASES_DIR").is_err() {
            assert!(releases.starts_with(mirus_home()));
        }
        assert!(config_file().ends_with("config.toml"));
    }
}
