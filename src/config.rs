//! Configuration constants and profile loading for xtrplay
//!
//! Settings live in an INI profile file; each section is a named profile.
//!
//! ```ini
//! [default]
//! endpoint = https://transform.example.com/
//! debounce_ms = 1000
//! discard_stale = false
//! ```

use crate::playground::debouncer::DEFAULT_DEBOUNCE_WINDOW;
use crate::playground::services::DEFAULT_TRANSFORM_ENDPOINT;
use crate::playground::PlaygroundSettings;
use anyhow::{anyhow, Context, Result};
use ini::Ini;
use std::path::Path;
use std::time::Duration;

/// Default profile file path for xtrplay
pub const DEFAULT_PROFILE_PATH: &str = "~/.xtrplay/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "XTRPLAY_PROFILE_PATH";

/// Environment variable holding the log filter
pub const LOG_LEVEL_ENV_VAR: &str = "XTRPLAY_LOG_LEVEL";

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Settings of one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub endpoint: String,
    pub debounce_window: Duration,
    pub discard_stale: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSFORM_ENDPOINT.to_string(),
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            discard_stale: false,
        }
    }
}

impl Profile {
    /// Load `name` from the profile file at `path`
    ///
    /// A missing file or section yields the defaults.
    pub fn load(path: &str, name: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let file = Path::new(expanded.as_ref());
        if !file.exists() {
            tracing::debug!("Profile file '{}' not found, using defaults", file.display());
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(file)
            .with_context(|| format!("Failed to read profile file '{}'", file.display()))?;

        let Some(section) = ini.section(Some(name)) else {
            tracing::debug!("Profile '{}' not found, using defaults", name);
            return Ok(Self::default());
        };

        let mut profile = Self::default();
        if let Some(endpoint) = section.get("endpoint") {
            profile.endpoint = endpoint.trim().to_string();
        }
        if let Some(debounce) = section.get("debounce_ms") {
            let millis: u64 = debounce
                .trim()
                .parse()
                .with_context(|| format!("Invalid debounce_ms '{debounce}' in profile '{name}'"))?;
            profile.debounce_window = Duration::from_millis(millis);
        }
        if let Some(discard) = section.get("discard_stale") {
            profile.discard_stale = parse_bool(discard)
                .ok_or_else(|| anyhow!("Invalid discard_stale '{discard}' in profile '{name}'"))?;
        }

        tracing::debug!("Profile '{}' loaded: {:?}", name, profile);
        Ok(profile)
    }

    pub fn settings(&self) -> PlaygroundSettings {
        PlaygroundSettings {
            debounce_window: self.debounce_window,
            discard_stale: self.discard_stale,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn profile_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.xtrplay/profile");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(PROFILE_PATH_ENV_VAR, "XTRPLAY_PROFILE_PATH");
    }

    #[test]
    fn test_get_profile_path_default_and_override() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        // Restore original state
        match original {
            Some(val) => std::env::set_var(PROFILE_PATH_ENV_VAR, val),
            None => std::env::remove_var(PROFILE_PATH_ENV_VAR),
        }
    }

    #[test]
    fn missing_file_should_yield_defaults() {
        let profile = Profile::load("/no/such/dir/profile", "default").unwrap();

        assert_eq!(profile, Profile::default());
        assert_eq!(profile.endpoint, DEFAULT_TRANSFORM_ENDPOINT);
        assert_eq!(profile.debounce_window, Duration::from_millis(1000));
    }

    #[test]
    fn profile_should_read_named_section() {
        let file = profile_file(
            "[default]\nendpoint = http://localhost:8080/\n\n[fast]\nendpoint = http://fast.local/\ndebounce_ms = 250\ndiscard_stale = yes\n",
        );
        let path = file.path().to_str().unwrap();

        let fast = Profile::load(path, "fast").unwrap();
        assert_eq!(fast.endpoint, "http://fast.local/");
        assert_eq!(fast.debounce_window, Duration::from_millis(250));
        assert!(fast.discard_stale);

        let default = Profile::load(path, "default").unwrap();
        assert_eq!(default.endpoint, "http://localhost:8080/");
        assert_eq!(default.debounce_window, DEFAULT_DEBOUNCE_WINDOW);
        assert!(!default.discard_stale);
    }

    #[test]
    fn unknown_section_should_yield_defaults() {
        let file = profile_file("[default]\ndebounce_ms = 10\n");

        let profile = Profile::load(file.path().to_str().unwrap(), "staging").unwrap();

        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn invalid_values_should_be_rejected() {
        let file = profile_file("[default]\ndebounce_ms = soon\n");
        let err = Profile::load(file.path().to_str().unwrap(), "default").unwrap_err();
        assert!(err.to_string().contains("Invalid debounce_ms"));

        let file = profile_file("[default]\ndiscard_stale = maybe\n");
        let err = Profile::load(file.path().to_str().unwrap(), "default").unwrap_err();
        assert!(err.to_string().contains("Invalid discard_stale"));
    }

    #[test]
    fn settings_should_mirror_profile() {
        let profile = Profile {
            discard_stale: true,
            ..Profile::default()
        };

        let settings = profile.settings();
        assert_eq!(settings.debounce_window, DEFAULT_DEBOUNCE_WINDOW);
        assert!(settings.discard_stale);
    }
}
