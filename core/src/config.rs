use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://app-py-to-dolist.onrender.com";

const DATA_DIR_NAME: &str = ".todolist";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_API_URL: &str = "TODOLIST_API_URL";
pub const ENV_MUTATION_POLICY: &str = "TODOLIST_MUTATION_POLICY";
pub const ENV_TIMEOUT_SECS: &str = "TODOLIST_TIMEOUT_SECS";

/// What the controller does when a create/complete/delete request fails.
/// The refresh runs either way.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MutationPolicy {
    /// Log and carry on.
    #[default]
    BestEffort,
    /// Log and show a status notice on the surface.
    Report,
}

impl FromStr for MutationPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "best_effort" => Ok(MutationPolicy::BestEffort),
            "report" => Ok(MutationPolicy::Report),
            other => Err(anyhow!("Unknown mutation policy: '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub mutation_policy: MutationPolicy,
    /// `None` leaves requests untimed.
    pub request_timeout: Option<Duration>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_base_url: Option<String>,
    mutation_policy: Option<MutationPolicy>,
    request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Built-in defaults.
    pub fn new() -> Result<Self> {
        Ok(Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)?,
            mutation_policy: MutationPolicy::default(),
            request_timeout: None,
        })
    }

    /// Defaults, then the TOML file, then the environment.
    ///
    /// With `path = None` the file is looked up in `~/.todolist/config.toml`
    /// and may be absent. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, dirs::home_dir(), |key| std::env::var(key).ok())
    }

    fn load_with<F>(path: Option<&Path>, home_dir: Option<PathBuf>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::new()?;

        match path {
            Some(p) => config.apply_file(p)?,
            None => {
                // Only look; the data dir is created by whoever writes to it.
                if let Some(home) = home_dir {
                    let default_path = home.join(DATA_DIR_NAME).join(CONFIG_FILE_NAME);
                    if default_path.exists() {
                        config.apply_file(&default_path)?;
                    }
                }
            }
        }

        config.apply_env(env)?;
        Ok(config)
    }

    pub fn apply_file(&mut self, path: &Path) -> Result<()> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        self.apply_toml(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn apply_toml(&mut self, raw: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(raw)?;

        if let Some(url) = file.api_base_url {
            self.set_api_base_url(&url)?;
        }
        if let Some(policy) = file.mutation_policy {
            self.mutation_policy = policy;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = timeout_from_secs(secs);
        }
        Ok(())
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.set_api_base_url(&url)
                .with_context(|| format!("Invalid {}", ENV_API_URL))?;
        }
        if let Some(policy) = lookup(ENV_MUTATION_POLICY) {
            self.mutation_policy = policy
                .parse()
                .with_context(|| format!("Invalid {}", ENV_MUTATION_POLICY))?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}", ENV_TIMEOUT_SECS))?;
            self.request_timeout = timeout_from_secs(secs);
        }
        Ok(())
    }

    pub fn set_api_base_url(&mut self, raw: &str) -> Result<()> {
        let url = Url::parse(raw.trim())?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("API url must be http or https, got '{}'", url.scheme());
        }
        if url.cannot_be_a_base() {
            bail!("API url '{}' cannot be used as a base", url);
        }
        self.api_base_url = url;
        Ok(())
    }
}

// 0 means "no timeout" in the file and the environment.
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// `~/.todolist`, created on demand.
pub fn data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    let path = home_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new().unwrap();
        assert_eq!(config.api_base_url.as_str(), "https://app-py-to-dolist.onrender.com/");
        assert_eq!(config.mutation_policy, MutationPolicy::BestEffort);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let mut config = ClientConfig::new().unwrap();
        config
            .apply_toml(
                r#"
                api_base_url = "http://localhost:10000"
                mutation_policy = "report"
                request_timeout_secs = 5
                "#,
            )
            .unwrap();

        assert_eq!(config.api_base_url.as_str(), "http://localhost:10000/");
        assert_eq!(config.mutation_policy, MutationPolicy::Report);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let mut config = ClientConfig::new().unwrap();
        assert!(config.apply_toml("api_url = \"http://x\"").is_err());
    }

    #[test]
    fn test_env_wins_over_file() {
        let mut config = ClientConfig::new().unwrap();
        config
            .apply_toml("api_base_url = \"http://file.example\"\nrequest_timeout_secs = 5")
            .unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "https://env.example/api/"),
            (ENV_MUTATION_POLICY, "best-effort"),
            (ENV_TIMEOUT_SECS, "0"),
        ]);
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_base_url.as_str(), "https://env.example/api/");
        assert_eq!(config.mutation_policy, MutationPolicy::BestEffort);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_rejects_non_http_urls() {
        let mut config = ClientConfig::new().unwrap();
        assert!(config.set_api_base_url("ftp://example.com").is_err());
        assert!(config.set_api_base_url("not a url").is_err());
        assert!(config.set_api_base_url("mailto:someone@example.com").is_err());
    }

    fn scratch_home(name: &str) -> PathBuf {
        let suffix = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("todolist_{name}_{suffix}"))
    }

    #[test]
    fn test_load_without_file_leaves_home_untouched() {
        let home = scratch_home("empty_home");
        fs::create_dir_all(&home).unwrap();

        let config = ClientConfig::load_with(None, Some(home.clone()), |_| None).unwrap();

        assert_eq!(config, ClientConfig::new().unwrap());
        assert!(!home.join(DATA_DIR_NAME).exists());
        fs::remove_dir_all(home).unwrap();
    }

    #[test]
    fn test_load_reads_file_under_home() {
        let home = scratch_home("home_with_config");
        fs::create_dir_all(home.join(DATA_DIR_NAME)).unwrap();
        fs::write(
            home.join(DATA_DIR_NAME).join(CONFIG_FILE_NAME),
            "mutation_policy = \"report\"",
        )
        .unwrap();

        let config = ClientConfig::load_with(None, Some(home.clone()), |_| None).unwrap();

        assert_eq!(config.mutation_policy, MutationPolicy::Report);
        fs::remove_dir_all(home).unwrap();
    }

    #[test]
    fn test_load_explicit_missing_file_is_an_error() {
        let missing = scratch_home("missing").join(CONFIG_FILE_NAME);
        assert!(ClientConfig::load_with(Some(&missing), None, |_| None).is_err());
    }

    #[test]
    fn test_invalid_env_policy_is_an_error() {
        let mut config = ClientConfig::new().unwrap();
        let result = config.apply_env(|key| {
            (key == ENV_MUTATION_POLICY).then(|| "sometimes".to_string())
        });
        assert!(result.is_err());
    }
}
