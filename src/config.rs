use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

/// prefix for environment overrides, e.g. `GITZ_PROTECTED_BRANCHES`
pub const ENV_PREFIX: &str = "GITZ_";

/// JSON config file looked up at the repository root
pub const CONFIG_FILE: &str = ".gitz.json";

const DEFAULT_PROTECTED_BRANCHES: &str = "master:develop";
const DEFAULT_PROTECTED_REMOTES: &str = "upstream";

/// keys may be spelled upper- or lowercase in the file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    #[serde(rename = "PROTECTED_BRANCHES", alias = "protected_branches")]
    protected_branches: Option<String>,
    #[serde(rename = "PROTECTED_REMOTES", alias = "protected_remotes")]
    protected_remotes: Option<String>,
}

/// colon-separated list settings resolved environment, then file, then
/// built-in default
pub struct Config {
    file: ConfigFile,
}

impl Config {
    /// read the config file from the repository root, if present; an
    /// unreadable or unparsable file falls back to the defaults
    pub fn load(root: Option<&Path>) -> Self {
        let file = root
            .map(|root| root.join(CONFIG_FILE))
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self { file }
    }

    pub fn protected_branches(&self) -> Vec<String> {
        self.resolve(
            "PROTECTED_BRANCHES",
            self.file.protected_branches.as_deref(),
            DEFAULT_PROTECTED_BRANCHES,
        )
    }

    pub fn protected_remotes(&self) -> Vec<String> {
        self.resolve(
            "PROTECTED_REMOTES",
            self.file.protected_remotes.as_deref(),
            DEFAULT_PROTECTED_REMOTES,
        )
    }

    fn resolve(&self, key: &str, file_value: Option<&str>, default: &str) -> Vec<String> {
        let env_value = env::var(format!("{ENV_PREFIX}{key}")).ok();
        split_list(&pick(env_value.as_deref(), file_value, default))
    }
}

/// environment beats file beats default
fn pick(env_value: Option<&str>, file_value: Option<&str>, default: &str) -> String {
    env_value.or(file_value).unwrap_or(default).to_string()
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(':')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
