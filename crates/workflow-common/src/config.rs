use std::env;
use std::path::PathBuf;

pub const DEFAULT_MARKER_FILE: &str = "info.plist";

const HOME_ENV: &str = "HOME";
const MARKER_FILE_ENV: &str = "WORKFLOW_MARKER_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub home: Option<PathBuf>,
    pub marker_file: String,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        let home = env::var(HOME_ENV).unwrap_or_default();
        let marker_file = env::var(MARKER_FILE_ENV).unwrap_or_default();

        Self::from_values(&home, &marker_file)
    }

    pub fn from_values(home: &str, marker_file: &str) -> Self {
        let home = home.trim();
        let marker_file = marker_file.trim();

        Self {
            home: (!home.is_empty()).then(|| PathBuf::from(home)),
            marker_file: if marker_file.is_empty() {
                DEFAULT_MARKER_FILE.to_string()
            } else {
                marker_file.to_string()
            },
        }
    }

    /// Expands `~` and `$HOME` in a user-supplied path argument.
    pub fn expand_path(&self, raw: &str) -> PathBuf {
        let home = self
            .home
            .as_ref()
            .map(|home| home.to_string_lossy().into_owned())
            .unwrap_or_default();
        PathBuf::from(expand_home_tokens(raw, &home))
    }
}

pub fn expand_home_tokens(raw: &str, home: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || home.is_empty() {
        return trimmed.to_string();
    }

    let mut expanded = trimmed.replace("$HOME", home);

    if expanded == "~" {
        expanded = home.to_string();
    } else if let Some(rest) = expanded.strip_prefix("~/") {
        expanded = format!("{home}/{rest}");
    }

    expanded
}
