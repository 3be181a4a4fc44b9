use crate::FyyurError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
/// Browsers give up after twenty hops.
pub const DEFAULT_MAX_REDIRECTS: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub max_redirects: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, FyyurError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, FyyurError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let base_url = get("FYYUR_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let max_redirects = match get("FYYUR_MAX_REDIRECTS") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                FyyurError::Config(format!(
                    "FYYUR_MAX_REDIRECTS must be a non-negative integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_MAX_REDIRECTS,
        };
        Ok(Self {
            base_url,
            max_redirects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_defaults() {
        let cfg = Config::from_env_with(|_| None).expect("cfg");
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.base_url, "http://localhost:5000");
        assert_eq!(cfg.max_redirects, 20);
    }

    #[test]
    fn from_env_reads_values() {
        let get = |k: &str| match k {
            "FYYUR_BASE_URL" => Some("http://fyyur.test".into()),
            "FYYUR_MAX_REDIRECTS" => Some(" 3 ".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.base_url, "http://fyyur.test");
        assert_eq!(cfg.max_redirects, 3);
    }

    #[test]
    fn from_env_blank_base_url_uses_default() {
        let get = |k: &str| match k {
            "FYYUR_BASE_URL" => Some("   ".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn from_env_rejects_bad_redirect_limit() {
        let get = |k: &str| match k {
            "FYYUR_MAX_REDIRECTS" => Some("lots".into()),
            _ => None,
        };
        let res = Config::from_env_with(get);
        assert!(matches!(res, Err(FyyurError::Config(_))));
    }
}
