//! Runtime settings.

use std::env;

use crate::api::API_BASE;

pub const DEFAULT_PAGE_SIZE: u32 = 150;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub page_size: u32,
    /// Detail fetches in flight while hydrating; 1 keeps them sequential.
    pub hydrate_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            hydrate_concurrency: 1,
        }
    }
}

impl Config {
    /// Defaults overridden by `POKEGRID_*` variables that are set and parse.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(base) = lookup("POKEGRID_API_BASE").filter(|base| !base.trim().is_empty()) {
            config.api_base = base;
        }
        if let Some(size) = read::<u32>(&lookup, "POKEGRID_PAGE_SIZE") {
            config.page_size = size.max(1);
        }
        if let Some(concurrency) = read::<usize>(&lookup, "POKEGRID_HYDRATE_CONCURRENCY") {
            config.hydrate_concurrency = concurrency.max(1);
        }

        config
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(config_with(&[]), Config::default());
    }

    #[test]
    fn environment_overrides() {
        let config = config_with(&[
            ("POKEGRID_API_BASE", "http://localhost:8080"),
            ("POKEGRID_PAGE_SIZE", "24"),
            ("POKEGRID_HYDRATE_CONCURRENCY", "8"),
        ]);
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.page_size, 24);
        assert_eq!(config.hydrate_concurrency, 8);
    }

    #[test]
    fn unparseable_values_are_ignored() {
        let config = config_with(&[
            ("POKEGRID_PAGE_SIZE", "lots"),
            ("POKEGRID_HYDRATE_CONCURRENCY", "0"),
        ]);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.hydrate_concurrency, 1);
    }
}
