use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DB_PATH: &str = "data/starmap.redb";
const DEFAULT_DIST_DIR: &str = "dist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub db_path: PathBuf,
    pub dist_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables fall
    /// back to defaults; an unparsable `PORT` is logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "ignoring invalid PORT");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        Config {
            port,
            db_path: PathBuf::from(get("DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string())),
            dist_dir: PathBuf::from(
                get("DIST_DIR").unwrap_or_else(|| DEFAULT_DIST_DIR.to_string()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, PathBuf::from("data/starmap.redb"));
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DB_PATH", "/tmp/stars.redb"),
            ("DIST_DIR", "web"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, PathBuf::from("/tmp/stars.redb"));
        assert_eq!(config.dist_dir, PathBuf::from("web"));
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "eighty")]));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[("DB_PATH", "  "), ("PORT", "")]));
        assert_eq!(config.db_path, PathBuf::from("data/starmap.redb"));
        assert_eq!(config.port, 3000);
    }
}
