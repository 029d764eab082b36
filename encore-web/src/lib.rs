use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const INDEX: &str = "index.html";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

impl Config {
    /// Reads `ENCORE_ADDR` and `ENCORE_STATIC_DIR`.
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_vars(
            std::env::var("ENCORE_ADDR").ok(),
            std::env::var("ENCORE_STATIC_DIR").ok(),
        )
    }

    pub fn from_vars(
        addr: Option<String>,
        static_dir: Option<String>,
    ) -> Result<Config, ConfigError> {
        let addr = addr.unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = addr.parse().map_err(|_| ConfigError {
            var: "ENCORE_ADDR",
            value: addr.clone(),
        })?;
        let static_dir = static_dir.unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned());
        if static_dir.is_empty() {
            return Err(ConfigError {
                var: "ENCORE_STATIC_DIR",
                value: static_dir,
            });
        }
        Ok(Config {
            addr,
            static_dir: PathBuf::from(static_dir),
        })
    }
}

/// Maps a request path onto a file below the static directory. `None` for
/// anything trying to climb out of it.
pub fn resolve(path: &str) -> Option<PathBuf> {
    let mut resolved = PathBuf::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains('\\') || s.contains(':') => return None,
            s => resolved.push(s),
        }
    }
    if resolved.as_os_str().is_empty() {
        resolved.push(INDEX);
    }
    Some(resolved)
}

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_index() {
        assert_eq!(resolve("/"), Some(PathBuf::from("index.html")));
        assert_eq!(resolve(""), Some(PathBuf::from("index.html")));
    }

    #[test]
    fn nested_paths_resolve() {
        assert_eq!(
            resolve("/pkg/encore_wasm_bg.wasm"),
            Some(PathBuf::from("pkg").join("encore_wasm_bg.wasm"))
        );
        assert_eq!(resolve("//./style.css"), Some(PathBuf::from("style.css")));
    }

    #[test]
    fn traversal_is_rejected() {
        assert_eq!(resolve("/../secret"), None);
        assert_eq!(resolve("/pkg/../../etc/passwd"), None);
        assert_eq!(resolve("/..\\windows"), None);
        assert_eq!(resolve("/C:/windows"), None);
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("pkg/app_bg.wasm")), "application/wasm");
        assert_eq!(content_type(Path::new("pkg/app.js")), "text/javascript; charset=utf-8");
        assert_eq!(content_type(Path::new("LICENSE")), "application/octet-stream");
    }

    #[test]
    fn config_defaults() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn config_rejects_bad_values() {
        let err = Config::from_vars(Some("localhost".to_owned()), None).unwrap_err();
        assert_eq!(err.var, "ENCORE_ADDR");
        assert_eq!(err.to_string(), r#"invalid value for ENCORE_ADDR: "localhost""#);
        let err = Config::from_vars(None, Some(String::new())).unwrap_err();
        assert_eq!(err.var, "ENCORE_STATIC_DIR");
    }
}
