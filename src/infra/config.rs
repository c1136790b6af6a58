use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Server,
    Stdio,
    Demo,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Server => "server",
            Mode::Stdio => "stdio",
            Mode::Demo => "demo",
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid MODE: {0}. Must be 'server', 'stdio' or 'demo'")]
    InvalidMode(String),
    #[error("PORT cannot be 0")]
    ZeroPort,
    #[error("cannot read config file {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("cannot parse config file {path}: {source}")]
    Parse { path: String, source: toml::de::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: String, // "server", "stdio" or "demo"
    pub port: u16,
}

/// Optional TOML overlay named by `MCP_CONFIG`.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    mode: Option<String>,
    port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self { mode: "server".into(), port: DEFAULT_PORT }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env();
        cfg
    }

    /// File values first, then environment variables on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        if let Ok(path) = std::env::var("MCP_CONFIG") {
            if !path.trim().is_empty() {
                cfg.apply_file(Path::new(&path))?;
            }
        }
        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: display.clone(), source })?;
        let file: FileConfig =
            toml::from_str(&text).map_err(|source| ConfigError::Parse { path: display, source })?;
        if let Some(mode) = file.mode {
            self.mode = mode;
        }
        if let Some(port) = file.port {
            self.port = port;
        }
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(mode) = std::env::var("MODE") {
            self.mode = mode;
        }
        // Non-numeric PORT keeps the current value.
        if let Some(port) = std::env::var("PORT").ok().and_then(|s| s.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    pub fn mode(&self) -> Result<Mode, ConfigError> {
        match self.mode.as_str() {
            "server" => Ok(Mode::Server),
            "stdio" => Ok(Mode::Stdio),
            "demo" => Ok(Mode::Demo),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }

    pub fn validate(&self) -> Result<Mode, ConfigError> {
        let mode = self.mode()?;
        if mode == Mode::Server && self.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        Ok(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    fn clear() {
        std::env::remove_var("MODE");
        std::env::remove_var("PORT");
        std::env::remove_var("MCP_CONFIG");
    }

    #[test]
    #[serial]
    fn defaults_to_server_8080() {
        clear();
        let cfg = Config::from_env();
        assert_eq!(cfg.mode, "server");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.validate().unwrap(), Mode::Server);
    }

    #[test]
    #[serial]
    fn parses_env_overrides() {
        clear();
        std::env::set_var("MODE", "stdio");
        std::env::set_var("PORT", "9090");
        let cfg = Config::from_env();
        assert_eq!(cfg.mode().unwrap(), Mode::Stdio);
        assert_eq!(cfg.port, 9090);
        clear();
    }

    #[test]
    #[serial]
    fn non_numeric_port_falls_back() {
        clear();
        std::env::set_var("PORT", "abc");
        assert_eq!(Config::from_env().port, DEFAULT_PORT);
        clear();
    }

    #[test]
    fn validate_rejects_bad_mode_and_zero_port() {
        let bad = Config { mode: "invalid".into(), port: 8080 };
        assert!(bad.validate().unwrap_err().to_string().contains("Invalid MODE"));

        let zero = Config { mode: "server".into(), port: 0 };
        assert!(matches!(zero.validate(), Err(ConfigError::ZeroPort)));

        // Port is irrelevant outside server mode.
        let stdio = Config { mode: "stdio".into(), port: 0 };
        assert_eq!(stdio.validate().unwrap(), Mode::Stdio);
    }

    #[test]
    #[serial]
    fn file_values_apply_and_env_wins() {
        clear();
        let path = std::env::temp_dir().join(format!("mcp-config-{}.toml", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "mode = \"demo\"\nport = 7070").unwrap();

        std::env::set_var("MCP_CONFIG", &path);
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.mode().unwrap(), Mode::Demo);
        assert_eq!(cfg.port, 7070);

        std::env::set_var("PORT", "6060");
        assert_eq!(Config::load().unwrap().port, 6060);

        clear();
        let _ = std::fs::remove_file(path);
    }

    #[test]
    #[serial]
    fn unreadable_file_is_an_error() {
        clear();
        std::env::set_var("MCP_CONFIG", "/definitely/not/here.toml");
        assert!(matches!(Config::load(), Err(ConfigError::Read { .. })));
        clear();
    }
}
