use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;
use web_probe::WebProbeOptions;

const DEFAULT_CONFIG_FILE: &str = "liveprobe.yaml";

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub ports: Option<Vec<u16>>,
    pub concurrency: Option<usize>,
    pub timeout_ms: Option<u64>,
    pub redirects: Option<usize>,
    pub user_agent: Option<String>,
    pub max_pending_tasks: Option<usize>,
}

/// Load the YAML config named on the command line, or `./liveprobe.yaml` if present.
/// A named file that cannot be read or parsed is fatal; the implicit one is best-effort.
pub fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    match path {
        Some(p) => read_config(p).map(Some),
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if p.exists() { Ok(load_implicit(p)) } else { Ok(None) }
        }
    }
}

fn load_implicit(path: &Path) -> Option<Config> {
    match read_config(path) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(path = %path.display(), error = %format!("{e:#}"), "ignoring config");
            None
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    serde_yaml::from_str(&s).with_context(|| format!("malformed config {}", path.display()))
}

/// Values given on the command line; `None` means "not supplied".
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub ports: Option<Vec<u16>>,
    pub concurrency: Option<usize>,
    pub timeout_ms: Option<u64>,
}

/// Effective run settings after applying CLI > config file > defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub ports: Vec<u16>,
    pub probe: WebProbeOptions,
}

impl Settings {
    pub fn resolve(cli: Overrides, cfg: Option<Config>) -> Settings {
        let cfg = cfg.unwrap_or_default();
        let defaults = WebProbeOptions::default();
        // An explicit `-p` with no values still wins: it means "no ports".
        let ports = cli
            .ports
            .or(cfg.ports)
            .unwrap_or_else(|| liveprobe_core::DEFAULT_PORTS.to_vec());
        let probe = WebProbeOptions {
            timeout_ms: cli.timeout_ms.or(cfg.timeout_ms).unwrap_or(defaults.timeout_ms),
            redirects: cfg.redirects.unwrap_or(defaults.redirects),
            user_agent: cfg.user_agent.unwrap_or(defaults.user_agent),
            concurrency: cli.concurrency.or(cfg.concurrency).unwrap_or(defaults.concurrency).max(1),
            max_pending_tasks: cfg.max_pending_tasks.unwrap_or(defaults.max_pending_tasks).max(1),
        };
        Settings { ports, probe }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_config_or_flags() {
        let s = Settings::resolve(Overrides::default(), None);
        assert_eq!(s.ports, vec![80, 443, 8000, 8080, 8081, 8443, 8843, 9443]);
        assert_eq!(s.probe.concurrency, 100);
        assert_eq!(s.probe.timeout_ms, 5_000);
    }

    #[test]
    fn cli_beats_config() {
        let cfg = Config {
            ports: Some(vec![8080]),
            concurrency: Some(10),
            timeout_ms: Some(900),
            ..Default::default()
        };
        let cli = Overrides { ports: Some(vec![81]), concurrency: Some(3), timeout_ms: None };
        let s = Settings::resolve(cli, Some(cfg));
        assert_eq!(s.ports, vec![81]);
        assert_eq!(s.probe.concurrency, 3);
        assert_eq!(s.probe.timeout_ms, 900);
    }

    #[test]
    fn explicit_empty_ports_do_not_fall_back() {
        let cfg = Config { ports: Some(vec![8080]), ..Default::default() };
        let cli = Overrides { ports: Some(vec![]), ..Default::default() };
        assert!(Settings::resolve(cli.clone(), Some(cfg)).ports.is_empty());
        assert!(Settings::resolve(cli, None).ports.is_empty());
    }

    #[test]
    fn loads_yaml_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "ports: [80, 8080]\nconcurrency: 20\nuser_agent: probe-test").unwrap();
        let cfg = load_config(Some(f.path())).unwrap().unwrap();
        assert_eq!(cfg.ports, Some(vec![80, 8080]));
        assert_eq!(cfg.concurrency, Some(20));
        assert_eq!(cfg.user_agent.as_deref(), Some("probe-test"));
        assert_eq!(cfg.timeout_ms, None);
    }

    #[test]
    fn named_config_that_is_missing_or_malformed_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(err.to_string().contains("cannot read config"));

        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "ports: [not, a, port]").unwrap();
        let err = load_config(Some(f.path())).unwrap_err();
        assert!(err.to_string().contains("malformed config"));
    }

    #[test]
    fn malformed_implicit_config_is_ignored() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "concurrency: many").unwrap();
        assert!(load_implicit(f.path()).is_none());

        let mut ok = tempfile::NamedTempFile::new().unwrap();
        writeln!(ok, "timeout_ms: 750").unwrap();
        assert_eq!(load_implicit(ok.path()).unwrap().timeout_ms, Some(750));
    }
}
