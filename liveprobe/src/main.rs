use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod input;
mod output;

use config::{Overrides, Settings};

#[derive(Debug, Parser)]
#[command(
    name = "liveprobe",
    version,
    about = "Probe hosts for live HTTP/HTTPS services on common ports"
)]
struct Cli {
    /// Input file with hostnames (one per line, blanks ignored)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
    /// Ports to probe; replaces the default list. Given with no values, nothing is probed.
    #[arg(short, long, num_args = 0.., value_parser = clap::value_parser!(u16).range(1..))]
    ports: Option<Vec<u16>>,
    /// Write live URLs to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Max attempts in flight at once (default 100)
    #[arg(short, long)]
    concurrency: Option<usize>,
    /// Per-attempt timeout in milliseconds, redirects included (default 5000)
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Optional config file (YAML). If omitted, loads ./liveprobe.yaml if present.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            ports: self.ports.clone(),
            concurrency: self.concurrency,
            timeout_ms: self.timeout_ms,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let loaded_cfg = config::load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.overrides(), loaded_cfg);

    let hosts = input::read_hosts(&cli.input)?;
    tracing::debug!(
        hosts = hosts.len(),
        ports = ?settings.ports,
        concurrency = settings.probe.concurrency,
        "starting probe"
    );

    let rt = tokio::runtime::Runtime::new()?;
    let live = rt.block_on(web_probe::probe_many(&hosts, &settings.ports, &settings.probe))?;

    output::emit(&live, cli.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["liveprobe"]).is_err());
    }

    #[test]
    fn ports_absent_means_defaults() {
        let cli = Cli::try_parse_from(["liveprobe", "-i", "hosts.txt"]).unwrap();
        assert_eq!(cli.ports, None);
        assert_eq!(cli.output, None);
    }

    #[test]
    fn ports_take_multiple_values() {
        let args = ["liveprobe", "-i", "hosts.txt", "-p", "80", "8080", "-o", "live.txt"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.ports, Some(vec![80, 8080]));
        assert_eq!(cli.output, Some(PathBuf::from("live.txt")));
    }

    #[test]
    fn bare_ports_flag_is_an_empty_override() {
        let cli = Cli::try_parse_from(["liveprobe", "--input", "hosts.txt", "--ports"]).unwrap();
        assert_eq!(cli.ports, Some(vec![]));
        let settings = Settings::resolve(cli.overrides(), None);
        assert!(settings.ports.is_empty());
    }

    #[test]
    fn port_zero_is_rejected() {
        assert!(Cli::try_parse_from(["liveprobe", "-i", "h.txt", "-p", "0"]).is_err());
    }
}
