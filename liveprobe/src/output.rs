use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One URL per line, newline-terminated.
pub fn write_urls<W: Write>(mut w: W, urls: &[String]) -> io::Result<()> {
    for url in urls {
        writeln!(w, "{}", url)?;
    }
    w.flush()
}

/// Write to `out` (overwriting) or to stdout when no path is given.
pub fn emit(urls: &[String], out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let fh = File::create(path)
                .with_context(|| format!("cannot create output {}", path.display()))?;
            write_urls(BufWriter::new(fh), urls)
                .with_context(|| format!("cannot write output {}", path.display()))
        }
        None => {
            let stdout = io::stdout();
            write_urls(stdout.lock(), urls).context("cannot write to stdout")
        }
    }
}
