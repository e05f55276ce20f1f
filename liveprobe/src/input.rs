use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read one hostname per line, trimmed; blank lines are skipped.
pub fn read_hosts(path: &Path) -> Result<Vec<String>> {
    let fh = File::open(path).with_context(|| format!("cannot open input {}", path.display()))?;
    let mut hosts = Vec::new();
    for line in BufReader::new(fh).lines() {
        let line = line.with_context(|| format!("cannot read input {}", path.display()))?;
        let host = line.trim();
        if !host.is_empty() {
            hosts.push(host.to_string());
        }
    }
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn skips_blank_lines_and_trims() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "a.test\n\n   \n  b.test  \r\n\tc.test\na.test").unwrap();
        let hosts = read_hosts(f.path()).unwrap();
        assert_eq!(hosts, vec!["a.test", "b.test", "c.test", "a.test"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_hosts(&dir.path().join("nope.txt")).unwrap_err();
        assert!(err.to_string().contains("cannot open input"));
    }
}
