use anyhow::{Context, Result};
use std::{
    fmt::Debug,
    fs::OpenOptions,
    io::Write,
    path::PathBuf,
};

/// Key under which a successful send records today's date.
pub const SENT_DATE_KEY: &str = "sent_date";

/// Where a run leaves values for the next invocation to pick up.
pub trait RunOutput: Send + Sync + Debug {
    fn record(&self, key: &str, value: &str) -> Result<()>;
}

/// `key=value` lines appended to the file named by `GITHUB_OUTPUT`.
///
/// Without a path, records are dropped.
#[derive(Debug, Clone, Default)]
pub struct GithubOutput {
    path: Option<PathBuf>,
}

impl GithubOutput {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl RunOutput for GithubOutput {
    fn record(&self, key: &str, value: &str) -> Result<()> {
        let Some(path) = &self.path else {
            log::debug!("No run output configured, dropping {key}={value}");
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open run output file: {}", path.display()))?;

        writeln!(file, "{key}={value}")
            .with_context(|| format!("Failed to write run output file: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("weather-bot-{}-{name}", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn appends_key_value_lines() {
        let path = scratch_file("append");
        fs::write(&path, "other=1\n").expect("seed file");

        let output = GithubOutput::new(Some(path.clone()));
        output.record(SENT_DATE_KEY, "2024-06-10").expect("record should succeed");

        let contents = fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "other=1\nsent_date=2024-06-10\n");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn creates_missing_file() {
        let path = scratch_file("create");

        GithubOutput::new(Some(path.clone()))
            .record(SENT_DATE_KEY, "2024-06-10")
            .expect("record should succeed");

        assert_eq!(fs::read_to_string(&path).expect("read back"), "sent_date=2024-06-10\n");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn without_path_is_a_no_op() {
        assert!(GithubOutput::default().record(SENT_DATE_KEY, "2024-06-10").is_ok());
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = std::env::temp_dir().join("weather-bot-no-such-dir").join("out");
        let err = GithubOutput::new(Some(dir)).record(SENT_DATE_KEY, "2024-06-10").unwrap_err();

        assert!(err.to_string().contains("Failed to open run output file"));
    }
}
