use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

pub fn catalog_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_study-catalog"))
}

/// Command for the CLI with any inherited `STUDY_*` settings cleared.
pub fn catalog_command() -> Command {
    let mut cmd = Command::new(catalog_binary());
    cmd.env_remove("STUDY_CATALOG_PATH")
        .env_remove("STUDY_CATALOG_STRICT")
        .env_remove("STUDY_LOG");
    cmd
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn run_command_expect_failure(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        bail!(
            "command {:?} unexpectedly succeeded\nstdout: {}",
            cmd,
            String::from_utf8_lossy(&output.stdout)
        );
    }
    Ok(output)
}

pub fn write_catalog(document: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate catalog file")?;
    serde_json::to_writer_pretty(&mut file, document)?;
    file.flush()?;
    Ok(file)
}

pub fn parse_ndjson(stdout: &[u8]) -> Result<Vec<Value>> {
    let text = std::str::from_utf8(stdout).context("stdout is not UTF-8")?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(idx, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Unable to parse NDJSON line {}", idx + 1))
        })
        .collect()
}
