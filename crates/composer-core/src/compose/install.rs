//! Dependency installation via the host package manager

use crate::runtime::PackageManager;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Run the package manager's install command inside the target directory,
/// streaming its output. A non-zero exit status is an error; there is no
/// retry.
pub async fn install_dependencies(target_dir: &Path, pm: PackageManager) -> Result<()> {
    let mut child = TokioCommand::new(pm.command())
        .args(pm.install_args())
        .current_dir(target_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to launch {}", pm.command()))?;

    let stdout = child.stdout.take().context("failed to capture stdout")?;
    let stderr = child.stderr.take().context("failed to capture stderr")?;

    let mut stdout_lines = BufReader::new(stdout).lines();
    let mut stderr_lines = BufReader::new(stderr).lines();
    let mut stdout_done = false;
    let mut stderr_done = false;

    while !(stdout_done && stderr_done) {
        tokio::select! {
            line = stdout_lines.next_line(), if !stdout_done => match line {
                Ok(Some(line)) => println!("  {}", line.dimmed()),
                _ => stdout_done = true,
            },
            line = stderr_lines.next_line(), if !stderr_done => match line {
                Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                _ => stderr_done = true,
            },
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("failed to wait for {}", pm.command()))?;

    if status.success() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} install exited with code {}",
            pm.command(),
            status.code().unwrap_or(-1)
        );
    }
}
