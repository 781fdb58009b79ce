//! PMD subprocess runner.
//!
//! Runs `pmd -d <dir> -f csv -rulesets <category-list>`. Complete stdout
//! lines are parsed as they arrive; at EOF the whole report is parsed once
//! and replaces the streamed batch. stderr lines go to the log. The call
//! resolves when the process exits. There is no timeout.

use crate::config::PmdConfig;
use crate::report::{PmdRecord, ReportStream};
use crate::{PMD_INFO, ToolError, ToolResult, diagnostics};
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info, warn};

/// Exit codes PMD uses for a completed run (4 = violations found).
const PMD_OK_EXIT_CODES: &[i32] = &[0, 4];

const READ_CHUNK: usize = 8 * 1024;

pub struct PmdRunner {
    config: PmdConfig,
}

impl Default for PmdRunner {
    fn default() -> Self {
        Self::new(PmdConfig::default())
    }
}

impl PmdRunner {
    pub fn new(config: PmdConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PmdConfig {
        &self.config
    }

    pub fn is_available(&self) -> bool {
        which::which(&self.config.command).is_ok()
    }

    pub fn version(&self) -> Option<String> {
        std::process::Command::new(&self.config.command)
            .arg("--version")
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Program and arguments for analyzing `dir`.
    ///
    /// Fails with [`ToolError::NoCategories`] when no configured category
    /// names a known PMD category.
    pub fn command_line(&self, dir: &Path) -> Result<(String, Vec<String>), ToolError> {
        let categories = self.config.resolved_categories();
        if categories.is_empty() {
            return Err(ToolError::NoCategories);
        }
        let rulesets = categories
            .iter()
            .map(|c| c.ruleset_path())
            .collect::<Vec<_>>()
            .join(",");

        let mut args = Vec::new();
        if let Some(sub) = &self.config.subcommand {
            args.push(sub.clone());
        }
        args.extend([
            "-d".to_string(),
            dir.display().to_string(),
            "-f".to_string(),
            "csv".to_string(),
            "-rulesets".to_string(),
            rulesets,
        ]);
        Ok((self.config.command.clone(), args))
    }

    /// Run PMD on `dir` and return the parsed report.
    pub async fn run(&self, dir: &Path) -> Result<Vec<PmdRecord>, ToolError> {
        let (program, args) = self.command_line(dir).inspect_err(|e| {
            error!(categories = ?self.config.categories, "{e}");
        })?;
        info!(command = %program, args = ?args, "starting pmd");

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                error!(command = %program, error = %e, "failed to spawn pmd");
                if e.kind() == std::io::ErrorKind::NotFound {
                    ToolError::NotAvailable(format!("{program} not found"))
                } else {
                    ToolError::Io(e)
                }
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let stdout_fut = async move {
            let mut report = ReportStream::new();
            let Some(mut stdout) = stdout else {
                return Ok(report.finish());
            };
            let mut chunk = vec![0u8; READ_CHUNK];
            loop {
                let n = stdout.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                let added = report.push(&chunk[..n]);
                if added > 0 {
                    debug!(added, records = report.len(), "pmd results");
                }
            }
            Ok::<_, std::io::Error>(report.finish())
        };

        let stderr_fut = async move {
            let Some(stderr) = stderr else {
                return Ok(());
            };
            let mut lines = BufReader::new(stderr).lines();
            while let Some(line) = lines.next_line().await? {
                if !line.trim().is_empty() {
                    warn!(target: "pmd", "{line}");
                }
            }
            Ok::<_, std::io::Error>(())
        };

        let (records, stderr_res, status) = tokio::join!(stdout_fut, stderr_fut, child.wait());

        let status = status.map_err(|e| {
            error!(command = %program, error = %e, "failed waiting for pmd");
            ToolError::Io(e)
        })?;
        if let Err(e) = stderr_res {
            warn!(error = %e, "failed reading pmd stderr");
        }
        let records = records.map_err(|e| {
            error!(command = %program, error = %e, "failed reading pmd stdout");
            ToolError::Io(e)
        })?;

        match status.code() {
            Some(code) if PMD_OK_EXIT_CODES.contains(&code) => {}
            code => warn!(exit_code = ?code, "pmd exited abnormally"),
        }
        info!(exit_code = ?status.code(), records = records.len(), "pmd finished");
        Ok(records)
    }

    /// Run PMD and map its report to diagnostics.
    pub async fn run_diagnostics(&self, dir: &Path) -> ToolResult {
        match self.run(dir).await {
            Ok(records) => {
                ToolResult::success(PMD_INFO.name, diagnostics::to_diagnostics(&records))
            }
            Err(e) => ToolResult::failure(PMD_INFO.name, e),
        }
    }
}
