// src/exec/launcher.rs

//! Single launch of the training node's script.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::errors::Result;

/// Everything needed for one launch of the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    /// Working directory for the child.
    pub install_root: PathBuf,
    /// Absolute path of the launch script.
    pub script: PathBuf,
    /// Canned answers for the script's prompts, in prompt order.
    ///
    /// `None` when no config record exists; the script's own prompts then
    /// apply.
    pub answers: Option<[String; 4]>,
}

/// How a single launch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The child ran and exited with this code, reported verbatim.
    /// Signal-terminated children report -1.
    Exited(i32),
    /// The launch script does not exist; no process was started.
    MissingScript(PathBuf),
    /// Cancellation fired mid-run; the child was killed.
    Cancelled,
}

/// Launch the node once and wait for it to exit.
///
/// Fails fast with [`LaunchOutcome::MissingScript`] when the script is
/// absent. Otherwise the script runs with its working directory set to the
/// install root; if answers are present they are written to its stdin as
/// four newline-terminated lines, then stdin is closed.
pub async fn launch_once(
    plan: &LaunchPlan,
    mut cancel_rx: oneshot::Receiver<()>,
) -> Result<LaunchOutcome> {
    if !plan.script.is_file() {
        return Ok(LaunchOutcome::MissingScript(plan.script.clone()));
    }

    info!(
        script = %plan.script.display(),
        piped_answers = plan.answers.is_some(),
        "launching node"
    );

    let mut cmd = Command::new("bash");
    cmd.arg(&plan.script)
        .current_dir(&plan.install_root)
        .stdin(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning launch script {}", plan.script.display()))?;

    // Feed the canned answers and close stdin so the script sees EOF after
    // the last one. Without answers, close stdin immediately.
    if let Some(stdin) = child.stdin.take() {
        let mut stdin = stdin;
        if let Some(answers) = &plan.answers {
            let payload = format!("{}\n", answers.join("\n"));
            if let Err(e) = stdin.write_all(payload.as_bytes()).await {
                warn!(error = %e, "failed to pipe answers to launch script");
            }
        }
        drop(stdin);
    }

    tokio::select! {
        status_res = child.wait() => {
            let status = status_res
                .with_context(|| format!("waiting for launch script {}", plan.script.display()))?;
            let code = status.code().unwrap_or(-1);
            info!(exit_code = code, success = status.success(), "node exited");
            Ok(LaunchOutcome::Exited(code))
        }

        cancel = &mut cancel_rx => {
            match cancel {
                Ok(()) => {
                    info!("cancellation requested; killing node process");
                    if let Err(e) = child.kill().await {
                        warn!(error = %e, "failed to kill node process on cancellation");
                    }
                    Ok(LaunchOutcome::Cancelled)
                }
                Err(_) => {
                    // Cancel sender dropped without firing: nobody can cancel
                    // this launch anymore, so just keep waiting for the child.
                    let status = child.wait().await.with_context(|| {
                        format!("waiting for launch script {}", plan.script.display())
                    })?;
                    let code = status.code().unwrap_or(-1);
                    info!(exit_code = code, success = status.success(), "node exited");
                    Ok(LaunchOutcome::Exited(code))
                }
            }
        }
    }
}
