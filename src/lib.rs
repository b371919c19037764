// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod setup;
pub mod supervisor;
pub mod types;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{error, info, warn};

use crate::cli::MenuChoice;
use crate::config::{Layout, RecordStore, Settings};
use crate::errors::{Result, SwarmherdError};
use crate::exec::{LaunchOutcome, LaunchPlan, ScriptLauncher};
use crate::setup::{
    Cleanup, GitFetcher, NodeReconciler, RemoteScriptHeal, SelfHeal, SwapCleanup, SwapFile,
    VenvInstaller,
};
use crate::supervisor::{
    SupervisorCore, SupervisorEvent, SupervisorOptions, SupervisorRuntime,
};

/// High-level entry point used by `main.rs`. Returns the process exit code.
///
/// This wires together:
/// - settings + layout resolution
/// - logging
/// - the interactive menu
/// - the supervisor / launcher / setup collaborators
pub async fn run() -> Result<i32> {
    let home = dirs::home_dir().ok_or(SwarmherdError::HomeDirUnavailable)?;
    let data_dir = home.join(".swarmherd");

    let settings = config::load_and_validate(config::default_settings_path(&data_dir))?;
    let layout = Layout::rooted_at(&home, &settings);

    let log_path = logging::init_logging(&layout.logs_dir)?;
    info!(log = %log_path.display(), "logging to file");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let choice = cli::read_choice(&mut input, &mut output)?;
    let result = match choice {
        MenuChoice::Supervise => supervise(&settings, &layout).await.map(|_| 0),
        MenuChoice::RunOnce => run_single(&settings, &layout).await,
        MenuChoice::FreshInstall => {
            if !cli::confirm_destructive(
                &mut input,
                &mut output,
                "This deletes the node directory and reinstalls",
            )? {
                info!("fresh install aborted");
                return Ok(0);
            }
            fresh_install(&settings, &layout).await.map(|_| 0)
        }
        MenuChoice::UpdateConfig => {
            let store = RecordStore::new(layout.record_path.clone());
            let current = store.load()?;
            let updated = config::update_interactive(&current, &mut input, &mut output)?;
            store.save(&updated)?;
            info!(record = %store.path().display(), "launch configuration saved");
            Ok(0)
        }
        MenuChoice::SelfHeal => {
            let healer = RemoteScriptHeal::new(settings.node.fixup_url.clone());
            match healer.heal().await {
                Ok(0) => info!("fix-up script finished"),
                // Recoverable either way; the next launch may still work.
                Ok(code) => warn!(exit_code = code, "fix-up script failed"),
                Err(e) => warn!(error = %e, "fix-up script could not be run"),
            }
            Ok(0)
        }
        MenuChoice::DeleteCredentials => {
            let removed = setup::delete_credentials(&layout.credential_files(&settings))?;
            info!(removed, "credential files deleted");
            Ok(0)
        }
    };

    if let Err(e) = &result {
        error!(error = %e, "unrecoverable error");
    }
    result
}

/// Supervised auto-restart mode.
async fn supervise(settings: &Settings, layout: &Layout) -> Result<()> {
    setup::ensure_identity(&layout.identity_file)?;

    let swap = SwapFile::new(layout.swap_file.clone(), settings.swap.size_gb);
    if let Err(e) = swap.provision().await {
        warn!(error = %e, "swap setup failed; continuing without it");
    }

    let (event_tx, event_rx) = mpsc::channel::<SupervisorEvent>(16);

    // Ctrl-C → stop event, observed at the top of the supervise loop.
    {
        let tx = event_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(SupervisorEvent::StopRequested).await;
        });
    }

    let reconciler = NodeReconciler::new(
        settings.node.repo_url.clone(),
        layout.install_root.clone(),
        layout.venv_dir.clone(),
        Arc::new(GitFetcher),
        Arc::new(VenvInstaller::new(
            layout.venv_dir.clone(),
            settings.python.packages.clone(),
        )),
    );

    let runtime = SupervisorRuntime::new(
        SupervisorCore::new(),
        event_rx,
        event_tx,
        ScriptLauncher,
        Box::new(reconciler),
        Box::new(SwapCleanup::new(swap)),
        RecordStore::new(layout.record_path.clone()),
        layout.install_root.clone(),
        layout.launch_script.clone(),
        SupervisorOptions::default(),
    );
    runtime.run().await
}

/// Single-run mode: launch once and propagate the node's exit code.
async fn run_single(settings: &Settings, layout: &Layout) -> Result<i32> {
    setup::ensure_identity(&layout.identity_file)?;

    let swap = SwapFile::new(layout.swap_file.clone(), settings.swap.size_gb);
    if let Err(e) = swap.provision().await {
        warn!(error = %e, "swap setup failed; continuing without it");
    }

    let store = RecordStore::new(layout.record_path.clone());
    let answers = store.try_load()?.map(|r| r.answer_lines());
    let plan = LaunchPlan {
        install_root: layout.install_root.clone(),
        script: layout.launch_script.clone(),
        answers,
    };

    // Ctrl-C → kill the child; cleanup still runs below.
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(());
        }
    });

    let outcome = exec::launch_once(&plan, cancel_rx).await?;
    signal_task.abort();

    let mut cleanup = SwapCleanup::new(swap);
    cleanup.run().await;

    match outcome {
        // Signal-terminated children have no code; report a plain failure.
        LaunchOutcome::Exited(code) => Ok(if code < 0 { 1 } else { code }),
        LaunchOutcome::MissingScript(path) => {
            error!(script = %path.display(), "launch script missing; run a fresh install first");
            Ok(1)
        }
        LaunchOutcome::Cancelled => {
            info!("node stopped");
            Ok(0)
        }
    }
}

/// Destructive reinstall, confirmed by the caller.
async fn fresh_install(settings: &Settings, layout: &Layout) -> Result<()> {
    let fetcher = GitFetcher;
    let installer = VenvInstaller::new(
        layout.venv_dir.clone(),
        settings.python.packages.clone(),
    );
    let swap = SwapFile::new(layout.swap_file.clone(), settings.swap.size_gb);
    setup::fresh_install(
        &settings.node.repo_url,
        &layout.install_root,
        &fetcher,
        &installer,
        &swap,
    )
    .await
}
