//! Riot Session Demo Host
//!
//! Starts one session and drives it with a scripted run, or with JSON
//! commands read line by line from stdin when `--stdin` is given.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use riot_session::{
    VERSION, TICK_PERIOD_MS,
    game::character::{find_character, roster},
    game::objectives::objective_for,
    host::{render_hud, HostEvent, SessionCommand},
    ActionKind, Difficulty, HostError, SessionConfig, SessionHandle, SessionManager, Transition,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let default_level = if cfg!(feature = "debug-tracing") { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Riot Session v{}", VERSION);
    info!("Tick Period: {} ms", TICK_PERIOD_MS);

    let from_stdin = std::env::args().any(|arg| arg == "--stdin");
    let character_id = std::env::var("RIOT_CHARACTER").unwrap_or_else(|_| "protester-leader".into());
    let difficulty = std::env::var("RIOT_DIFFICULTY")
        .ok()
        .and_then(|d| Difficulty::from_name(&d))
        .unwrap_or_default();

    for profile in roster() {
        info!(
            "Roster: {} ({}, {:?}){}",
            profile.name,
            profile.faction.as_str(),
            profile.rarity,
            if profile.unlocked { "" } else { " [locked]" }
        );
    }

    let selection = find_character(&character_id)
        .with_context(|| format!("Unknown character: {}", character_id))?
        .select()?;

    let manager = SessionManager::new(SessionConfig::from_env());
    let (id, notice) = manager.create_session(Some(selection), difficulty).await?;
    info!("{} - {}", notice.title(), notice.description());

    let handle = manager.require_session(&id).await?;
    let mut notices = handle.subscribe_notices();
    // In stdin mode notices join the JSON event stream; otherwise they are logged.
    let notice_printer = tokio::spawn(async move {
        loop {
            match notices.recv().await {
                Ok(notice) if from_stdin => match HostEvent::Notice(notice).to_json() {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!("Failed to encode notice: {}", e),
                },
                Ok(notice) => info!("{} - {}", notice.title(), notice.description()),
                Err(RecvError::Lagged(missed)) => warn!("Dropped {} notices", missed),
                Err(RecvError::Closed) => break,
            }
        }
    });

    if from_stdin {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let command = match SessionCommand::from_json(line) {
                Ok(command) => command,
                Err(e) => {
                    warn!("Bad command {:?}: {}", line, e);
                    continue;
                }
            };
            report(handle.send(command).await);
            println!("{}", HostEvent::State((*handle.snapshot()).clone()).to_json()?);
        }
    } else {
        demo_session(&handle).await;
    }

    for line in render_hud(handle.selection(), &handle.snapshot()) {
        info!("{}", line);
    }
    println!("{}", serde_json::to_string_pretty(&*handle.snapshot())?);

    manager.shutdown().await;
    notice_printer.abort();

    Ok(())
}

/// Scripted run exercising every transition.
async fn demo_session(handle: &SessionHandle) {
    info!("=== Starting Demo Session ===");

    for kind in ActionKind::ALL {
        report(handle.action(kind).await);
    }
    for slot in 1..=4 {
        report(handle.use_ability(slot).await);
    }
    // Energy is low now; keep trying until it refuses.
    for _ in 0..3 {
        report(handle.use_ability(1).await);
    }

    report(handle.toggle_pause().await);
    report(handle.tick().await);
    report(handle.action(ActionKind::Attack).await);
    report(handle.toggle_pause().await);
    report(handle.tick().await);

    let view = handle.snapshot();
    let objective = objective_for(handle.selection().faction);
    let progress = objective.progress(&view.ability_uses);
    info!(
        "Objective: {} - {} {}/{}",
        objective.headline, objective.task, progress.current, progress.target
    );
}

fn report(result: Result<Transition, HostError>) {
    match result {
        Ok(_) => {}
        Err(HostError::Session(e)) => info!("Refused: {}", e),
        Err(e) => warn!("Command failed: {}", e),
    }
}
