//! Watches one application's live pipeline status from the terminal.
//!
//! Usage: `TAILOR_API_URL=... TAILOR_API_TOKEN=... cargo run --example watch_status -- <application-id>`

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use tailor_client::live::{AutoAdvance, PhaseTracker};
use tailor_client::projector::{
    current_step_label, phase_states, research_progress, tool_activity,
};
use tailor_client::{Config, LiveStatus};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let application_id: Uuid = std::env::args()
        .nth(1)
        .context("usage: watch_status <application-id>")?
        .parse()
        .context("application id must be a UUID")?;

    let http = reqwest::Client::new();
    let live = LiveStatus::connect(&http, &config, application_id)?;
    let mut updates = live.updates();
    let mut tracker = PhaseTracker::new();
    let (mut advance, mut focus) = AutoAdvance::new();

    info!(%application_id, "watching live status");

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break; // stream task ended and dropped the store
                }
                let state = updates.borrow_and_update().clone();
                if let Some(fault) = &state.fault {
                    println!("fault: {}", fault.message());
                }
                let Some(snapshot) = &state.snapshot else { continue };

                println!("── {}", current_step_label(snapshot));
                let phases = phase_states(snapshot);
                for phase in &phases {
                    println!("   {:?}: {:?}", phase.phase, phase.status);
                }
                for category in research_progress(snapshot) {
                    println!("   research/{}: {:?}", category.name, category.status);
                }
                let activity = tool_activity(&snapshot.events);
                for tool in &activity.running {
                    println!("   running: {} {}", tool.tool_name, tool.args_summary);
                }

                if let Some(next) = tracker.observe(&phases) {
                    advance.schedule(next);
                }
                if snapshot.resume_generation_status.is_terminal() {
                    println!("pipeline finished: {:?}", snapshot.resume_generation_status);
                    break;
                }
            }
            _ = focus.changed() => {
                if let Some(phase) = *focus.borrow_and_update() {
                    println!("▶ now viewing {phase:?}");
                }
            }
        }
    }

    Ok(())
}
