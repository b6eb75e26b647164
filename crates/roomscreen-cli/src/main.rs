//! Room screen demo binary.
//!
//! Replays a scripted conversation-screen session through the real runtime
//! against the simulated store, logging every routing decision.
//!
//! # Usage
//!
//! ```bash
//! # Default room and user
//! roomscreen
//!
//! # Shorter edit window, verbose logs
//! roomscreen --room rust-lang/rust --edit-window-secs 30 --log-level debug
//! ```

mod demo;

use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use roomscreen_app::{Clock, RoomId, Runtime, ScreenConfig, SessionController, StoreCommand};
use roomscreen_harness::{InvariantRegistry, SimClock, SimDriver, SimStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Room screen session replay
#[derive(Parser, Debug)]
#[command(name = "roomscreen")]
#[command(about = "Replay a scripted room screen session against a simulated store")]
#[command(version)]
struct Args {
    /// Room to open
    #[arg(short, long, default_value = "gitterhq/sandbox")]
    room: String,

    /// Signed-in username
    #[arg(short, long, default_value = "me")]
    user: String,

    /// Read-receipt quiet period in milliseconds
    #[arg(long, default_value_t = 250)]
    quiet_ms: u64,

    /// Edit window in seconds
    #[arg(long, default_value_t = 300)]
    edit_window_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn config(&self) -> ScreenConfig {
        ScreenConfig::default()
            .with_edit_window(Duration::from_secs(self.edit_window_secs))
            .with_read_quiet_period(Duration::from_millis(self.quiet_ms))
    }
}

/// Build a runtime for the demo session.
fn build(args: &Args, config: ScreenConfig, clock: SimClock) -> Runtime<SimDriver, SimClock> {
    let store = SimStore::new(args.room.as_str(), clock.clone())
        .with_current_user(args.user.as_str())
        .with_history(demo::history(&args.user, clock.now()));
    let driver = demo::script(
        SimDriver::new(store).with_invariants(InvariantRegistry::standard()),
        &config,
    );
    let session = SessionController::new(RoomId::new(args.room.as_str()), config, clock);
    Runtime::new(driver, session)
}

fn report(runtime: &Runtime<SimDriver, SimClock>) {
    let driver = runtime.driver();
    for command in driver.dispatched() {
        tracing::debug!(command = command.name(), "dispatched");
    }

    let sends = driver
        .dispatched()
        .iter()
        .filter(|c| matches!(c, StoreCommand::SendMessage { .. }))
        .count();
    let rows = runtime.session().snapshot().rows.as_ref().map_or(0, Vec::len);

    tracing::info!(
        commands = driver.dispatched().len(),
        effects = driver.effects().len(),
        renders = driver.renders(),
        read = driver.store().read_messages().len(),
        sends,
        rows,
        "session finished"
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = args.config();
    config.validate()?;

    tracing::info!(room = %args.room, user = %args.user, "replaying demo session");

    let mut runtime = build(&args, config, SimClock::at(Utc::now()));
    runtime.run().await?;
    report(&runtime);

    Ok(())
}
