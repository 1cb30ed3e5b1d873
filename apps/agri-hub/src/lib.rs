//! # AgriConnect Hub
//!
//! The application layer: state, role-checked commands and the scripted
//! walkthrough the binary runs.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: info,agri=debug, can be overridden with RUST_LOG         │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • AGRI_* environment variables over defaults                        │
//! │                                                                         │
//! │  3. Open the Store ───────────────────────────────────────────────────► │
//! │     • In-memory repositories, seeded unless AGRI_SEED=false             │
//! │                                                                         │
//! │  4. Initialize State Objects ─────────────────────────────────────────► │
//! │     • StoreState, CartState (empty), ConfigState                        │
//! │                                                                         │
//! │  5. Run the Walkthrough ──────────────────────────────────────────────► │
//! │     • Each step printed to stdout as pretty JSON                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod demo;
pub mod error;
pub mod state;

use agri_store::Store;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use state::{CartState, ConfigState, StoreState};

/// Runs the hub: logging, config, store, then the walkthrough.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ConfigState::from_env()?;
    info!(
        marketplace = %config.marketplace_name,
        currency = config.currency.code(),
        default_distance_km = config.default_distance_km,
        "Starting AgriConnect Hub"
    );

    let store = if config.seed_on_start {
        Store::seeded().await?
    } else {
        Store::in_memory()
    };

    let store_state = StoreState::new(store);
    let cart_state = CartState::new();
    info!("State initialized");

    if !config.seed_on_start {
        warn!("Seed data disabled; nothing to walk through");
        return Ok(());
    }

    for step in demo::walkthrough(&store_state, &cart_state, &config).await? {
        println!("== {} ==", step.title);
        println!("{}", serde_json::to_string_pretty(&step.output)?);
    }

    info!("Walkthrough finished");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=agri_store=trace` - Trace one crate only
/// - Default: `info,agri=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,agri=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
