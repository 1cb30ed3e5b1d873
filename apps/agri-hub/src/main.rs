//! # AgriConnect Hub Entry Point
//!
//! Runs the scripted marketplace walkthrough. The setup lives in `lib.rs`
//! so the tests can reach it.

#[tokio::main]
async fn main() {
    if let Err(err) = agri_hub::run().await {
        eprintln!("agri-hub: {err}");
        std::process::exit(1);
    }
}
