mod menu;
mod prompt;
mod render;

use anyhow::Context;
use skylane_catalog::FlightCatalog;
use skylane_ledger::{PnrGenerator, ReservationLedger};
use skylane_store::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skylane=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        flights = %config.storage.flight_file.display(),
        reservations = %config.storage.reservation_file.display(),
        "Starting Skylane"
    );

    let catalog = FlightCatalog::new(config.storage.flight_file.clone());
    let mut ledger = ReservationLedger::new(
        config.storage.reservation_file.clone(),
        catalog.clone(),
        PnrGenerator::new(),
    );

    println!("========================================");
    println!("      AIRLINE RESERVATION SYSTEM");
    println!("========================================");

    menu::main_menu(&config, &catalog, &mut ledger)
}
