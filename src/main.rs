use std::{io, sync::Arc};

use anyhow::Context;
use hotel_reservation::{
    logging, AdminResource, AppConfig, Console, CustomerDirectory, HotelResource,
    ReservationStore,
};

fn main() -> anyhow::Result<()> {
    logging::init(&AppConfig::log_level_from_env());
    let config = AppConfig::from_env();

    tracing::info!(?config, "Starting hotel reservation console");

    // One store and one directory for the whole process, shared by both facades
    let store = Arc::new(ReservationStore::with_config(config.store.clone()));
    let customers = Arc::new(CustomerDirectory::new());
    let hotel = HotelResource::new(store.clone(), customers.clone());
    let admin = AdminResource::new(store, customers);

    let stdin = io::stdin();
    let mut console = Console::new(hotel, admin, config.date_format, stdin.lock(), io::stdout());
    console.run().context("console session failed")?;

    tracing::info!("Console session ended");
    Ok(())
}
