use std::{io, time::Duration};

use crate::{
    app_state::AppState, configuration::Configuration,
    configuration_handler::ConfigurationHandler, database_store::DatabaseStore,
    demo_data::seed_demo_data, file_store::FileStore, http::create_app, local_store::MemoryStore,
    store::KeyValueStore,
};
use chrono::Local;
use tokio::{net::TcpListener, time::sleep};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod accounts;
mod app_state;
mod availability;
mod configuration;
mod configuration_handler;
mod database_store;
mod demo_data;
mod error;
mod events;
mod file_store;
mod http;
mod local_store;
mod locale;
mod payment;
mod schema;
mod services;
mod store;
#[cfg(test)]
mod testutils;
mod types;
mod week_picker;

async fn serve<S: KeyValueStore>(
    listener: TcpListener,
    store: S,
    configuration: &ConfigurationHandler,
) -> io::Result<()> {
    let today = Local::now().date_naive();
    if configuration.seed_demo_data() {
        if let Err(err) = seed_demo_data(&store, today) {
            warn!(?err, "Failed to insert demo data");
        }
    }

    let state = AppState::new(store, configuration.website_title(), today);
    axum::serve(listener, create_app(state)).await
}

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("##################");
    println!("# AppointmentPro #");
    println!("##################");

    dotenvy::dotenv().ok();
    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("0.0.0.0:{}", configuration.port());
    println!("Accessable at:\n{}", address.clone());
    let listener = TcpListener::bind(address).await?;

    if let Some(database_url) = configuration.database_url() {
        let store = loop {
            match DatabaseStore::new(&database_url) {
                Ok(store) => {
                    info!("Successfully connected to database");
                    break store;
                }
                Err(err) => {
                    error!(?err, "Failed to establish database connection: {database_url}. Retry in 1 sec. You may want to restart without --database-url (file or memory store).");
                    sleep(Duration::from_secs(1)).await;
                }
            }
        };
        serve(listener, store, &configuration).await
    } else if let Some(data_file) = configuration.data_file() {
        let store = FileStore::new(&data_file).map_err(|err| {
            error!(?err, path = %data_file.display(), "Failed to open data file");
            io::Error::new(io::ErrorKind::InvalidData, err.to_string())
        })?;
        info!(path = %data_file.display(), "Using file store");
        serve(listener, store, &configuration).await
    } else {
        info!("Using in-memory store, data is lost on shutdown");
        serve(listener, MemoryStore::default(), &configuration).await
    }
}
