use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Appointment booking service")]
pub struct ConfigurationHandler {
    /// Title reported to the front end
    #[arg(long, default_value = "AppointmentPro")]
    website_title: String,

    #[arg(long, env = "PORT", default_value = "3000")]
    port: String,

    /// Keep the store in this JSON file instead of memory
    #[arg(long, env = "DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Keep the store in PostgreSQL. Takes precedence over --data-file
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Insert example providers, events and services on startup
    #[arg(long)]
    seed_demo_data: bool,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn website_title(&self) -> String {
        self.website_title.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }

    fn data_file(&self) -> Option<PathBuf> {
        self.data_file.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn seed_demo_data(&self) -> bool {
        self.seed_demo_data
    }
}
