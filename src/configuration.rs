use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn website_title(&self) -> String;
    fn port(&self) -> String;
    fn data_file(&self) -> Option<PathBuf>;
    fn database_url(&self) -> Option<String>;
    fn seed_demo_data(&self) -> bool;
}
