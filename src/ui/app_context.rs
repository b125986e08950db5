use crate::config;
use crate::host::DocClient;

/// Shared services handed to every component through the Dioxus context
#[derive(Clone)]
pub struct AppContext {
    pub config: config::Config,
    pub client: DocClient,
}
