pub mod app;
pub mod app_context;
pub mod components;
pub mod surface;

pub use app::*;
pub use app_context::AppContext;
pub use components::App;

// Re-export constants from app module
pub use app::MAIN_CSS;
