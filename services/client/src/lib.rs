pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod inspector;
pub mod router;
pub mod store;
pub mod telemetry;

pub use app::ClientApp;
pub use inspector::{ErrorInspector, ErrorInterceptor, LogoutOnUnauthorized, Reaction};
pub use store::actions::{
    Actions, ConsolidatePcrTrials, UpdateDesign, UpdateExperiment, UpdateUser,
};
pub use store::progress::with_minimum_duration;
pub use store::Store;
