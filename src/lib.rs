//! Parts API: JSON CRUD over the `parts` inventory table on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, StoreError};
pub use model::{NewPart, Part, PartId};
pub use routes::{app_router, common_routes, part_routes};
pub use state::AppState;
pub use store::{connect, ensure_parts_table, PartStore, PgPartStore, UpdateOutcome};
