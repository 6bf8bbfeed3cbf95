pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod validate;

pub use auth::*;
pub use config::*;
pub use db::*;
pub use errors::*;
pub use middleware::*;
pub use models::*;
pub use routes::*;
pub use validate::*;
