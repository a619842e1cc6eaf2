//! HTTP API surface

pub mod health;
pub mod select;

pub use health::health_routes;
pub use select::select_routes;
