mod cors;
pub mod routes;

pub use routes::{ApiState, router};
