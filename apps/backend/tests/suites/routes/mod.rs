pub mod error_shape;
pub mod healthcheck;
pub mod rate_limiting;
pub mod users;
