pub mod cors;
pub mod identity;
pub mod rate_limit;
pub mod request_trace;
pub mod structured_logger;

pub use cors::cors_middleware;
pub use identity::RequireIdentity;
pub use rate_limit::{RateLimit, RateLimitConfig, RateLimiter, SweeperHandle};
pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
