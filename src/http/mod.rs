pub mod headers;
pub mod log_middleware;
pub mod rate_limit;
pub mod status_middleware;
