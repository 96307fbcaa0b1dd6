pub mod feedback;
pub mod http;
pub mod limiter;
