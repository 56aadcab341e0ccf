//! Response envelopes shared by the HTTP layer and the client

pub mod response;

pub use response::{ApiResponse, HealthResponse, HealthStatus};
