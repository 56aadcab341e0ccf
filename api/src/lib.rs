//! HTTP layer for Renewal Guard
//!
//! Exposes the authentication endpoints under `/api/v1/auth`, the JWT
//! middleware guarding protected routes and the mapping from domain errors
//! to JSON error responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
