//! Module for account signup and signin endpoints.
//!
//! This module exposes the `/user` routes backed by the credential service.

pub mod handlers;
pub mod routes;
