//! Module for core business logic services.
//!
//! This module encapsulates services that perform specific business
//! operations on top of the repositories, such as registering accounts and
//! checking credentials.

pub mod credential_service;
