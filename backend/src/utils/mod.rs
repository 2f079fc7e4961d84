//! Collection of general utility functions shared across the backend.
//!
//! This module serves as a home for small, reusable helpers that do not fit
//! into a specific domain module, such as password hashing and the password
//! strength policy.

pub mod password;
