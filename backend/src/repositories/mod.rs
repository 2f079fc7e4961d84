//! Module for persistence repositories.

pub mod account_repository;
