//! Rigstudio Core
//!
//! Core types for the rigstudio control plane.
//!
//! This crate contains:
//! - Domain types: job and leader-service snapshots, rig configuration
//! - DTOs: request parameters and acknowledgements exchanged with the
//!   external process manager

pub mod domain;
pub mod dto;
