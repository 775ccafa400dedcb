//! Vidgen Core
//!
//! Core types for submitting video generation jobs and tracking them.
//!
//! This crate contains:
//! - Domain types: requests, submission results, job state snapshots
//! - DTOs: wire payloads of the remote generation API

pub mod domain;
pub mod dto;
