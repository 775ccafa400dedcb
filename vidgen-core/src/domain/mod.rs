//! Core domain types
//!
//! This module contains the structures shared by the submitter, the poller
//! and the reporter. They describe what was asked of the remote service and
//! what it answered, independent of the wire format.

pub mod job;
pub mod request;
