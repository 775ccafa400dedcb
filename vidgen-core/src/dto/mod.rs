//! Data Transfer Objects for the remote generation API
//!
//! Wire shapes of the creation and status endpoints, plus the conversions
//! between them and the domain types.

pub mod generation;
