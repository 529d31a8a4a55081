//! Library backing the PIC recruiting review portal: the role-gated
//! candidate aggregation and deliberation-set synchronization core, its
//! record-store abstraction, and the HTTP router the API service mounts.

pub mod config;
pub mod error;
pub mod portal;
pub mod telemetry;
