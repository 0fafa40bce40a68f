//! Outbound adapters (driven side).

pub mod inference;
pub mod storage;
