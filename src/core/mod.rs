//! Core business logic - framework-agnostic inventory operations.
//!
//! The movement engine is split into small steps that all run on the caller's connection or
//! transaction: document numbering, range resolution, stock transitions, and ledger writes.
//! [`movement`] composes them into atomic inbound and outbound movements. The remaining
//! modules manage reference data and read-only reports.

/// Product types and PC model numbers
pub mod catalog;
/// `YYYYMMDD-NNNN` document numbers and their per-day sequences
pub mod document;
/// Product creation and the append-only movement ledgers
pub mod ledger;
/// Atomic inbound and outbound movements
pub mod movement;
/// Outbound range resolution
pub mod range;
/// Stock listings, history, and dashboard statistics
pub mod report;
/// Staff members
pub mod staff;
/// Stock status transitions and availability checks
pub mod stock;
