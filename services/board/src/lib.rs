//! Board client for the taskboard server
//!
//! This crate holds the pieces of the board that are not view rendering:
//! a typed API client, the in-memory work-list cache, and the deadline
//! sweep that moves overdue items back to the backlog.

pub mod api;
pub mod cache;
pub mod sweep;
