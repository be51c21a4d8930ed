//! Configuration, catalogs and session orchestration for the Muster
//! emergency headcount toolkit.
//!
//! This crate wraps the tally engine with everything an operator session
//! needs around it: the config file, the procedure and checklist catalogs,
//! the named roll call and the incident desk.
//!
//! # Modules
//!
//! - [`builtin`] -- Built-in procedure cards, checklists and roster.
//! - [`catalog`] -- [`ProcedureDeck`] carousel and [`ChecklistCatalog`].
//! - [`config`] -- Configuration loading from `muster-config.yaml` into
//!   strongly-typed structs.
//! - [`incident`] -- Panic alerts, media recorder and incident reports.
//! - [`roll_call`] -- Presence tracking for a fixed roster.
//! - [`session`] -- [`Session`]: one tally, one roll call, one deck, one
//!   catalog and one incident desk behind the four tabs.
//!
//! [`ProcedureDeck`]: catalog::ProcedureDeck
//! [`ChecklistCatalog`]: catalog::ChecklistCatalog
//! [`Session`]: session::Session

pub mod builtin;
pub mod catalog;
pub mod config;
pub mod incident;
pub mod roll_call;
pub mod session;
