// src/core/mod.rs

/// Data structures shared across the application: `SecurityAnalysis`,
/// `Account` and the status and finding types.
pub mod models;

/// The staged analysis pipeline and its individual stages.
pub mod scanner;

/// The classification policy and the random source it draws from.
pub mod scoring;

/// Reference lists, verdict templates and the finding catalogue.
pub mod knowledge_base;

/// The account store and its session pointer.
pub mod accounts;

/// Persistence backends for the account store.
pub mod storage;

/// Search, filter and sort over scan histories.
pub mod history;

/// JSON report export.
pub mod export;
