// src/ui/widgets/mod.rs

pub mod analysis_view; // The report of the current analysis.
pub mod auth_popup; // Sign-in / register form.
pub mod footer; // Key hints and notices.
pub mod history_view; // Filterable scan history table.
pub mod input; // URL input field.
pub mod summary; // Score, band and issue counts.
