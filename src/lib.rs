//! sqldojo - a TUI study companion for SQL interview preparation
//!
//! Chapters of interview-focused material with persistent completion
//! tracking, a diagnostic quiz that maps wrong answers to study gaps, and a
//! timed mock exam with autosaved answers.

pub mod app;
pub mod config;
pub mod curriculum;
pub mod diagnostic;
pub mod exam;
pub mod progress;
pub mod store;
pub mod syntax;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
