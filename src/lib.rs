//! Bienestar — a private, locally-stored daily wellbeing journal core.
//!
//! Records of subjective health metrics (ratings, binary indicators,
//! symptom tags, comments) are kept per calendar date, persisted through a
//! key/value gateway, and projected into statistics and trend-chart data.
//! The form/calendar shell is an external collaborator: it drives the
//! [`tracker::Tracker`] facade and renders what comes back.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod stats;
pub mod store;
pub mod tracker;
