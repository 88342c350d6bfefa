//! filterlab desktop application
//!
//! egui/eframe front end for inspecting digital-filter frequency responses.
//! The [`FilterLab`] app owns two plot views (phase and magnitude) which
//! share one filter specification and react to typed view events.

pub mod app;
pub mod config;
pub mod event;
pub mod platform;
pub mod views;

pub use app::FilterLab;
