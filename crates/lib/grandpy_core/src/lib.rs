//! # grandpy_core
//!
//! Core widget logic for GrandPy.
//!
//! Everything here is target independent: the browser binding and the
//! terminal front-end both drive the same [`widget::ChatWidget`] through the
//! [`page::Page`] and [`widget::QuestionSender`] seams.

pub mod config;
pub mod error;
pub mod models;
pub mod page;
pub mod view;
pub mod widget;

pub use error::{WidgetError, WidgetResult};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
