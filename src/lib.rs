//! Terminal file explorer and timed multiple-choice quiz.
//!
//! The binary in `main.rs` owns the terminal; everything it drives lives
//! here so the state machines can be exercised without one.

pub mod config;
pub mod error;
pub mod event;
pub mod explorer;
pub mod explorer_app;
pub mod logging;
pub mod quiz;
pub mod quiz_app;
pub mod timer;
pub mod ui;
