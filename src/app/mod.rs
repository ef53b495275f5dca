//! Application orchestration: state, frame scheduling, event loop plumbing
//! and input handling.

pub mod event;
pub mod handler;
pub mod marquee;
pub mod newsletter_runtime;
pub mod scheduler;
pub mod state;
