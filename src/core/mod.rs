//! Core animation and sign-up logic – scroll-driven marquee offsets,
//! particle layout, and the newsletter flow.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be moved onto background tasks.

pub mod animator;
pub mod newsletter;
pub mod particles;
