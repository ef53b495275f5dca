//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* animation state and turns it into cells on
//! the terminal.  No backend calls happen here.

pub mod layout;
pub mod marquee;
pub mod newsletter;
pub mod page;
pub mod particles;
pub mod spinner;
pub mod theme;
