//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the page snapshot and the laid-out content and turns
//! them into cells on the terminal.  No scroll bookkeeping happens here
//! beyond the smooth-scroll animator.

pub mod document;
pub mod layout;
pub mod nav;
pub mod smooth_scroll;
pub mod theme;
