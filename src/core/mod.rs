//! Core logic – section geometry, scroll tracking, reveal latches, hero
//! parallax and the page that composes them.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Everything
//! here is single-threaded: signals hand out `Rc`-backed subscriptions.

pub mod content;
pub mod page;
pub mod parallax;
pub mod reveal;
pub mod section;
pub mod signal;
pub mod tracker;
