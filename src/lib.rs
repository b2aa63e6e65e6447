//! Catch the falling objects — a terminal arcade game.
//!
//! The library holds the whole game apart from the terminal itself:
//! simulation, particles, persistence, settings and the screen flow.

pub mod audio;
pub mod compute;
pub mod config;
pub mod entities;
pub mod particles;
pub mod persistence;
pub mod session;
