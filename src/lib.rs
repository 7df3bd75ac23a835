//! termcam library crate.
//!
//! Renders live camera frames in a terminal, either as brightness-mapped
//! glyphs or as ANSI half-block cells, with optional background removal.
//! The binary wires these modules together; they are public so the
//! pipeline can be driven with fake sources and terminals in tests.

pub mod ascii;
pub mod camera;
pub mod cli;
pub mod config;
pub mod greenscreen;
pub mod pipeline;
pub mod terminal;
