//! # Rendering Module
//!
//! Placement sinks that turn generated maps into something visible.
//!
//! The generator itself never draws; it talks to a [`crate::PlacementSink`].
//! This module provides a terminal-friendly ASCII implementation used by the
//! command line tool.

pub mod ascii;

pub use ascii::*;
