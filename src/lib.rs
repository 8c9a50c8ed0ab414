//! # Roomweave
//!
//! Procedural dungeon map assembly from a fixed catalog of room templates.
//!
//! ## Architecture Overview
//!
//! A map is grown outward from a start room. Rooms connect through
//! directional doors, every connection gets a hallway connector, and a
//! randomized backtracking search decides which template fills which door.
//! The search is bounded by a global iteration budget and a square playable
//! area, never overlaps rooms, and closes the map by placing one unique
//! target room.
//!
//! - **Grid**: cell coordinates, directions and bounds
//! - **Catalog**: room templates, doors and hallway connectors
//! - **Generation**: the search, its per-branch state, and result delivery
//! - **Rendering**: placement sinks that draw the finished map
//!
//! ```
//! use roomweave::{AsciiCanvas, Catalog, DungeonGenerator, GenerationConfig, RandomOrder, utils};
//!
//! let config = GenerationConfig::new(1);
//! let mut generator = DungeonGenerator::new(Catalog::builtin(), config.clone()).unwrap();
//! let mut canvas = AsciiCanvas::new();
//! let mut order = RandomOrder::new(utils::create_rng(&config));
//!
//! if generator.generate(&mut canvas, &mut order) {
//!     println!("{}", canvas.render());
//! }
//! ```

pub mod catalog;
pub mod generation;
pub mod grid;
pub mod rendering;

// Core module re-exports
pub use catalog::*;
pub use generation::*;
pub use grid::*;
pub use rendering::*;

/// Core error type for the Roomweave generator.
#[derive(thiserror::Error, Debug)]
pub enum RoomweaveError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Catalog templates break a structural rule
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Configuration values cannot drive a search
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A layout violates a generation guarantee
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Internal state is inconsistent
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The search ended without a map
    #[error("Generation failed after {iterations} iterations: {cause}")]
    GenerationFailed {
        cause: FailureCause,
        iterations: u32,
    },
}

/// Result type used throughout the Roomweave codebase.
pub type RoomweaveResult<T> = Result<T, RoomweaveError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default generation constants.
pub mod config {
    /// Rooms (start included) a closed layout must reach
    pub const DEFAULT_MAX_SIZE: u32 = 5;

    /// Recursive attempts allowed before a run is abandoned
    pub const DEFAULT_THRESHOLD: u32 = 1000;

    /// Coordinate limit of the playable area
    pub const DEFAULT_BOUND: i32 = 10;

    /// Largest accepted bound. Keeps door slots, template offsets and the
    /// doubled canvas coordinates inside `i32`.
    pub const MAX_BOUND: i32 = 1 << 24;

    /// Largest absolute footprint coordinate a room template may use.
    pub const MAX_TEMPLATE_EXTENT: i32 = 1 << 12;

    /// Deepest recursion a search may reach, one stack frame per placed room.
    /// Sized to fit comfortably in a 2 MiB thread stack.
    pub const MAX_SEARCH_DEPTH: u64 = 2_048;
}
