//! # Built-in Catalog
//!
//! A small default set of rooms used when no catalog file is supplied.

use super::Catalog;
use crate::{Axis, Direction, Door, HallwayTemplate, Position, RoomTemplate};

impl Catalog {
    /// Returns the built-in catalog.
    ///
    /// Contains an `entrance` start room, a `vault` target, straight and bent
    /// corridors, a long hall, a four-door chamber and dead-end caps for each
    /// side.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomweave::Catalog;
    ///
    /// let catalog = Catalog::builtin();
    /// assert_eq!(catalog.start().name(), "entrance");
    /// assert_eq!(catalog.target().name(), "vault");
    /// assert!(catalog.validate().is_ok());
    /// ```
    pub fn builtin() -> Self {
        use Direction::*;

        let rooms = vec![
            cell("corridor_ew", &[West, East]),
            cell("corridor_ns", &[North, South]),
            cell("bend_ne", &[North, East]),
            cell("bend_nw", &[North, West]),
            cell("bend_se", &[South, East]),
            cell("bend_sw", &[South, West]),
            RoomTemplate::new(
                "hall_ew",
                vec![Position::new(0, 0), Position::new(1, 0)],
                vec![
                    Door::new(Position::new(0, 0), West),
                    Door::new(Position::new(1, 0), East),
                ],
            ),
            RoomTemplate::new(
                "chamber",
                vec![
                    Position::new(0, 0),
                    Position::new(1, 0),
                    Position::new(0, 1),
                    Position::new(1, 1),
                ],
                vec![
                    Door::new(Position::new(0, 0), North),
                    Door::new(Position::new(1, 0), East),
                    Door::new(Position::new(1, 1), South),
                    Door::new(Position::new(0, 1), West),
                ],
            ),
            cell("cap_n", &[North]),
            cell("cap_e", &[East]),
            cell("cap_s", &[South]),
            cell("cap_w", &[West]),
        ];

        Self::assemble(
            cell("entrance", &[East, South]),
            cell("vault", &[West, North]),
            rooms,
            HallwayTemplate::new("vertical_hallway", Axis::Vertical),
            HallwayTemplate::new("horizontal_hallway", Axis::Horizontal),
        )
    }
}

/// Single-cell room with one door per listed side.
fn cell(name: &str, sides: &[Direction]) -> RoomTemplate {
    RoomTemplate::new(
        name,
        vec![Position::origin()],
        sides
            .iter()
            .map(|&side| Door::new(Position::origin(), side))
            .collect(),
    )
}
