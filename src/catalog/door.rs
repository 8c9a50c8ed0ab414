//! # Doors
//!
//! Directional connection points on room templates.

use crate::{Axis, Direction, Position, TemplateId};
use serde::{Deserialize, Serialize};

/// A directional door on a room.
///
/// Relative to its template while in the catalog, absolute once the room is
/// placed. The door cell lies inside the room footprint and the cell one step
/// in `direction` lies outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Door {
    /// Template owning this door; `None` for synthetic matching slots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<TemplateId>,
    pub position: Position,
    pub direction: Direction,
}

impl Door {
    /// Creates an unowned door.
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            owner: None,
            position,
            direction,
        }
    }

    pub(crate) fn owned_by(self, owner: TemplateId) -> Self {
        Self {
            owner: Some(owner),
            ..self
        }
    }

    /// Shifts the door by a placement origin. Direction is unchanged.
    pub fn translated(self, origin: Position) -> Self {
        Self {
            position: self.position + origin,
            ..self
        }
    }

    /// Returns the slot an adjoining room's door must fill to connect here.
    ///
    /// The slot sits one cell beyond the door and faces back towards it.
    ///
    /// # Examples
    ///
    /// ```
    /// use roomweave::{Direction, Door, Position};
    ///
    /// let door = Door::new(Position::new(0, 0), Direction::East);
    /// let slot = door.matching();
    /// assert_eq!(slot.position, Position::new(1, 0));
    /// assert_eq!(slot.direction, Direction::West);
    /// assert!(slot.owner.is_none());
    /// ```
    pub fn matching(self) -> Door {
        Door::new(
            self.position.step(self.direction),
            self.direction.inverse(),
        )
    }

    pub fn axis(self) -> Axis {
        self.direction.axis()
    }

    pub fn is_vertical(self) -> bool {
        self.direction.is_vertical()
    }

    /// Position + direction identity, ignoring the owner.
    pub fn same_slot(&self, other: &Door) -> bool {
        self.position == other.position && self.direction == other.direction
    }

    /// Checks whether `other` sits in this door's matching slot.
    pub fn connects_to(&self, other: &Door) -> bool {
        self.matching().same_slot(other)
    }
}
