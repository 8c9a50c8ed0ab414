//! # Frontier and Occupancy
//!
//! Per-branch search state: the cells claimed so far and the doors still
//! waiting for a neighbour.
//!
//! Every operation returns a new state. Sibling branches each start from
//! their parent's state, so nothing one branch does is visible to another.

use crate::{Door, Position, RoomTemplate};
use std::collections::HashSet;

/// Occupied cells plus the ordered list of open doors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    occupied: HashSet<Position>,
    open_doors: Vec<Door>,
}

impl SearchState {
    /// State after placing `template` at `origin` on an empty grid.
    pub fn seeded(template: &RoomTemplate, origin: Position) -> Self {
        Self::default()
            .with_cells(template.cells_at(origin))
            .with_doors(template.doors_at(origin))
    }

    pub fn occupied(&self) -> &HashSet<Position> {
        &self.occupied
    }

    pub fn open_doors(&self) -> &[Door] {
        &self.open_doors
    }

    pub fn is_occupied(&self, cell: Position) -> bool {
        self.occupied.contains(&cell)
    }

    /// True when none of `cells` is already claimed.
    pub fn is_vacant(&self, cells: &[Position]) -> bool {
        !cells.iter().any(|cell| self.occupied.contains(cell))
    }

    pub fn with_cells(&self, cells: impl IntoIterator<Item = Position>) -> Self {
        let mut next = self.clone();
        next.occupied.extend(cells);
        next
    }

    pub fn with_doors(&self, doors: impl IntoIterator<Item = Door>) -> Self {
        let mut next = self.clone();
        next.open_doors.extend(doors);
        next
    }

    /// Removes the first open door sharing `door`'s position and direction.
    pub fn without_door(&self, door: &Door) -> Self {
        let mut next = self.clone();
        if let Some(index) = next.open_doors.iter().position(|open| open.same_slot(door)) {
            next.open_doors.remove(index);
        }
        next
    }

    /// State after attaching a room through the open door `via`.
    ///
    /// `via` leaves the frontier, the room's cells are claimed, and every room
    /// door except the one sitting in `via`'s matching slot joins the frontier.
    pub fn attach(&self, via: &Door, cells: Vec<Position>, room_doors: Vec<Door>) -> Self {
        let slot = via.matching();
        let mut next = self.without_door(via);
        next.occupied.extend(cells);
        next.open_doors
            .extend(room_doors.into_iter().filter(|door| !door.same_slot(&slot)));
        next
    }
}
