//! # Room Templates
//!
//! Immutable room and hallway shapes the generator stamps onto the grid.

use crate::{config, Axis, Direction, Door, Position, RoomweaveError, RoomweaveResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier assigned to a template when its catalog is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Semantic role of a template during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomRole {
    /// Placed once at the configured origin before the search starts
    Start,
    /// Singleton placed by the closing heuristic
    Target,
    /// Regular catalog room, reusable any number of times
    Ordinary,
}

/// A room shape with its doors, expressed relative to the placement origin.
///
/// # Examples
///
/// ```
/// use roomweave::{Direction, Door, Position, RoomTemplate};
///
/// let corridor = RoomTemplate::new(
///     "corridor",
///     vec![Position::new(0, 0)],
///     vec![
///         Door::new(Position::new(0, 0), Direction::West),
///         Door::new(Position::new(0, 0), Direction::East),
///     ],
/// );
/// assert!(corridor.has_door_on_side(Direction::West));
/// assert!(!corridor.has_door_on_side(Direction::North));
/// assert_eq!(corridor.cells_at(Position::new(4, 1)), vec![Position::new(4, 1)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTemplate {
    id: TemplateId,
    name: String,
    role: RoomRole,
    footprint: Vec<Position>,
    doors: Vec<Door>,
}

impl RoomTemplate {
    /// Creates an ordinary template. Ids and roles are assigned by the catalog.
    pub fn new(name: impl Into<String>, footprint: Vec<Position>, doors: Vec<Door>) -> Self {
        Self {
            id: TemplateId(0),
            name: name.into(),
            role: RoomRole::Ordinary,
            footprint,
            doors,
        }
    }

    pub(crate) fn assign(mut self, id: TemplateId, role: RoomRole) -> Self {
        self.id = id;
        self.role = role;
        self.doors = self.doors.into_iter().map(|door| door.owned_by(id)).collect();
        self
    }

    pub fn id(&self) -> TemplateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> RoomRole {
        self.role
    }

    pub fn footprint(&self) -> &[Position] {
        &self.footprint
    }

    /// Doors in template-relative coordinates.
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Absolute cells covered when the room is placed at `origin`.
    pub fn cells_at(&self, origin: Position) -> Vec<Position> {
        self.footprint.iter().map(|&cell| cell + origin).collect()
    }

    /// Absolute doors when the room is placed at `origin`.
    pub fn doors_at(&self, origin: Position) -> Vec<Door> {
        self.doors.iter().map(|door| door.translated(origin)).collect()
    }

    pub fn has_door_on_side(&self, direction: Direction) -> bool {
        self.door_on_side(direction).is_some()
    }

    /// First door facing `direction`, in declaration order.
    pub fn door_on_side(&self, direction: Direction) -> Option<&Door> {
        self.doors.iter().find(|door| door.direction == direction)
    }

    /// Origin that puts this room's door facing `slot.direction` exactly on
    /// `slot.position`, or `None` when the room has no such door.
    pub fn origin_for(&self, slot: &Door) -> Option<Position> {
        self.door_on_side(slot.direction)
            .map(|door| slot.position - door.position)
    }

    /// Checks the structural invariants of the template.
    pub fn validate(&self) -> RoomweaveResult<()> {
        if self.name.trim().is_empty() {
            return Err(RoomweaveError::InvalidCatalog(
                "Room template has an empty name".to_string(),
            ));
        }

        if self.footprint.is_empty() {
            return Err(RoomweaveError::InvalidCatalog(format!(
                "Room '{}' has an empty footprint",
                self.name
            )));
        }

        let extent = config::MAX_TEMPLATE_EXTENT.unsigned_abs();
        if let Some(cell) = self
            .footprint
            .iter()
            .find(|cell| cell.x.unsigned_abs() > extent || cell.y.unsigned_abs() > extent)
        {
            return Err(RoomweaveError::InvalidCatalog(format!(
                "Room '{}' has cell {} beyond the template extent {}",
                self.name, cell, extent
            )));
        }

        let cells: HashSet<Position> = self.footprint.iter().copied().collect();
        if cells.len() != self.footprint.len() {
            return Err(RoomweaveError::InvalidCatalog(format!(
                "Room '{}' lists a footprint cell twice",
                self.name
            )));
        }

        for (index, door) in self.doors.iter().enumerate() {
            if !cells.contains(&door.position) {
                return Err(RoomweaveError::InvalidCatalog(format!(
                    "Room '{}': {} door at {} is outside the footprint",
                    self.name, door.direction, door.position
                )));
            }

            if cells.contains(&door.position.step(door.direction)) {
                return Err(RoomweaveError::InvalidCatalog(format!(
                    "Room '{}': {} door at {} does not face the boundary",
                    self.name, door.direction, door.position
                )));
            }

            if self.doors[..index].iter().any(|other| other.same_slot(door)) {
                return Err(RoomweaveError::InvalidCatalog(format!(
                    "Room '{}': duplicate {} door at {}",
                    self.name, door.direction, door.position
                )));
            }
        }

        Ok(())
    }
}

/// Visual connector drawn across a door. Never occupies grid cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallwayTemplate {
    pub name: String,
    pub axis: Axis,
}

impl HallwayTemplate {
    pub fn new(name: impl Into<String>, axis: Axis) -> Self {
        Self {
            name: name.into(),
            axis,
        }
    }
}
