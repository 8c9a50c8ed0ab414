//! # Layouts
//!
//! A recorded map: every room and hallway a run placed, plus the doors it
//! left open. [`LayoutRecorder`] builds one by acting as a placement sink, and
//! [`validate_layout`] checks the structural guarantees of a successful run.

use crate::{
    Axis, Direction, Door, GenerationConfig, HallwayTemplate, PlacementHandle, PlacementSink,
    Position, RoomRole, RoomTemplate, RoomweaveError, RoomweaveResult, TemplateId,
};
use pathfinding::prelude::bfs_reach;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A room as placed on the grid, in absolute coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedRoom {
    pub handle: PlacementHandle,
    pub template: TemplateId,
    pub name: String,
    pub role: RoomRole,
    pub origin: Position,
    pub cells: Vec<Position>,
    pub doors: Vec<Door>,
}

/// A hallway connector anchored on a door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedHallway {
    pub handle: PlacementHandle,
    pub name: String,
    pub axis: Axis,
    pub anchor: Door,
}

/// Complete record of one generated map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Rooms in emission order: start first, then deepest placement first
    pub rooms: Vec<PlacedRoom>,
    pub hallways: Vec<PlacedHallway>,
    /// Doors with no adjoining room when the map was closed
    pub open_doors: Vec<Door>,
}

impl Layout {
    pub fn start(&self) -> Option<&PlacedRoom> {
        self.rooms_with_role(RoomRole::Start).next()
    }

    pub fn target(&self) -> Option<&PlacedRoom> {
        self.rooms_with_role(RoomRole::Target).next()
    }

    pub fn rooms_with_role(&self, role: RoomRole) -> impl Iterator<Item = &PlacedRoom> {
        self.rooms.iter().filter(move |room| room.role == role)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Every cell claimed by a room.
    pub fn occupied_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.rooms.iter().flat_map(|room| room.cells.iter().copied())
    }

    /// Room occupying `cell`, if any.
    pub fn room_at(&self, cell: Position) -> Option<&PlacedRoom> {
        self.rooms.iter().find(|room| room.cells.contains(&cell))
    }

    pub fn to_json(&self) -> RoomweaveResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Placement sink that records everything into a [`Layout`].
#[derive(Debug, Clone, Default)]
pub struct LayoutRecorder {
    layout: Layout,
}

impl LayoutRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Finishes the recording, attaching the run's open-door report.
    pub fn into_layout(mut self, open_doors: Vec<Door>) -> Layout {
        self.layout.open_doors = open_doors;
        self.layout
    }
}

impl PlacementSink for LayoutRecorder {
    fn place_room(&mut self, template: &RoomTemplate, origin: Position) -> PlacementHandle {
        let handle = PlacementHandle::new();
        self.layout.rooms.push(PlacedRoom {
            handle,
            template: template.id(),
            name: template.name().to_string(),
            role: template.role(),
            origin,
            cells: template.cells_at(origin),
            doors: template.doors_at(origin),
        });
        handle
    }

    fn place_hallway(&mut self, hallway: &HallwayTemplate, door: &Door) -> PlacementHandle {
        let handle = PlacementHandle::new();
        self.layout.hallways.push(PlacedHallway {
            handle,
            name: hallway.name.clone(),
            axis: hallway.axis,
            anchor: *door,
        });
        handle
    }

    fn dispose(&mut self, handle: PlacementHandle) {
        self.layout.rooms.retain(|room| room.handle != handle);
        self.layout.hallways.retain(|hallway| hallway.handle != handle);
    }
}

fn invalid(message: String) -> RoomweaveError {
    RoomweaveError::InvalidLayout(message)
}

/// Checks the guarantees every successful generation provides.
///
/// - exactly one start room, at the configured start cell
/// - exactly one target room
/// - at least `max_size` rooms
/// - pairwise disjoint footprints, all inside the bound
/// - one hallway per non-start room, each across a real connection
/// - every door either connected to another room or reported open
/// - every room reachable from the start through connected doors
pub fn validate_layout(layout: &Layout, config: &GenerationConfig) -> RoomweaveResult<()> {
    let starts: Vec<&PlacedRoom> = layout.rooms_with_role(RoomRole::Start).collect();
    let [start] = starts.as_slice() else {
        return Err(invalid(format!(
            "expected exactly one start room, found {}",
            starts.len()
        )));
    };
    if start.origin != config.start {
        return Err(invalid(format!(
            "start room placed at {} instead of {}",
            start.origin, config.start
        )));
    }

    let targets = layout.rooms_with_role(RoomRole::Target).count();
    if targets != 1 {
        return Err(invalid(format!(
            "expected exactly one target room, found {}",
            targets
        )));
    }

    if layout.room_count() < config.max_size as usize {
        return Err(invalid(format!(
            "{} rooms placed, fewer than the required {}",
            layout.room_count(),
            config.max_size
        )));
    }

    let bounds = config.bounds();
    let mut claimed = HashSet::new();
    for room in &layout.rooms {
        for &cell in &room.cells {
            if !bounds.contains(cell) {
                return Err(invalid(format!(
                    "room '{}' covers {} outside bound {}",
                    room.name, cell, config.bound
                )));
            }
            if !claimed.insert(cell) {
                return Err(invalid(format!(
                    "room '{}' overlaps another room at {}",
                    room.name, cell
                )));
            }
        }
    }

    // Door slot -> index of the room owning it.
    let mut slots: HashMap<(Position, Direction), usize> = HashMap::new();
    for (index, room) in layout.rooms.iter().enumerate() {
        for door in &room.doors {
            slots.insert((door.position, door.direction), index);
        }
    }
    let partner = |door: &Door| {
        let slot = door.matching();
        slots.get(&(slot.position, slot.direction)).copied()
    };

    let expected_hallways = layout.room_count().saturating_sub(1);
    if layout.hallways.len() != expected_hallways {
        return Err(invalid(format!(
            "{} hallways for {} rooms, expected {}",
            layout.hallways.len(),
            layout.room_count(),
            expected_hallways
        )));
    }
    for hallway in &layout.hallways {
        if hallway.axis != hallway.anchor.axis() {
            return Err(invalid(format!(
                "hallway '{}' is {:?} but its door faces {}",
                hallway.name, hallway.axis, hallway.anchor.direction
            )));
        }
        let anchored = slots.contains_key(&(hallway.anchor.position, hallway.anchor.direction));
        if !anchored || partner(&hallway.anchor).is_none() {
            return Err(invalid(format!(
                "hallway '{}' at {} does not join two rooms",
                hallway.name, hallway.anchor.position
            )));
        }
    }

    let mut neighbours: Vec<Vec<usize>> = vec![Vec::new(); layout.room_count()];
    for (index, room) in layout.rooms.iter().enumerate() {
        for door in &room.doors {
            match partner(door) {
                Some(other) if other != index => neighbours[index].push(other),
                _ => {
                    let reported = layout.open_doors.iter().any(|open| open.same_slot(door));
                    if !reported {
                        return Err(invalid(format!(
                            "{} door of '{}' at {} is neither connected nor reported open",
                            door.direction, room.name, door.position
                        )));
                    }
                }
            }
        }
    }

    let start_index = layout
        .rooms
        .iter()
        .position(|room| room.role == RoomRole::Start)
        .unwrap_or_default();
    let reached: HashSet<usize> =
        bfs_reach(start_index, |&node| neighbours[node].clone()).collect();
    if reached.len() != layout.room_count() {
        if let Some(room) = (0..layout.room_count())
            .find(|index| !reached.contains(index))
            .map(|index| &layout.rooms[index])
        {
            return Err(invalid(format!(
                "room '{}' at {} is unreachable from the start",
                room.name, room.origin
            )));
        }
    }

    Ok(())
}
