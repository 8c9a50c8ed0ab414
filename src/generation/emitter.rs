//! # Placement Emitter
//!
//! Bridge between the search and whatever materializes the map.
//!
//! The core never draws anything itself. It hands finalized rooms and
//! hallway connectors to a [`PlacementSink`] and keeps the returned handles
//! so the previous map can be disposed of before the next run.

use crate::{
    Catalog, Door, HallwayTemplate, Placement, Position, RoomTemplate, RoomweaveError,
    RoomweaveResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier for something a sink materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementHandle(pub Uuid);

impl PlacementHandle {
    /// Creates a new unique handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlacementHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlacementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// External collaborator that materializes placements.
///
/// Requests are fire-and-forget: the generator only keeps the handle so it
/// can later ask for disposal.
pub trait PlacementSink {
    /// Materializes a room with its template origin at `origin`.
    fn place_room(&mut self, template: &RoomTemplate, origin: Position) -> PlacementHandle;

    /// Materializes a connector anchored on the absolute `door`.
    fn place_hallway(&mut self, hallway: &HallwayTemplate, door: &Door) -> PlacementHandle;

    /// Removes something previously placed. Unknown handles are ignored.
    fn dispose(&mut self, handle: PlacementHandle);
}

/// Sends search placements to `sink` in order, returning their handles.
///
/// All or nothing: if a placement cannot be resolved, everything already
/// emitted by this call is disposed before the error is returned.
pub fn emit<S: PlacementSink + ?Sized>(
    catalog: &Catalog,
    placements: &[Placement],
    sink: &mut S,
) -> RoomweaveResult<Vec<PlacementHandle>> {
    let mut handles = Vec::with_capacity(placements.len());

    for placement in placements {
        let handle = match placement {
            Placement::Room { template: id, origin } => match catalog.template(*id) {
                Some(template) => sink.place_room(template, *origin),
                None => {
                    for handle in handles.drain(..) {
                        sink.dispose(handle);
                    }
                    return Err(RoomweaveError::InvalidState(format!(
                        "Placement refers to unknown template {}",
                        id
                    )));
                }
            },
            Placement::Hallway { axis, door } => sink.place_hallway(catalog.hallway(*axis), door),
        };
        handles.push(handle);
    }

    Ok(handles)
}
