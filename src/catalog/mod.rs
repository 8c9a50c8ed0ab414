//! # Catalog Module
//!
//! The fixed set of templates a generation run draws from.
//!
//! A catalog holds exactly one start template, exactly one target template,
//! any number of ordinary rooms, and the two hallway connectors. Catalogs can
//! be built in code, loaded from JSON, or taken from [`Catalog::builtin`].

pub mod builtin;
pub mod door;
pub mod room;

pub use door::*;
pub use room::*;

use crate::{Axis, Direction, Position, RoomweaveError, RoomweaveResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Validated template catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    start: RoomTemplate,
    target: RoomTemplate,
    rooms: Vec<RoomTemplate>,
    vertical_hallway: HallwayTemplate,
    horizontal_hallway: HallwayTemplate,
}

impl Catalog {
    /// Builds a catalog, assigning template ids and roles.
    ///
    /// The start template receives id 0, the target id 1, and ordinary rooms
    /// follow in the given order.
    pub fn new(
        start: RoomTemplate,
        target: RoomTemplate,
        rooms: Vec<RoomTemplate>,
        vertical_hallway: HallwayTemplate,
        horizontal_hallway: HallwayTemplate,
    ) -> RoomweaveResult<Self> {
        let catalog = Self::assemble(start, target, rooms, vertical_hallway, horizontal_hallway);
        catalog.validate()?;
        Ok(catalog)
    }

    fn assemble(
        start: RoomTemplate,
        target: RoomTemplate,
        rooms: Vec<RoomTemplate>,
        vertical_hallway: HallwayTemplate,
        horizontal_hallway: HallwayTemplate,
    ) -> Self {
        Self {
            start: start.assign(TemplateId(0), RoomRole::Start),
            target: target.assign(TemplateId(1), RoomRole::Target),
            rooms: rooms
                .into_iter()
                .enumerate()
                .map(|(index, room)| room.assign(TemplateId(index as u32 + 2), RoomRole::Ordinary))
                .collect(),
            vertical_hallway,
            horizontal_hallway,
        }
    }

    /// Parses a catalog from its JSON representation.
    pub fn from_json(json: &str) -> RoomweaveResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        file.into_catalog()
    }

    /// Loads a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> RoomweaveResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the catalog to pretty-printed JSON.
    pub fn to_json(&self) -> RoomweaveResult<String> {
        Ok(serde_json::to_string_pretty(&CatalogFile::from(self))?)
    }

    pub fn start(&self) -> &RoomTemplate {
        &self.start
    }

    pub fn target(&self) -> &RoomTemplate {
        &self.target
    }

    /// Ordinary rooms, in declaration order.
    pub fn rooms(&self) -> &[RoomTemplate] {
        &self.rooms
    }

    /// Every template: start, target, then ordinary rooms.
    pub fn templates(&self) -> impl Iterator<Item = &RoomTemplate> {
        std::iter::once(&self.start)
            .chain(std::iter::once(&self.target))
            .chain(self.rooms.iter())
    }

    pub fn template(&self, id: TemplateId) -> Option<&RoomTemplate> {
        self.templates().find(|template| template.id() == id)
    }

    /// Hallway connector used for doors on the given axis.
    pub fn hallway(&self, axis: Axis) -> &HallwayTemplate {
        match axis {
            Axis::Vertical => &self.vertical_hallway,
            Axis::Horizontal => &self.horizontal_hallway,
        }
    }

    pub fn validate(&self) -> RoomweaveResult<()> {
        if self.rooms.is_empty() {
            return Err(RoomweaveError::InvalidCatalog(
                "Catalog needs at least one ordinary room".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for template in self.templates() {
            template.validate()?;
            if !names.insert(template.name()) {
                return Err(RoomweaveError::InvalidCatalog(format!(
                    "Duplicate room name '{}'",
                    template.name()
                )));
            }
        }

        if self.vertical_hallway.axis != Axis::Vertical {
            return Err(RoomweaveError::InvalidCatalog(format!(
                "Hallway '{}' is registered as vertical but is horizontal",
                self.vertical_hallway.name
            )));
        }
        if self.horizontal_hallway.axis != Axis::Horizontal {
            return Err(RoomweaveError::InvalidCatalog(format!(
                "Hallway '{}' is registered as horizontal but is vertical",
                self.horizontal_hallway.name
            )));
        }

        Ok(())
    }
}

/// On-disk catalog layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    start: TemplateSpec,
    target: TemplateSpec,
    rooms: Vec<TemplateSpec>,
    #[serde(default)]
    hallways: HallwaySpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TemplateSpec {
    name: String,
    footprint: Vec<Position>,
    #[serde(default)]
    doors: Vec<DoorSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DoorSpec {
    position: Position,
    direction: Direction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HallwaySpec {
    vertical: String,
    horizontal: String,
}

impl Default for HallwaySpec {
    fn default() -> Self {
        Self {
            vertical: "vertical_hallway".to_string(),
            horizontal: "horizontal_hallway".to_string(),
        }
    }
}

impl TemplateSpec {
    fn into_template(self) -> RoomTemplate {
        let doors = self
            .doors
            .into_iter()
            .map(|door| Door::new(door.position, door.direction))
            .collect();
        RoomTemplate::new(self.name, self.footprint, doors)
    }
}

impl From<&RoomTemplate> for TemplateSpec {
    fn from(template: &RoomTemplate) -> Self {
        Self {
            name: template.name().to_string(),
            footprint: template.footprint().to_vec(),
            doors: template
                .doors()
                .iter()
                .map(|door| DoorSpec {
                    position: door.position,
                    direction: door.direction,
                })
                .collect(),
        }
    }
}

impl CatalogFile {
    fn into_catalog(self) -> RoomweaveResult<Catalog> {
        Catalog::new(
            self.start.into_template(),
            self.target.into_template(),
            self.rooms.into_iter().map(TemplateSpec::into_template).collect(),
            HallwayTemplate::new(self.hallways.vertical, Axis::Vertical),
            HallwayTemplate::new(self.hallways.horizontal, Axis::Horizontal),
        )
    }
}

impl From<&Catalog> for CatalogFile {
    fn from(catalog: &Catalog) -> Self {
        Self {
            start: catalog.start().into(),
            target: catalog.target().into(),
            rooms: catalog.rooms().iter().map(TemplateSpec::from).collect(),
            hallways: HallwaySpec {
                vertical: catalog.hallway(Axis::Vertical).name.clone(),
                horizontal: catalog.hallway(Axis::Horizontal).name.clone(),
            },
        }
    }
}
