//! # ASCII Canvas
//!
//! Text renderer that materializes placements as characters.
//!
//! Grid cell `(x, y)` is drawn at canvas column `2x`, row `2y`. The odd
//! columns and rows between cells carry either room interior (two cells of
//! the same room) or a hallway connector (two rooms joined by doors).

use crate::{
    Axis, Door, HallwayTemplate, PlacementHandle, PlacementSink, Position, RoomRole, RoomTemplate,
};
use std::collections::{HashMap, HashSet};

/// Glyph for start room cells.
pub const START_GLYPH: char = '@';
/// Glyph for the target room cells.
pub const TARGET_GLYPH: char = '$';
/// Glyph for ordinary room cells.
pub const ROOM_GLYPH: char = '#';
/// Glyph for horizontal hallway connectors.
pub const HORIZONTAL_HALLWAY_GLYPH: char = '-';
/// Glyph for vertical hallway connectors.
pub const VERTICAL_HALLWAY_GLYPH: char = '|';

type CanvasPoint = (i32, i32);

/// Character canvas acting as a placement sink.
///
/// # Examples
///
/// ```
/// use roomweave::{AsciiCanvas, Catalog, PlacementSink, Position};
///
/// let catalog = Catalog::builtin();
/// let mut canvas = AsciiCanvas::new();
/// let handle = canvas.place_room(catalog.start(), Position::origin());
/// assert_eq!(canvas.render(), "@");
///
/// canvas.dispose(handle);
/// assert!(canvas.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AsciiCanvas {
    glyphs: HashMap<CanvasPoint, char>,
    painted: HashMap<PlacementHandle, Vec<CanvasPoint>>,
}

impl AsciiCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph drawn for grid cell `cell`, if any.
    pub fn glyph_at(&self, cell: Position) -> Option<char> {
        self.glyphs.get(&(cell.x * 2, cell.y * 2)).copied()
    }

    /// Renders the canvas, cropped to its painted area.
    pub fn render(&self) -> String {
        let Some(min_x) = self.glyphs.keys().map(|&(x, _)| x).min() else {
            return String::new();
        };
        let max_x = self.glyphs.keys().map(|&(x, _)| x).max().unwrap_or(min_x);
        let min_y = self.glyphs.keys().map(|&(_, y)| y).min().unwrap_or_default();
        let max_y = self.glyphs.keys().map(|&(_, y)| y).max().unwrap_or(min_y);

        (min_y..=max_y)
            .map(|y| {
                let row: String = (min_x..=max_x)
                    .map(|x| self.glyphs.get(&(x, y)).copied().unwrap_or(' '))
                    .collect();
                row.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn paint(&mut self, handle: PlacementHandle, points: Vec<(CanvasPoint, char)>) {
        let mut owned = Vec::with_capacity(points.len());
        for (point, glyph) in points {
            self.glyphs.insert(point, glyph);
            owned.push(point);
        }
        self.painted.insert(handle, owned);
    }
}

/// Gets the display character for a room role.
fn glyph_for(role: RoomRole) -> char {
    match role {
        RoomRole::Start => START_GLYPH,
        RoomRole::Target => TARGET_GLYPH,
        RoomRole::Ordinary => ROOM_GLYPH,
    }
}

impl PlacementSink for AsciiCanvas {
    fn place_room(&mut self, template: &RoomTemplate, origin: Position) -> PlacementHandle {
        let glyph = glyph_for(template.role());
        let cells = template.cells_at(origin);
        let covered: HashSet<Position> = cells.iter().copied().collect();

        let mut points = Vec::new();
        for cell in &cells {
            points.push(((cell.x * 2, cell.y * 2), glyph));
            if covered.contains(&Position::new(cell.x + 1, cell.y)) {
                points.push(((cell.x * 2 + 1, cell.y * 2), glyph));
            }
            if covered.contains(&Position::new(cell.x, cell.y + 1)) {
                points.push(((cell.x * 2, cell.y * 2 + 1), glyph));
            }
            let block = [
                Position::new(cell.x + 1, cell.y),
                Position::new(cell.x, cell.y + 1),
                Position::new(cell.x + 1, cell.y + 1),
            ];
            if block.iter().all(|corner| covered.contains(corner)) {
                points.push(((cell.x * 2 + 1, cell.y * 2 + 1), glyph));
            }
        }

        let handle = PlacementHandle::new();
        self.paint(handle, points);
        handle
    }

    fn place_hallway(&mut self, hallway: &HallwayTemplate, door: &Door) -> PlacementHandle {
        let delta = door.direction.to_delta();
        let point = (door.position.x * 2 + delta.x, door.position.y * 2 + delta.y);
        let glyph = match hallway.axis {
            Axis::Horizontal => HORIZONTAL_HALLWAY_GLYPH,
            Axis::Vertical => VERTICAL_HALLWAY_GLYPH,
        };

        let handle = PlacementHandle::new();
        self.paint(handle, vec![(point, glyph)]);
        handle
    }

    fn dispose(&mut self, handle: PlacementHandle) {
        if let Some(points) = self.painted.remove(&handle) {
            for point in points {
                self.glyphs.remove(&point);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, Direction};

    #[test]
    fn test_line_render() {
        let catalog = Catalog::builtin();
        let corridor = catalog
            .rooms()
            .iter()
            .find(|room| room.name() == "corridor_ew")
            .unwrap();

        let mut canvas = AsciiCanvas::new();
        canvas.place_room(catalog.start(), Position::origin());
        canvas.place_room(corridor, Position::new(1, 0));
        canvas.place_hallway(
            catalog.hallway(Axis::Horizontal),
            &Door::new(Position::origin(), Direction::East),
        );

        assert_eq!(canvas.render(), "@-#");
        assert_eq!(canvas.glyph_at(Position::new(1, 0)), Some(ROOM_GLYPH));
        assert_eq!(canvas.glyph_at(Position::new(2, 0)), None);
    }

    #[test]
    fn test_multi_cell_room_is_solid() {
        let catalog = Catalog::builtin();
        let chamber = catalog
            .rooms()
            .iter()
            .find(|room| room.name() == "chamber")
            .unwrap();

        let mut canvas = AsciiCanvas::new();
        canvas.place_room(chamber, Position::new(-1, -1));
        assert_eq!(canvas.render(), "###\n###\n###");
    }

    #[test]
    fn test_vertical_hallway_and_negative_coordinates() {
        let catalog = Catalog::builtin();
        let mut canvas = AsciiCanvas::new();
        canvas.place_room(catalog.target(), Position::new(0, -1));
        canvas.place_hallway(
            catalog.hallway(Axis::Vertical),
            &Door::new(Position::new(0, -1), Direction::South),
        );
        canvas.place_room(catalog.start(), Position::origin());

        assert_eq!(canvas.render(), "$\n|\n@");
    }

    #[test]
    fn test_dispose_erases_only_its_placement() {
        let catalog = Catalog::builtin();
        let mut canvas = AsciiCanvas::new();
        canvas.place_room(catalog.start(), Position::origin());
        let target = canvas.place_room(catalog.target(), Position::new(2, 0));

        assert_eq!(canvas.render(), "@   $");
        canvas.dispose(target);
        assert_eq!(canvas.render(), "@");
        canvas.dispose(PlacementHandle::new());
        assert_eq!(canvas.render(), "@");
    }

    #[test]
    fn test_empty_canvas_renders_empty_string() {
        assert_eq!(AsciiCanvas::new().render(), "");
    }
}
