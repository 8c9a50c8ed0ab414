//! # Backtracking Search
//!
//! Depth-first placement of catalog rooms onto open doors.
//!
//! Each call handles one depth level. It shuffles the frontier, and for every
//! open door first tries to close the map with the target room, then tries
//! each ordinary room whose door fits the door's matching slot. A candidate
//! that stays in bounds and clear of occupied cells produces a child state
//! and a recursive call. The first successful child wins; its placements are
//! collected while the recursion unwinds, so they come out deepest first.
//!
//! Two counters are shared by the whole run instead of being copied per
//! branch: the attempt counter behind the iteration threshold and the flag
//! recording that the singleton target has been placed.

use crate::{
    Axis, BranchOrder, Bounds, Catalog, Door, GenerationConfig, Position, RoomTemplate,
    SearchState, TemplateId,
};
use log::{debug, trace, warn};
use std::fmt;

/// Why a run ended without a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureCause {
    /// Every ordering of the reachable search space was tried
    Exhausted,
    /// The global attempt budget ran out
    ThresholdExceeded,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCause::Exhausted => f.write_str("search space exhausted"),
            FailureCause::ThresholdExceeded => f.write_str("iteration threshold exceeded"),
        }
    }
}

/// A finalized placement, in the order it must be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Room { template: TemplateId, origin: Position },
    Hallway { axis: Axis, door: Door },
}

impl Placement {
    fn room(template: &RoomTemplate, origin: Position) -> Self {
        Placement::Room {
            template: template.id(),
            origin,
        }
    }

    /// Connector across `door`, oriented by the door's axis.
    fn hallway(door: &Door) -> Self {
        Placement::Hallway {
            axis: door.axis(),
            door: *door,
        }
    }
}

/// Result of a successful search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Placements beyond the start room, deepest first
    pub placements: Vec<Placement>,
    /// Doors left without a neighbour when the target closed the map
    pub open_doors: Vec<Door>,
    /// Recursive attempts spent
    pub iterations: u32,
}

/// Result of a failed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFailure {
    pub cause: FailureCause,
    pub iterations: u32,
}

/// Run-wide mutable state, shared by every branch.
#[derive(Debug, Clone, Copy, Default)]
struct SearchBudget {
    iterations: u32,
    target_placed: bool,
}

#[derive(Debug, Default)]
struct Closure {
    placements: Vec<Placement>,
    open_doors: Vec<Door>,
}

/// One backtracking run over a catalog.
pub struct BacktrackingSearch<'a, O: BranchOrder> {
    catalog: &'a Catalog,
    config: &'a GenerationConfig,
    bounds: Bounds,
    order: &'a mut O,
    budget: SearchBudget,
}

impl<'a, O: BranchOrder> BacktrackingSearch<'a, O> {
    pub fn new(catalog: &'a Catalog, config: &'a GenerationConfig, order: &'a mut O) -> Self {
        Self {
            catalog,
            config,
            bounds: config.bounds(),
            order,
            budget: SearchBudget::default(),
        }
    }

    /// Searches outward from a state holding only the start room.
    pub fn run(mut self, initial: &SearchState) -> Result<Completion, SearchFailure> {
        let outcome = self.explore(initial, 1);
        let iterations = self.budget.iterations;

        match outcome {
            Ok(closure) => Ok(Completion {
                placements: closure.placements,
                open_doors: closure.open_doors,
                iterations,
            }),
            Err(cause) => Err(SearchFailure { cause, iterations }),
        }
    }

    fn explore(&mut self, state: &SearchState, depth: u32) -> Result<Closure, FailureCause> {
        self.budget.iterations += 1;
        if self.budget.iterations > self.config.threshold {
            warn!("Iteration threshold hit at depth {}", depth);
            return Err(FailureCause::ThresholdExceeded);
        }

        if state.open_doors().is_empty() {
            return if self.budget.target_placed && depth >= self.config.max_size {
                Ok(Closure::default())
            } else {
                Err(FailureCause::Exhausted)
            };
        }

        let catalog = self.catalog;
        let mut doors = state.open_doors().to_vec();
        self.order.arrange(&mut doors);

        for door in &doors {
            let slot = door.matching();

            if let Some(closure) = self.try_place_target(state, door, &slot, depth) {
                return Ok(closure);
            }

            let mut candidates: Vec<&RoomTemplate> = catalog.rooms().iter().collect();
            self.order.arrange(&mut candidates);

            for room in candidates {
                let Some((origin, cells)) = self.fit(room, &slot, state) else {
                    continue;
                };

                let next = state.attach(door, cells, room.doors_at(origin));

                if depth + 1 == self.config.max_size && next.open_doors().len() > 1 {
                    trace!(
                        "Pruned '{}' at {}: {} doors left open at full size",
                        room.name(),
                        origin,
                        next.open_doors().len()
                    );
                    continue;
                }

                match self.explore(&next, depth + 1) {
                    Ok(mut closure) => {
                        closure.placements.push(Placement::room(room, origin));
                        closure.placements.push(Placement::hallway(door));
                        return Ok(closure);
                    }
                    Err(FailureCause::ThresholdExceeded) => {
                        return Err(FailureCause::ThresholdExceeded);
                    }
                    Err(FailureCause::Exhausted) => {}
                }
            }
        }

        Err(FailureCause::Exhausted)
    }

    /// Tries to close the map by placing the target on `door`.
    fn try_place_target(
        &mut self,
        state: &SearchState,
        door: &Door,
        slot: &Door,
        depth: u32,
    ) -> Option<Closure> {
        if self.budget.target_placed || depth + 1 < self.config.max_size {
            return None;
        }

        let catalog = self.catalog;
        let target = catalog.target();
        let (origin, _) = self.fit(target, slot, state)?;

        let remaining = state.without_door(door).open_doors().to_vec();
        if self.config.strict_target_closure && !remaining.is_empty() {
            debug!(
                "Target fits at {} but {} doors are still open",
                origin,
                remaining.len()
            );
            return None;
        }

        self.budget.target_placed = true;

        let mut open_doors = remaining;
        open_doors.extend(
            target
                .doors_at(origin)
                .into_iter()
                .filter(|target_door| !target_door.same_slot(slot)),
        );

        Some(Closure {
            placements: vec![Placement::room(target, origin), Placement::hallway(door)],
            open_doors,
        })
    }

    /// Origin and cells for `room` filling `slot`, if it fits in bounds and free space.
    fn fit(
        &self,
        room: &RoomTemplate,
        slot: &Door,
        state: &SearchState,
    ) -> Option<(Position, Vec<Position>)> {
        let origin = room.origin_for(slot)?;
        if !self.bounds.contains(origin) {
            return None;
        }

        let cells = room.cells_at(origin);
        if !self.bounds.contains_all(&cells) || !state.is_vacant(&cells) {
            return None;
        }

        Some((origin, cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, FixedOrder, HallwayTemplate, ReverseOrder};

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

    fn line_catalog(target_sides: &[Direction]) -> Catalog {
        Catalog::new(
            cell("start", &[Direction::East]),
            cell("target", target_sides),
            vec![cell("corridor", &[Direction::West, Direction::East])],
            HallwayTemplate::new("v", Axis::Vertical),
            HallwayTemplate::new("h", Axis::Horizontal),
        )
        .unwrap()
    }

    fn config(max_size: u32, threshold: u32, bound: i32) -> GenerationConfig {
        GenerationConfig {
            max_size,
            threshold,
            bound,
            ..GenerationConfig::new(0)
        }
    }

    fn run(catalog: &Catalog, config: &GenerationConfig) -> Result<Completion, SearchFailure> {
        let initial = SearchState::seeded(catalog.start(), config.start);
        let mut order = FixedOrder;
        BacktrackingSearch::new(catalog, config, &mut order).run(&initial)
    }

    #[test]
    fn test_line_closes_with_target() {
        let catalog = line_catalog(&[Direction::West]);
        let completion = run(&catalog, &config(3, 1000, 10)).unwrap();

        assert_eq!(
            completion.placements,
            vec![
                Placement::Room {
                    template: catalog.target().id(),
                    origin: Position::new(2, 0)
                },
                Placement::Hallway {
                    axis: Axis::Horizontal,
                    door: Door::new(Position::new(1, 0), Direction::East)
                        .owned_by(catalog.rooms()[0].id())
                },
                Placement::Room {
                    template: catalog.rooms()[0].id(),
                    origin: Position::new(1, 0)
                },
                Placement::Hallway {
                    axis: Axis::Horizontal,
                    door: Door::new(Position::origin(), Direction::East)
                        .owned_by(catalog.start().id())
                },
            ]
        );
        assert!(completion.open_doors.is_empty());
        assert_eq!(completion.iterations, 2);
    }

    #[test]
    fn test_zero_bound_exhausts() {
        let catalog = line_catalog(&[Direction::West]);
        let failure = run(&catalog, &config(3, 1000, 0)).unwrap_err();
        assert_eq!(failure.cause, FailureCause::Exhausted);
        assert_eq!(failure.iterations, 1);
    }

    #[test]
    fn test_target_without_matching_door_exhausts() {
        let catalog = line_catalog(&[Direction::North]);
        let failure = run(&catalog, &config(3, 1000, 10)).unwrap_err();
        assert_eq!(failure.cause, FailureCause::Exhausted);
        // Corridors fill x = 1..=10, then the bound stops the line.
        assert_eq!(failure.iterations, 11);
    }

    #[test]
    fn test_threshold_stops_search() {
        let catalog = line_catalog(&[Direction::North]);
        let failure = run(&catalog, &config(3, 4, 10)).unwrap_err();
        assert_eq!(failure.cause, FailureCause::ThresholdExceeded);
        assert_eq!(failure.iterations, 5);
    }

    #[test]
    fn test_pruning_skips_wide_frontier_at_full_size() {
        // The only room adds two doors, so reaching max size always leaves
        // more than one open door and every candidate is pruned.
        let catalog = Catalog::new(
            cell("start", &[Direction::East]),
            cell("target", &[Direction::East]),
            vec![cell("tee", &[Direction::West, Direction::North, Direction::South])],
            HallwayTemplate::new("v", Axis::Vertical),
            HallwayTemplate::new("h", Axis::Horizontal),
        )
        .unwrap();

        let failure = run(&catalog, &config(2, 1000, 10)).unwrap_err();
        assert_eq!(failure.cause, FailureCause::Exhausted);
        assert_eq!(failure.iterations, 1);
    }

    #[test]
    fn test_strict_closure_rejects_dangling_doors() {
        let catalog = Catalog::new(
            cell("start", &[Direction::East, Direction::South]),
            cell("target", &[Direction::West]),
            vec![cell("corridor", &[Direction::West, Direction::East])],
            HallwayTemplate::new("v", Axis::Vertical),
            HallwayTemplate::new("h", Axis::Horizontal),
        )
        .unwrap();

        let lenient = run(&catalog, &config(2, 1000, 10)).unwrap();
        assert_eq!(lenient.open_doors.len(), 1);
        assert_eq!(lenient.open_doors[0].direction, Direction::South);

        let strict = GenerationConfig {
            strict_target_closure: true,
            ..config(2, 1000, 10)
        };
        assert!(run(&catalog, &strict).is_err());
    }

    #[test]
    fn test_target_extra_doors_are_reported_open() {
        let catalog = line_catalog(&[Direction::West, Direction::North]);
        let completion = run(&catalog, &config(2, 1000, 10)).unwrap();
        assert_eq!(completion.open_doors.len(), 1);
        assert_eq!(completion.open_doors[0].direction, Direction::North);
        assert_eq!(completion.open_doors[0].position, Position::new(1, 0));
        assert_eq!(completion.open_doors[0].owner, Some(catalog.target().id()));
    }

    #[test]
    fn test_blocked_target_falls_back_to_ordinary_rooms() {
        // The L-shaped start blocks the two-cell target at x = 1, so a
        // corridor is placed there and the target closes one cell further east.
        let start = RoomTemplate::new(
            "start",
            vec![Position::new(0, 0), Position::new(0, -1), Position::new(1, -1)],
            vec![Door::new(Position::new(0, 0), Direction::East)],
        );
        let target = RoomTemplate::new(
            "target",
            vec![Position::new(0, 0), Position::new(0, -1)],
            vec![Door::new(Position::new(0, 0), Direction::West)],
        );
        let catalog = Catalog::new(
            start,
            target,
            vec![cell("corridor", &[Direction::West, Direction::East])],
            HallwayTemplate::new("v", Axis::Vertical),
            HallwayTemplate::new("h", Axis::Horizontal),
        )
        .unwrap();

        let completion = run(&catalog, &config(2, 1000, 10)).unwrap();
        assert_eq!(completion.placements.len(), 4);
        assert_eq!(
            completion.placements[0],
            Placement::Room {
                template: catalog.target().id(),
                origin: Position::new(2, 0)
            }
        );
        assert_eq!(
            completion.placements[2],
            Placement::Room {
                template: catalog.rooms()[0].id(),
                origin: Position::new(1, 0)
            }
        );
    }

    #[test]
    fn test_candidate_order_decides_the_layout() {
        let hall = RoomTemplate::new(
            "hall",
            vec![Position::new(0, 0), Position::new(1, 0)],
            vec![
                Door::new(Position::new(0, 0), Direction::West),
                Door::new(Position::new(1, 0), Direction::East),
            ],
        );
        let catalog = Catalog::new(
            cell("start", &[Direction::East]),
            cell("target", &[Direction::West]),
            vec![cell("corridor", &[Direction::West, Direction::East]), hall],
            HallwayTemplate::new("v", Axis::Vertical),
            HallwayTemplate::new("h", Axis::Horizontal),
        )
        .unwrap();
        let config = config(3, 1000, 10);
        let initial = SearchState::seeded(catalog.start(), config.start);

        let forward = BacktrackingSearch::new(&catalog, &config, &mut FixedOrder)
            .run(&initial)
            .unwrap();
        let reversed = BacktrackingSearch::new(&catalog, &config, &mut ReverseOrder)
            .run(&initial)
            .unwrap();

        let corridor = catalog.rooms()[0].id();
        let hall = catalog.rooms()[1].id();
        assert_eq!(
            forward.placements[0],
            Placement::Room {
                template: catalog.target().id(),
                origin: Position::new(2, 0)
            }
        );
        assert_eq!(
            forward.placements[2],
            Placement::Room {
                template: corridor,
                origin: Position::new(1, 0)
            }
        );
        assert_eq!(
            reversed.placements[0],
            Placement::Room {
                template: catalog.target().id(),
                origin: Position::new(3, 0)
            }
        );
        assert_eq!(
            reversed.placements[2],
            Placement::Room {
                template: hall,
                origin: Position::new(1, 0)
            }
        );
        assert_eq!(forward.iterations, reversed.iterations);
    }

    #[test]
    fn test_target_out_of_bounds_is_rejected() {
        let target = RoomTemplate::new(
            "target",
            vec![Position::new(0, 0), Position::new(0, -1)],
            vec![Door::new(Position::new(0, 0), Direction::West)],
        );
        let catalog = Catalog::new(
            cell("start", &[Direction::East]),
            target,
            vec![cell("corridor", &[Direction::West, Direction::East])],
            HallwayTemplate::new("v", Axis::Vertical),
            HallwayTemplate::new("h", Axis::Horizontal),
        )
        .unwrap();

        // Every target origin on the top row pokes its second cell past the bound.
        let mut config = config(2, 1000, 10);
        config.start = Position::new(0, -10);
        let failure = run(&catalog, &config).unwrap_err();
        assert_eq!(failure.cause, FailureCause::Exhausted);
    }
}
