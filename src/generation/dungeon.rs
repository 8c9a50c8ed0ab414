//! # Dungeon Generation
//!
//! Entry points that run the backtracking search and deliver its result.
//!
//! [`DungeonGenerator`] is the stateful generator a game loop holds on to:
//! every call disposes of the previous map through the sink, places the start
//! room, searches, and emits the finished map. [`LayoutGenerator`] wraps it in
//! the pure [`Generator`] interface and returns a recorded [`Layout`].

use crate::{
    emit, utils, validate_layout, BacktrackingSearch, BranchOrder, Catalog, Door,
    GenerationConfig, Generator, Layout, LayoutRecorder, Placement, PlacementHandle,
    PlacementSink, RandomOrder, RoomweaveError, RoomweaveResult, SearchState,
};
use log::{info, warn};
use rand::rngs::StdRng;

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Rooms placed, start room included
    pub rooms_placed: usize,
    pub hallways_placed: usize,
    /// Doors left without a neighbour
    pub open_doors: Vec<Door>,
    /// Recursive attempts spent
    pub iterations: u32,
}

/// Stateful map generator.
///
/// Holds the handles of everything it placed so the next run can clear them.
/// Runs are strictly sequential; one generator drives one sink.
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    catalog: Catalog,
    config: GenerationConfig,
    handles: Vec<PlacementHandle>,
}

impl DungeonGenerator {
    /// Creates a generator after validating the configuration.
    pub fn new(catalog: Catalog, config: GenerationConfig) -> RoomweaveResult<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            config,
            handles: Vec::new(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Replaces the configuration used by subsequent runs.
    pub fn set_config(&mut self, config: GenerationConfig) -> RoomweaveResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Handles of the current map, in emission order.
    pub fn handles(&self) -> &[PlacementHandle] {
        &self.handles
    }

    /// Disposes of everything placed by the previous run.
    pub fn clear<S: PlacementSink + ?Sized>(&mut self, sink: &mut S) {
        for handle in self.handles.drain(..) {
            sink.dispose(handle);
        }
    }

    /// Runs one full generation attempt.
    ///
    /// The start room is emitted first; on success the rest follows deepest
    /// placement first. On failure the start room is disposed again and
    /// nothing remains placed.
    pub fn try_generate<S, O>(
        &mut self,
        sink: &mut S,
        order: &mut O,
    ) -> RoomweaveResult<GenerationReport>
    where
        S: PlacementSink + ?Sized,
        O: BranchOrder,
    {
        self.clear(sink);

        let start = self.catalog.start();
        let origin = self.config.start;
        let start_handle = sink.place_room(start, origin);
        let initial = SearchState::seeded(start, origin);

        let search = BacktrackingSearch::new(&self.catalog, &self.config, order);
        let completion = match search.run(&initial) {
            Ok(completion) => completion,
            Err(failure) => {
                sink.dispose(start_handle);
                return Err(RoomweaveError::GenerationFailed {
                    cause: failure.cause,
                    iterations: failure.iterations,
                });
            }
        };

        let emitted = match emit(&self.catalog, &completion.placements, sink) {
            Ok(emitted) => emitted,
            Err(err) => {
                sink.dispose(start_handle);
                return Err(err);
            }
        };
        self.handles.push(start_handle);
        self.handles.extend(emitted);

        let rooms = completion
            .placements
            .iter()
            .filter(|placement| matches!(placement, Placement::Room { .. }))
            .count();
        let report = GenerationReport {
            rooms_placed: rooms + 1,
            hallways_placed: completion.placements.len() - rooms,
            open_doors: completion.open_doors,
            iterations: completion.iterations,
        };

        info!(
            "Generated {} rooms in {} iterations ({} doors left open)",
            report.rooms_placed,
            report.iterations,
            report.open_doors.len()
        );
        Ok(report)
    }

    /// Runs one generation attempt and reports whether it succeeded.
    pub fn generate<S, O>(&mut self, sink: &mut S, order: &mut O) -> bool
    where
        S: PlacementSink + ?Sized,
        O: BranchOrder,
    {
        match self.try_generate(sink, order) {
            Ok(_) => true,
            Err(err) => {
                warn!("Dungeon generation failed: {}", err);
                false
            }
        }
    }
}

/// Pure generator producing a recorded [`Layout`] from a seeded RNG.
///
/// # Examples
///
/// ```
/// use roomweave::{utils, Catalog, GenerationConfig, Generator, LayoutGenerator};
///
/// let generator = LayoutGenerator::new(Catalog::builtin());
/// let config = GenerationConfig::new(7);
/// let mut rng = utils::create_rng(&config);
///
/// if let Ok(layout) = generator.generate(&config, &mut rng) {
///     assert!(generator.validate(&layout, &config).is_ok());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LayoutGenerator {
    catalog: Catalog,
}

impl LayoutGenerator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Generates with an RNG seeded from `config.seed`.
    pub fn generate_seeded(&self, config: &GenerationConfig) -> RoomweaveResult<Layout> {
        let mut rng = utils::create_rng(config);
        self.generate(config, &mut rng)
    }
}

impl Default for LayoutGenerator {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

impl Generator<Layout> for LayoutGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> RoomweaveResult<Layout> {
        let mut dungeon = DungeonGenerator::new(self.catalog.clone(), config.clone())?;
        let mut recorder = LayoutRecorder::new();
        let mut order = RandomOrder::new(rng);

        let report = dungeon.try_generate(&mut recorder, &mut order)?;
        Ok(recorder.into_layout(report.open_doors))
    }

    fn validate(&self, layout: &Layout, config: &GenerationConfig) -> RoomweaveResult<()> {
        validate_layout(layout, config)
    }

    fn generator_type(&self) -> &'static str {
        "LayoutGenerator"
    }
}
