//! Property tests: any map the builtin catalog closes keeps every guarantee.

use proptest::prelude::*;
use roomweave::{
    validate_layout, Catalog, Direction, GenerationConfig, Generator, LayoutGenerator, Position,
    RoomRole, RoomweaveError,
};
use std::collections::HashSet;

fn arb_config() -> impl Strategy<Value = GenerationConfig> {
    (any::<u64>(), 2u32..8, 1u32..400, 1i32..8, any::<bool>()).prop_map(
        |(seed, max_size, threshold, bound, strict)| GenerationConfig {
            seed,
            max_size,
            threshold,
            bound,
            start: Position::origin(),
            strict_target_closure: strict,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_successful_layouts_validate(config in arb_config()) {
        let generator = LayoutGenerator::new(Catalog::builtin());

        match generator.generate_seeded(&config) {
            Ok(layout) => {
                prop_assert!(validate_layout(&layout, &config).is_ok());
                prop_assert!(layout.room_count() >= config.max_size as usize);
                prop_assert_eq!(layout.rooms_with_role(RoomRole::Start).count(), 1);
                prop_assert_eq!(layout.rooms_with_role(RoomRole::Target).count(), 1);
                prop_assert_eq!(layout.hallways.len(), layout.room_count() - 1);

                let cells: Vec<Position> = layout.occupied_cells().collect();
                let unique: HashSet<Position> = cells.iter().copied().collect();
                prop_assert_eq!(cells.len(), unique.len());
                prop_assert!(cells.iter().all(|cell| config.bounds().contains(*cell)));

                if config.strict_target_closure {
                    let target = layout.target().map(|room| room.doors.len()).unwrap_or(0);
                    prop_assert!(layout.open_doors.len() < target);
                }
            }
            Err(RoomweaveError::GenerationFailed { iterations, .. }) => {
                prop_assert!(iterations <= config.threshold + 1);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_same_seed_same_layout(config in arb_config()) {
        let generator = LayoutGenerator::default();
        let first = generator.generate_seeded(&config);
        let second = generator.generate_seeded(&config);

        match (first, second) {
            (Ok(a), Ok(b)) => {
                let cells_a: Vec<Position> = a.occupied_cells().collect();
                let cells_b: Vec<Position> = b.occupied_cells().collect();
                prop_assert_eq!(cells_a, cells_b);
                prop_assert_eq!(a.open_doors, b.open_doors);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "same seed produced different outcomes"),
        }
    }

    #[test]
    fn prop_matching_is_an_involution(x in -50i32..50, y in -50i32..50, side in 0usize..4) {
        let door = roomweave::Door::new(Position::new(x, y), Direction::all()[side]);
        let slot = door.matching();

        prop_assert_eq!(slot.matching(), door);
        prop_assert_eq!(slot.direction, door.direction.inverse());
        prop_assert_eq!(slot.position.manhattan_distance(door.position), 1);
    }
}

#[test]
fn test_generator_trait_validates_its_own_output() {
    let generator = LayoutGenerator::default();
    let mut closed = 0;

    for seed in 0..30 {
        let config = GenerationConfig::for_testing(seed);
        let mut rng = roomweave::utils::create_rng(&config);
        if let Ok(layout) = generator.generate(&config, &mut rng) {
            assert!(generator.validate(&layout, &config).is_ok());
            closed += 1;
        }
    }

    assert!(closed > 0, "no builtin run closed in 30 seeds");
}
