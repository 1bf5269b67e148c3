//! Property tests for the start-of-game allocators.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{HashMap, HashSet};

use crate::domain::allocation::{distribute_paint, distribute_tiles, COLORS_PER_AGENT};

fn agent_ids(max: usize) -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::hash_set(1i64..1000, 2..=max)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn tiles_partition_the_grid(ids in agent_ids(8), grid_size in 8i32..=48) {
        let assignments = distribute_tiles(grid_size, &ids);
        prop_assert_eq!(assignments.len(), (grid_size * grid_size) as usize);

        let cells: HashSet<(i32, i32)> = assignments.iter().map(|&(x, y, _)| (x, y)).collect();
        prop_assert_eq!(cells.len(), assignments.len(), "no cell assigned twice");

        let owners: HashSet<i64> = assignments.iter().map(|&(_, _, o)| o).collect();
        prop_assert_eq!(owners.len(), ids.len(), "every agent owns tiles");
        for o in &owners {
            prop_assert!(ids.contains(o));
        }
    }

    #[test]
    fn paint_totals_cover_the_grid(ids in agent_ids(8), grid_size in 8i32..=48, seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grants = distribute_paint(&ids, grid_size, &mut rng);

        let mut per_agent: HashMap<i64, HashSet<_>> = HashMap::new();
        let mut total = 0i64;
        for &(id, color, qty) in &grants {
            prop_assert!(qty >= 1);
            prop_assert!(per_agent.entry(id).or_default().insert(color), "duplicate grant");
            total += qty as i64;
        }

        for id in &ids {
            prop_assert_eq!(per_agent[id].len(), COLORS_PER_AGENT);
        }
        prop_assert!(total >= (grid_size as i64) * (grid_size as i64));

        let covered: HashSet<_> = grants.iter().map(|&(_, c, _)| c).collect();
        prop_assert_eq!(covered.len(), 8, "all palette colors held by someone");
    }
}
