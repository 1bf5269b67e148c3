//! Start-of-game allocation: tile regions and paint grants.
//!
//! Both functions are pure (randomness comes in through the `Rng`
//! argument), so the allocator can be driven by a seeded generator in
//! tests and by an OS-seeded one in production.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::palette::PALETTE;
use crate::entities::paint_stocks::PaintColor;

/// Every agent starts with exactly this many distinct colors.
pub const COLORS_PER_AGENT: usize = 4;

/// Assigns each agent a contiguous rectangular region of the grid.
///
/// The grid is split recursively along its longer axis, with the split
/// point proportional to the number of agents on each side. Four agents
/// get exact quadrants; other counts get a treemap-style layout. The
/// result is deterministic in the order of `agent_ids`.
///
/// Returns `(x, y, owner_id)` for every cell of the grid.
pub fn distribute_tiles(grid_size: i32, agent_ids: &[i64]) -> Vec<(i32, i32, i64)> {
    let mut assignments = Vec::with_capacity((grid_size * grid_size) as usize);
    if agent_ids.is_empty() {
        return assignments;
    }
    assign_region(agent_ids, 0, 0, grid_size, grid_size, &mut assignments);
    assignments
}

fn assign_region(
    agents: &[i64],
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    out: &mut Vec<(i32, i32, i64)>,
) {
    if agents.len() == 1 {
        for x in x0..x1 {
            for y in y0..y1 {
                out.push((x, y, agents[0]));
            }
        }
        return;
    }

    let mid = agents.len() / 2;
    let (left, right) = agents.split_at(mid);
    let frac = left.len() as f64 / agents.len() as f64;

    if (x1 - x0) >= (y1 - y0) {
        let split = x0 + ((x1 - x0) as f64 * frac).round() as i32;
        assign_region(left, x0, y0, split, y1, out);
        assign_region(right, split, y0, x1, y1, out);
    } else {
        let split = y0 + ((y1 - y0) as f64 * frac).round() as i32;
        assign_region(left, x0, y0, x1, split, out);
        assign_region(right, x0, split, x1, y1, out);
    }
}

/// Grants each agent [`COLORS_PER_AGENT`] distinct colors, with a
/// quantity per color sized so the combined paint covers the whole grid
/// (ceiling division, so odd agent counts never fall short).
///
/// A shuffled round-robin pass makes sure all eight palette colors are
/// held by someone before each agent is topped up to four.
///
/// Returns `(agent_id, color, quantity)` grants.
pub fn distribute_paint(
    agent_ids: &[i64],
    grid_size: i32,
    rng: &mut impl Rng,
) -> Vec<(i64, PaintColor, i32)> {
    let n = agent_ids.len();
    if n == 0 {
        return Vec::new();
    }
    let cells = (grid_size as u64) * (grid_size as u64);
    let per_color = cells.div_ceil(n as u64 * COLORS_PER_AGENT as u64) as i32;

    let mut held: Vec<Vec<PaintColor>> = vec![Vec::new(); n];

    // Coverage pass: round-robin the shuffled palette over the agents.
    let mut shuffled = PALETTE.to_vec();
    shuffled.shuffle(rng);
    for (i, &color) in shuffled.iter().enumerate() {
        let colors = &mut held[i % n];
        if !colors.contains(&color) {
            colors.push(color);
        }
    }

    // Top-up pass: random distinct colors until each agent holds four.
    for colors in &mut held {
        let mut available: Vec<PaintColor> =
            PALETTE.iter().copied().filter(|c| !colors.contains(c)).collect();
        while colors.len() < COLORS_PER_AGENT {
            let idx = rng.random_range(0..available.len());
            colors.push(available.swap_remove(idx));
        }
    }

    agent_ids
        .iter()
        .zip(held)
        .flat_map(|(&id, colors)| colors.into_iter().map(move |color| (id, color, per_color)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn four_agents_get_exact_quadrants() {
        let assignments = distribute_tiles(32, &[1, 2, 3, 4]);
        assert_eq!(assignments.len(), 32 * 32);

        let owner_at: HashMap<(i32, i32), i64> =
            assignments.iter().map(|&(x, y, o)| ((x, y), o)).collect();
        assert_eq!(owner_at[&(0, 0)], 1);
        assert_eq!(owner_at[&(0, 31)], 2);
        assert_eq!(owner_at[&(31, 0)], 3);
        assert_eq!(owner_at[&(31, 31)], 4);

        let mut counts: HashMap<i64, usize> = HashMap::new();
        for &(_, _, o) in &assignments {
            *counts.entry(o).or_default() += 1;
        }
        assert!(counts.values().all(|&c| c == 256));
    }

    #[test]
    fn every_cell_assigned_exactly_once() {
        for agents in [vec![10, 20], vec![1, 2, 3], vec![1, 2, 3, 4, 5, 6, 7]] {
            let assignments = distribute_tiles(16, &agents);
            let cells: HashSet<(i32, i32)> =
                assignments.iter().map(|&(x, y, _)| (x, y)).collect();
            assert_eq!(cells.len(), 16 * 16, "agents={agents:?}");
            assert_eq!(assignments.len(), 16 * 16);

            let owners: HashSet<i64> = assignments.iter().map(|&(_, _, o)| o).collect();
            assert_eq!(owners.len(), agents.len(), "each agent owns at least one tile");
        }
    }

    #[test]
    fn regions_are_rectangles() {
        let assignments = distribute_tiles(16, &[1, 2, 3]);
        let mut bounds: HashMap<i64, (i32, i32, i32, i32)> = HashMap::new();
        let mut counts: HashMap<i64, i32> = HashMap::new();
        for &(x, y, o) in &assignments {
            let b = bounds.entry(o).or_insert((x, y, x, y));
            b.0 = b.0.min(x);
            b.1 = b.1.min(y);
            b.2 = b.2.max(x);
            b.3 = b.3.max(y);
            *counts.entry(o).or_default() += 1;
        }
        for (o, (min_x, min_y, max_x, max_y)) in bounds {
            let area = (max_x - min_x + 1) * (max_y - min_y + 1);
            assert_eq!(area, counts[&o], "agent {o} region is not a full rectangle");
        }
    }

    #[test]
    fn paint_grants_cover_grid_and_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let agents = [1, 2, 3];
        let grants = distribute_paint(&agents, 32, &mut rng);

        let mut per_agent: HashMap<i64, Vec<PaintColor>> = HashMap::new();
        let mut total = 0i64;
        let mut colors = HashSet::new();
        for &(id, color, qty) in &grants {
            per_agent.entry(id).or_default().push(color);
            total += qty as i64;
            colors.insert(color);
        }

        for (&id, held) in &per_agent {
            assert_eq!(held.len(), COLORS_PER_AGENT, "agent {id}");
            let distinct: HashSet<_> = held.iter().collect();
            assert_eq!(distinct.len(), COLORS_PER_AGENT, "agent {id} has duplicate colors");
        }
        assert_eq!(colors.len(), 8, "all palette colors covered");
        assert!(total >= 32 * 32, "paint covers the grid");
    }

    #[test]
    fn same_seed_same_grants() {
        let agents = [4, 5, 6, 7];
        let a = distribute_paint(&agents, 16, &mut ChaCha8Rng::seed_from_u64(42));
        let b = distribute_paint(&agents, 16, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn quantity_uses_ceiling_division() {
        // 16*16 = 256 cells over 3 agents * 4 colors = 12 grants -> ceil(256/12) = 22.
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grants = distribute_paint(&[1, 2, 3], 16, &mut rng);
        assert!(grants.iter().all(|&(_, _, q)| q == 22));
    }
}
