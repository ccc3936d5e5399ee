use eco_core::{Error, Season};
use eco_world::{CellState, Ecosystem};
use proptest::prelude::*;
use std::collections::HashSet;

fn population_request() -> impl Strategy<Value = (usize, u64, usize, usize, usize)> {
    (1usize..=12, any::<u64>()).prop_flat_map(|(size, seed)| {
        let cells = size * size;
        (0..=cells).prop_flat_map(move |plants| {
            (0..=cells - plants).prop_flat_map(move |herbivores| {
                (0..=cells - plants - herbivores)
                    .prop_map(move |carnivores| (size, seed, plants, herbivores, carnivores))
            })
        })
    })
}

proptest! {
    #[test]
    fn fresh_ecosystem_is_empty(size in 1usize..=32, seed in any::<u64>()) {
        let eco = Ecosystem::with_seed(size, seed).unwrap();
        prop_assert!(!eco.has_living_organisms());
        prop_assert_eq!(eco.population_counts().as_tuple(), (0, 0, 0));
        prop_assert_eq!(eco.grid().len(), size * size);
    }

    #[test]
    fn populate_places_exact_counts((size, seed, p, h, c) in population_request()) {
        let mut eco = Ecosystem::with_seed(size, seed).unwrap();
        eco.populate(p, h, c).unwrap();

        prop_assert_eq!(eco.population_counts().as_tuple(), (p, h, c));
        prop_assert_eq!(eco.grid().occupied_count(), p + h + c);

        let occupied: HashSet<_> = eco
            .grid()
            .iter()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(pos, _)| pos)
            .collect();
        prop_assert_eq!(occupied.len(), p + h + c);
    }

    #[test]
    fn populate_over_capacity_is_rejected(size in 1usize..=10, extra in 1usize..20, seed in any::<u64>()) {
        let mut eco = Ecosystem::with_seed(size, seed).unwrap();
        let before = eco.grid().clone();
        let requested = size * size + extra;

        let result = eco.populate(requested, 0, 0);
        let rejected = matches!(result, Err(Error::CapacityExceeded { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(eco.grid(), &before);
    }

    #[test]
    fn season_advances_modulo_cycle(k in 0usize..64) {
        let mut eco = Ecosystem::with_seed(2, 0).unwrap();
        for _ in 0..k {
            eco.update_season();
        }
        prop_assert_eq!(eco.season_index(), k % Season::COUNT);
    }

    #[test]
    fn growth_never_replaces_occupants(seed in any::<u64>(), turns in 1usize..20) {
        let mut eco = Ecosystem::with_seed(8, seed).unwrap();
        eco.populate(5, 10, 10).unwrap();
        let before = eco.grid().clone();

        for _ in 0..turns {
            eco.apply_seasonal_effects();
        }

        for ((_, old), (_, new)) in before.iter().zip(eco.grid().iter()) {
            if let CellState::Occupied(organism) = old {
                prop_assert_eq!(new, &CellState::Occupied(*organism));
            }
        }
    }

    #[test]
    fn update_appends_current_counts(seed in any::<u64>(), turns in 1usize..50) {
        let mut eco = Ecosystem::with_seed(10, seed).unwrap();
        eco.populate(30, 10, 5).unwrap();

        for turn in 1..=turns {
            eco.update();
            prop_assert_eq!(eco.population_stats().len(), turn);
            prop_assert_eq!(eco.population_stats()[turn - 1], eco.population_counts());
        }
    }
}

#[test]
fn thousand_turn_runs_are_reproducible() {
    let run = |seed: u64| {
        let mut eco = Ecosystem::with_seed(10, seed).unwrap();
        eco.populate(30, 10, 5).unwrap();
        let mut grids = Vec::with_capacity(1000);
        for _ in 0..1000 {
            eco.update();
            grids.push(eco.grid().clone());
        }
        (grids, eco.population_stats().to_vec())
    };

    let (grids_a, history_a) = run(2024);
    let (grids_b, history_b) = run(2024);
    assert_eq!(grids_a, grids_b);
    assert_eq!(history_a, history_b);
    assert_eq!(history_a.len(), 1000);
}

#[test]
fn plants_only_accumulate() {
    let mut eco = Ecosystem::with_seed(10, 77).unwrap();
    eco.populate(30, 10, 5).unwrap();
    for _ in 0..300 {
        eco.update();
    }

    let history = eco.population_stats();
    assert!(history.windows(2).all(|w| w[1].plants >= w[0].plants));
    assert!(history.iter().all(|c| c.herbivores == 10 && c.carnivores == 5));
}
