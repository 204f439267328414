//! Properties every strategy has to satisfy, checked on random graphs.
use approx::assert_abs_diff_eq;
use proptest::test_runner::TestRunner;

use super::{test_support::*, Algorithm, CancelToken, SearchStep, MSG_CANCELLED};
use crate::{
    graph::{Graph, NodeIndex},
    registry::AlgorithmKind,
    search::{
        british_museum::MSG_POSSIBLE_PATH,
        params::{HEURISTIC, HEURISTIC_ITERATIVE_DEEPENING, STORAGE_LIMIT},
    },
    util::test_graphs::{grid, line, random_graph},
};

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn run_kind(kind: AlgorithmKind, g: &Graph, start: NodeIndex, destination: NodeIndex) -> Vec<SearchStep> {
    let mut alg = kind.create();
    run(alg.as_mut(), g, start, destination)
}

fn found_length(steps: &[SearchStep], g: &Graph) -> Option<f64> {
    let last = steps.last()?;
    last.found.then(|| last.path.length(g))
}

/// Graph seed, node count, edge count, start and destination
fn random_case() -> impl proptest::strategy::Strategy<Value = (u64, usize, usize, usize, usize)> {
    use proptest::prelude::*;
    (any::<u64>(), 2usize..25, 0usize..70).prop_flat_map(|(seed, n, m)| {
        (Just(seed), Just(n), Just(m), 0..n, 0..n)
    })
}

#[test]
fn reported_paths_are_well_formed() {
    init_log();
    let mut runner = TestRunner::default();
    runner
        .run(&random_case(), |(seed, n, m, s, t)| {
            let g = random_graph(n, m, seed);
            for &kind in AlgorithmKind::all() {
                let steps = run_kind(kind, &g, s.into(), t.into());
                assert_single_terminal(&steps);

                let last = steps.last().unwrap();
                if last.found {
                    assert_eq!(last.path.start(), Some(NodeIndex::from(s)));
                    assert_eq!(last.path.destination(), Some(NodeIndex::from(t)));
                    assert!(last.path.is_connected(&g), "{} reported a broken path", kind);
                } else {
                    assert!(last.path.is_empty());
                }
                // backtracking sets are duplicate free
                let mut seen = last.path.backtracking.clone();
                seen.sort();
                seen.dedup();
                assert_eq!(seen.len(), last.path.backtracking.len());
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn optimal_strategies_agree() {
    init_log();
    let mut runner = TestRunner::default();
    runner
        .run(&random_case(), |(seed, n, m, s, t)| {
            let g = random_graph(n, m, seed);
            let (s, t) = (s.into(), t.into());

            let astar = found_length(&run_kind(AlgorithmKind::AStar, &g, s, t), &g);
            let dijkstra = found_length(&run_kind(AlgorithmKind::Dijkstra, &g, s, t), &g);
            let bnb = found_length(&run_kind(AlgorithmKind::BranchAndBound, &g, s, t), &g);
            let bmp = found_length(&run_kind(AlgorithmKind::BritishMuseum, &g, s, t), &g);
            assert_eq!(astar.is_some(), dijkstra.is_some());
            assert_eq!(astar.is_some(), bnb.is_some());
            assert_eq!(astar.is_some(), bmp.is_some());

            if let (Some(a), Some(d), Some(b)) = (astar, dijkstra, bnb) {
                assert_abs_diff_eq!(a, d, epsilon = 1e-6);
                assert_abs_diff_eq!(a, b, epsilon = 1e-6);
            }

            // complete strategies find a path exactly when one exists
            for kind in [
                AlgorithmKind::BreadthFirst,
                AlgorithmKind::DepthFirst,
                AlgorithmKind::DepthFirstHeuristic,
                AlgorithmKind::DepthLimited,
                AlgorithmKind::Beam,
            ] {
                let other = found_length(&run_kind(kind, &g, s, t), &g);
                assert_eq!(astar.is_some(), other.is_some(), "{} disagrees", kind);
                if let (Some(a), Some(o)) = (astar, other) {
                    assert!(a <= o + 1e-6, "A* {} longer than {} {}", a, kind, o);
                }
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn british_museum_keeps_the_shortest_possible_path() {
    init_log();
    let mut runner = TestRunner::default();
    runner
        .run(&random_case(), |(seed, n, m, s, t)| {
            let g = random_graph(n, m, seed);
            let steps = run_kind(AlgorithmKind::BritishMuseum, &g, s.into(), t.into());
            if let Some(best) = found_length(&steps, &g) {
                for step in steps.iter().filter(|s| s.message == MSG_POSSIBLE_PATH) {
                    assert!(best <= step.path.length(&g));
                }
            }
            Ok(())
        })
        .unwrap();
}

#[test]
fn beam_of_width_one_visits_nodes_at_most_once() {
    init_log();
    let mut runner = TestRunner::default();
    runner
        .run(&random_case(), |(seed, n, m, s, t)| {
            let g = random_graph(n, m, seed);
            let mut beam = AlgorithmKind::Beam.create();
            beam.options_mut().set(STORAGE_LIMIT, 1i64).unwrap();
            let steps = run(beam.as_mut(), &g, s.into(), t.into());
            let visiting = steps.iter().filter(|s| !s.finished).count();
            assert!(visiting <= g.nodes.len());
            Ok(())
        })
        .unwrap();
}

#[test]
fn iterative_deepening_bound_within_diameter() {
    let mut runner = TestRunner::default();
    runner
        .run(&(2usize..40), |n| {
            let g = line(n);
            let mut alg = AlgorithmKind::DepthLimited.create();
            alg.options_mut()
                .set(HEURISTIC, HEURISTIC_ITERATIVE_DEEPENING)
                .unwrap();
            let steps = run(alg.as_mut(), &g, 0.into(), (n - 1).into());
            let increases = steps
                .iter()
                .filter(|s| s.message.starts_with("Increasing depth limit"))
                .count();
            assert!(steps.last().unwrap().found);
            // the limit starts at 1 and grows once per increase
            assert!(increases < n - 1);
            Ok(())
        })
        .unwrap();
}

#[test]
fn cancellation_stops_every_strategy() {
    let g = grid(8, 8);
    for &kind in AlgorithmKind::all() {
        let mut alg = kind.create();
        let cancel = CancelToken::new();
        let trigger = cancel.clone();
        let mut steps = Vec::new();
        let mut sink = |step: SearchStep| {
            trigger.cancel();
            steps.push(step);
        };
        let found = alg
            .find_route_with_cancel(&g, 0.into(), 63.into(), &mut sink, &cancel)
            .unwrap();

        assert!(!found, "{} ignored the cancellation", kind);
        assert_single_terminal(&steps);
        assert_eq!(steps.last().unwrap().message, MSG_CANCELLED);
    }
}

#[test]
fn unknown_endpoints_are_rejected() {
    let g = grid(2, 2);
    for &kind in AlgorithmKind::all() {
        let mut alg: Box<dyn Algorithm> = kind.create();
        let mut steps: Vec<SearchStep> = Vec::new();
        assert!(alg.find_route(&g, 7.into(), 0.into(), &mut steps).is_err());
        assert!(alg.find_route(&g, 0.into(), 7.into(), &mut steps).is_err());
        assert!(steps.is_empty());
    }
}
