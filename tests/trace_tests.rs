// Integration tests for trace emission and the driver loop

use proptest::prelude::*;
use recurtty::logging::MemoryLogger;
use recurtty::simulation::algorithms::{factorial, hanoi};
use recurtty::simulation::{Algorithm, Keyword, Motion, Outcome, Simulation, Step, StepKind, Tick};
use recurtty::tree::CallTree;
use std::rc::Rc;

fn kinds(steps: &[Step]) -> Vec<StepKind> {
    steps.iter().map(Step::kind).collect()
}

fn arb_algorithm() -> impl Strategy<Value = Algorithm> {
    (0..Algorithm::ALL.len()).prop_map(|i| Algorithm::ALL[i])
}

proptest! {
    #[test]
    fn pushes_and_pops_nest(algorithm in arb_algorithm(), n in -2i64..=7) {
        let steps: Vec<Step> = algorithm.emitter(n).collect();
        let mut open: Vec<String> = Vec::new();
        let mut pushes = 0;
        let mut pops = 0;

        for step in &steps {
            match step {
                Step::Push { function } => {
                    pushes += 1;
                    open.push(function.clone());
                }
                Step::Pop { function } => {
                    pops += 1;
                    let top = open.pop();
                    prop_assert_eq!(top.as_deref(), Some(function.as_str()));
                }
                _ => prop_assert!(!open.is_empty(), "event outside any call"),
            }
        }
        prop_assert_eq!(pushes, pops);
        prop_assert!(open.is_empty());
    }

    #[test]
    fn open_calls_match_tree_stack(algorithm in arb_algorithm(), n in 0i64..=6) {
        let mut tree = CallTree::new();
        let mut open: Vec<String> = Vec::new();

        for step in algorithm.emitter(n) {
            match step {
                Step::Push { function } => {
                    let parent = tree.top().map(|p| p.id);
                    let id = tree.push(function.clone());
                    prop_assert_eq!(tree.node(id).unwrap().parent, parent);
                    open.push(function);
                }
                Step::Pop { .. } => {
                    prop_assert!(tree.pop().is_some());
                    open.pop();
                }
                _ => {}
            }
            let labels: Vec<&str> = tree
                .stack()
                .iter()
                .map(|id| tree.node(*id).unwrap().label.as_str())
                .collect();
            prop_assert_eq!(labels, open.iter().map(String::as_str).collect::<Vec<_>>());
        }
        prop_assert!(tree.nodes().all(|node| node.done));
    }

    #[test]
    fn exactly_one_result_per_call(algorithm in arb_algorithm(), n in -1i64..=6) {
        let steps: Vec<Step> = algorithm.emitter(n).collect();
        let pushes = steps.iter().filter(|s| s.kind() == StepKind::Push).count();
        let results = steps.iter().filter(|s| s.kind() == StepKind::Result).count();
        prop_assert_eq!(pushes, results);
    }
}

#[test]
fn test_linear_chain_ends_fully_done() {
    let mut tree = CallTree::new();
    let f3 = tree.push("f(3)");
    let f2 = tree.push("f(2)");
    let f1 = tree.push("f(1)");

    assert_eq!(tree.pop(), Some(f1));
    assert!(tree.node(f1).unwrap().done);
    assert_eq!(tree.pop(), Some(f2));
    assert!(tree.node(f2).unwrap().done);
    assert_eq!(tree.pop(), Some(f3));

    let depths: Vec<usize> = tree.nodes_by_id().iter().map(|n| n.depth).collect();
    assert_eq!(depths, vec![0, 1, 2]);
    assert!(tree.nodes().all(|n| n.done));
    assert_eq!(tree.node(f2).unwrap().parent, Some(f3));
    assert_eq!(tree.node(f1).unwrap().parent, Some(f2));
}

#[test]
fn test_single_disk_hanoi_shape() {
    let steps: Vec<Step> = hanoi::trace(1, 'A', 'C', 'B').collect();
    assert_eq!(
        kinds(&steps),
        vec![
            StepKind::Push,
            StepKind::Highlight,
            StepKind::Highlight,
            StepKind::Animate,
            StepKind::Result,
            StepKind::Pop,
        ]
    );
    assert!(matches!(
        steps[1],
        Step::Highlight {
            keyword: Keyword::BaseCase,
            ..
        }
    ));
    assert!(matches!(
        &steps[3],
        Step::Animate {
            motion: Motion::Disk {
                disk: 1,
                from: 'A',
                to: 'C'
            },
            ..
        }
    ));
}

#[test]
fn test_invalid_input_emits_push_result_pop_only() {
    for steps in [
        factorial::trace(-1).collect::<Vec<_>>(),
        Algorithm::Fibonacci.emitter(-1).collect(),
        Algorithm::AccumulateSum.emitter(-1).collect(),
    ] {
        assert_eq!(
            kinds(&steps),
            vec![StepKind::Push, StepKind::Result, StepKind::Pop]
        );
        assert!(matches!(&steps[1], Step::Result { result, .. } if result.is_error()));
    }
}

#[test]
fn test_pop_on_new_tree_changes_nothing() {
    let mut tree = CallTree::new();
    assert_eq!(tree.pop(), None);
    assert!(tree.dirty().is_empty());
    assert_eq!(tree.revision(), 0);
}

#[test]
fn test_simulation_builds_full_tree() {
    let logger = Rc::new(MemoryLogger::new(1000));
    let mut sim = Simulation::new(Algorithm::Fibonacci, 4, logger);

    assert_eq!(sim.tick(), Ok(Tick::Applied(StepKind::Push)));
    assert_eq!(sim.tree().len(), 1);

    sim.run_to_end().unwrap();
    // fib(4) makes 9 calls
    assert_eq!(sim.tree().len(), 9);
    assert_eq!(sim.tree().roots().len(), 1);
    assert_eq!(sim.tree().max_depth(), Some(3));
    assert_eq!(sim.result_line(), Some("fibonacci(4) = 3"));
    assert!(sim.tree().nodes().all(|n| n.done));
}

#[test]
fn test_every_algorithm_replays_cleanly() {
    let logger = Rc::new(MemoryLogger::new(100));
    for algorithm in Algorithm::ALL {
        let mut sim = Simulation::new(algorithm, algorithm.default_n(), logger.clone());
        let applied = sim.run_to_end().unwrap();
        assert_eq!(applied, sim.steps_total(), "{}", algorithm);
        assert!(sim.tree().stack().is_empty(), "{}", algorithm);
    }
}

#[test]
fn test_extreme_inputs_are_rejected_cheaply() {
    for algorithm in Algorithm::ALL {
        for n in [i64::MAX, i64::MIN] {
            let steps: Vec<Step> = algorithm.emitter(n).collect();
            assert!(steps.len() < 20, "{}({}) made {} steps", algorithm, n, steps.len());
            assert_eq!(steps.first().map(Step::kind), Some(StepKind::Push));
            assert_eq!(steps.last().map(Step::kind), Some(StepKind::Pop));
            assert_eq!(steps[0].function(), steps[steps.len() - 1].function());
            for step in &steps {
                if let Some(function) = step.function() {
                    assert!(function.len() < 64, "label too long: {}", function);
                }
            }

            let root_result = steps.iter().rev().find_map(|s| match s {
                Step::Result { result, .. } => Some(result),
                _ => None,
            });
            // gcd(MAX, MAX/2) is a valid input
            if algorithm == Algorithm::Gcd && n == i64::MAX {
                assert_eq!(root_result, Some(&Outcome::Int(1)));
                continue;
            }
            assert!(
                root_result.is_some_and(Outcome::is_error),
                "{}({}) did not fail",
                algorithm,
                n
            );
            // power overflows only after its nested calls
            if algorithm != Algorithm::Power {
                assert_eq!(
                    kinds(&steps),
                    vec![StepKind::Push, StepKind::Result, StepKind::Pop],
                    "{}({})",
                    algorithm,
                    n
                );
            }
        }
    }
}
