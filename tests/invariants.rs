//! Property tests: random operation sequences against engine invariants.

use std::collections::HashSet;

use proptest::prelude::*;
use u_fulfill::dispatch::{DispatchConfig, Dispatcher};
use u_fulfill::queue::{ItemId, Priority};

const SERVICE: u64 = 10;

#[derive(Debug, Clone)]
enum Op {
    Submit(Priority),
    AddWorker,
    RemoveWorker,
    Advance(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Submit(Priority::High)),
        4 => Just(Op::Submit(Priority::Normal)),
        2 => Just(Op::AddWorker),
        2 => Just(Op::RemoveWorker),
        3 => (0u64..25).prop_map(Op::Advance),
    ]
}

fn engine() -> Dispatcher {
    Dispatcher::new(
        DispatchConfig::default()
            .with_service_duration(SERVICE)
            .with_seed(1),
    )
    .unwrap()
}

fn check_invariants(
    engine: &Dispatcher,
    submitted: &[ItemId],
    evicted: &HashSet<ItemId>,
) -> Result<(), TestCaseError> {
    let pending = engine.pending();

    // No Normal ahead of a High.
    let first_normal = pending
        .iter()
        .position(|i| i.priority == Priority::Normal)
        .unwrap_or(pending.len());
    prop_assert!(pending[first_normal..]
        .iter()
        .all(|i| i.priority == Priority::Normal));

    // Items never evicted keep arrival order within their class.
    for class in [Priority::High, Priority::Normal] {
        let ids: Vec<ItemId> = pending
            .iter()
            .filter(|i| i.priority == class && !evicted.contains(&i.id))
            .map(|i| i.id)
            .collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]), "{:?} out of order", ids);
    }

    // Eager dispatch: idle capacity and waiting work never coexist.
    prop_assert!(engine.pool().idle_count() == 0 || pending.is_empty());

    // Busy exactly when an assignment exists, and it names the same item.
    for worker in engine.pool().iter() {
        let assignment = engine.assignment(worker.id);
        prop_assert_eq!(worker.is_busy(), assignment.is_some());
        prop_assert_eq!(worker.current_item(), assignment.map(|a| a.item.id));
    }
    prop_assert_eq!(engine.in_flight(), engine.pool().busy_count());

    // Every submitted item is in exactly one place.
    let mut seen = HashSet::new();
    let in_service = engine
        .pool()
        .iter()
        .filter_map(|w| engine.assignment(w.id).map(|a| a.item.id));
    for id in pending
        .iter()
        .map(|i| i.id)
        .chain(in_service)
        .chain(engine.completed().items().map(|i| i.id))
    {
        prop_assert!(seen.insert(id), "item {} appears twice", id);
    }
    prop_assert_eq!(seen.len(), submitted.len());

    // Fixed duration and completion order.
    for c in engine.completed().iter() {
        prop_assert_eq!(c.completed_at - c.started_at, SERVICE);
    }
    let times: Vec<u64> = engine.completed().iter().map(|c| c.completed_at).collect();
    prop_assert!(times.windows(2).all(|w| w[0] <= w[1]));

    Ok(())
}

proptest! {
    /// Engine invariants hold after every operation.
    #[test]
    fn invariants_hold_for_random_operations(ops in prop::collection::vec(op_strategy(), 0..120)) {
        let mut engine = engine();
        let mut submitted = Vec::new();
        let mut evicted = HashSet::new();

        for op in ops {
            match op {
                Op::Submit(p) => submitted.push(engine.submit(p)),
                Op::AddWorker => {
                    engine.add_worker();
                }
                Op::RemoveWorker => {
                    let in_flight = engine
                        .pool()
                        .last()
                        .and_then(|w| engine.assignment(w.id).map(|a| a.item));
                    let completed_before = engine.completed().len();
                    engine.remove_worker();

                    if let Some(item) = in_flight {
                        evicted.insert(item.id);
                        prop_assert_eq!(engine.completed().len(), completed_before);

                        // Back at the head of its class, unless re-dispatched at once.
                        let pending = engine.pending();
                        if let Some(pos) = pending.iter().position(|i| i.id == item.id) {
                            let class_head = pending
                                .iter()
                                .position(|i| i.priority == item.priority);
                            prop_assert_eq!(Some(pos), class_head);
                        } else {
                            prop_assert!(engine
                                .pool()
                                .iter()
                                .any(|w| w.current_item() == Some(item.id)));
                        }
                    }
                }
                Op::Advance(dt) => {
                    engine.advance(dt);
                }
            }
            check_invariants(&engine, &submitted, &evicted)?;
        }

        // With at least one worker, everything eventually completes.
        if !engine.pool().is_empty() {
            engine.run_until_idle();
            prop_assert_eq!(engine.completed().len(), submitted.len());
        }
    }

    /// Same operations, same outcome.
    #[test]
    fn runs_are_deterministic(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut a = engine();
        let mut b = engine();
        for op in &ops {
            for e in [&mut a, &mut b] {
                match op {
                    Op::Submit(p) => {
                        e.submit(*p);
                    }
                    Op::AddWorker => {
                        e.add_worker();
                    }
                    Op::RemoveWorker => {
                        e.remove_worker();
                    }
                    Op::Advance(dt) => {
                        e.advance(*dt);
                    }
                }
            }
        }
        prop_assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn walkthrough_queue_dispatch_complete() {
    let mut engine = engine();
    let n1 = engine.submit(Priority::Normal);
    let n2 = engine.submit(Priority::Normal);
    let h = engine.submit(Priority::High);
    let ids: Vec<ItemId> = engine.pending().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![h, n1, n2]);

    engine.add_worker();
    let ids: Vec<ItemId> = engine.pending().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![n1, n2]);
    assert_eq!(engine.pool().busy_count(), 1);

    engine.advance(SERVICE);
    let done: Vec<ItemId> = engine.completed().items().map(|i| i.id).collect();
    assert_eq!(done, vec![h]);
    let ids: Vec<ItemId> = engine.pending().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![n2]);
    assert_eq!(engine.workers()[0].current_item.map(|i| i.id), Some(n1));
}
