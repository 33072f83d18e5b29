use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use cmpwrap::{using_key, Comparison, ComparatorType, Operator, PredicateSet};
use rand::distributions;
use rand::prelude::Distribution;

const VALUE_RANGE: i64 = 1000;
const NUM_TEST_THREADS: usize = 4;
const NUM_OPS_PER_THREAD: usize = 2_000;

/// A mismatch between a comparator and the native ordering it should agree with.
struct Mismatch {
    thread_id: usize,
    operator: Operator,
    left: i64,
    right: i64,
    outcome: Comparison,
}

/// A struct holding a thread that runs comparisons for the test.
struct Worker {
    /// A number uniquely identifying this thread.
    thread_id: usize,

    /// A handle to the actual thread.
    thread_handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Create a new [`Worker`] instance that compares random values with `cmp`.
    fn new(
        thread_id: usize,
        cmp: &ComparatorType,
        ops_counter: Arc<AtomicUsize>,
        mismatch_sender: mpsc::Sender<Mismatch>,
    ) -> Self {
        log::info!("Starting test worker thread with id {thread_id}");
        // Clones share the operator table
        let cmp = cmp.clone();
        let thread_handle = thread::Builder::new()
            .name(thread_id.to_string())
            .spawn(move || {
                let mut rng = rand::thread_rng();
                let value_dist = distributions::Uniform::from(-VALUE_RANGE..VALUE_RANGE);
                let operator_dist = distributions::Uniform::from(0..Operator::ALL.len());

                for _ in 0..NUM_OPS_PER_THREAD {
                    let left = value_dist.sample(&mut rng);
                    let right = value_dist.sample(&mut rng);
                    let operator = Operator::ALL[operator_dist.sample(&mut rng)];

                    let outcome = cmp
                        .wrap(left)
                        .apply(operator, &cmp.wrap(right))
                        .unwrap();
                    if outcome.as_bool() != Some(expected(operator, left.abs(), right.abs())) {
                        let _ = mismatch_sender.send(Mismatch {
                            thread_id,
                            operator,
                            left,
                            right,
                            outcome,
                        });
                    }

                    ops_counter.fetch_add(1, Ordering::Release);
                }

                log::info!("Terminated thread {thread_id}");
            })
            .unwrap();

        Self {
            thread_id,
            thread_handle: Some(thread_handle),
        }
    }

    fn join(&mut self) {
        if let Some(thread_handle) = self.thread_handle.take() {
            log::debug!("Waiting for worker thread {} to finish.", self.thread_id);
            thread_handle.join().unwrap();
        }
    }
}

fn expected(operator: Operator, left: i64, right: i64) -> bool {
    match operator {
        Operator::Eq => left == right,
        Operator::Ne => left != right,
        Operator::Lt => left < right,
        Operator::Le => left <= right,
        Operator::Gt => left > right,
        Operator::Ge => left >= right,
    }
}

fn setup() {
    let _ = env_logger::builder()
        // Include all events in tests
        .filter_level(log::LevelFilter::Info)
        // Ensure events are captured by `cargo test`
        .is_test(true)
        // Ignore errors initializing the logger if tests race to configure it
        .try_init();
}

fn run_workers(cmp: &ComparatorType) {
    let ops_counter = Arc::new(AtomicUsize::new(0));
    let (mismatch_sender, mismatch_receiver) = mpsc::channel();

    let mut workers: Vec<Worker> = (0..NUM_TEST_THREADS)
        .map(|thread_id| {
            Worker::new(
                thread_id,
                cmp,
                Arc::clone(&ops_counter),
                mismatch_sender.clone(),
            )
        })
        .collect();
    drop(mismatch_sender);

    for worker in workers.iter_mut() {
        worker.join();
    }

    let mismatches: Vec<String> = mismatch_receiver
        .iter()
        .map(|mismatch| {
            format!(
                "thread {} got {:?} for `{} {} {}`",
                mismatch.thread_id,
                mismatch.outcome,
                mismatch.left,
                mismatch.operator.symbol(),
                mismatch.right
            )
        })
        .collect();
    assert!(
        mismatches.is_empty(),
        "Found comparisons that disagree with the native ordering: {mismatches:?}"
    );
    assert_eq!(
        ops_counter.load(Ordering::Acquire),
        NUM_TEST_THREADS * NUM_OPS_PER_THREAD
    );
}

#[test]
fn key_based_comparator_types_can_be_shared_across_threads() {
    setup();

    run_workers(&using_key(|value: &i64| value.abs(), true));
}

#[test]
fn predicate_based_comparator_types_can_be_shared_across_threads() {
    setup();

    let cmp = PredicateSet::new()
        .eq(|a: &i64, b: &i64| a.abs() == b.abs())
        .ge(|a: &i64, b: &i64| a.abs() >= b.abs())
        .named("AbsGe")
        .build()
        .unwrap();
    run_workers(&cmp);
}
