use std::sync::Arc;
use std::thread;

use segmentor::{BatchRunner, Record, SegmentResults};

const RULES: [(&str, &str); 4] = [
    ("high_level", "level > 10"),
    ("tr", "country = 'Turkey' AND level >= 10"),
    ("whale", "purchase_amount > 20000"),
    ("lapsed", "last_session < _now()"),
];

fn record(level: i64, country: &str, purchase_amount: i64) -> Record {
    Record {
        id: format!("user-{level}"),
        level,
        country: country.into(),
        first_session: 1_672_531_200,
        last_session: 1_700_000_000,
        purchase_amount,
        last_purchase_at: 1_735_600_000,
    }
}

#[test]
fn shared_runner_across_threads() {
    let runner = Arc::new(BatchRunner::new().with_cache());
    let now = 1_735_689_600;

    let mut handles = vec![];

    // Thread 1: Turkish high-level whale
    let r = Arc::clone(&runner);
    handles.push(thread::spawn(move || {
        r.run(RULES, &record(20, "Turkey", 25_000), now).unwrap()
    }));

    // Thread 2: low level, Spain
    let r = Arc::clone(&runner);
    handles.push(thread::spawn(move || {
        r.run(RULES, &record(3, "Spain", 0), now).unwrap()
    }));

    // Thread 3: high level, Spain, small spender
    let r = Arc::clone(&runner);
    handles.push(thread::spawn(move || {
        r.run(RULES, &record(50, "Spain", 100), now).unwrap()
    }));

    let results: Vec<SegmentResults> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let flags = |res: &SegmentResults| {
        RULES
            .iter()
            .map(|(name, _)| res.get(name).unwrap())
            .collect::<Vec<bool>>()
    };
    assert_eq!(flags(&results[0]), [true, true, true, true]);
    assert_eq!(flags(&results[1]), [false, false, false, true]);
    assert_eq!(flags(&results[2]), [true, false, false, true]);

    // the threads share one entry per rule; `lapsed` depends on the time
    // sample and is never cached
    assert_eq!(runner.cached_len(), RULES.len() - 1);
}

#[test]
fn concurrent_batches_with_distinct_time_samples() {
    let runner = Arc::new(BatchRunner::new().with_cache());
    let rules = [("lapsed", "last_session < _now()")];

    let handles: Vec<_> = [1_600_000_000_i64, 1_800_000_000]
        .into_iter()
        .map(|now| {
            let r = Arc::clone(&runner);
            thread::spawn(move || {
                let res = r.run(rules, &record(1, "Turkey", 0), now).unwrap();
                res.get("lapsed").unwrap()
            })
        })
        .collect();

    let lapsed: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(lapsed, [false, true]);
    assert_eq!(runner.cached_len(), 0);
}

#[test]
fn many_threads_same_results_as_single_thread() {
    let runner = Arc::new(BatchRunner::new().cache_capacity(2));
    let now = 1_735_689_600;
    let expected = BatchRunner::new()
        .run(RULES, &record(12, "Turkey", 15_000), now)
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let r = Arc::clone(&runner);
            thread::spawn(move || r.run(RULES, &record(12, "Turkey", 15_000), now).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert_eq!(runner.cached_len(), 2);
}
