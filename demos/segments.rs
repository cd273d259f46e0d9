use segmentor::{BatchRunner, Record, now_epoch_seconds};

fn main() {
    let record = Record {
        id: "user-123".into(),
        level: 20,
        country: "Turkey".into(),
        first_session: 1_672_531_200,
        last_session: 1_700_000_000,
        purchase_amount: 25_000,
        last_purchase_at: 1_735_600_000,
    };

    let rules = [
        ("high_level", "level > 10"),
        ("tr_veteran", "country = 'Turkey' AND level >= 10"),
        ("whale_or_elite", "level > 100 OR purchase_amount > 20000"),
        ("lapsed", "last_session < _now()"),
        ("typo", "contry = 'Turkey'"),
    ];

    // one time sample for the whole batch
    let now = now_epoch_seconds();
    let runner = BatchRunner::new().with_cache();

    match runner.run(rules, &record, now) {
        Ok(results) => {
            for verdict in results.iter() {
                println!("{verdict}");
            }
        }
        Err(e) => println!("Batch aborted: {e}"),
    }

    println!();
    let report = runner.run_all(rules, &record, now);
    println!("{report}");
    for outcome in report.outcomes() {
        match outcome.result() {
            Ok(matched) => println!("  {} = {matched}", outcome.name()),
            Err(e) => println!("  {}: {e}", outcome.name()),
        }
    }
}
