//! End-to-end: simulator production timer -> case creation -> outbox.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use caseflow_core::{CaseRecord, Outbox};
use caseflow_sim::{SimConfig, Simulator};

#[tokio::test(start_paused = true)]
async fn produced_events_materialize_cases_in_the_outbox() {
    let outbox = Outbox::new(Duration::from_secs(3600));
    let sink = outbox.clone();
    let seq = Arc::new(AtomicUsize::new(0));

    let (case_tx, mut case_rx) = tokio::sync::mpsc::unbounded_channel();
    let sim = Simulator::builder(SimConfig::new(60.0))
        .on_produce(move || {
            let n = seq.fetch_add(1, Ordering::SeqCst);
            let case = CaseRecord::new(format!("Streamed case {n}"), format!("#ST{n:04}"));
            let _ = case_tx.send(case);
        })
        .start();

    // Three periods at 60/min.
    tokio::time::sleep(Duration::from_millis(3500)).await;
    sim.shutdown().await;

    while let Ok(case) = case_rx.try_recv() {
        outbox.insert(case).await;
    }

    assert_eq!(sink.len().await, 3);
    let mut numbers: Vec<_> = sink
        .cases()
        .await
        .into_iter()
        .map(|c| c.case_number)
        .collect();
    numbers.sort();
    assert_eq!(numbers, vec!["#ST0000", "#ST0001", "#ST0002"]);
}

#[tokio::test(start_paused = true)]
async fn disabled_node_produces_nothing_but_still_animates() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);

    let sim = Simulator::builder(SimConfig::new(240.0).enabled(false))
        .on_produce(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .start();

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(sim.particle_count(), 0);

    // Re-enabling arms the timer from the enable point.
    sim.set_enabled(true);
    tokio::time::sleep(Duration::from_millis(550)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2);

    sim.shutdown().await;
}
