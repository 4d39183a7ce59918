use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::Dispatcher;
use crate::args::PositiveUsize;
use crate::error::AppResult;
use crate::probe::ProbeOutcome;

const fn outcome_with_marker(marker: u16) -> ProbeOutcome {
    ProbeOutcome {
        success: true,
        status_code: Some(marker),
        elapsed: Some(Duration::ZERO),
        content_type: None,
        body: None,
        error: None,
    }
}

fn width(value: usize) -> AppResult<PositiveUsize> {
    Ok(PositiveUsize::try_from(value)?)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn results_follow_logical_index_not_completion_order() -> AppResult<()> {
    let dispatcher = Dispatcher::new(width(8)?);

    // Later indexes finish first; ordering must still follow the index.
    let outcomes = dispatcher
        .dispatch(6, |index| async move {
            let stagger = 6_u64.saturating_sub(index as u64).saturating_mul(20);
            tokio::time::sleep(Duration::from_millis(stagger)).await;
            outcome_with_marker(index as u16)
        })
        .await;

    assert_eq!(outcomes.len(), 6);
    for (index, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.status_code, Some(index as u16));
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn pool_width_caps_in_flight_requests() -> AppResult<()> {
    let dispatcher = Dispatcher::new(width(2)?);
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let in_flight_outer = Arc::clone(&in_flight);
    let peak_outer = Arc::clone(&peak);
    let outcomes = dispatcher
        .dispatch(8, move |index| {
            let in_flight = Arc::clone(&in_flight_outer);
            let peak = Arc::clone(&peak_outer);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst).saturating_add(1);
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                outcome_with_marker(index as u16)
            }
        })
        .await;

    assert_eq!(outcomes.len(), 8);
    assert!(peak.load(Ordering::SeqCst) <= 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn width_larger_than_batch_runs_everything() -> AppResult<()> {
    let dispatcher = Dispatcher::new(width(100)?);
    let outcomes = dispatcher
        .dispatch(10, |index| async move { outcome_with_marker(index as u16) })
        .await;
    assert_eq!(outcomes.len(), 10);
    assert!(outcomes.iter().all(|outcome| outcome.success));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn empty_batch_yields_empty_results() -> AppResult<()> {
    let dispatcher = Dispatcher::new(width(4)?);
    let outcomes = dispatcher
        .dispatch(0, |index| async move { outcome_with_marker(index as u16) })
        .await;
    assert!(outcomes.is_empty());
    Ok(())
}
