// Path: crates/tx/src/batch/tests/mod.rs
use super::*;
use crate::compress::zlib_decompress;
use cryptonym_test_utils::fixtures::{test_identity, transfer_spec};
use cryptonym_test_utils::mock::{MockChain, MockFactory};

fn supervisor() -> (BatchSupervisor, Arc<MockFactory>) {
    let chain = Arc::new(MockChain::with_test_identity());
    let factory = Arc::new(MockFactory::new(chain));
    let table = Arc::new(FieldSpecTable::from_action_spec(&transfer_spec()).unwrap());
    let sup = BatchSupervisor::new(
        table,
        test_identity(),
        factory.clone(),
        ChainConfig::new("http://127.0.0.1:8888"),
    );
    (sup, factory)
}

fn counted(n: u64, workers: usize) -> BatchConfig {
    BatchConfig {
        repeat: Repeat::Count(n),
        workers,
        ..Default::default()
    }
}

#[test]
fn budget_is_split_evenly() {
    assert_eq!(split_budget(7, 3), vec![3, 2, 2]);
    assert_eq!(split_budget(2, 4), vec![1, 1]);
    assert_eq!(split_budget(5, 1), vec![5]);
}

#[tokio::test]
async fn runs_the_requested_number_of_attempts() {
    let (sup, factory) = supervisor();
    sup.start(&counted(5, 1)).await.unwrap();
    sup.wait().await;

    assert!(!sup.is_running());
    assert_eq!(sup.succeeded(), 5);
    assert_eq!(sup.failed(), 0);
    let history = sup.history();
    let indexes: Vec<u64> = history.iter().map(|o| o.index).collect();
    assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
    assert!(history.iter().all(|o| o.success && o.tx_summary.is_some()));
    assert_eq!(factory.chain().submits.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn each_worker_opens_its_own_connection() {
    let (sup, factory) = supervisor();
    sup.start(&counted(7, 3)).await.unwrap();
    sup.wait().await;
    assert_eq!(factory.connects.load(Ordering::SeqCst), 3);
    assert_eq!(sup.succeeded(), 7);
    let mut indexes: Vec<u64> = sup.history().iter().map(|o| o.index).collect();
    indexes.dedup();
    assert_eq!(indexes.len(), 7);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stop_cancels_a_looping_run() {
    let (sup, factory) = supervisor();
    factory
        .chain()
        .set_submit_delay(Some(Duration::from_millis(10)));
    let cfg = BatchConfig {
        repeat: Repeat::Loop,
        workers: 2,
        ..Default::default()
    };
    sup.start(&cfg).await.unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(sup.is_running());
    sup.stop().await;

    assert!(!sup.is_running());
    let done = sup.succeeded() + sup.failed();
    assert!(done > 0);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sup.succeeded() + sup.failed(), done);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stop_cuts_a_counted_run_short() {
    let (sup, factory) = supervisor();
    factory
        .chain()
        .set_submit_delay(Some(Duration::from_millis(50)));
    sup.start(&counted(5, 1)).await.unwrap();
    tokio::time::sleep(Duration::from_millis(70)).await;
    assert!(sup.is_running());
    sup.stop().await;

    assert!(!sup.is_running());
    let done = sup.succeeded() + sup.failed();
    assert!(done < 5, "{done} outcomes after stop");
    assert!(sup.history().len() < 5);
    assert!(factory.chain().submits.load(Ordering::SeqCst) < 5);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(sup.succeeded() + sup.failed(), done);
}

#[tokio::test]
async fn restart_waits_for_termination() {
    let (sup, factory) = supervisor();
    factory
        .chain()
        .set_submit_delay(Some(Duration::from_millis(20)));
    sup.start(&counted(1_000, 1)).await.unwrap();
    assert_eq!(sup.start(&counted(1, 1)).await, Err(BatchError::AlreadyRunning));

    sup.stop().await;
    factory.chain().set_submit_delay(None);
    sup.start(&counted(2, 1)).await.unwrap();
    sup.wait().await;
    assert!(!sup.is_running());
}

#[tokio::test]
async fn remote_failures_keep_the_response_body() {
    let (sup, factory) = supervisor();
    factory.chain().fail_submit.store(true, Ordering::SeqCst);
    sup.start(&counted(3, 1)).await.unwrap();
    sup.wait().await;

    assert_eq!(sup.failed(), 3);
    let o = &sup.history()[0];
    assert_eq!(o.failure, Some(FailureKind::Remote));
    assert!(String::from_utf8_lossy(&o.response).contains("3050003"));
    assert!(!o.request.is_empty());
}

#[tokio::test]
async fn preparation_failures_do_not_stop_the_worker() {
    let (sup, _) = supervisor();
    sup.table().update_input("amount", "lots");
    sup.start(&counted(3, 1)).await.unwrap();
    sup.wait().await;

    assert_eq!(sup.failed(), 3);
    let history = sup.history();
    assert_eq!(history.len(), 3);
    assert!(history
        .iter()
        .all(|o| o.failure == Some(FailureKind::Preparation) && o.summary.starts_with("amount:")));
}

#[tokio::test]
async fn hidden_outcomes_are_counted_but_not_kept() {
    let (sup, _) = supervisor();
    let cfg = BatchConfig {
        hide_succeeded: true,
        ..counted(4, 2)
    };
    sup.start(&cfg).await.unwrap();
    sup.wait().await;
    assert_eq!(sup.succeeded(), 4);
    assert!(sup.history().is_empty());
}

#[tokio::test]
async fn hidden_bodies_are_dropped() {
    let (sup, _) = supervisor();
    let cfg = BatchConfig {
        hide_request: true,
        hide_response: true,
        ..counted(1, 1)
    };
    sup.start(&cfg).await.unwrap();
    sup.wait().await;
    let o = &sup.history()[0];
    assert!(o.request.is_empty() && o.request_stored.is_empty());
    assert!(o.response.is_empty() && o.response_stored.is_empty());
}

#[tokio::test]
async fn stored_bodies_are_compressed() {
    let (sup, _) = supervisor();
    sup.start(&counted(1, 1)).await.unwrap();
    sup.wait().await;
    let o = &sup.history()[0];
    assert_ne!(o.response_stored, o.response);
    assert_eq!(zlib_decompress(&o.response_stored).unwrap(), o.response);
    assert_eq!(zlib_decompress(&o.request_stored).unwrap(), o.request);
}

#[tokio::test]
async fn history_is_cleared_past_the_limit() {
    let (sup, _) = supervisor();
    let total = HISTORY_LIMIT as u64 + 44;
    sup.start(&counted(total, 4)).await.unwrap();
    sup.wait().await;
    assert_eq!(sup.succeeded(), total);
    assert_eq!(sup.history().len(), 44);
}

#[tokio::test]
async fn connect_failures_are_recorded_per_worker() {
    let (sup, factory) = supervisor();
    factory.fail_connect.store(true, Ordering::SeqCst);
    sup.start(&counted(10, 2)).await.unwrap();
    sup.wait().await;
    assert!(!sup.is_running());
    assert_eq!(sup.failed(), 2);
    assert!(sup.history()[0].summary.contains("could not connect"));
}

#[tokio::test]
async fn table_changes_clear_history_when_idle() {
    let (sup, _) = supervisor();
    sup.start(&counted(2, 1)).await.unwrap();
    sup.wait().await;
    assert_eq!(sup.history().len(), 2);

    let other = Arc::new(FieldSpecTable::new("fio.address", "addaddress"));
    sup.set_table(other).unwrap();
    assert!(sup.history().is_empty());
    assert_eq!(sup.succeeded(), 0);
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let (sup, _) = supervisor();
    assert!(matches!(
        sup.start(&counted(0, 1)).await,
        Err(BatchError::InvalidConfig(_))
    ));
    assert!(!sup.is_running());
}
