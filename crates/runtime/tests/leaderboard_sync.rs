//! End-to-end behaviour of the runtime over an in-memory repository.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;

use leaderboard_core::{Category, EntryDraft, Field, LapTimeComparison, LapTimeInput, OrderBy};
use leaderboard_runtime::{
    BoardStatus, EntryRepository, Event, EventBus, InMemoryEntryRepository, Leaderboard,
    LeaderboardEvent, LeaderboardSync, Runtime, RuntimeConfig, RuntimeError, SubmitError,
    SyncError, Topic,
};

const WAIT: Duration = Duration::from_secs(2);

fn structured(category: Category, minutes: &str, seconds: &str, millis: &str) -> EntryDraft {
    EntryDraft {
        name: "A. Driver".into(),
        company: "Acme".into(),
        lap_time: LapTimeInput::Structured {
            minutes: minutes.into(),
            seconds: seconds.into(),
            milliseconds: millis.into(),
        },
        date: "2024-05-01".into(),
        category,
    }
}

fn free_text(category: Category, lap_time: &str) -> EntryDraft {
    EntryDraft {
        lap_time: LapTimeInput::FreeText(lap_time.into()),
        ..structured(category, "", "", "")
    }
}

async fn start(repo: &Arc<InMemoryEntryRepository>, config: RuntimeConfig) -> Runtime {
    Runtime::builder()
        .config(config)
        .shared_repository(repo.clone())
        .build()
        .await
        .expect("runtime should start")
}

async fn wait_for(
    rx: &mut watch::Receiver<Leaderboard>,
    condition: impl FnMut(&Leaderboard) -> bool,
) -> Leaderboard {
    timeout(WAIT, rx.wait_for(condition))
        .await
        .expect("board did not reach the expected state in time")
        .expect("board sender dropped")
        .clone()
}

async fn wait_live(rx: &mut watch::Receiver<Leaderboard>) -> Leaderboard {
    wait_for(rx, Leaderboard::is_live).await
}

// ================================================================
// Submission scenarios
// ================================================================

#[tokio::test]
async fn structured_staff_entry_reaches_staff_board() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let runtime = start(&repo, RuntimeConfig::default()).await;
    let handle = runtime.handle();

    let mut staff = handle.watch(Category::Staff);
    let mut clients = handle.watch(Category::Clients);
    wait_live(&mut staff).await;
    let clients_before = wait_live(&mut clients).await;

    let entry = handle
        .submit(&structured(Category::Staff, "1", "23", "456"))
        .await
        .expect("submission should succeed");
    assert_eq!(entry.lap_time.as_str(), "1:23.456");

    let board = wait_for(&mut staff, |board| !board.is_empty()).await;
    assert_eq!(board.lap_times(), ["1:23.456"]);
    assert_eq!(board.entries[0].id, entry.id);

    assert_eq!(handle.board(Category::Clients), clients_before);
    assert!(repo.entries(Category::Clients).unwrap().is_empty());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn missing_company_writes_nothing() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let runtime = start(&repo, RuntimeConfig::default()).await;
    let handle = runtime.handle();

    let mut staff = handle.watch(Category::Staff);
    let before = wait_live(&mut staff).await;

    let mut draft = structured(Category::Staff, "1", "23", "456");
    draft.company.clear();

    let err = handle.submit(&draft).await.unwrap_err();
    match err {
        SubmitError::Validation(err) => assert_eq!(err.fields(), [Field::Company]),
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(repo.writes_attempted(), 0);
    assert_eq!(handle.board(Category::Staff), before);
    assert!(!staff.has_changed().unwrap());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn clients_board_is_sorted_by_lap_time() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let runtime = start(&repo, RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut clients = handle.watch(Category::Clients);

    handle
        .submit(&free_text(Category::Clients, "2:10.000"))
        .await
        .unwrap();
    handle
        .submit(&free_text(Category::Clients, "1:59.000"))
        .await
        .unwrap();

    let board = wait_for(&mut clients, |board| board.entries.len() == 2).await;
    assert_eq!(board.lap_times(), ["1:59.000", "2:10.000"]);
    assert!(handle.board(Category::Staff).is_empty());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn storage_failure_leaves_board_unchanged() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let runtime = start(&repo, RuntimeConfig::default()).await;
    let handle = runtime.handle();

    let mut staff = handle.watch(Category::Staff);
    let before = wait_live(&mut staff).await;

    repo.fail_next_write("service unavailable").unwrap();
    let err = handle
        .submit(&structured(Category::Staff, "1", "23", "456"))
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Storage(_)));
    assert_eq!(repo.writes_attempted(), 1);
    assert_eq!(handle.board(Category::Staff), before);

    runtime.shutdown().await.unwrap();
}

// ================================================================
// Ordering
// ================================================================

#[tokio::test]
async fn default_order_compares_lap_time_text() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let runtime = start(&repo, RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut staff = handle.watch(Category::Staff);

    for lap in ["2:00.000", "1:50.000", "10:00.000", "1:05.000"] {
        handle.submit(&free_text(Category::Staff, lap)).await.unwrap();
    }

    let board = wait_for(&mut staff, |board| board.entries.len() == 4).await;
    assert_eq!(
        board.lap_times(),
        ["1:05.000", "1:50.000", "10:00.000", "2:00.000"]
    );

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn numeric_order_can_be_configured() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let config = RuntimeConfig {
        lap_order: LapTimeComparison::Numeric,
        ..RuntimeConfig::default()
    };
    let runtime = start(&repo, config).await;
    let handle = runtime.handle();
    let mut staff = handle.watch(Category::Staff);

    for lap in ["10:00.000", "2:00.000"] {
        handle.submit(&free_text(Category::Staff, lap)).await.unwrap();
    }

    let board = wait_for(&mut staff, |board| board.entries.len() == 2).await;
    assert_eq!(board.lap_times(), ["2:00.000", "10:00.000"]);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn external_removal_shrinks_board() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let runtime = start(&repo, RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut clients = handle.watch(Category::Clients);

    let gone = handle
        .submit(&free_text(Category::Clients, "1:00.000"))
        .await
        .unwrap();
    handle
        .submit(&free_text(Category::Clients, "1:30.000"))
        .await
        .unwrap();
    wait_for(&mut clients, |board| board.entries.len() == 2).await;

    assert!(repo.remove_external(Category::Clients, &gone.id).unwrap());

    let board = wait_for(&mut clients, |board| board.entries.len() == 1).await;
    assert_eq!(board.lap_times(), ["1:30.000"]);

    runtime.shutdown().await.unwrap();
}

// ================================================================
// Board independence and failures
// ================================================================

#[tokio::test]
async fn staff_write_never_notifies_clients_board() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let runtime = start(&repo, RuntimeConfig::default()).await;
    let handle = runtime.handle();

    let mut staff = handle.watch(Category::Staff);
    let mut clients = handle.watch(Category::Clients);
    wait_live(&mut staff).await;
    let before = wait_live(&mut clients).await;

    handle
        .submit(&free_text(Category::Staff, "1:00.000"))
        .await
        .unwrap();
    wait_for(&mut staff, |board| !board.is_empty()).await;

    assert!(!clients.has_changed().unwrap());
    assert_eq!(handle.board(Category::Clients).revision, before.revision);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn failed_subscription_keeps_last_snapshot() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let runtime = start(&repo, RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut events = handle.subscribe(Topic::Leaderboard);

    let mut staff = handle.watch(Category::Staff);
    let mut clients = handle.watch(Category::Clients);

    handle
        .submit(&free_text(Category::Staff, "1:00.000"))
        .await
        .unwrap();
    wait_for(&mut staff, |board| !board.is_empty()).await;
    wait_live(&mut clients).await;

    assert_eq!(
        repo.fail_subscriptions(Category::Staff, "permission denied")
            .unwrap(),
        1
    );

    let board = wait_for(&mut staff, |board| {
        matches!(board.status, BoardStatus::Stale { .. })
    })
    .await;
    assert_eq!(
        board.status,
        BoardStatus::Stale {
            reason: "permission denied".into()
        }
    );
    assert_eq!(board.lap_times(), ["1:00.000"]);

    let failed = timeout(WAIT, async {
        loop {
            match events.recv().await {
                Ok(Event::Leaderboard(event @ LeaderboardEvent::SubscriptionFailed { .. })) => {
                    return event;
                }
                Ok(_) => continue,
                Err(err) => panic!("event stream ended: {err}"),
            }
        }
    })
    .await
    .expect("no failure event");
    assert_eq!(
        failed,
        LeaderboardEvent::SubscriptionFailed {
            category: Category::Staff,
            error: "permission denied".into(),
        }
    );

    // The clients board keeps following its collection.
    handle
        .submit(&free_text(Category::Clients, "2:00.000"))
        .await
        .unwrap();
    let board = wait_for(&mut clients, |board| !board.is_empty()).await;
    assert!(board.is_live());

    // No automatic resubscribe.
    assert_eq!(repo.subscriber_count(Category::Staff), 0);

    runtime.shutdown().await.unwrap();
}

// ================================================================
// Lifecycle
// ================================================================

#[tokio::test]
async fn stop_closes_both_subscriptions_and_is_idempotent() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let mut sync = LeaderboardSync::new(
        repo.clone(),
        OrderBy::lap_time_ascending(),
        EventBus::new(),
    );

    sync.start().unwrap();
    assert!(matches!(sync.start(), Err(SyncError::AlreadyRunning)));
    assert_eq!(repo.subscriber_count(Category::Staff), 1);
    assert_eq!(repo.subscriber_count(Category::Clients), 1);

    sync.stop().await.unwrap();
    sync.stop().await.unwrap();

    assert!(!sync.is_running());
    assert_eq!(repo.subscriber_count(Category::Staff), 0);
    assert_eq!(repo.subscriber_count(Category::Clients), 0);
    assert_eq!(sync.board(Category::Staff).status, BoardStatus::Closed);
    assert_eq!(sync.board(Category::Clients).status, BoardStatus::Closed);

    let mut staff = sync.watch(Category::Staff);
    staff.mark_unchanged();

    repo.create(
        Category::Staff,
        free_text(Category::Staff, "1:00.000").validate().unwrap(),
    )
    .await
    .unwrap();

    assert!(!staff.has_changed().unwrap());
    assert!(sync.board(Category::Staff).is_empty());
}

#[tokio::test]
async fn refused_second_subscription_closes_the_first() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    repo.fail_next_subscribe(Category::Clients, "offline").unwrap();
    let mut sync = LeaderboardSync::new(
        repo.clone(),
        OrderBy::lap_time_ascending(),
        EventBus::new(),
    );

    let err = sync.start().unwrap_err();

    assert!(matches!(
        err,
        SyncError::Subscribe {
            category: Category::Clients,
            ..
        }
    ));
    assert!(!sync.is_running());
    assert_eq!(repo.subscriber_count(Category::Staff), 0);
    assert_eq!(repo.subscriber_count(Category::Clients), 0);
    assert_eq!(sync.board(Category::Staff).status, BoardStatus::Connecting);

    // The refusal was one-off; a second attempt starts both boards.
    sync.start().unwrap();
    assert_eq!(repo.subscriber_count(Category::Staff), 1);
    assert_eq!(repo.subscriber_count(Category::Clients), 1);
    sync.stop().await.unwrap();
}

#[tokio::test]
async fn restart_picks_up_changes_made_while_stopped() {
    let repo = Arc::new(InMemoryEntryRepository::new());
    let mut runtime = start(&repo, RuntimeConfig::default()).await;
    let handle = runtime.handle();
    let mut staff = handle.watch(Category::Staff);
    wait_live(&mut staff).await;

    runtime.pause().await.unwrap();
    assert_eq!(handle.board(Category::Staff).status, BoardStatus::Closed);

    handle
        .submit(&free_text(Category::Staff, "1:11.000"))
        .await
        .unwrap();
    assert!(handle.board(Category::Staff).is_empty());

    runtime.resume().unwrap();
    let board = wait_for(&mut staff, |board| board.is_live() && !board.is_empty()).await;
    assert_eq!(board.lap_times(), ["1:11.000"]);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn builder_requires_repository() {
    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::MissingRepository)));
}
