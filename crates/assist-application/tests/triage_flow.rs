//! End-to-end triage flow against a real selection log file.

use std::path::Path;
use std::sync::Arc;

use assist_application::{
    HeuristicSuggestionProvider, SelectOutcome, SuggestionFetch, TriageSession,
};
use assist_core::config::TriageConfig;
use assist_core::queue::{QueueSnapshot, QueueState};
use assist_core::suggestion::SuggestedResponse;
use assist_core::ticket::{Sentiment, Ticket};
use assist_infrastructure::{AssistPaths, JsonSelectionLogRepository, TomlTicketRepository};
use tempfile::TempDir;

fn ticket(id: &str, sentiment: &str, tier: u32) -> Ticket {
    Ticket {
        id: id.to_string(),
        customer_name: format!("Customer {}", id),
        issue_summary: "Needs help".to_string(),
        tier,
        sentiment: Sentiment::new(sentiment),
        emotion: "mixed".to_string(),
    }
}

fn config() -> TriageConfig {
    TriageConfig {
        settle_delay_ms: 20,
        suggestion_latency_ms: 5,
        ..TriageConfig::default()
    }
}

async fn open_session(data_dir: &Path) -> TriageSession {
    let config = config();
    let tickets = TomlTicketRepository::from_tickets(vec![
        ticket("A", "frustrated", 1),
        ticket("B", "positive", 0),
    ])
    .unwrap();
    let log = JsonSelectionLogRepository::with_path(AssistPaths::selection_log_file_in(data_dir))
        .await
        .unwrap();

    TriageSession::start(
        Arc::new(tickets),
        Arc::new(log),
        Arc::new(HeuristicSuggestionProvider::from_config(&config)),
        &config,
    )
    .await
    .unwrap()
}

async fn first_suggestion(session: &TriageSession, expected_ticket: &str) -> SuggestedResponse {
    match session.suggestions().await.unwrap() {
        SuggestionFetch::Ready {
            ticket_id,
            mut responses,
        } => {
            assert_eq!(ticket_id, expected_ticket);
            responses.remove(0)
        }
        other => panic!("expected suggestions, got {:?}", other),
    }
}

async fn wait_for_state(session: &TriageSession, state: QueueState) -> QueueSnapshot {
    let mut rx = session.subscribe();
    let snapshot = rx.wait_for(|s| s.state == state).await.unwrap().clone();
    snapshot
}

#[tokio::test]
async fn test_two_ticket_scenario_with_reset() {
    let temp_dir = TempDir::new().unwrap();
    let slot = AssistPaths::selection_log_file_in(temp_dir.path());
    let session = open_session(temp_dir.path()).await;

    assert_eq!(session.state().await, QueueState::Active { cursor: 0 });

    // Ticket A: frustrated, tier 1.
    let response = first_suggestion(&session, "A").await;
    let outcome = session.select_response(&response).await.unwrap();
    assert!(matches!(outcome, SelectOutcome::Committed { cursor: 0, .. }));

    let snapshot = wait_for_state(&session, QueueState::Active { cursor: 1 }).await;
    assert_eq!(snapshot.selections, 1);
    let log = session.selections().await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].ticket_id, "A");

    // Ticket B: positive.
    let response = first_suggestion(&session, "B").await;
    assert_eq!(response.tone, "appreciative");
    session.select_response(&response).await.unwrap();

    let snapshot = wait_for_state(&session, QueueState::Exhausted).await;
    assert_eq!(snapshot.selections, 2);
    assert_eq!(snapshot.processed, 2);
    assert!(slot.exists());

    // Reset.
    let state = session.reset().await.unwrap();
    assert_eq!(state, QueueState::Active { cursor: 0 });
    assert!(session.selections().await.is_empty());
    assert!(!slot.exists());
}

#[tokio::test]
async fn test_reload_resumes_progress() {
    let temp_dir = TempDir::new().unwrap();

    {
        let session = open_session(temp_dir.path()).await;
        let response = first_suggestion(&session, "A").await;
        session.select_response(&response).await.unwrap();
        wait_for_state(&session, QueueState::Active { cursor: 1 }).await;
    }

    let reloaded = open_session(temp_dir.path()).await;
    assert_eq!(reloaded.state().await, QueueState::Active { cursor: 1 });

    let log = reloaded.selections().await;
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].ticket_id, "A");
    assert!(log[0].selected_at.is_some());
}

#[tokio::test]
async fn test_reload_after_all_processed_is_exhausted() {
    let temp_dir = TempDir::new().unwrap();

    {
        let session = open_session(temp_dir.path()).await;
        for (cursor, id) in ["A", "B"].into_iter().enumerate() {
            let response = first_suggestion(&session, id).await;
            session.select_response(&response).await.unwrap();
            let next = if cursor == 0 {
                QueueState::Active { cursor: 1 }
            } else {
                QueueState::Exhausted
            };
            wait_for_state(&session, next).await;
        }
    }

    let reloaded = open_session(temp_dir.path()).await;
    assert_eq!(reloaded.state().await, QueueState::Exhausted);
    assert_eq!(reloaded.selections().await.len(), 2);
}

#[tokio::test]
async fn test_corrupt_slot_starts_fresh() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        AssistPaths::selection_log_file_in(temp_dir.path()),
        "{not json",
    )
    .unwrap();

    let session = open_session(temp_dir.path()).await;
    assert_eq!(session.state().await, QueueState::Active { cursor: 0 });
    assert!(session.selections().await.is_empty());
}

#[tokio::test]
async fn test_resume_never_presents_an_answered_ticket_again() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        AssistPaths::selection_log_file_in(temp_dir.path()),
        r#"[{"ticketId":"B","tone":"appreciative","text":"Thanks!"}]"#,
    )
    .unwrap();

    let session = open_session(temp_dir.path()).await;
    assert_eq!(session.state().await, QueueState::Active { cursor: 0 });
    assert_eq!(session.snapshot().await.processed, 1);

    let response = first_suggestion(&session, "A").await;
    session.select_response(&response).await.unwrap();

    let snapshot = wait_for_state(&session, QueueState::Exhausted).await;
    assert_eq!(snapshot.processed, 2);
    assert_eq!(snapshot.selections, 2);
}
