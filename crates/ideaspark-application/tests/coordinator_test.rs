mod common;

use common::{Harness, MemorySessionRepository, ScriptedGateway};
use ideaspark_core::generation::{FlightState, GenerationKind, GenerationOutcome, RejectReason};
use ideaspark_core::session::{
    AI_AUTHOR_ID, DIRECT_IDEA_ID, Priority, RawRequirementKind, RequirementDoc, Session,
};
use ideaspark_core::view::ActiveTab;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

#[tokio::test]
async fn boost_coffee_app_adds_three_ideas() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&["A", "B", "C"])).await;
    harness.view.write().await.composer.set_idea_count(3);
    harness.type_input("coffee app").await;

    let outcome = harness.coordinator.boost_ideas().await;

    assert_eq!(outcome, GenerationOutcome::Completed { created: 3 });
    let session = harness.store.current_session().await;
    assert_eq!(session.ideas.len(), 3);
    assert_eq!(session.raw_requirements.len(), 1);
    assert_eq!(session.raw_requirements[0].kind, RawRequirementKind::AiBoost);
    assert_eq!(session.raw_requirements[0].content, "coffee app");
    assert_eq!(harness.input().await, "");

    let idea = &session.ideas[0];
    assert_eq!(idea.author_id, AI_AUTHOR_ID);
    assert!(!idea.is_favorite);
    assert_eq!(idea.priority, Priority::Medium);

    let request = harness.gateway.idea_requests.lock().unwrap()[0].clone();
    assert_eq!(request.count, 3);
    assert_eq!(request.context, "coffee app");
    assert_eq!(request.goal, session.goal);
    assert_eq!(request.mode, session.current_mode);
}

#[tokio::test]
async fn boost_prepends_batches_in_gateway_order() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&["first", "second"])).await;
    harness.type_input("round one").await;
    harness.coordinator.boost_ideas().await;
    harness.type_input("round two").await;
    harness.coordinator.boost_ideas().await;

    let session = harness.store.current_session().await;
    assert_eq!(session.ideas.len(), 4);
    assert_eq!(session.ideas[0].title, "first");
    assert_eq!(session.ideas[1].title, "second");
    assert_eq!(session.raw_requirements[0].content, "round two");
    assert_eq!(session.raw_requirements[1].content, "round one");
}

#[tokio::test]
async fn boost_failure_keeps_input_and_raw_log() {
    let harness = Harness::new(ScriptedGateway::failing()).await;
    harness.type_input("coffee app").await;

    let outcome = harness.coordinator.boost_ideas().await;

    assert_eq!(outcome, GenerationOutcome::Failed);
    let session = harness.store.current_session().await;
    assert!(session.ideas.is_empty());
    assert_eq!(session.raw_requirements.len(), 1);
    assert_eq!(harness.input().await, "coffee app");
    assert_eq!(harness.coordinator.flight_state(), FlightState::Idle);
}

#[tokio::test]
async fn boost_with_unusable_answer_counts_as_failure() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&[""])).await;
    harness.type_input("coffee app").await;

    assert_eq!(harness.coordinator.boost_ideas().await, GenerationOutcome::Failed);
    assert!(harness.store.current_session().await.ideas.is_empty());
    assert_eq!(harness.input().await, "coffee app");
}

#[tokio::test]
async fn blank_input_is_rejected_without_side_effects() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&["A"])).await;
    harness.type_input("  \n\t").await;
    let before = harness.store.current_session().await;

    assert_eq!(
        harness.coordinator.boost_ideas().await,
        GenerationOutcome::Rejected(RejectReason::EmptyInput)
    );
    assert_eq!(
        harness.coordinator.generate_prd().await,
        GenerationOutcome::Rejected(RejectReason::EmptyInput)
    );

    assert_eq!(harness.store.current_session().await, before);
    assert_eq!(harness.gateway.total_calls(), 0);
    assert!(harness.clock.recorded_sleeps().is_empty());
    assert!(!harness.coordinator.is_busy());
}

#[tokio::test]
async fn prd_from_input_uses_first_line_and_direct_link() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&[])).await;
    harness.type_input("Line1\nLine2").await;

    let outcome = harness.coordinator.generate_prd().await;

    assert_eq!(outcome, GenerationOutcome::Completed { created: 1 });
    let session = harness.store.current_session().await;
    assert_eq!(session.prds.len(), 1);
    assert_eq!(session.prds[0].idea_id, DIRECT_IDEA_ID);
    assert_eq!(session.prds[0].title, "PRD: Line1");
    assert_eq!(session.raw_requirements[0].kind, RawRequirementKind::PrdGen);
    assert_eq!(session.raw_requirements[0].content, "Line1\nLine2");

    let (title, content) = harness.gateway.doc_requests.lock().unwrap()[0].clone();
    assert_eq!(title, "Line1");
    assert_eq!(content, "Line1\nLine2");

    let view = harness.view.read().await;
    assert_eq!(view.active_tab, ActiveTab::Prds);
    assert_eq!(view.composer.input, "");
}

#[tokio::test]
async fn prd_failure_logs_raw_input_and_keeps_tab() {
    let harness = Harness::new(ScriptedGateway::failing()).await;
    harness.type_input("Checkout flow").await;

    assert_eq!(harness.coordinator.generate_prd().await, GenerationOutcome::Failed);

    let session = harness.store.current_session().await;
    assert!(session.prds.is_empty());
    assert_eq!(session.raw_requirements.len(), 1);
    let view = harness.view.read().await;
    assert_eq!(view.active_tab, ActiveTab::Ideas);
    assert_eq!(view.composer.input, "Checkout flow");
}

#[tokio::test]
async fn convert_links_web_doc_and_closes_detail() {
    let mut prd = RequirementDoc::new(DIRECT_IDEA_ID, "Coffee app", "# Overview\nBody", 1);
    prd.id = "p1".to_string();
    let session = Session::new("Workspace", "goal", 0).with_prd_prepended(prd);
    let harness =
        Harness::with_sessions(ScriptedGateway::with_ideas(&[]), vec![session]).await;
    harness.view.write().await.select_prd("p1");

    let outcome = harness.coordinator.convert_to_web("p1").await;

    assert_eq!(outcome, GenerationOutcome::Completed { created: 1 });
    let session = harness.store.current_session().await;
    assert_eq!(session.web_prds.len(), 1);
    assert_eq!(session.web_prds[0].prd_id, "p1");
    assert_eq!(session.web_prds[0].title, "Web: Coffee app");
    assert!(session.raw_requirements.is_empty());
    assert_eq!(
        harness.gateway.web_requests.lock().unwrap()[0],
        "# Overview\nBody"
    );

    let view = harness.view.read().await;
    assert_eq!(view.active_tab, ActiveTab::Web);
    assert_eq!(view.selected_prd_id(), None);
}

#[tokio::test]
async fn convert_unknown_prd_is_rejected() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&[])).await;
    assert_eq!(
        harness.coordinator.convert_to_web("missing").await,
        GenerationOutcome::Rejected(RejectReason::NotFound)
    );
    assert_eq!(harness.gateway.total_calls(), 0);
}

#[tokio::test]
async fn prd_from_idea_links_idea_and_closes_detail() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&["Bean subscription"])).await;
    harness.type_input("coffee app").await;
    harness.coordinator.boost_ideas().await;
    let idea = harness.store.current_session().await.ideas[0].clone();
    harness.type_input("draft in progress").await;
    harness.view.write().await.select_idea(idea.id.clone());

    let outcome = harness.coordinator.generate_prd_from_idea(&idea.id).await;

    assert_eq!(outcome, GenerationOutcome::Completed { created: 1 });
    let session = harness.store.current_session().await;
    assert_eq!(session.prds[0].idea_id, idea.id);
    assert_eq!(session.prds[0].title, "PRD: Bean subscription");
    assert_eq!(session.raw_requirements[0].kind, RawRequirementKind::PrdGen);
    assert_eq!(session.raw_requirements[0].content, idea.content);

    let view = harness.view.read().await;
    assert_eq!(view.selected_idea_id(), None);
    assert_eq!(view.active_tab, ActiveTab::Prds);
    assert_eq!(view.composer.input, "draft in progress");
}

#[tokio::test]
async fn min_busy_delay_follows_every_dispatched_call() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&["A"])).await;
    harness.type_input("coffee app").await;
    harness.coordinator.boost_ideas().await;
    harness.type_input("Checkout flow").await;
    harness.coordinator.generate_prd().await;

    assert_eq!(
        harness.clock.recorded_sleeps(),
        vec![Duration::from_millis(1500), Duration::from_millis(1500)]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn second_invocation_while_in_flight_is_rejected() {
    let gate = Arc::new(Notify::new());
    let gateway = ScriptedGateway {
        gate: Some(gate.clone()),
        ..ScriptedGateway::with_ideas(&["A"])
    };
    let harness = Harness::new(gateway).await;
    harness.type_input("coffee app").await;

    let coordinator = harness.coordinator.clone();
    let first = tokio::spawn(async move { coordinator.boost_ideas().await });

    while harness.gateway.idea_requests.lock().unwrap().is_empty() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(
        harness.coordinator.flight_state(),
        FlightState::InFlight(GenerationKind::Boost)
    );

    assert_eq!(
        harness.coordinator.boost_ideas().await,
        GenerationOutcome::Rejected(RejectReason::Busy)
    );
    assert_eq!(
        harness.coordinator.generate_prd().await,
        GenerationOutcome::Rejected(RejectReason::Busy)
    );
    assert_eq!(
        harness.coordinator.convert_to_web("any").await,
        GenerationOutcome::Rejected(RejectReason::Busy)
    );

    // Navigation stays available during the flight.
    harness.view.write().await.active_tab = ActiveTab::Raw;

    gate.notify_one();
    assert_eq!(first.await.unwrap(), GenerationOutcome::Completed { created: 1 });

    assert_eq!(harness.gateway.total_calls(), 1);
    assert_eq!(harness.store.current_session().await.raw_requirements.len(), 1);
    assert!(!harness.coordinator.is_busy());
}

#[tokio::test]
async fn persistence_failure_keeps_memory_state() {
    let repo = Arc::new(MemorySessionRepository {
        sessions: Mutex::new(vec![Session::new("Workspace", "goal", 0)]),
        fail_saves: true,
        ..Default::default()
    });
    let harness = Harness::with_repository(ScriptedGateway::with_ideas(&["A", "B"]), repo).await;
    harness.type_input("coffee app").await;

    let outcome = harness.coordinator.boost_ideas().await;

    assert_eq!(outcome, GenerationOutcome::Completed { created: 2 });
    assert_eq!(harness.store.current_session().await.ideas.len(), 2);
    assert_eq!(*harness.session_repo.saves.lock().unwrap(), 0);
}

#[tokio::test]
async fn every_mutation_is_persisted() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&["A"])).await;
    let saves_after_load = *harness.session_repo.saves.lock().unwrap();
    harness.type_input("coffee app").await;

    harness.coordinator.boost_ideas().await;

    // raw log entry + ideas
    assert_eq!(*harness.session_repo.saves.lock().unwrap(), saves_after_load + 2);
    let stored = harness.session_repo.sessions.lock().unwrap()[0].clone();
    assert_eq!(stored.ideas.len(), 1);
    assert_eq!(stored.raw_requirements.len(), 1);
}

fn assert_linkage_within_each_session(sessions: &[Session]) {
    for session in sessions {
        for web in &session.web_prds {
            assert!(
                session.find_prd(&web.prd_id).is_some(),
                "web document {} in session {} points outside it",
                web.id,
                session.title
            );
        }
    }
}

async fn wait_for_first_call(harness: &Harness) {
    while harness.gateway.total_calls() == 0 {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn convert_result_stays_in_originating_session_after_switch() {
    let mut prd = RequirementDoc::new(DIRECT_IDEA_ID, "Coffee app", "# Overview", 1);
    prd.id = "p1".to_string();
    let origin = Session::new("Origin", "goal", 0).with_prd_prepended(prd);
    let other = Session::new("Other", "goal", 0);
    let gate = Arc::new(Notify::new());
    let gateway = ScriptedGateway {
        gate: Some(gate.clone()),
        ..ScriptedGateway::with_ideas(&[])
    };
    let harness =
        Harness::with_sessions(gateway, vec![origin.clone(), other.clone()]).await;

    let coordinator = harness.coordinator.clone();
    let flight = tokio::spawn(async move { coordinator.convert_to_web("p1").await });
    wait_for_first_call(&harness).await;

    harness.workbench.switch_session(&other.id).await.unwrap();
    gate.notify_one();
    assert_eq!(flight.await.unwrap(), GenerationOutcome::Completed { created: 1 });

    let sessions = harness.store.list_sessions().await;
    assert_eq!(sessions[0].web_prds.len(), 1);
    assert_eq!(sessions[0].web_prds[0].prd_id, "p1");
    assert!(sessions[1].web_prds.is_empty());
    assert_linkage_within_each_session(&sessions);

    assert_eq!(harness.store.current_session_id().await, other.id);
    assert_eq!(harness.view.read().await.active_tab, ActiveTab::Ideas);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn boost_raw_log_and_ideas_share_originating_session() {
    let origin = Session::new("Origin", "goal", 0);
    let other = Session::new("Other", "goal", 0);
    let gate = Arc::new(Notify::new());
    let gateway = ScriptedGateway {
        gate: Some(gate.clone()),
        ..ScriptedGateway::with_ideas(&["A", "B"])
    };
    let harness =
        Harness::with_sessions(gateway, vec![origin.clone(), other.clone()]).await;
    harness.type_input("coffee app").await;

    let coordinator = harness.coordinator.clone();
    let flight = tokio::spawn(async move { coordinator.boost_ideas().await });
    wait_for_first_call(&harness).await;

    harness.workbench.switch_session(&other.id).await.unwrap();
    gate.notify_one();
    assert_eq!(flight.await.unwrap(), GenerationOutcome::Completed { created: 2 });

    let sessions = harness.store.list_sessions().await;
    assert_eq!(sessions[0].id, origin.id);
    assert_eq!(sessions[0].ideas.len(), 2);
    assert_eq!(sessions[0].raw_requirements.len(), 1);
    assert!(sessions[1].ideas.is_empty());
    assert!(sessions[1].raw_requirements.is_empty());

    let stored = harness.session_repo.sessions.lock().unwrap().clone();
    assert_eq!(stored[0].ideas.len(), 2);
    assert!(stored[1].ideas.is_empty());
}
