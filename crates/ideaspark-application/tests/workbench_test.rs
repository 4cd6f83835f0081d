mod common;

use common::{Harness, ScriptedGateway};
use ideaspark_core::session::BrainstormMode;
use ideaspark_core::view::ActiveTab;

#[tokio::test]
async fn mode_change_reaches_next_boost() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&["A"])).await;
    harness.workbench.set_mode(BrainstormMode::SixHats).await.unwrap();
    harness.workbench.set_goal("Better mornings").await.unwrap();
    harness.type_input("coffee app").await;

    harness.coordinator.boost_ideas().await;

    let request = harness.gateway.idea_requests.lock().unwrap()[0].clone();
    assert_eq!(request.mode, BrainstormMode::SixHats);
    assert_eq!(request.goal, "Better mornings");
}

#[tokio::test]
async fn toggle_favorite_flips_only_that_idea() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&["A", "B"])).await;
    harness.type_input("coffee app").await;
    harness.coordinator.boost_ideas().await;
    let id = harness.store.current_session().await.ideas[1].id.clone();

    let session = harness.workbench.toggle_favorite(&id).await.unwrap();
    assert!(!session.ideas[0].is_favorite);
    assert!(session.ideas[1].is_favorite);

    let session = harness.workbench.toggle_favorite(&id).await.unwrap();
    assert!(!session.ideas[1].is_favorite);

    let unchanged = harness.workbench.toggle_favorite("missing").await.unwrap();
    assert_eq!(unchanged, session);
}

#[tokio::test]
async fn switching_sessions_resets_selection() {
    let harness = Harness::new(ScriptedGateway::with_ideas(&["A"])).await;
    let first = harness.workbench.current_session().await;
    {
        let mut view = harness.view.write().await;
        view.active_tab = ActiveTab::Raw;
        view.select_prd("p1");
    }

    let second = harness
        .workbench
        .create_session("Side project", "Weekend ideas")
        .await
        .unwrap();
    assert_eq!(harness.workbench.current_session().await.id, second.id);
    assert_eq!(harness.workbench.list_sessions().await.len(), 2);
    {
        let view = harness.view.read().await;
        assert_eq!(view.active_tab, ActiveTab::Ideas);
        assert_eq!(view.selected_prd_id(), None);
    }

    harness.workbench.switch_session(&first.id).await.unwrap();
    assert_eq!(harness.workbench.current_session().await.id, first.id);
    assert!(harness.workbench.switch_session("nope").await.unwrap_err().is_not_found());
}
