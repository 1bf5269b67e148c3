mod common;

use mural_backend::entities::games::GamePhase;
use mural_backend::errors::{DomainError, PhaseKind};
use mural_backend::repos;
use mural_backend::services::chat::ChatService;

use common::{conn, running_game};

#[tokio::test]
async fn messages_come_back_in_posting_order_with_names() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let service = ChatService::new();

    for (agent, text) in [
        (&fixture.agents[0], "anyone selling teal?"),
        (&fixture.agents[1], "20 units, 50 coins"),
        (&fixture.agents[0], "deal"),
    ] {
        service
            .post_message(db, fixture.game.id, agent.id, &agent.name, text)
            .await
            .unwrap();
    }

    let messages = service.list_messages(db, fixture.game.id).await.unwrap();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0].content, "anyone selling teal?");
    assert_eq!(messages[0].agent, fixture.agents[0].name);
    assert_eq!(messages[1].agent, fixture.agents[1].name);
    assert_eq!(messages[2].content, "deal");
    assert!(messages.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn chat_only_flows_while_running() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let agent = &fixture.agents[0];

    repos::games::set_phase(db, fixture.game.id, GamePhase::Finished)
        .await
        .unwrap();

    let err = ChatService::new()
        .post_message(db, fixture.game.id, agent.id, &agent.name, "too late")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Phase(PhaseKind::GameNotRunning, _)
    ));
}
