mod common;

use mural_backend::entities::games::GamePhase;
use mural_backend::errors::{
    ConflictKind, DomainError, PhaseKind, ValidationKind,
};
use mural_backend::repos;
use mural_backend::services::agents::AgentService;
use mural_backend::services::games::GameService;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use common::{conn, running_game, test_state};

#[tokio::test]
async fn create_register_start_happy_path() {
    let state = test_state().await;
    let db = conn(&state);
    let games = GameService::new();
    let agents = AgentService::new();

    let game = games.create_game(db, 8).await.unwrap();
    assert_eq!(game.phase, GamePhase::Waiting);
    assert_eq!(game.grid_size, 8);

    let a = agents.register(db, "ume").await.unwrap();
    let b = agents.register(db, "take").await.unwrap();
    assert_eq!(a.coins, 1000);
    assert!(!a.token.is_empty());
    assert_ne!(a.token, b.token);

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let started = games.start_game(db, &mut rng).await.unwrap();
    assert_eq!(started.game.phase, GamePhase::Running);
    assert_eq!(started.agents.len(), 2);

    // Grid fully partitioned between the two agents.
    let tiles = repos::tiles::list_by_game(db, game.id).await.unwrap();
    assert_eq!(tiles.len(), 64);
    assert!(tiles.iter().all(|t| t.color.is_none()));
    assert!(tiles.iter().any(|t| t.owner_id == a.id));
    assert!(tiles.iter().any(|t| t.owner_id == b.id));

    // Each agent got starting paint.
    for agent in [&a, &b] {
        let stocks = repos::paint::list_by_agent(db, agent.id).await.unwrap();
        assert_eq!(stocks.len(), 4);
        assert!(stocks.iter().all(|s| s.quantity > 0));
    }
}

#[tokio::test]
async fn only_one_waiting_game_at_a_time() {
    let state = test_state().await;
    let db = conn(&state);
    let games = GameService::new();

    games.create_game(db, 8).await.unwrap();
    let err = games.create_game(db, 8).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::GameAlreadyWaiting, _)
    ));
}

#[tokio::test]
async fn start_requires_a_waiting_game_with_enough_agents() {
    let state = test_state().await;
    let db = conn(&state);
    let games = GameService::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    // No game at all.
    let err = games.start_game(db, &mut rng).await.unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::GameNotWaiting, _)));

    // A game with fewer than two agents.
    games.create_game(db, 8).await.unwrap();
    AgentService::new().register(db, "solo").await.unwrap();
    let err = games.start_game(db, &mut rng).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::NotEnoughAgents, _)
    ));
}

#[tokio::test]
async fn start_rejects_running_and_finished_games() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let err = GameService::new().start_game(db, &mut rng).await.unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::GameNotWaiting, _)));
}

#[tokio::test]
async fn register_rejects_duplicate_names_and_full_games() {
    let state = test_state().await;
    let db = conn(&state);
    let agents = AgentService::new();

    GameService::new().create_game(db, 8).await.unwrap();
    agents.register(db, "kura").await.unwrap();

    let err = agents.register(db, "kura").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::NameTaken, _)));

    for i in 1..8 {
        agents.register(db, &format!("agent-{i}")).await.unwrap();
    }
    let err = agents.register(db, "ninth").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::GameFull, _)));
}

#[tokio::test]
async fn register_requires_a_waiting_game() {
    let state = test_state().await;
    let db = conn(&state);

    let err = AgentService::new().register(db, "early").await.unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::GameNotWaiting, _)));
}

#[tokio::test]
async fn register_rejects_when_no_game_is_waiting() {
    // Registration targets the waiting game specifically, not the
    // latest game.
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);

    let err = AgentService::new().register(db, "late").await.unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::GameNotWaiting, _)));
}

#[tokio::test]
async fn status_reports_the_latest_game() {
    let fixture = running_game(3, 8).await;
    let db = conn(&fixture.state);

    let status = GameService::new().status(db).await.unwrap().unwrap();
    assert_eq!(status.game.id, fixture.game.id);
    assert_eq!(status.agents.len(), 3);
    assert_eq!(status.painted, 0);
    assert_eq!(status.total_tiles, 64);
    assert!(!status.all_done);
}

#[tokio::test]
async fn status_is_none_without_a_game() {
    let state = test_state().await;
    let db = conn(&state);
    assert!(GameService::new().status(db).await.unwrap().is_none());
}

#[tokio::test]
async fn reset_wipes_the_whole_game() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let games = GameService::new();

    let deleted = games.reset_game(db).await.unwrap();
    assert_eq!(deleted, Some(fixture.game.id));

    assert!(games.status(db).await.unwrap().is_none());
    let tiles = repos::tiles::list_by_game(db, fixture.game.id).await.unwrap();
    assert!(tiles.is_empty());
    for agent in &fixture.agents {
        let stocks = repos::paint::list_by_agent(db, agent.id).await.unwrap();
        assert!(stocks.is_empty());
    }

    // And a fresh game can be created afterwards.
    assert!(games.reset_game(db).await.unwrap().is_none());
    games.create_game(db, 8).await.unwrap();
}

#[tokio::test]
async fn remove_agent_only_before_start() {
    let state = test_state().await;
    let db = conn(&state);
    let agents = AgentService::new();

    GameService::new().create_game(db, 8).await.unwrap();
    let a = agents.register(db, "first").await.unwrap();
    let b = agents.register(db, "second").await.unwrap();
    agents.register(db, "third").await.unwrap();

    agents.remove_agent(db, a.id).await.unwrap();
    assert_eq!(
        repos::agents::count_by_game(db, a.game_id).await.unwrap(),
        2
    );

    let mut rng = ChaCha8Rng::seed_from_u64(4);
    GameService::new().start_game(db, &mut rng).await.unwrap();
    let err = agents.remove_agent(db, b.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Phase(PhaseKind::GameNotWaiting, _)));
}
