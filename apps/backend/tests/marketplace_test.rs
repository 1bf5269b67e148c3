mod common;

use mural_backend::domain::offers::OfferSpec;
use mural_backend::entities::offers::OfferStatus;
use mural_backend::entities::paint_stocks::PaintColor;
use mural_backend::entities::tiles;
use mural_backend::errors::{
    ConflictKind, DomainError, ForbiddenKind, NotFoundKind, ValidationKind,
};
use mural_backend::repos;
use mural_backend::services::economy;
use mural_backend::services::marketplace::MarketplaceService;
use sea_orm::DatabaseConnection;

use common::{conn, running_game};

async fn owned_tile(db: &DatabaseConnection, game_id: i64, owner_id: i64) -> tiles::Model {
    repos::tiles::list_by_owner(db, game_id, owner_id)
        .await
        .unwrap()
        .into_iter()
        .next()
        .expect("agent owns at least one tile")
}

async fn stocked_color(db: &DatabaseConnection, agent_id: i64) -> (PaintColor, i32) {
    repos::paint::list_by_agent(db, agent_id)
        .await
        .unwrap()
        .into_iter()
        .map(|s| (s.color, s.quantity))
        .find(|&(_, q)| q > 0)
        .expect("agent has paint")
}

#[tokio::test]
async fn sell_tile_settlement_moves_coins_and_ownership() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let seller = &fixture.agents[0];
    let buyer = &fixture.agents[1];
    let tile = owned_tile(db, fixture.game.id, seller.id).await;
    let service = MarketplaceService::new();

    let offer = service
        .create_offer(
            db,
            fixture.game.id,
            seller.id,
            OfferSpec::SellTile {
                x: tile.x,
                y: tile.y,
            },
            150,
        )
        .await
        .unwrap();

    let trade = service
        .accept_offer(db, fixture.game.id, offer.id, buyer.id)
        .await
        .unwrap();
    assert_eq!(trade.offer.status, OfferStatus::Accepted);
    assert_eq!(trade.offer.accepted_by, Some(buyer.id));

    let tile = repos::tiles::require(db, fixture.game.id, tile.x, tile.y)
        .await
        .unwrap();
    assert_eq!(tile.owner_id, buyer.id);

    let seller_row = repos::agents::require(db, seller.id).await.unwrap();
    let buyer_row = repos::agents::require(db, buyer.id).await.unwrap();
    assert_eq!(seller_row.coins, 1150);
    assert_eq!(buyer_row.coins, 850);
}

#[tokio::test]
async fn buy_tile_settlement_pays_the_accepter() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let poster = &fixture.agents[0];
    let owner = &fixture.agents[1];
    let tile = owned_tile(db, fixture.game.id, owner.id).await;
    let service = MarketplaceService::new();

    let offer = service
        .create_offer(
            db,
            fixture.game.id,
            poster.id,
            OfferSpec::BuyTile {
                x: tile.x,
                y: tile.y,
            },
            200,
        )
        .await
        .unwrap();

    service
        .accept_offer(db, fixture.game.id, offer.id, owner.id)
        .await
        .unwrap();

    let tile = repos::tiles::require(db, fixture.game.id, tile.x, tile.y)
        .await
        .unwrap();
    assert_eq!(tile.owner_id, poster.id);
    assert_eq!(repos::agents::require(db, poster.id).await.unwrap().coins, 800);
    assert_eq!(repos::agents::require(db, owner.id).await.unwrap().coins, 1200);
}

#[tokio::test]
async fn paint_trades_move_stock_both_ways() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let a = &fixture.agents[0];
    let b = &fixture.agents[1];
    let service = MarketplaceService::new();

    // a sells 3 units of a color they hold.
    let (color, a_before) = stocked_color(db, a.id).await;
    assert!(a_before >= 3, "seeded stock is large enough");
    let b_before = repos::paint::quantity(db, b.id, color).await.unwrap();

    let offer = service
        .create_offer(
            db,
            fixture.game.id,
            a.id,
            OfferSpec::SellPaint { color, quantity: 3 },
            60,
        )
        .await
        .unwrap();
    service
        .accept_offer(db, fixture.game.id, offer.id, b.id)
        .await
        .unwrap();

    assert_eq!(
        repos::paint::quantity(db, a.id, color).await.unwrap(),
        a_before - 3
    );
    assert_eq!(
        repos::paint::quantity(db, b.id, color).await.unwrap(),
        b_before + 3
    );
    assert_eq!(repos::agents::require(db, a.id).await.unwrap().coins, 1060);
    assert_eq!(repos::agents::require(db, b.id).await.unwrap().coins, 940);

    // b posts a buy for the same color; a accepts and ships paint back.
    let a_stock = repos::paint::quantity(db, a.id, color).await.unwrap();
    let b_stock = repos::paint::quantity(db, b.id, color).await.unwrap();
    let offer = service
        .create_offer(
            db,
            fixture.game.id,
            b.id,
            OfferSpec::BuyPaint { color, quantity: 2 },
            40,
        )
        .await
        .unwrap();
    service
        .accept_offer(db, fixture.game.id, offer.id, a.id)
        .await
        .unwrap();

    assert_eq!(
        repos::paint::quantity(db, a.id, color).await.unwrap(),
        a_stock - 2
    );
    assert_eq!(
        repos::paint::quantity(db, b.id, color).await.unwrap(),
        b_stock + 2
    );
    assert_eq!(repos::agents::require(db, a.id).await.unwrap().coins, 1100);
    assert_eq!(repos::agents::require(db, b.id).await.unwrap().coins, 900);
}

#[tokio::test]
async fn open_buy_offers_lock_coins() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let agent = &fixture.agents[0];
    let other = &fixture.agents[1];
    let tile = owned_tile(db, fixture.game.id, other.id).await;
    let service = MarketplaceService::new();

    service
        .create_offer(
            db,
            fixture.game.id,
            agent.id,
            OfferSpec::BuyTile {
                x: tile.x,
                y: tile.y,
            },
            700,
        )
        .await
        .unwrap();

    assert_eq!(
        economy::available_coins(db, fixture.game.id, agent.id)
            .await
            .unwrap(),
        300
    );

    // A second commitment beyond the remainder is rejected.
    let err = service
        .create_offer(
            db,
            fixture.game.id,
            agent.id,
            OfferSpec::BuyPaint {
                color: PaintColor::Indigo,
                quantity: 1,
            },
            400,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InsufficientCoins, _)
    ));
}

#[tokio::test]
async fn buy_tile_priced_beyond_the_balance_is_rejected_at_creation() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let poster = &fixture.agents[0];
    let tile = owned_tile(db, fixture.game.id, fixture.agents[1].id).await;

    let err = MarketplaceService::new()
        .create_offer(
            db,
            fixture.game.id,
            poster.id,
            OfferSpec::BuyTile {
                x: tile.x,
                y: tile.y,
            },
            2000,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InsufficientCoins, _)
    ));
    assert!(repos::offers::list_by_game(db, fixture.game.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn open_sell_paint_offers_lock_stock() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let agent = &fixture.agents[0];
    let (color, stock) = stocked_color(db, agent.id).await;
    let service = MarketplaceService::new();

    service
        .create_offer(
            db,
            fixture.game.id,
            agent.id,
            OfferSpec::SellPaint {
                color,
                quantity: stock,
            },
            30,
        )
        .await
        .unwrap();

    assert_eq!(
        economy::available_paint(db, fixture.game.id, agent.id, color)
            .await
            .unwrap(),
        0
    );
    let err = service
        .create_offer(
            db,
            fixture.game.id,
            agent.id,
            OfferSpec::SellPaint { color, quantity: 1 },
            10,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InsufficientPaint, _)
    ));
}

#[tokio::test]
async fn cancel_releases_the_lock() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let agent = &fixture.agents[0];
    let other = &fixture.agents[1];
    let tile = owned_tile(db, fixture.game.id, other.id).await;
    let service = MarketplaceService::new();

    let offer = service
        .create_offer(
            db,
            fixture.game.id,
            agent.id,
            OfferSpec::BuyTile {
                x: tile.x,
                y: tile.y,
            },
            900,
        )
        .await
        .unwrap();
    assert_eq!(
        economy::available_coins(db, fixture.game.id, agent.id)
            .await
            .unwrap(),
        100
    );

    let cancelled = service
        .cancel_offer(db, fixture.game.id, offer.id, agent.id)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OfferStatus::Cancelled);
    assert_eq!(
        economy::available_coins(db, fixture.game.id, agent.id)
            .await
            .unwrap(),
        1000
    );
}

#[tokio::test]
async fn accept_guards_reject_bad_accepters() {
    let fixture = running_game(3, 8).await;
    let db = conn(&fixture.state);
    let seller = &fixture.agents[0];
    let buyer = &fixture.agents[1];
    let tile = owned_tile(db, fixture.game.id, seller.id).await;
    let service = MarketplaceService::new();

    let offer = service
        .create_offer(
            db,
            fixture.game.id,
            seller.id,
            OfferSpec::SellTile {
                x: tile.x,
                y: tile.y,
            },
            100,
        )
        .await
        .unwrap();

    // Own offer.
    let err = service
        .accept_offer(db, fixture.game.id, offer.id, seller.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::OwnOffer, _)));

    // Unknown offer.
    let err = service
        .accept_offer(db, fixture.game.id, 99999, buyer.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Offer, _)));

    // Already settled.
    service
        .accept_offer(db, fixture.game.id, offer.id, buyer.id)
        .await
        .unwrap();
    let err = service
        .accept_offer(db, fixture.game.id, offer.id, fixture.agents[2].id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::OfferNotOpen, _)
    ));
}

#[tokio::test]
async fn buy_tile_accept_requires_current_ownership() {
    let fixture = running_game(3, 8).await;
    let db = conn(&fixture.state);
    let poster = &fixture.agents[0];
    let owner = &fixture.agents[1];
    let bystander = &fixture.agents[2];
    let tile = owned_tile(db, fixture.game.id, owner.id).await;
    let service = MarketplaceService::new();

    let offer = service
        .create_offer(
            db,
            fixture.game.id,
            poster.id,
            OfferSpec::BuyTile {
                x: tile.x,
                y: tile.y,
            },
            100,
        )
        .await
        .unwrap();

    let err = service
        .accept_offer(db, fixture.game.id, offer.id, bystander.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::NotTileOwner, _)
    ));
}

#[tokio::test]
async fn listed_tile_cannot_be_listed_again() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let seller = &fixture.agents[0];
    let tile = owned_tile(db, fixture.game.id, seller.id).await;
    let service = MarketplaceService::new();
    let spec = OfferSpec::SellTile {
        x: tile.x,
        y: tile.y,
    };

    service
        .create_offer(db, fixture.game.id, seller.id, spec, 100)
        .await
        .unwrap();
    let err = service
        .create_offer(db, fixture.game.id, seller.id, spec, 120)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::TileAlreadyListed, _)
    ));
}

#[tokio::test]
async fn cancel_requires_the_poster() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let seller = &fixture.agents[0];
    let other = &fixture.agents[1];
    let tile = owned_tile(db, fixture.game.id, seller.id).await;
    let service = MarketplaceService::new();

    let offer = service
        .create_offer(
            db,
            fixture.game.id,
            seller.id,
            OfferSpec::SellTile {
                x: tile.x,
                y: tile.y,
            },
            100,
        )
        .await
        .unwrap();

    let err = service
        .cancel_offer(db, fixture.game.id, offer.id, other.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Forbidden(ForbiddenKind::NotYourOffer, _)
    ));
}

#[tokio::test]
async fn offer_views_resolve_names_newest_first() {
    let fixture = running_game(2, 8).await;
    let db = conn(&fixture.state);
    let a = &fixture.agents[0];
    let tile = owned_tile(db, fixture.game.id, a.id).await;
    let (color, _) = stocked_color(db, a.id).await;
    let service = MarketplaceService::new();

    service
        .create_offer(
            db,
            fixture.game.id,
            a.id,
            OfferSpec::SellTile {
                x: tile.x,
                y: tile.y,
            },
            100,
        )
        .await
        .unwrap();
    let second = service
        .create_offer(
            db,
            fixture.game.id,
            a.id,
            OfferSpec::SellPaint { color, quantity: 1 },
            10,
        )
        .await
        .unwrap();

    let views = service.list_offers(db, fixture.game.id).await.unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].id, second.id);
    assert_eq!(views[0].agent, a.name);
    assert!(views.iter().all(|v| v.status == OfferStatus::Open));
}

#[tokio::test]
async fn concurrent_spends_cannot_both_pass_the_balance_check() {
    use mural_backend::db::txn::with_write_txn;

    let fixture = running_game(3, 8).await;
    let state = fixture.state.clone();
    let db = conn(&fixture.state);
    let spender = fixture.agents[0].clone();
    let tile_a = owned_tile(db, fixture.game.id, fixture.agents[1].id).await;
    let tile_b = owned_tile(db, fixture.game.id, fixture.agents[2].id).await;
    let game_id = fixture.game.id;

    // Two 600-coin commitments against a 1000-coin balance, racing.
    let state_a = state.clone();
    let spender_id = spender.id;
    let (x_a, y_a) = (tile_a.x, tile_a.y);
    let first = with_write_txn(&state_a, move |txn| {
        Box::pin(async move {
            let offer = MarketplaceService::new()
                .create_offer(
                    txn,
                    game_id,
                    spender_id,
                    OfferSpec::BuyTile { x: x_a, y: y_a },
                    600,
                )
                .await?;
            Ok(offer)
        })
    });
    let state_b = state.clone();
    let (x_b, y_b) = (tile_b.x, tile_b.y);
    let second = with_write_txn(&state_b, move |txn| {
        Box::pin(async move {
            let offer = MarketplaceService::new()
                .create_offer(
                    txn,
                    game_id,
                    spender_id,
                    OfferSpec::BuyTile { x: x_b, y: y_b },
                    600,
                )
                .await?;
            Ok(offer)
        })
    });

    let (first, second) = tokio::join!(first, second);
    assert_ne!(
        first.is_ok(),
        second.is_ok(),
        "exactly one of the two commitments may succeed"
    );

    assert_eq!(
        economy::available_coins(db, game_id, spender.id).await.unwrap(),
        400
    );
}
