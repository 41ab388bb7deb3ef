mod common;

use common::{publish, setup, tick, user_with_role};
use recipe_app::domain::Role;
use recipe_errors::AppError;

#[tokio::test]
async fn test_following_feed_only_shows_followed_authors() {
    let (ctx, db) = setup().await;
    let alice = user_with_role(&ctx, &db, "alice", Role::Cook).await;
    let dave = user_with_role(&ctx, &db, "dave", Role::Cook).await;
    let bob = user_with_role(&ctx, &db, "bob", Role::User).await;

    let older = publish(&ctx, &alice, "Focaccia").await;
    tick().await;
    publish(&ctx, &dave, "Chili").await;
    tick().await;
    let newer = publish(&ctx, &alice, "Risotto").await;

    let feeds = &ctx.feed_composer;
    assert!(feeds.following_feed(bob.user_id).await.unwrap().is_empty());

    ctx.social_graph.follow(Some(&bob), alice.user_id).await.unwrap();
    let feed = feeds.personal_feed(Some(&bob)).await.unwrap();
    let ids: Vec<_> = feed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert!(feed.iter().all(|r| r.author_id == alice.user_id));
    assert!(feed.iter().all(|r| r.author_username == "alice"));

    assert_eq!(feeds.global_feed().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_authored_feed_and_my_recipes() {
    let (ctx, db) = setup().await;
    let alice = user_with_role(&ctx, &db, "alice", Role::Cook).await;
    let admin = user_with_role(&ctx, &db, "root", Role::Admin).await;

    publish(&ctx, &alice, "Tart").await;
    tick().await;
    publish(&ctx, &admin, "Stew").await;

    let public_view = ctx.feed_composer.authored_feed(alice.user_id).await.unwrap();
    assert_eq!(public_view.len(), 1);
    assert_eq!(public_view[0].title, "Tart");

    let own = ctx.feed_composer.my_recipes(Some(&admin)).await.unwrap();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].title, "Stew");

    assert_eq!(
        ctx.feed_composer.personal_feed(None).await.unwrap_err(),
        AppError::Unauthenticated
    );
}

#[tokio::test]
async fn test_catalog_listings() {
    let (ctx, db) = setup().await;
    let alice = user_with_role(&ctx, &db, "alice", Role::Cook).await;
    let bob = user_with_role(&ctx, &db, "bob", Role::User).await;

    let mut vegan = common::draft("Lentil Curry");
    vegan.category = recipe_app::domain::Category::Vegan;
    let curry = ctx.recipe_catalog.create(Some(&alice), vegan).await.unwrap();
    tick().await;
    let bread = publish(&ctx, &alice, "Sourdough Bread").await;
    tick().await;
    let unrated = publish(&ctx, &alice, "Plain Rice").await;

    ctx.rating_ledger.submit(Some(&bob), curry.id, 3).await.unwrap();
    ctx.rating_ledger.submit(Some(&bob), bread.id, 5).await.unwrap();

    let by_category = ctx
        .recipe_catalog
        .by_category(recipe_app::domain::Category::Vegan)
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].id, curry.id);

    let found = ctx.recipe_catalog.search("  SOURDOUGH ").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, bread.id);
    let by_description = ctx.recipe_catalog.search("curry desc").await.unwrap();
    assert_eq!(by_description.len(), 1);
    assert_eq!(ctx.recipe_catalog.search("").await.unwrap().len(), 3);

    let top: Vec<_> = ctx
        .recipe_catalog
        .top_rated()
        .await
        .unwrap()
        .into_iter()
        .map(|r| (r.id, r.average_rating))
        .collect();
    assert_eq!(top, vec![(bread.id, 5.0), (curry.id, 3.0), (unrated.id, 0.0)]);
}

#[tokio::test]
async fn test_alice_and_bob() {
    let (ctx, db) = setup().await;
    let alice = user_with_role(&ctx, &db, "alice", Role::Cook).await;
    let bob = user_with_role(&ctx, &db, "bob", Role::User).await;

    let r1 = publish(&ctx, &alice, "R1").await;
    ctx.social_graph.follow(Some(&bob), alice.user_id).await.unwrap();

    let feed = ctx.feed_composer.personal_feed(Some(&bob)).await.unwrap();
    assert!(feed.iter().any(|r| r.id == r1.id));

    ctx.rating_ledger.submit(Some(&bob), r1.id, 4).await.unwrap();
    assert_eq!(ctx.rating_ledger.average_for(r1.id).await.unwrap(), 4.0);

    ctx.rating_ledger.submit(Some(&bob), r1.id, 2).await.unwrap();
    assert_eq!(ctx.rating_ledger.average_for(r1.id).await.unwrap(), 2.0);
    assert_eq!(ctx.rating_ledger.ratings_for(r1.id).await.unwrap().len(), 1);

    let feed = ctx.feed_composer.personal_feed(Some(&bob)).await.unwrap();
    assert_eq!(feed[0].average_rating, 2.0);
}
