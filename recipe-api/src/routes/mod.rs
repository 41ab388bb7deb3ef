mod auth;
mod comments;
mod follow;
mod profile;
mod ratings;
mod recipes;
mod users;

use axum::routing::{get, post};
use axum::Router;
use recipe_app::AppContext;

pub fn router() -> Router<AppContext> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/feed", get(recipes::feed))
        .route("/recipes/top-rated", get(recipes::top_rated))
        .route("/recipes/search", get(recipes::search))
        .route("/recipes/category/{category}", get(recipes::by_category))
        .route(
            "/recipes/{id}",
            get(recipes::get).put(recipes::update).delete(recipes::delete),
        )
        .route(
            "/recipes/{id}/comments",
            get(comments::list).post(comments::create),
        )
        .route(
            "/recipes/{id}/comments/{comment_id}",
            axum::routing::delete(comments::delete),
        )
        .route("/recipes/{id}/ratings", get(ratings::list).post(ratings::submit))
        .route("/recipes/{id}/ratings/average", get(ratings::average))
        .route("/follow/{user_id}", post(follow::follow).delete(follow::unfollow))
        .route("/follow/{user_id}/status", get(follow::status))
        .route("/users", get(users::list))
        .route("/users/{id}", get(users::get).delete(users::delete))
        .route("/users/{id}/recipes", get(users::recipes))
        .route("/profile/my-recipes", get(profile::my_recipes))
        .route("/profile/my-comments", get(profile::my_comments))
        .route("/profile/my-ratings", get(profile::my_ratings))
}
