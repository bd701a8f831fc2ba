use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
};
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;

use crate::api;
use crate::auth::{auth_middleware, require_auth_middleware};
use crate::error::ApiError;
use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 52_428_800; // matches the media service cap

pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/signup", post(api::auth::signup::post))
        .route("/login", post(api::auth::login::post))
        .route("/magic-link", post(api::auth::magic_link::post))
        .route("/confirm", get(api::auth::confirm::get))
        .route("/logout", post(api::auth::logout::post))
        .route("/whoami", get(api::auth::whoami::get));

    let house_routes = Router::new()
        .route("/houses", post(api::houses::create).get(api::houses::list))
        .route("/houses/{house_id}", get(api::houses::by_house_id::get))
        .route(
            "/houses/{house_id}/members",
            get(api::houses::by_house_id::members::list),
        )
        .route(
            "/houses/{house_id}/invites",
            post(api::houses::by_house_id::invites::create)
                .get(api::houses::by_house_id::invites::list),
        )
        .route(
            "/houses/{house_id}/stays",
            get(api::houses::by_house_id::stays::list)
                .post(api::houses::by_house_id::stays::create),
        )
        .route(
            "/houses/{house_id}/stays/{stay_id}",
            delete(api::houses::by_house_id::stays::remove),
        )
        .route(
            "/houses/{house_id}/expenses",
            get(api::houses::by_house_id::expenses::list)
                .post(api::houses::by_house_id::expenses::create),
        )
        .route(
            "/houses/{house_id}/expenses/balances",
            get(api::houses::by_house_id::expenses::balances),
        )
        .route(
            "/houses/{house_id}/media",
            post(api::houses::by_house_id::media::upload)
                .get(api::houses::by_house_id::media::list),
        )
        .route(
            "/houses/{house_id}/media/{media_id}",
            get(api::houses::by_house_id::media::download),
        )
        .route(
            "/houses/{house_id}/media/{media_id}/thumbnail",
            get(api::houses::by_house_id::media::thumbnail),
        )
        .route(
            "/houses/{house_id}/weather",
            get(api::houses::by_house_id::weather::get),
        )
        .route_layer(middleware::from_fn(require_auth_middleware));

    let api_routes = Router::new()
        .merge(house_routes)
        // Recovery stays reachable without a session: "no session yet" is a
        // valid, idle outcome there.
        .route("/invites/recover", post(api::invites::recover::post));

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(CookieManagerLayer::new())
        .layer(CorsLayer::permissive())
        .fallback(handler_404)
        .with_state(state)
}

async fn handler_404() -> ApiError {
    ApiError::NotFound
}
