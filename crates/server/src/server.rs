use axum::{Router, routing::get};

use std::sync::Arc;

use crate::{ingredients, recipes};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/{id}",
            get(recipes::detail)
                .patch(recipes::update)
                .delete(recipes::remove),
        )
        .route(
            "/ingredients",
            get(ingredients::list).post(ingredients::create),
        )
        .route(
            "/ingredients/{id}",
            get(ingredients::detail)
                .patch(ingredients::update)
                .delete(ingredients::remove),
        )
        .route(
            "/ingredients/recipes/{id}/ingredients",
            get(ingredients::list_for_recipe),
        )
        .with_state(state)
}

/// Build the routed application for the given engine.
pub fn app(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    router(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
