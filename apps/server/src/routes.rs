use crate::ServerFactory;
use crate::config::ServerConfig;
use crate::deps::{Greeter, Visit};
use appwire::prelude::*;
use appwire::web::{Inject, WebApp};
use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::{Value, json};

pub(crate) fn load_system(_: &ServerFactory, app: &mut WebApp) -> Result<(), BoxError> {
    app.route("/health", get(health)).route("/config", get(config));
    Ok(())
}

pub(crate) fn load_greetings(_: &ServerFactory, app: &mut WebApp) -> Result<(), BoxError> {
    app.route("/hello/{name}", get(hello));
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn config(Inject(config): Inject<ServerConfig>) -> Result<Json<ConfigMap>, (StatusCode, String)> {
    config.redacted().map(Json).map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
}

async fn hello(
    Path(name): Path<String>,
    Inject(greeter): Inject<Greeter>,
    Inject(visit): Inject<Visit>,
) -> Json<Value> {
    Json(json!({
        "message": greeter.greet(&name),
        "visit": visit.number,
        "request": visit.id,
    }))
}
