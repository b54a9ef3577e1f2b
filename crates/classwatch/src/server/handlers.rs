//! Request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::pages;
use super::AppState;
use crate::config::UnauthorizedReads;
use crate::incident::{Incident, ScanMode};
use crate::query::rank;

/// Path parameters shared by the query endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct QueryPath {
    mode: ScanMode,
    class_id: String,
    date: String,
}

/// Login form fields.
#[derive(Debug, Deserialize)]
pub(super) struct LoginForm {
    username: String,
    password: String,
}

/// `POST /log_incident/`
pub(super) async fn log_incident(
    State(state): State<AppState>,
    payload: Result<Json<Incident>, JsonRejection>,
) -> Response {
    let incident = match payload {
        Ok(Json(incident)) => incident,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected incident payload");
            return unprocessable(rejection.body_text());
        }
    };

    if let Err(err) = incident.validate() {
        warn!(class_id = %incident.class_id, error = %err, "Rejected incident");
        return unprocessable(err.to_string());
    }

    info!(
        class_id = %incident.class_id,
        scan_mode = %incident.scan_mode,
        date = %incident.date,
        zone_id = %incident.zone_id,
        duration_seconds = incident.duration_seconds,
        "Incident recorded"
    );
    state.store.record(incident);

    Json(json!({ "status": "success" })).into_response()
}

/// `GET /api/get_logs/{mode}/{class_id}/{date}`
pub(super) async fn get_logs(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(query): Path<QueryPath>,
) -> Response {
    if !state.is_authorized(&jar) {
        return unauthorized_read(state.unauthorized_reads);
    }

    Json(filtered(&state, &query)).into_response()
}

/// `GET /api/get_risk_ranking/{mode}/{class_id}/{date}`
pub(super) async fn get_risk_ranking(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(query): Path<QueryPath>,
) -> Response {
    if !state.is_authorized(&jar) {
        return unauthorized_read(state.unauthorized_reads);
    }

    Json(rank(&filtered(&state, &query))).into_response()
}

/// `GET /login`
pub(super) async fn login_page() -> Html<&'static str> {
    Html(pages::LOGIN)
}

/// `POST /login`
pub(super) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let Some(token) = state.gate.authenticate(&form.username, &form.password) else {
        warn!(username = %form.username, "Login failed");
        return Redirect::to("/login").into_response();
    };

    info!(username = %form.username, "Login succeeded");
    let cookie = Cookie::build((state.gate.cookie_name().to_owned(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    (jar.add(cookie), Redirect::to("/")).into_response()
}

/// `GET /logout`
pub(super) async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = jar.remove(Cookie::build(state.gate.cookie_name().to_owned()).path("/"));
    (jar, Redirect::temporary("/login")).into_response()
}

/// `GET /`
pub(super) async fn dashboard(State(state): State<AppState>, jar: CookieJar) -> Response {
    if !state.is_authorized(&jar) {
        return Redirect::temporary("/login").into_response();
    }
    Html(pages::DASHBOARD).into_response()
}

/// `GET /favicon.ico`
pub(super) async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn filtered(state: &AppState, query: &QueryPath) -> Vec<Incident> {
    state.store.filter(&query.mode, &query.class_id, &query.date)
}

fn unprocessable(detail: String) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": detail })),
    )
        .into_response()
}

fn unauthorized_read(policy: UnauthorizedReads) -> Response {
    match policy {
        UnauthorizedReads::EmptyResult => Json(json!([])).into_response(),
        UnauthorizedReads::Forbidden => StatusCode::FORBIDDEN.into_response(),
    }
}
