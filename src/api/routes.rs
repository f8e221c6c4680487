//! HTTP route handlers for Axum.

use askama::Template;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::{
    api::types::{CatalogDto, SessionDto},
    assess::{self, session::SessionState},
    catalog::{CatalogError, Medication},
    ui::PageView,
};

use super::AppState;

type ApiResult<T> = Result<T, (StatusCode, String)>;

#[derive(Debug, Deserialize)]
pub struct RiskForm {
    pub medication: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreForm {
    pub medication: String,
    pub target: String,
}

/// Render the form. Visitors without a session see the empty state; nothing is
/// stored until they submit.
pub async fn index(state: State<AppState>, headers: HeaderMap) -> ApiResult<Response> {
    let view = match state.sessions.lookup(&headers).await {
        Some(handle) => {
            let mut session = handle.state.lock().await;
            let view = PageView::build(&session, &state.flow);
            session.take_notice();
            view
        }
        None => PageView::build(&SessionState::new(), &state.flow),
    };
    let body = view.render().map_err(|e| {
        error!(%e, "page render failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(Html(body).into_response())
}

pub async fn fetch_risks(
    state: State<AppState>,
    headers: HeaderMap,
    Form(form): Form<RiskForm>,
) -> ApiResult<Response> {
    let medication = parse_medication(&form.medication)?;
    let handle = state.sessions.resolve(&headers).await;
    {
        let mut session = handle.state.lock().await;
        if assess::fetch_risks(&mut session, state.client.as_ref(), medication)
            .await
            .is_ok()
        {
            info!(session = %handle.id, %medication, "risks fetched");
        }
    }
    Ok(handle.attach(Redirect::to("/").into_response()))
}

pub async fn fetch_score(
    state: State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ScoreForm>,
) -> ApiResult<Response> {
    let medication = parse_medication(&form.medication)?;
    let target = state
        .flow
        .comparison
        .parse(&form.target)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let handle = state.sessions.resolve(&headers).await;
    {
        let mut session = handle.state.lock().await;
        if assess::fetch_score(
            &mut session,
            state.client.as_ref(),
            &state.flow,
            medication,
            target,
        )
        .await
        .is_ok()
        {
            info!(session = %handle.id, %medication, %target, "score fetched");
        }
    }
    Ok(handle.attach(Redirect::to("/").into_response()))
}

pub async fn reset(state: State<AppState>, headers: HeaderMap) -> Redirect {
    if let Some(handle) = state.sessions.lookup(&headers).await {
        *handle.state.lock().await = SessionState::new();
    }
    Redirect::to("/")
}

pub async fn catalog(state: State<AppState>) -> Json<CatalogDto> {
    Json(CatalogDto {
        medications: Medication::ALL.iter().map(|m| m.name()).collect(),
        comparison: state.flow.comparison,
        targets: state.flow.comparison.options(),
    })
}

pub async fn session(state: State<AppState>, headers: HeaderMap) -> Json<SessionDto> {
    let dto = match state.sessions.lookup(&headers).await {
        Some(handle) => SessionDto::from(&*handle.state.lock().await),
        None => SessionDto::from(&SessionState::new()),
    };
    Json(dto)
}

pub async fn healthz() -> &'static str {
    "ok"
}

fn parse_medication(raw: &str) -> ApiResult<Medication> {
    raw.parse()
        .map_err(|e: CatalogError| (StatusCode::BAD_REQUEST, e.to_string()))
}
