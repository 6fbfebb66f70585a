//! Axum router and all HTTP handlers for fdk-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers.  All handlers are `pub(crate)` so the scenario tests in
//! `tests/` can compose the router directly.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use fdk_schemas::StateSnapshot;
use fdk_store::UserStore;

use crate::api_types::{
    ConfirmRequest, ErrorResponse, HealthResponse, HistoryResponse, ResetRequest, StateResponse,
    StatusResponse, SubmitRequest, SubmitResponse, UserQuery, UsersResponse, WeekQuery,
    WeekResponse,
};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/users", get(users))
        .route("/v1/status", get(status_handler))
        .route("/v1/history", get(history))
        .route("/v1/week", get(week))
        .route("/v1/challenge/submit", post(challenge_submit))
        .route("/v1/challenge/confirm-advance", post(challenge_confirm))
        .route("/v1/challenge/reset", post(challenge_reset))
        .with_state(state)
}

fn err(status: StatusCode, msg: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse { error: msg.into() }),
    )
        .into_response()
}

/// Resolve a selected user to an open store, or the matching error response.
fn open_store(st: &AppState, user: &str) -> Result<UserStore, Response> {
    if let Err(e) = fdk_config::require_profile(&st.profiles, user) {
        return Err(err(StatusCode::NOT_FOUND, e.to_string()));
    }
    UserStore::open(&st.store_root, user)
        .map_err(|e| err(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service,
            version: st.build.version,
        }),
    )
}

// ---------------------------------------------------------------------------
// GET /v1/users
// ---------------------------------------------------------------------------

pub(crate) async fn users(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(UsersResponse {
            profiles: st.profiles.profiles.clone(),
        }),
    )
}

// ---------------------------------------------------------------------------
// GET /v1/status?user=
// ---------------------------------------------------------------------------

pub(crate) async fn status_handler(
    State(st): State<Arc<AppState>>,
    Query(q): Query<UserQuery>,
) -> Response {
    let store = match open_store(&st, &q.user) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let session = match fdk_pipeline::Session::open(&store) {
        Ok(s) => s,
        Err(e) => return err(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")),
    };

    let remaining = match session.state.phase {
        fdk_challenge::Phase::One => session.config.phase1_level(),
        fdk_challenge::Phase::Two => session.config.pass_level(),
    }
    .saturating_sub(session.state.balance)
    .max(fdk_challenge::Micros::ZERO);

    (
        StatusCode::OK,
        Json(StatusResponse {
            user: session.user.clone(),
            drawdown_micros: session.state.drawdown(&session.config).raw(),
            remaining_target_micros: remaining.raw(),
            max_safe_risk_micros: session.config.max_safe_risk().raw(),
            state: StateSnapshot::from_state(&session.state),
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// GET /v1/history?user=
// ---------------------------------------------------------------------------

pub(crate) async fn history(
    State(st): State<Arc<AppState>>,
    Query(q): Query<UserQuery>,
) -> Response {
    if let Err(e) = fdk_config::require_profile(&st.profiles, &q.user) {
        return err(StatusCode::NOT_FOUND, e.to_string());
    }
    // A failed read degrades to an empty list (logged inside the pipeline);
    // the dashboard stays usable.
    let days = fdk_pipeline::history_or_empty(&st.pool, &q.user).await;
    (
        StatusCode::OK,
        Json(HistoryResponse { user: q.user, days }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// GET /v1/week?user=&week=
// ---------------------------------------------------------------------------

pub(crate) async fn week(State(st): State<Arc<AppState>>, Query(q): Query<WeekQuery>) -> Response {
    let store = match open_store(&st, &q.user) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let week_number = match q.week {
        Some(w) if w >= 1 => w,
        Some(_) => return err(StatusCode::BAD_REQUEST, "week must be >= 1"),
        None => match fdk_pipeline::Session::open(&store) {
            Ok(s) => s.state.week_number,
            Err(e) => return err(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")),
        },
    };

    let days = fdk_pipeline::week_or_empty(&st.pool, &q.user, week_number).await;
    let weekly_pl_micros = days.iter().map(|d| d.daily_pl_micros).sum();
    (
        StatusCode::OK,
        Json(WeekResponse {
            user: q.user,
            week_number,
            days,
            weekly_pl_micros,
        }),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// POST /v1/challenge/submit
// ---------------------------------------------------------------------------

pub(crate) async fn challenge_submit(
    State(st): State<Arc<AppState>>,
    Json(req): Json<SubmitRequest>,
) -> Response {
    let store = match open_store(&st, &req.user) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    // Serialize all mutation for this user; submissions are not reentrant.
    let lock = st.user_lock(&req.user).await;
    let _guard = lock.lock().await;

    let mut session = match fdk_pipeline::Session::open(&store) {
        Ok(s) => s,
        Err(e) => return err(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")),
    };

    let prepared = match (&req.amounts, req.wins, req.losses) {
        (Some(amounts), None, None) => fdk_pipeline::prepare(&session, amounts),
        (None, Some(wins), Some(losses)) => {
            fdk_pipeline::prepare_counts(&session, wins, losses)
        }
        _ => {
            return err(
                StatusCode::BAD_REQUEST,
                "provide either amounts or wins+losses, not both",
            )
        }
    };
    let sub = match prepared {
        Ok(s) => s,
        Err(e) => return err(StatusCode::CONFLICT, format!("{e:#}")),
    };

    match fdk_pipeline::record_and_apply(&st.pool, &store, &mut session, sub).await {
        Ok(record) => {
            info!(user = %session.user, day = record.day_number, "submit accepted");
            (
                StatusCode::OK,
                Json(SubmitResponse {
                    user: session.user.clone(),
                    day_number: record.day_number,
                    daily_pl_micros: record.daily_pl.raw(),
                    status: record.status.as_str().to_string(),
                    state: StateSnapshot::from_state(&session.state),
                }),
            )
                .into_response()
        }
        // The write failed; nothing changed.  502: the remote store is the
        // unhealthy party, not this request.
        Err(e) => err(StatusCode::BAD_GATEWAY, format!("{e:#}")),
    }
}

// ---------------------------------------------------------------------------
// POST /v1/challenge/confirm-advance
// ---------------------------------------------------------------------------

pub(crate) async fn challenge_confirm(
    State(st): State<Arc<AppState>>,
    Json(req): Json<ConfirmRequest>,
) -> Response {
    let store = match open_store(&st, &req.user) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let lock = st.user_lock(&req.user).await;
    let _guard = lock.lock().await;

    let mut session = match fdk_pipeline::Session::open(&store) {
        Ok(s) => s,
        Err(e) => return err(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")),
    };
    match fdk_pipeline::confirm_phase_advance(&store, &mut session) {
        Ok(()) => (
            StatusCode::OK,
            Json(StateResponse {
                user: session.user.clone(),
                state: StateSnapshot::from_state(&session.state),
            }),
        )
            .into_response(),
        Err(e) => err(StatusCode::CONFLICT, format!("{e:#}")),
    }
}

// ---------------------------------------------------------------------------
// POST /v1/challenge/reset
// ---------------------------------------------------------------------------

pub(crate) async fn challenge_reset(
    State(st): State<Arc<AppState>>,
    Json(req): Json<ResetRequest>,
) -> Response {
    if !req.confirm {
        return err(
            StatusCode::BAD_REQUEST,
            "reset drops this user's entire history; pass confirm=true",
        );
    }
    let store = match open_store(&st, &req.user) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let lock = st.user_lock(&req.user).await;
    let _guard = lock.lock().await;

    let mut session = match fdk_pipeline::Session::open(&store) {
        Ok(s) => s,
        Err(e) => return err(StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")),
    };
    match fdk_pipeline::reset(&st.pool, &store, &mut session).await {
        Ok(()) => (
            StatusCode::OK,
            Json(StateResponse {
                user: session.user.clone(),
                state: StateSnapshot::from_state(&session.state),
            }),
        )
            .into_response(),
        Err(e) => err(StatusCode::BAD_GATEWAY, format!("{e:#}")),
    }
}
