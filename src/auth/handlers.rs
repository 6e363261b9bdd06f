use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicAccount, RegisterRequest},
        services::{self, LoginError, RegisterError, RegisterInput},
        session::{self, CurrentAccount},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<PublicAccount>), (StatusCode, String)> {
    let input = RegisterInput {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        confirm_password: payload.confirm_password,
    };

    let (account, token) = match services::register(&state.db, input).await {
        Ok(ok) => ok,
        Err(RegisterError::Store(e)) => {
            error!(error = %e, "register failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "something went wrong, try again later".into(),
            ));
        }
        Err(e @ (RegisterError::EmailTaken | RegisterError::UsernameTaken)) => {
            warn!(%e, "register rejected");
            return Err((StatusCode::CONFLICT, e.to_string()));
        }
        Err(e) => {
            warn!(%e, "register rejected");
            return Err((StatusCode::BAD_REQUEST, e.to_string()));
        }
    };

    let jar = session::establish(jar, &state.config.session, &account, token);
    Ok((
        jar,
        Json(PublicAccount {
            id: account.id,
            username: account.username,
            email: account.email,
        }),
    ))
}

#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<PublicAccount>), (StatusCode, String)> {
    let (account, token) = match services::login(&state.db, &payload.email, &payload.password).await
    {
        Ok(ok) => ok,
        Err(e @ LoginError::InvalidCredentials) => {
            return Err((StatusCode::UNAUTHORIZED, e.to_string()));
        }
        Err(LoginError::Store(e)) => {
            error!(error = %e, "login failed");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "something went wrong, try again later".into(),
            ));
        }
    };

    let jar = session::establish(jar, &state.config.session, &account, token);
    Ok((
        jar,
        Json(PublicAccount {
            id: account.id,
            username: account.username,
            email: account.email,
        }),
    ))
}

#[instrument(skip(state, jar))]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, StatusCode) {
    (session::clear(jar, &state.config.session), StatusCode::OK)
}

#[instrument(skip(account))]
pub async fn get_me(CurrentAccount(account): CurrentAccount) -> Json<PublicAccount> {
    Json(PublicAccount {
        id: account.id,
        username: account.username,
        email: account.email,
    })
}
