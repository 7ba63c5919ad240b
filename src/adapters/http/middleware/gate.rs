//! HTTP wrapper around the edge gatekeeper.
//!
//! Applies [`Gatekeeper::evaluate`] to each inbound page request and turns
//! the decision into a response: pass-through, pass-through plus rewritten
//! session cookies, or a login redirect.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::adapters::http::cookies::{
    clear_session_cookies, session_cookies, ACCESS_COOKIE, REFRESH_COOKIE,
};
use crate::edge::{GateDecision, Gatekeeper};

/// State for the gate middleware: the decision machine plus the cookie
/// policy needed to materialize rotated pairs.
#[derive(Clone)]
pub struct GateState {
    pub gatekeeper: Gatekeeper,
    pub refresh_ttl_days: u32,
    pub secure_cookies: bool,
}

/// Gate middleware for page routes.
///
/// Cookie writes are atomic with respect to the pair: a rotation writes
/// both cookies, a terminal rejection removes both, and every other
/// outcome leaves both untouched.
pub async fn edge_gate(State(state): State<GateState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let jar = CookieJar::from_headers(request.headers());
    let access = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());
    let refresh = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());

    let decision = state
        .gatekeeper
        .evaluate(&path, access.as_deref(), refresh.as_deref())
        .await;

    match decision {
        GateDecision::Admit { rotated: None } => next.run(request).await,
        GateDecision::Admit {
            rotated: Some(pair),
        } => {
            let response = next.run(request).await;
            let (access, refresh) =
                session_cookies(&pair, state.refresh_ttl_days, state.secure_cookies);
            let jar = CookieJar::new().add(access).add(refresh);
            (jar, response).into_response()
        }
        GateDecision::Redirect {
            location,
            clear_cookies,
        } => {
            let redirect = Redirect::temporary(&location);
            if clear_cookies {
                let (access, refresh) = clear_session_cookies();
                let jar = CookieJar::new().add(access).add(refresh);
                (jar, redirect).into_response()
            } else {
                redirect.into_response()
            }
        }
    }
}
