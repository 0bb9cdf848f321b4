//! Mock DSM — serves the certificate endpoints of a Synology NAS from
//! memory, so `synology-cert-update` can be exercised without hardware.
//!
//! Only `/webapi/entry.cgi` is served, with the calls the updater makes:
//!
//! 1. `SYNO.API.Auth` login / logout,
//! 2. `SYNO.Core.Certificate.CRT` list,
//! 3. `SYNO.Core.Certificate` import (multipart).
//!
//! Answers use the DSM envelope and error codes.

mod config;
mod dsm;

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Multipart, Query, State};
use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use synocert_models::{ApiError, ApiMethod, ApiName, ApiResponse, ENTRY_PATH, import_fields};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::MockConfig;
use crate::dsm::{ImportRequest, MockDsm};

type SharedDsm = Arc<Mutex<MockDsm>>;
type Params = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

fn router(dsm: SharedDsm) -> Router {
    Router::new()
        .route(ENTRY_PATH, get(entry_get).post(entry_post))
        .with_state(dsm)
}

/// Resolve `api` and `method`, or the DSM error code for a bad request.
fn resolve(params: &Params) -> Result<(ApiName, ApiMethod), ApiError> {
    let (Some(api), Some(method), Some(_)) = (
        params.get("api"),
        params.get("method"),
        params.get("version"),
    ) else {
        return Err(ApiError::new(101));
    };

    let api: ApiName = api.parse().map_err(|_| ApiError::new(102))?;
    let method: ApiMethod = method.parse().map_err(|_| ApiError::new(103))?;
    Ok((api, method))
}

fn param<'a>(params: &'a Params, name: &str) -> &'a str {
    params.get(name).map_or("", String::as_str)
}

fn reply<T: serde::Serialize>(result: Result<T, ApiError>) -> Response {
    match result {
        Ok(data) => Json(ApiResponse::ok(data)).into_response(),
        Err(err) => Json(ApiResponse::<()>::failure(err.code)).into_response(),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET entry.cgi` — login, logout and list.
async fn entry_get(State(dsm): State<SharedDsm>, Query(params): Query<Params>) -> Response {
    let (api, method) = match resolve(&params) {
        Ok(call) => call,
        Err(err) => return reply::<()>(Err(err)),
    };
    debug!(api = %api, method = %method, "GET entry.cgi");

    let mut dsm = dsm.lock().await;
    match (api, method) {
        (ApiName::Auth, ApiMethod::Login) => {
            reply(dsm.login(param(&params, "account"), param(&params, "passwd")))
        }
        (ApiName::Auth, ApiMethod::Logout) => match dsm.logout(param(&params, "sid")) {
            Ok(()) => Json(ApiResponse::<()>::empty()).into_response(),
            Err(err) => reply::<()>(Err(err)),
        },
        (ApiName::CertificateCrt, ApiMethod::List) => reply(dsm.list(param(&params, "sid"))),
        _ => reply::<()>(Err(ApiError::new(103))),
    }
}

/// `POST entry.cgi` — certificate import.
async fn entry_post(
    State(dsm): State<SharedDsm>,
    Query(params): Query<Params>,
    multipart: Multipart,
) -> Result<Response, MultipartError> {
    match resolve(&params) {
        Ok((ApiName::Certificate, ApiMethod::Import)) => {}
        Ok(_) => return Ok(reply::<()>(Err(ApiError::new(103)))),
        Err(err) => return Ok(reply::<()>(Err(err))),
    }

    let request = read_import(multipart).await?;

    let mut dsm = dsm.lock().await;
    let response = match dsm.import(param(&params, "sid"), request) {
        Ok(()) => Json(ApiResponse::<()>::empty()).into_response(),
        Err(err) => reply::<()>(Err(err)),
    };
    info!(imports = dsm.imports(), "import request handled");
    Ok(response)
}

async fn read_import(mut multipart: Multipart) -> Result<ImportRequest, MultipartError> {
    let mut request = ImportRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let value = field.text().await?;

        match name.as_str() {
            import_fields::ID => request.id = Some(value),
            import_fields::DESC => request.desc = Some(value),
            import_fields::AS_DEFAULT => request.as_default = true,
            import_fields::KEY => request.key = Some(value),
            import_fields::CERT => request.cert = Some(value),
            other => debug!(field = other, "ignoring multipart field"),
        }
    }

    Ok(request)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = MockConfig::from_env();
    info!(common_name = %config.common_name, "seeding mock certificate store");

    let dsm = Arc::new(Mutex::new(MockDsm::new(&config)));
    let app = router(dsm);

    let addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(address = %addr, "mock DSM listening");
    axum::serve(listener, app).await?;
    Ok(())
}
