use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::{error, info};

use crate::error::ApiError;
use crate::outcome::{Outcome, StoreError};
use crate::repository::StoreResult;

pub mod role;
pub mod user;
pub mod variable;

pub(crate) const NULL_BODY: &str = "request body must not be null";
pub(crate) const ID_MISMATCH: &str = "The route ID does not match the ID in the request body.";

/// Logs a failed outcome and hands it to the handler as an [`ApiError`].
pub(crate) fn settle<T>(outcome: Outcome<T>, action: &'static str) -> Result<T, ApiError> {
    if let Some(e) = outcome.error() {
        if matches!(outcome, Outcome::Infra(_)) {
            error!(action, code = ?e.code, message = %e.message, "Store failure");
        } else {
            info!(action, code = ?e.code, message = %e.message, "Store rejected request");
        }
    }
    outcome.into_result()
}

pub(crate) fn ensure_same_id(path_id: i64, body_id: i64) -> Result<(), ApiError> {
    if path_id == body_id {
        Ok(())
    } else {
        Err(ApiError::BadRequest(ID_MISMATCH.to_string()))
    }
}

/// Second half of every create: the store returns only an id, so the new
/// resource is read back before answering.
pub(crate) fn confirm_created<T>(
    fetched: StoreResult<Option<T>>,
    entity: &str,
    id: i64,
) -> Result<T, ApiError> {
    let failure = match fetched.map(Outcome::required) {
        Ok(Outcome::Success(value)) => return Ok(value),
        Ok(
            Outcome::NotFound(e) | Outcome::Conflict(e) | Outcome::Validation(e) | Outcome::Infra(e),
        ) => e,
        Err(e) => {
            error!(error = %e, entity, id, "Re-fetch after create failed");
            StoreError::local("database error")
        }
    };

    error!(entity, id, code = ?failure.code, "Created resource could not be read back");
    Err(ApiError::Internal(StoreError {
        code: failure.code,
        message: format!(
            "{entity} created with ID: {id} but retrieval failed. Detail: {}",
            failure.message
        ),
    }))
}

/// 201 with a `Location` pointing at the named by-id route.
pub(crate) fn created<T: Serialize>(
    req: &HttpRequest,
    route: &str,
    id: i64,
    body: &T,
) -> Result<HttpResponse, ApiError> {
    let location = req.url_for(route, [id.to_string()]).map_err(|e| {
        error!(error = ?e, route, "Failed to build Location header");
        ApiError::Internal(StoreError::local("failed to build resource location"))
    })?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location.to_string()))
        .json(body))
}

#[cfg(test)]
macro_rules! test_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($store.clone())
                .service(crate::routes::api_scope::<crate::repository::fake::FakeStore>("/api")),
        )
        .await
    };
}

#[cfg(test)]
pub(crate) use test_app;
