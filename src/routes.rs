use crate::{
    api::{role, user, variable},
    error::ApiError,
    repository::{RoleRepository, UserRepository, VariableRepository},
};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, web};
use anyhow::Context;

pub type ApiLimiter = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter for the API scope, refilling `requests_per_min` per minute.
pub fn build_limiter(requests_per_min: u32) -> anyhow::Result<ApiLimiter> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        60_000 / requests_per_min as u64
    };

    GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limiter settings")
}

/// Lets the single configured front-end origin call the API with credentials.
pub fn cors(origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(origin)
        .allow_any_header()
        .allow_any_method()
        .supports_credentials()
}

/// All resource scopes under `prefix`, e.g. `/api/roles`, `/api/usuarios`, `/api/variables`.
///
/// Body and path extraction failures answer 400 in the same `{ message }` shape
/// as every other locally rejected request.
pub fn api_scope<S>(prefix: &str) -> Scope
where
    S: RoleRepository + UserRepository + VariableRepository,
{
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());
    let path_config = web::PathConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into());

    web::scope(prefix)
        .app_data(json_config)
        .app_data(path_config)
        .service(role::scope::<S>())
        .service(user::scope::<S>())
        .service(variable::scope::<S>())
}

pub fn configure<S>(cfg: &mut web::ServiceConfig, api_prefix: &str, limiter: &ApiLimiter)
where
    S: RoleRepository + UserRepository + VariableRepository,
{
    cfg.service(api_scope::<S>(api_prefix).wrap(Governor::new(limiter)));
}
