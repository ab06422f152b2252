use actix_web::{HttpRequest, HttpResponse, Scope, web};

use super::{NULL_BODY, confirm_created, created, ensure_same_id, settle};
use crate::error::ApiError;
use crate::model::variable::{CreateVariable, UpdateVariable};
use crate::models::ListRequest;
use crate::repository::VariableRepository;

pub const VARIABLE_DETAIL: &str = "variable_detail";

pub fn scope<V: VariableRepository>() -> Scope {
    web::scope("/variables")
        .service(web::resource("/list").route(web::post().to(list_variables::<V>)))
        .service(web::resource("").route(web::post().to(create_variable::<V>)))
        // /variables/name/{name}
        .service(web::resource("/name/{name}").route(web::get().to(get_variable_by_name::<V>)))
        .service(
            web::resource("/{id}")
                .name(VARIABLE_DETAIL)
                .route(web::get().to(get_variable::<V>))
                .route(web::put().to(update_variable::<V>))
                .route(web::delete().to(delete_variable::<V>)),
        )
}

pub async fn list_variables<V: VariableRepository>(
    repo: web::Data<V>,
    body: web::Json<Option<ListRequest>>,
) -> Result<HttpResponse, ApiError> {
    let request = body
        .into_inner()
        .ok_or_else(|| ApiError::BadRequest(NULL_BODY.to_string()))?;

    let variables = settle(repo.list(request.offset, request.limit).await?, "list variables")?;
    Ok(HttpResponse::Ok().json(variables))
}

pub async fn get_variable<V: VariableRepository>(
    repo: web::Data<V>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let variable = settle(repo.get_by_id(path.into_inner()).await?.required(), "get variable")?;
    Ok(HttpResponse::Ok().json(variable))
}

/// Lookup by the variable's unique name, e.g. `/variables/name/MAX_SESSIONS`.
pub async fn get_variable_by_name<V: VariableRepository>(
    repo: web::Data<V>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let name = path.into_inner();
    let variable = settle(
        repo.get_by_name(&name).await?.required(),
        "get variable by name",
    )?;
    Ok(HttpResponse::Ok().json(variable))
}

pub async fn create_variable<V: VariableRepository>(
    req: HttpRequest,
    repo: web::Data<V>,
    body: web::Json<CreateVariable>,
) -> Result<HttpResponse, ApiError> {
    let id = settle(repo.create(&body).await?, "create variable")?;
    let variable = confirm_created(repo.get_by_id(id).await, "Variable", id)?;

    created(&req, VARIABLE_DETAIL, id, &variable)
}

pub async fn update_variable<V: VariableRepository>(
    repo: web::Data<V>,
    path: web::Path<i64>,
    body: web::Json<UpdateVariable>,
) -> Result<HttpResponse, ApiError> {
    ensure_same_id(path.into_inner(), body.id)?;
    settle(repo.update(&body).await?, "update variable")?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete_variable<V: VariableRepository>(
    repo: web::Data<V>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    settle(repo.delete(path.into_inner()).await?, "delete variable")?;
    Ok(HttpResponse::NoContent().finish())
}
