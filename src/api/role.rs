use actix_web::{HttpRequest, HttpResponse, Scope, web};
use tracing::instrument;

use super::{NULL_BODY, confirm_created, created, ensure_same_id, settle};
use crate::error::ApiError;
use crate::model::role::{CreateRole, UpdateRole};
use crate::models::ListRequest;
use crate::repository::RoleRepository;

pub const ROLE_DETAIL: &str = "role_detail";
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

pub fn scope<R: RoleRepository>() -> Scope {
    web::scope("/roles")
        // /roles/list
        .service(web::resource("/list").route(web::post().to(list_roles::<R>)))
        // /roles
        .service(web::resource("").route(web::post().to(create_role::<R>)))
        // /roles/{id}
        .service(
            web::resource("/{id}")
                .name(ROLE_DETAIL)
                .route(web::get().to(get_role::<R>))
                .route(web::put().to(update_role::<R>))
                .route(web::delete().to(delete_role::<R>)),
        )
}

/// List roles, one page at a time. The header carries the size of the whole table.
pub async fn list_roles<R: RoleRepository>(
    repo: web::Data<R>,
    body: web::Json<Option<ListRequest>>,
) -> Result<HttpResponse, ApiError> {
    let request = body
        .into_inner()
        .ok_or_else(|| ApiError::BadRequest(NULL_BODY.to_string()))?;

    let page = settle(repo.list(request.offset, request.limit).await?, "list roles")?;

    Ok(HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, page.total.to_string()))
        .json(page.roles))
}

/// Get Role by ID
pub async fn get_role<R: RoleRepository>(
    repo: web::Data<R>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let role_id = path.into_inner();
    let role = settle(repo.get_by_id(role_id).await?.required(), "get role")?;

    Ok(HttpResponse::Ok().json(role))
}

/// Create Role
#[instrument(name = "roles_create", skip_all, fields(name = %body.name))]
pub async fn create_role<R: RoleRepository>(
    req: HttpRequest,
    repo: web::Data<R>,
    body: web::Json<CreateRole>,
) -> Result<HttpResponse, ApiError> {
    let id = settle(repo.create(&body).await?, "create role")?;
    let role = confirm_created(repo.get_by_id(id).await, "Role", id)?;

    created(&req, ROLE_DETAIL, id, &role)
}

/// Update Role
pub async fn update_role<R: RoleRepository>(
    repo: web::Data<R>,
    path: web::Path<i64>,
    body: web::Json<UpdateRole>,
) -> Result<HttpResponse, ApiError> {
    ensure_same_id(path.into_inner(), body.id)?;
    settle(repo.update(&body).await?, "update role")?;

    Ok(HttpResponse::NoContent().finish())
}

/// Delete Role. Refused with 409 while users still hold it.
pub async fn delete_role<R: RoleRepository>(
    repo: web::Data<R>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    settle(repo.delete(path.into_inner()).await?, "delete role")?;

    Ok(HttpResponse::NoContent().finish())
}
