use actix_web::{HttpRequest, HttpResponse, Scope, web};
use tracing::instrument;

use super::{NULL_BODY, confirm_created, created, ensure_same_id, settle};
use crate::error::ApiError;
use crate::model::user::{CreateUser, UpdateUser};
use crate::models::ListRequest;
use crate::repository::UserRepository;

pub const USER_DETAIL: &str = "user_detail";

pub fn scope<U: UserRepository>() -> Scope {
    web::scope("/usuarios")
        .service(web::resource("/list").route(web::post().to(list_users::<U>)))
        .service(web::resource("").route(web::post().to(create_user::<U>)))
        .service(
            web::resource("/{id}")
                .name(USER_DETAIL)
                .route(web::get().to(get_user::<U>))
                .route(web::put().to(update_user::<U>))
                .route(web::delete().to(delete_user::<U>)),
        )
}

pub async fn list_users<U: UserRepository>(
    repo: web::Data<U>,
    body: web::Json<Option<ListRequest>>,
) -> Result<HttpResponse, ApiError> {
    let request = body
        .into_inner()
        .ok_or_else(|| ApiError::BadRequest(NULL_BODY.to_string()))?;

    let users = settle(repo.list(request.offset, request.limit).await?, "list users")?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn get_user<U: UserRepository>(
    repo: web::Data<U>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let user = settle(repo.get_by_id(path.into_inner()).await?.required(), "get user")?;
    Ok(HttpResponse::Ok().json(user))
}

#[instrument(name = "users_create", skip_all, fields(username = %body.username))]
pub async fn create_user<U: UserRepository>(
    req: HttpRequest,
    repo: web::Data<U>,
    body: web::Json<CreateUser>,
) -> Result<HttpResponse, ApiError> {
    let id = settle(repo.create(&body).await?, "create user")?;
    let user = confirm_created(repo.get_by_id(id).await, "User", id)?;

    created(&req, USER_DETAIL, id, &user)
}

pub async fn update_user<U: UserRepository>(
    repo: web::Data<U>,
    path: web::Path<i64>,
    body: web::Json<UpdateUser>,
) -> Result<HttpResponse, ApiError> {
    ensure_same_id(path.into_inner(), body.id)?;
    settle(repo.update(&body).await?, "update user")?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn delete_user<U: UserRepository>(
    repo: web::Data<U>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    settle(repo.delete(path.into_inner()).await?, "delete user")?;
    Ok(HttpResponse::NoContent().finish())
}
