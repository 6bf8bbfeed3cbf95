use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::{SecondsFormat, Utc};
use utoipa::OpenApi;
use uuid::Uuid;

use crate::auth::create_jwt;
use crate::config::Config;
use crate::db::TaskStore;
use crate::errors::ApiError;
use crate::middleware::Identity;
use crate::models::{
    CreateTaskRequest, DeleteResponse, LoginRequest, Task, TokenResponse, UpdateTaskRequest,
};
use crate::validate::{validate_task, Violation};

// Path ids must be store-native UUIDs; anything else is the caller's error.
fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Liveness greeting")
    )
)]
#[get("/")]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Hello World from Actix Web")
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Missing credentials or no matching user")
    )
)]
#[post("/login")]
pub async fn login(
    store: web::Data<TaskStore>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let email = req.email.as_deref().filter(|e| !e.is_empty());
    let password = req.password.as_deref().filter(|p| !p.is_empty());
    let (email, password) = match (email, password) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(ApiError::MissingCredentials),
    };

    // Wrong password and unknown email collapse into the same answer.
    let user = store
        .find_user(email, password)?
        .ok_or(ApiError::UserNotFound)?;

    let token = create_jwt(&user, &config.secret).map_err(|_| ApiError::Internal)?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "Every task, unfiltered", body = [Task])
    )
)]
#[get("/tasks")]
pub async fn list_tasks(store: web::Data<TaskStore>) -> Result<HttpResponse, ApiError> {
    let tasks = store.list_tasks()?;
    Ok(HttpResponse::Ok().json(tasks))
}

#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 200, description = "Task created", body = Task),
        (status = 400, description = "Length violations", body = [Violation]),
        (status = 401, description = "No identity attached to the request")
    )
)]
#[post("/tasks")]
pub async fn create_task(
    store: web::Data<TaskStore>,
    _identity: Identity,
    req: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let violations = validate_task(&req.name, &req.description);
    if !violations.is_empty() {
        return Ok(HttpResponse::BadRequest().json(violations));
    }

    let req = req.into_inner();
    let task = Task {
        id: Uuid::new_v4(),
        name: req.name,
        description: req.description,
        completed_at: None,
        created_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    };
    store.insert_task(&task)?;
    Ok(HttpResponse::Ok().json(task))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    params(
        ("id" = String, Path, description = "Store-native task id")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, description = "Invalid id or no matching task")
    )
)]
#[get("/tasks/{id}")]
pub async fn get_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_task_id(&task_id)?;
    let task = store.find_task(id)?.ok_or(ApiError::TaskNotFound)?;
    Ok(HttpResponse::Ok().json(task))
}

#[utoipa::path(
    put,
    path = "/tasks/{id}",
    request_body = UpdateTaskRequest,
    params(
        ("id" = String, Path, description = "Store-native task id")
    ),
    responses(
        (status = 200, description = "Submitted fields, echoed back", body = UpdateTaskRequest),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "No identity attached to the request")
    )
)]
#[put("/tasks/{id}")]
pub async fn update_task(
    store: web::Data<TaskStore>,
    _identity: Identity,
    task_id: web::Path<String>,
    req: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_task_id(&task_id)?;
    let update = req.into_inner();

    // Unconditional overwrite: no length checks, no merge, and no
    // read-back. The response is the submitted fields, not the stored row.
    store.update_task(
        id,
        &update.name,
        &update.description,
        update.completed_at.as_deref(),
    )?;
    Ok(HttpResponse::Ok().json(update))
}

#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(
        ("id" = String, Path, description = "Store-native task id")
    ),
    responses(
        (status = 200, description = "Deleted, whether or not the task existed", body = DeleteResponse),
        (status = 400, description = "Invalid id")
    )
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    store: web::Data<TaskStore>,
    task_id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_task_id(&task_id)?;
    store.delete_task(id)?;
    Ok(HttpResponse::Ok().json(DeleteResponse { result: true }))
}

#[utoipa::path(
    delete,
    path = "/tasks",
    responses(
        (status = 200, description = "Every task removed", body = DeleteResponse)
    )
)]
#[delete("/tasks")]
pub async fn delete_all_tasks(store: web::Data<TaskStore>) -> Result<HttpResponse, ApiError> {
    store.delete_all_tasks()?;
    Ok(HttpResponse::Ok().json(DeleteResponse { result: true }))
}

#[derive(OpenApi)]
#[openapi(
    paths(hello, login, list_tasks, create_task, get_task, update_task, delete_task, delete_all_tasks),
    components(schemas(Task, CreateTaskRequest, UpdateTaskRequest, LoginRequest, TokenResponse, DeleteResponse, Violation))
)]
pub struct ApiDoc;
