use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Router,
};
use uuid::Uuid;

use super::common::{ApiJson, created_response, found_or, no_content_response, success_response};
use crate::dto::{PetDto, PetRequest};
use crate::errors::ServiceError;
use crate::AppState;

fn missing(id: Uuid) -> String {
    format!("Pet with ID {} does not exist.", id)
}

#[utoipa::path(
    get,
    path = "/api/pets",
    summary = "List pets",
    responses(
        (status = 200, description = "All pets", body = [PetDto]),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "Pets"
)]
pub async fn list_pets(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let pets = state.services.pets.list_pets().await?;
    Ok(success_response(pets))
}

#[utoipa::path(
    get,
    path = "/api/pets/{id}",
    summary = "Get pet",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 200, description = "Pet found", body = PetDto),
        (status = 404, description = "Pet not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Pets"
)]
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let pet = state.services.pets.get_pet(id).await?;
    Ok(success_response(found_or(pet, || missing(id))?))
}

#[utoipa::path(
    post,
    path = "/api/pets",
    summary = "Create pet",
    request_body = PetRequest,
    responses(
        (status = 201, description = "Pet created", body = PetDto),
        (status = 400, description = "Invalid pet", body = crate::errors::ErrorResponse),
    ),
    tag = "Pets"
)]
pub async fn create_pet(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PetRequest>,
) -> Result<Response, ServiceError> {
    let pet = state.services.pets.create_pet(request).await?;
    Ok(created_response(pet))
}

#[utoipa::path(
    put,
    path = "/api/pets/{id}",
    summary = "Update pet",
    params(("id" = Uuid, Path, description = "Pet ID")),
    request_body = PetRequest,
    responses(
        (status = 200, description = "Pet updated", body = PetDto),
        (status = 400, description = "Invalid pet", body = crate::errors::ErrorResponse),
        (status = 404, description = "Pet not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Pets"
)]
pub async fn update_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<PetRequest>,
) -> Result<Response, ServiceError> {
    let pet = state.services.pets.update_pet(id, request).await?;
    Ok(success_response(found_or(pet, || missing(id))?))
}

#[utoipa::path(
    delete,
    path = "/api/pets/{id}",
    summary = "Delete pet",
    params(("id" = Uuid, Path, description = "Pet ID")),
    responses(
        (status = 204, description = "Pet deleted"),
        (status = 404, description = "Pet not found", body = crate::errors::ErrorResponse),
    ),
    tag = "Pets"
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let removed = state.services.pets.delete_pet(id).await?;
    found_or(removed, || missing(id))?;
    Ok(no_content_response())
}

pub fn pet_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pets).post(create_pet))
        .route("/:id", get(get_pet).put(update_pet).delete(delete_pet))
}
