use actix_web::{
    web::{self, Path},
    HttpResponse, Responder,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::drafts::DraftView;
use crate::letters::handlers::generate_blocking;
use crate::letters::FormEdit;
use crate::models::LetterKind;
use crate::state::AppState;
use crate::ErrorResponse;

#[derive(Deserialize, ToSchema)]
pub struct CreateDraftRequest {
    pub kind: LetterKind,
}

fn draft_not_found(id: &Uuid) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::not_found(&format!("Draft {} not found", id)))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Drafts",
    post,
    path = "/drafts",
    request_body = CreateDraftRequest,
    responses(
        (status = 201, description = "Draft created with default values", body = DraftView)
    )
)]
pub async fn create_draft(
    state: web::Data<AppState>,
    body: web::Json<CreateDraftRequest>,
) -> impl Responder {
    let (id, draft) = state.drafts.create(body.kind).await;
    HttpResponse::Created().json(DraftView::new(id, &draft))
}

#[utoipa::path(
    context_path = "/api",
    tag = "Drafts",
    get,
    path = "/drafts/{id}",
    responses(
        (status = 200, description = "Current draft snapshot", body = DraftView),
        (status = 404, description = "Draft not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the draft")
    )
)]
pub async fn get_draft(id: Path<Uuid>, state: web::Data<AppState>) -> impl Responder {
    let id = id.into_inner();
    match state.drafts.get(&id).await {
        Some(draft) => HttpResponse::Ok().json(DraftView::new(id, &draft)),
        None => draft_not_found(&id),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Drafts",
    patch,
    path = "/drafts/{id}",
    request_body = FormEdit,
    responses(
        (status = 200, description = "Edit applied", body = DraftView),
        (status = 400, description = "Edit does not apply to this draft", body = ErrorResponse),
        (status = 404, description = "Draft not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the draft")
    )
)]
pub async fn edit_draft(
    id: Path<Uuid>,
    body: web::Json<FormEdit>,
    state: web::Data<AppState>,
) -> impl Responder {
    let id = id.into_inner();
    let Some(draft) = state.drafts.get(&id).await else {
        return draft_not_found(&id);
    };

    match draft.apply(&body) {
        Ok(_) => HttpResponse::Ok().json(DraftView::new(id, &draft)),
        Err(e) => {
            log::debug!("Rejected {} on draft {}: {}", body.name(), id, e);
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&e.to_string()))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Drafts",
    post,
    path = "/drafts/{id}/reset",
    responses(
        (status = 200, description = "Draft reset to defaults", body = DraftView),
        (status = 404, description = "Draft not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the draft")
    )
)]
pub async fn reset_draft(id: Path<Uuid>, state: web::Data<AppState>) -> impl Responder {
    let id = id.into_inner();
    match state.drafts.get(&id).await {
        Some(draft) => {
            draft.reset();
            HttpResponse::Ok().json(DraftView::new(id, &draft))
        }
        None => draft_not_found(&id),
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Drafts",
    post,
    path = "/drafts/{id}/generate",
    responses(
        (status = 200, description = "Letter PDF", content_type = "application/pdf"),
        (status = 404, description = "Draft not found", body = ErrorResponse),
        (status = 409, description = "A render of this draft is already running", body = ErrorResponse),
        (status = 422, description = "Missing or over-long fields", body = ErrorResponse),
        (status = 500, description = "Layout or export failed", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the draft")
    )
)]
pub async fn generate_draft(id: Path<Uuid>, state: web::Data<AppState>) -> impl Responder {
    let id = id.into_inner();
    let Some(draft) = state.drafts.get(&id).await else {
        return draft_not_found(&id);
    };
    let Some(guard) = draft.try_begin_render() else {
        return HttpResponse::Conflict().json(ErrorResponse::conflict(
            "A document is already being generated for this draft",
        ));
    };

    generate_blocking(state, draft.snapshot(), guard).await
}

#[utoipa::path(
    context_path = "/api",
    tag = "Drafts",
    delete,
    path = "/drafts/{id}",
    responses(
        (status = 204, description = "Draft deleted"),
        (status = 404, description = "Draft not found", body = ErrorResponse)
    ),
    params(
        ("id" = Uuid, Path, description = "ID of the draft")
    )
)]
pub async fn delete_draft(id: Path<Uuid>, state: web::Data<AppState>) -> impl Responder {
    let id = id.into_inner();
    if state.drafts.remove(&id).await {
        HttpResponse::NoContent().finish()
    } else {
        draft_not_found(&id)
    }
}

/// Configure draft routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/drafts").route(web::post().to(create_draft)))
        .service(
            web::resource("/drafts/{id}")
                .route(web::get().to(get_draft))
                .route(web::patch().to(edit_draft))
                .route(web::delete().to(delete_draft)),
        )
        .service(web::resource("/drafts/{id}/reset").route(web::post().to(reset_draft)))
        .service(web::resource("/drafts/{id}/generate").route(web::post().to(generate_draft)));
}
