//! HTTP handlers for one-shot letter generation and table parsing.

use actix_web::{http::header, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{EventApprovalForm, FacultyRequestForm, LetterForm, LetterKind};
use crate::state::AppState;
use crate::table::{parse_pasted_table, TableGrid};
use crate::ErrorResponse;

use super::common::today;
use super::{GeneratedDocument, GeneratorError};

#[derive(Serialize, ToSchema)]
pub struct FieldInfo {
    #[schema(example = "subject")]
    pub key: &'static str,
    #[schema(example = "Subject")]
    pub label: &'static str,
    #[schema(example = 150)]
    pub max_chars: Option<usize>,
}

#[derive(Serialize, ToSchema)]
pub struct LetterTypeInfo {
    pub kind: LetterKind,
    pub title: &'static str,
    pub description: &'static str,
    #[schema(example = "/api/letters/event-approval")]
    pub endpoint: String,
    pub fields: Vec<FieldInfo>,
}

impl LetterTypeInfo {
    fn describe(kind: LetterKind) -> Self {
        Self {
            kind,
            title: kind.title(),
            description: kind.description(),
            endpoint: format!("/api/letters/{}", kind.slug()),
            fields: kind
                .fields()
                .iter()
                .map(|&field| FieldInfo {
                    key: field.key(),
                    label: field.label(),
                    max_chars: kind.max_chars(field),
                })
                .collect(),
        }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct ParseTableRequest {
    /// Pasted spreadsheet text.
    #[schema(example = "Name\tRole\nAsha\tSpeaker")]
    pub content: String,
    /// Grid to keep when `content` has no rows.
    #[serde(default)]
    pub table: Option<TableGrid>,
}

#[derive(Serialize, ToSchema)]
pub struct ParseTableResponse {
    pub table: TableGrid,
    /// False when the content was empty and the grid was left unchanged.
    pub parsed: bool,
}

/// PDF download response for a generated letter.
pub fn pdf_response(doc: GeneratedDocument) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", doc.filename),
        ))
        .body(doc.pdf)
}

/// Maps a generation failure onto the JSON error contract.
pub fn error_response(kind: LetterKind, err: GeneratorError) -> HttpResponse {
    match err {
        GeneratorError::Validation(errors) => {
            log::debug!("{} rejected: {} invalid field(s)", kind.slug(), errors.len());
            HttpResponse::UnprocessableEntity().json(ErrorResponse::validation(
                "Please fill in all required fields",
                errors.to_field_map(),
            ))
        }
        other => {
            let message = format!("Error generating {} PDF: {}", kind.title(), other);
            log::error!("{}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&message))
        }
    }
}

/// Runs the blocking render on the actix blocking pool.
///
/// `hold` moves into the render closure and is dropped when the render
/// itself finishes, even if the request future is dropped first.
pub async fn generate_blocking<H>(state: web::Data<AppState>, form: LetterForm, hold: H) -> HttpResponse
where
    H: Send + 'static,
{
    let kind = form.kind();
    let date = today();
    let result = web::block(move || {
        let _hold = hold;
        state.engine.generate(&form, date)
    })
    .await;

    match result {
        Ok(Ok(doc)) => pdf_response(doc),
        Ok(Err(e)) => error_response(kind, e),
        Err(e) => {
            let message = format!("Error generating {} PDF: {}", kind.title(), e);
            log::error!("{}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&message))
        }
    }
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letters",
    get,
    path = "/letters",
    responses(
        (status = 200, description = "Available letter types", body = [LetterTypeInfo])
    )
)]
pub async fn list_letter_types() -> impl Responder {
    let catalog: Vec<LetterTypeInfo> = LetterKind::ALL
        .iter()
        .map(|&kind| LetterTypeInfo::describe(kind))
        .collect();
    HttpResponse::Ok().json(catalog)
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letters",
    post,
    path = "/letters/faculty-request",
    request_body = FacultyRequestForm,
    responses(
        (status = 200, description = "Faculty request letter PDF", content_type = "application/pdf"),
        (status = 422, description = "Missing or over-long fields", body = ErrorResponse),
        (status = 500, description = "Layout or export failed", body = ErrorResponse)
    )
)]
pub async fn generate_faculty_request(
    state: web::Data<AppState>,
    body: web::Json<FacultyRequestForm>,
) -> impl Responder {
    generate_blocking(state, LetterForm::FacultyRequest(body.into_inner()), ()).await
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letters",
    post,
    path = "/letters/event-approval",
    request_body = EventApprovalForm,
    responses(
        (status = 200, description = "Event approval letter PDF", content_type = "application/pdf"),
        (status = 422, description = "Missing or over-long fields", body = ErrorResponse),
        (status = 500, description = "Layout or export failed", body = ErrorResponse)
    )
)]
pub async fn generate_event_approval(
    state: web::Data<AppState>,
    body: web::Json<EventApprovalForm>,
) -> impl Responder {
    generate_blocking(state, LetterForm::EventApproval(body.into_inner()), ()).await
}

#[utoipa::path(
    context_path = "/api",
    tag = "Letters",
    post,
    path = "/tables/parse",
    request_body = ParseTableRequest,
    responses(
        (status = 200, description = "Parsed grid", body = ParseTableResponse)
    )
)]
pub async fn parse_table(body: web::Json<ParseTableRequest>) -> impl Responder {
    let request = body.into_inner();
    let response = match parse_pasted_table(&request.content) {
        Some(table) => ParseTableResponse {
            table,
            parsed: true,
        },
        None => ParseTableResponse {
            table: request.table.unwrap_or_default(),
            parsed: false,
        },
    };
    HttpResponse::Ok().json(response)
}

/// Configure letter routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/letters").route(web::get().to(list_letter_types)))
        .service(
            web::resource("/letters/faculty-request")
                .route(web::post().to(generate_faculty_request)),
        )
        .service(
            web::resource("/letters/event-approval").route(web::post().to(generate_event_approval)),
        )
        .service(web::resource("/tables/parse").route(web::post().to(parse_table)));
}
