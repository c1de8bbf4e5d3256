//! Note CRUD routes with ownership checks and tag handling.
//!
//! Every note operation requires an authenticated identity. Handlers check
//! existence before permission: a nonexistent note answers 404 even to a
//! requester who would not have been allowed to see it, and 403 is only
//! possible for notes that do exist.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use notes_store::{NewNote, NoteRow, TagRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::SecurityContext;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Maximum note content length in characters.
const MAX_CONTENT_CHARS: usize = 500;

/// Maximum page size for listings.
const MAX_PAGE_SIZE: usize = 100;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListNotesQuery {
    /// Page number, starting at 0.
    #[serde(default)]
    pub page: usize,
    /// Page size.
    #[serde(default = "default_page_size")]
    pub size: usize,
    /// Case-insensitive substring match on title or content.
    #[serde(default)]
    pub search: Option<String>,
}

fn default_page_size() -> usize {
    10
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Free-text tag names, resolved to canonical tags on creation.
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// The version the caller last read; a mismatch is a 409.
    pub version: i64,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<TagRow> for TagResponse {
    fn from(row: TagRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub owner_email: String,
    pub tags: Vec<TagResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i64,
}

impl NoteResponse {
    fn from_row(row: NoteRow, tags: Vec<TagRow>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            owner_email: row.owner_email,
            tags: tags.into_iter().map(TagResponse::from).collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            version: row.version,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListNotesResponse {
    pub notes: Vec<NoteResponse>,
    pub page: usize,
    pub size: usize,
    pub total: i64,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Compute the row offset for a page, rejecting page numbers whose
/// offset cannot be represented instead of wrapping into a negative
/// OFFSET the database would refuse.
fn page_offset(page: usize, size: usize) -> Result<i64, ApiError> {
    page.checked_mul(size)
        .and_then(|n| i64::try_from(n).ok())
        .ok_or_else(|| ApiError::BadRequest("page is out of range".to_string()))
}

/// Validate the title/content contract shared by create and update.
fn validate_note(title: &str, content: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be blank".to_string()));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(ApiError::BadRequest(format!(
            "content must not exceed {MAX_CONTENT_CHARS} characters"
        )));
    }
    Ok(())
}

/// Decide whether the requester may act on a looked-up note. Existence is
/// reported before permission: a missing note is 404 for every requester,
/// admins included, and 403 only arises for a note that exists.
fn authorize_note(note: Option<NoteRow>, ctx: &SecurityContext, id: Uuid) -> ApiResult<NoteRow> {
    let note = note.ok_or_else(|| ApiError::NotFound(format!("note {id}")))?;

    if !ctx.may_access(&note.owner_email) {
        return Err(ApiError::PermissionDenied(format!(
            "note {id} belongs to another user"
        )));
    }

    Ok(note)
}

/// Fetch a note and run the ownership check.
async fn fetch_note_checked(
    state: &AppState,
    ctx: &SecurityContext,
    id: Uuid,
) -> ApiResult<NoteRow> {
    let note = state.store().get_note(id).await?;
    authorize_note(note, ctx, id)
}

/// Resolve tag names and attach them to the note, returning the note's
/// final tag set.
async fn apply_tags(state: &AppState, note_id: Uuid, names: &[String]) -> ApiResult<Vec<TagRow>> {
    let tags = state.store().resolve_tags(names).await?;
    let ids: Vec<Uuid> = tags.iter().map(|t| t.id).collect();
    state.store().set_note_tags(note_id, &ids).await?;
    state.store().tags_for_note(note_id).await.map_err(Into::into)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notes — paginated listing; admins see all notes, everyone else
/// only their own.
async fn list_notes(
    State(state): State<AppState>,
    ctx: SecurityContext,
    Query(query): Query<ListNotesQuery>,
) -> ApiResult<Json<ListNotesResponse>> {
    let size = query.size.clamp(1, MAX_PAGE_SIZE);
    let offset = page_offset(query.page, size)?;

    let owner = (!ctx.role.is_admin()).then_some(ctx.email.as_str());
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let page = state
        .store()
        .list_notes(owner, search, size as i64, offset)
        .await?;

    let mut notes = Vec::with_capacity(page.notes.len());
    for row in page.notes {
        let tags = state.store().tags_for_note(row.id).await?;
        notes.push(NoteResponse::from_row(row, tags));
    }

    Ok(Json(ListNotesResponse {
        notes,
        page: query.page,
        size,
        total: page.total,
    }))
}

/// POST /notes — create a note owned by the authenticated user.
async fn create_note(
    State(state): State<AppState>,
    ctx: SecurityContext,
    Json(request): Json<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<NoteResponse>)> {
    validate_note(&request.title, &request.content)?;

    let note = state
        .store()
        .insert_note(&NewNote {
            title: request.title,
            content: request.content,
            owner_email: ctx.email.clone(),
        })
        .await?;

    let tags = apply_tags(&state, note.id, &request.tags).await?;

    tracing::info!(note_id = %note.id, owner = %ctx.email, "Note created");

    Ok((StatusCode::CREATED, Json(NoteResponse::from_row(note, tags))))
}

/// GET /notes/{id}
async fn get_note(
    State(state): State<AppState>,
    ctx: SecurityContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<NoteResponse>> {
    let note = fetch_note_checked(&state, &ctx, id).await?;
    let tags = state.store().tags_for_note(note.id).await?;
    Ok(Json(NoteResponse::from_row(note, tags)))
}

/// PUT /notes/{id} — optimistic update guarded by the version the caller
/// last read.
async fn update_note(
    State(state): State<AppState>,
    ctx: SecurityContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateNoteRequest>,
) -> ApiResult<Json<NoteResponse>> {
    validate_note(&request.title, &request.content)?;

    // Existence and ownership first; the version check belongs to the
    // store's guarded UPDATE.
    fetch_note_checked(&state, &ctx, id).await?;

    let updated = state
        .store()
        .update_note(id, &request.title, &request.content, request.version)
        .await?;

    let tags = apply_tags(&state, id, &request.tags).await?;

    tracing::info!(note_id = %id, version = updated.version, "Note updated");

    Ok(Json(NoteResponse::from_row(updated, tags)))
}

/// DELETE /notes/{id}
async fn delete_note(
    State(state): State<AppState>,
    ctx: SecurityContext,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    fetch_note_checked(&state, &ctx, id).await?;
    state.store().delete_note(id).await?;

    tracing::info!(note_id = %id, requester = %ctx.email, "Note deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults() {
        let query: ListNotesQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 10);
        assert!(query.search.is_none());
    }

    #[test]
    fn create_request_tags_default_empty() {
        let json = r#"{"title": "t", "content": "c"}"#;
        let request: CreateNoteRequest = serde_json::from_str(json).unwrap();
        assert!(request.tags.is_empty());
    }

    #[test]
    fn update_request_requires_version() {
        let json = r#"{"title": "t", "content": "c"}"#;
        assert!(serde_json::from_str::<UpdateNoteRequest>(json).is_err());

        let json = r#"{"title": "t", "content": "c", "version": 3}"#;
        let request: UpdateNoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.version, 3);
    }

    #[test]
    fn page_offset_is_page_times_size() {
        assert_eq!(page_offset(0, 10).unwrap(), 0);
        assert_eq!(page_offset(3, 10).unwrap(), 30);
    }

    #[test]
    fn huge_page_number_is_a_bad_request_not_a_panic() {
        assert!(matches!(
            page_offset(usize::MAX, MAX_PAGE_SIZE),
            Err(ApiError::BadRequest(_))
        ));
        // Products that overflow i64 but not usize are rejected too.
        assert!(page_offset(usize::MAX / 2, 3).is_err());
    }

    fn owned_note(owner: &str) -> NoteRow {
        let now = Utc::now();
        NoteRow {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            content: "c".to_string(),
            owner_email: owner.to_string(),
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    fn context(email: &str, role: notes_core::Role) -> SecurityContext {
        SecurityContext {
            email: email.to_string(),
            role,
        }
    }

    #[test]
    fn missing_note_is_not_found_for_everyone() {
        let id = Uuid::new_v4();
        let user = context("a@x.com", notes_core::Role::User);
        assert!(matches!(
            authorize_note(None, &user, id),
            Err(ApiError::NotFound(_))
        ));

        // Admins get the same 404, never a permission error, for a note
        // that does not exist.
        let admin = context("root@x.com", notes_core::Role::Admin);
        assert!(matches!(
            authorize_note(None, &admin, id),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn foreign_note_is_permission_denied_only_when_it_exists() {
        let note = owned_note("owner@x.com");
        let id = note.id;
        let other = context("other@x.com", notes_core::Role::User);
        assert!(matches!(
            authorize_note(Some(note), &other, id),
            Err(ApiError::PermissionDenied(_))
        ));
    }

    #[test]
    fn owner_and_admin_are_authorized() {
        let note = owned_note("owner@x.com");
        let id = note.id;
        let owner = context("owner@x.com", notes_core::Role::User);
        assert!(authorize_note(Some(note), &owner, id).is_ok());

        let note = owned_note("owner@x.com");
        let id = note.id;
        let admin = context("root@x.com", notes_core::Role::Admin);
        assert!(authorize_note(Some(note), &admin, id).is_ok());
    }

    #[test]
    fn blank_title_is_rejected() {
        assert!(validate_note("  ", "content").is_err());
        assert!(validate_note("title", "content").is_ok());
    }

    #[test]
    fn oversized_content_is_rejected() {
        let content = "x".repeat(MAX_CONTENT_CHARS + 1);
        assert!(validate_note("title", &content).is_err());
        let content = "x".repeat(MAX_CONTENT_CHARS);
        assert!(validate_note("title", &content).is_ok());
    }
}
