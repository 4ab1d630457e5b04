//! Author API endpoints
//!
//! - GET /api/v1/authors - list all authors
//! - GET /api/v1/authors/{id} - get one author, 404 if missing

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, AppState};
use crate::models::Author;

/// Response for a single author
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_birth: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            username: author.username,
            email: author.email,
            first_name: author.first_name,
            last_name: author.last_name,
            phone_number: author.phone_number,
            city: author.city,
            date_birth: author.date_birth.map(|d| d.to_string()),
            is_active: author.is_active,
            created_at: author.created_at.to_rfc3339(),
        }
    }
}

/// Response for the author list
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthorListResponse {
    pub authors: Vec<AuthorResponse>,
}

/// GET /api/v1/authors
async fn list_authors(State(state): State<AppState>) -> Result<Json<AuthorListResponse>, ApiError> {
    let authors = state.authors.list().await.map_err(|e| {
        tracing::error!("Failed to list authors: {:#}", e);
        ApiError::internal_error("Failed to list authors")
    })?;

    Ok(Json(AuthorListResponse {
        authors: authors.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/v1/authors/{id}
async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let author = state.authors.get_by_id(id).await.map_err(|e| {
        tracing::error!("Failed to get author {}: {:#}", id, e);
        ApiError::internal_error("Failed to get author")
    })?;

    match author {
        Some(author) => Ok(Json(author.into())),
        None => Err(ApiError::not_found(format!("Author {} not found", id))),
    }
}

/// Build the authors router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/authors", get(list_authors))
        .route("/authors/{id}", get(get_author))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_router;
    use crate::db::repositories::SqlxAuthorRepository;
    use crate::db::{create_test_pool, migrations};
    use axum_test::TestServer;

    async fn setup_server() -> TestServer {
        let pool = create_test_pool().await.expect("Failed to create pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Migrations failed");

        sqlx::query(
            r#"
            INSERT INTO authors (username, email, first_name, last_name, city)
            VALUES ('ipetrov', 'ipetrov@example.com', 'Ivan', 'Petrov', 'Moscow'),
                   ('asmith', 'asmith@example.com', 'Anna', 'Smith', NULL)
            "#,
        )
        .execute(&pool)
        .await
        .expect("Failed to insert authors");

        let state = AppState {
            authors: SqlxAuthorRepository::boxed(pool),
        };
        TestServer::new(build_router(state)).expect("Failed to build test server")
    }

    #[tokio::test]
    async fn test_list_authors() {
        let server = setup_server().await;

        let response = server.get("/api/v1/authors").await;
        response.assert_status_ok();

        let body: AuthorListResponse = response.json();
        assert_eq!(body.authors.len(), 2);
        // Ordered by username.
        assert_eq!(body.authors[0].username, "asmith");
        assert_eq!(body.authors[1].username, "ipetrov");
    }

    #[tokio::test]
    async fn test_get_author_by_id() {
        let server = setup_server().await;

        let response = server.get("/api/v1/authors/1").await;
        response.assert_status_ok();

        let body: AuthorResponse = response.json();
        assert_eq!(body.id, 1);
        assert_eq!(body.username, "ipetrov");
        assert_eq!(body.city.as_deref(), Some("Moscow"));
    }

    #[tokio::test]
    async fn test_get_author_not_found() {
        let server = setup_server().await;

        let response = server.get("/api/v1/authors/999").await;
        response.assert_status_not_found();

        let body: ApiError = response.json();
        assert_eq!(body.error.code, "NOT_FOUND");
    }
}
