// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// As três categorias de falha que o resto da aplicação entende.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DuplicateKey,
    Other,
}

/// Cada adaptador de armazenamento sabe ler o seu próprio erro nativo
/// e reduzi-lo a um `ErrorKind`.
pub trait ClassifyError {
    fn classify(&self) -> ErrorKind;
}

impl ClassifyError for sqlx::Error {
    fn classify(&self) -> ErrorKind {
        match self {
            sqlx::Error::RowNotFound => ErrorKind::NotFound,
            // SQLSTATE 23505 (unique_violation) no Postgres
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => ErrorKind::DuplicateKey,
            _ => ErrorKind::Other,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    #[error("Registro não encontrado: {0}")]
    NotFound(&'static str),

    #[error("Violação de chave única: {0}")]
    DuplicateKey(String),

    // Falha do banco que não se encaixa em nenhuma das categorias acima.
    // Sem `#[from]`: a conversão passa pelo `classify` (ver abaixo).
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[source] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        self.classify()
    }

    /// CHECK ou chave estrangeira violada: dado inválido, não falha do banco.
    pub fn constraint_violation(constraint: &str) -> Self {
        AppError::BadRequest(format!("Violação da restrição {}", constraint))
    }
}

impl ClassifyError for AppError {
    fn classify(&self) -> ErrorKind {
        match self {
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::DuplicateKey(_) => ErrorKind::DuplicateKey,
            AppError::DatabaseError(e) => e.classify(),
            _ => ErrorKind::Other,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e.classify() {
            ErrorKind::NotFound => AppError::NotFound("registro"),
            ErrorKind::DuplicateKey => {
                let constraint = e
                    .as_database_error()
                    .and_then(|db_err| db_err.constraint())
                    .unwrap_or("desconhecida")
                    .to_string();
                AppError::DuplicateKey(constraint)
            }
            ErrorKind::Other => {
                // SQLSTATE 23503 (foreign_key_violation) e 23514 (check_violation)
                let violated = e
                    .as_database_error()
                    .filter(|db_err| db_err.is_foreign_key_violation() || db_err.is_check_violation())
                    .map(|db_err| db_err.constraint().unwrap_or("desconhecida").to_string());
                match violated {
                    Some(constraint) => AppError::constraint_violation(&constraint),
                    None => AppError::DatabaseError(e),
                }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(entity) => (StatusCode::NOT_FOUND, format!("{} não encontrado.", entity)),
            AppError::DuplicateKey(_) => (StatusCode::CONFLICT, "Registro duplicado.".to_string()),

            // DatabaseError e InternalServerError viram 500.
            // O detalhe fica só no log.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_classified_as_not_found() {
        assert_eq!(sqlx::Error::RowNotFound.classify(), ErrorKind::NotFound);

        let app_err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(app_err, AppError::NotFound(_)));
        assert_eq!(app_err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn other_backend_failures_pass_through_unclassified() {
        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(app_err, AppError::DatabaseError(sqlx::Error::PoolTimedOut)));
        assert_eq!(app_err.kind(), ErrorKind::Other);
    }

    #[test]
    fn constraint_violations_are_bad_requests_of_kind_other() {
        let err = AppError::constraint_violation("products_price_check");

        assert!(matches!(&err, AppError::BadRequest(msg) if msg.contains("products_price_check")));
        assert_eq!(err.kind(), ErrorKind::Other);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_codes_follow_the_error_kind() {
        let cases = [
            (AppError::NotFound("produto"), StatusCode::NOT_FOUND),
            (AppError::DuplicateKey("products_code_value_key".into()), StatusCode::CONFLICT),
            (AppError::BadRequest("ids".into()), StatusCode::BAD_REQUEST),
            (AppError::DatabaseError(sqlx::Error::PoolClosed), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::InternalServerError(anyhow::anyhow!("boom")), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
