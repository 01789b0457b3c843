// SQLite ApplicationRepository Implementation

use async_trait::async_trait;
use sqlx::SqlitePool;
use stage_tracker_core::domain::{Application, ApplicationId, ApplicationStatus, NewApplication};
use stage_tracker_core::error::{AppError, Result};
use stage_tracker_core::port::{ApplicationRepository, IdProvider};
use std::sync::Arc;
use tracing::warn;

// Helper to convert sqlx::Error to AppError with structured information
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // SQLite error codes: https://www.sqlite.org/rescode.html
            match db_err.code().as_deref() {
                Some(code @ ("2067" | "1555")) => AppError::Database(format!(
                    "Unique constraint violation: {} ({})",
                    db_err.message(),
                    code
                )),
                Some(code @ ("275" | "531")) => AppError::Database(format!(
                    "Check constraint violation: {} ({})",
                    db_err.message(),
                    code
                )),
                Some("5") => AppError::Database(format!(
                    "Database locked (SQLITE_BUSY): {}",
                    db_err.message()
                )),
                Some("13") => AppError::Database(format!("Database full: {}", db_err.message())),
                Some(code) => AppError::Database(format!(
                    "Database error [{}]: {}",
                    code,
                    db_err.message()
                )),
                None => AppError::Database(format!("Database error: {}", db_err.message())),
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        // Connection, pool, protocol errors
        _ => AppError::Database(err.to_string()),
    }
}

pub struct SqliteApplicationRepository {
    pool: SqlitePool,
    id_provider: Arc<dyn IdProvider>,
}

impl SqliteApplicationRepository {
    pub fn new(pool: SqlitePool, id_provider: Arc<dyn IdProvider>) -> Self {
        Self { pool, id_provider }
    }
}

#[async_trait]
impl ApplicationRepository for SqliteApplicationRepository {
    async fn insert(&self, application: &NewApplication) -> Result<ApplicationId> {
        let id = self.id_provider.generate_id();

        sqlx::query(
            r#"
            INSERT INTO applications (
                id, owner, company, role, status, date_applied, notes
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&application.owner)
        .bind(&application.company)
        .bind(&application.role)
        .bind(application.status.as_str())
        .bind(application.date_applied)
        .bind(&application.notes)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Application>> {
        let row = sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(ApplicationRow::into_application).transpose()
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<Application>> {
        // rowid breaks ties between records created in the same millisecond
        let rows: Vec<ApplicationRow> = sqlx::query_as(
            r#"
            SELECT * FROM applications
            WHERE owner = ?
            ORDER BY date_applied DESC, rowid DESC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter()
            .map(ApplicationRow::into_application)
            .collect()
    }

    async fn update_status(&self, id: &str, status: ApplicationStatus) -> Result<bool> {
        // Partial update: status only
        let result = sqlx::query("UPDATE applications SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    id: String,
    owner: String,
    company: String,
    role: String,
    status: String,
    date_applied: i64,
    notes: Option<String>,
}

impl ApplicationRow {
    fn into_application(self) -> Result<Application> {
        // The CHECK constraint keeps this unreachable unless the file was edited by hand
        let status = self.status.parse::<ApplicationStatus>().map_err(|e| {
            warn!(application_id = %self.id, status = %self.status, "Corrupt status column");
            AppError::Domain(e)
        })?;

        Ok(Application {
            id: self.id,
            owner: self.owner,
            company: self.company,
            role: self.role,
            status,
            date_applied: self.date_applied,
            notes: self.notes,
        })
    }
}
