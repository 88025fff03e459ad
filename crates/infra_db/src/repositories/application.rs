//! Application repository implementation
//!
//! This module provides database access for loan applications, their funding
//! calculation history and their notes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use domain_funding::{
    ApplicationNote, CalculationInput, FundingCalculationHistory, FundingResult, LoanApplication,
    LoanExtension,
};

use crate::error::DatabaseError;

const APPLICATION_COLUMNS: &str =
    "id, reference_number, loan_amount, loan_term, interest_rate, security_value, funding_result, updated_at";

/// Repository for loan application data
///
/// Multi-statement writes run inside a single transaction. Dropping the
/// transaction without committing rolls it back, so an error returned half way
/// through leaves no partial writes behind.
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    /// Creates a new ApplicationRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves an application by its identifier
    ///
    /// # Returns
    ///
    /// The application row or NotFound error
    pub async fn get_by_id(&self, application_id: Uuid) -> Result<ApplicationRow, DatabaseError> {
        let sql = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(application_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Application", application_id))
    }

    /// Inserts an application, or replaces every column of an existing one
    pub async fn upsert(&self, application: &LoanApplication) -> Result<(), DatabaseError> {
        let loan_term = application
            .loan_term
            .map(i32::try_from)
            .transpose()
            .map_err(|e| DatabaseError::SerializationError(format!("loan_term: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO applications
                (id, reference_number, loan_amount, loan_term, interest_rate, security_value,
                 funding_result, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                reference_number = EXCLUDED.reference_number,
                loan_amount = EXCLUDED.loan_amount,
                loan_term = EXCLUDED.loan_term,
                interest_rate = EXCLUDED.interest_rate,
                security_value = EXCLUDED.security_value,
                funding_result = EXCLUDED.funding_result,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(Uuid::from(application.id))
        .bind(&application.reference_number)
        .bind(application.loan_amount)
        .bind(loan_term)
        .bind(application.interest_rate)
        .bind(application.security_value)
        .bind(application.funding_result.as_ref().map(Json))
        .bind(application.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Caches a calculation result on its application and appends the history row
    ///
    /// `created_by` is stored only when it names an existing user; otherwise
    /// the column is left NULL.
    pub async fn record_calculation(
        &self,
        record: &FundingCalculationHistory,
    ) -> Result<(), DatabaseError> {
        let application_id = Uuid::from(record.application_id);
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE applications SET funding_result = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(application_id)
        .bind(Json(&record.calculation_result))
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Application", application_id));
        }

        sqlx::query(
            r#"
            INSERT INTO funding_calculation_history
                (id, application_id, calculation_input, calculation_result, created_by, created_at)
            VALUES ($1, $2, $3, $4, (SELECT id FROM users WHERE id = $5), $6)
            "#,
        )
        .bind(Uuid::from(record.id))
        .bind(application_id)
        .bind(Json(&record.calculation_input))
        .bind(Json(&record.calculation_result))
        .bind(record.created_by.map(Uuid::from))
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Lists the calculation history of an application, newest first
    pub async fn list_calculations(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<CalculationRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CalculationRow>(
            r#"
            SELECT id, application_id, calculation_input, calculation_result, created_by, created_at
            FROM funding_calculation_history
            WHERE application_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Replaces the rate and amount of an application and inserts the note
    ///
    /// # Returns
    ///
    /// The updated application row
    pub async fn apply_loan_extension(
        &self,
        application_id: Uuid,
        extension: &LoanExtension,
        note: &ApplicationNote,
    ) -> Result<ApplicationRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "UPDATE applications SET interest_rate = $2, loan_amount = $3, updated_at = now() \
             WHERE id = $1 RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ApplicationRow>(&sql)
            .bind(application_id)
            .bind(extension.new_rate)
            .bind(extension.new_loan_amount)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Application", application_id))?;

        sqlx::query(
            r#"
            INSERT INTO application_notes (id, application_id, title, content, created_by, created_at)
            VALUES ($1, $2, $3, $4, (SELECT id FROM users WHERE id = $5), $6)
            "#,
        )
        .bind(Uuid::from(note.id))
        .bind(application_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(note.created_by.map(Uuid::from))
        .bind(note.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Lists the notes of an application, newest first
    pub async fn list_notes(&self, application_id: Uuid) -> Result<Vec<NoteRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT id, application_id, title, content, created_by, created_at
            FROM application_notes
            WHERE application_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// ============================================================================
// Row Types
// ============================================================================

/// Database row for an application
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub reference_number: String,
    pub loan_amount: Option<Decimal>,
    pub loan_term: Option<i32>,
    pub interest_rate: Option<Decimal>,
    pub security_value: Option<Decimal>,
    pub funding_result: Option<Json<FundingResult>>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRow {
    /// Converts the row into the domain application
    pub fn into_application(self) -> Result<LoanApplication, DatabaseError> {
        let loan_term = self
            .loan_term
            .map(u32::try_from)
            .transpose()
            .map_err(|e| DatabaseError::SerializationError(format!("loan_term: {e}")))?;

        Ok(LoanApplication {
            id: self.id.into(),
            reference_number: self.reference_number,
            loan_amount: self.loan_amount,
            loan_term,
            interest_rate: self.interest_rate,
            security_value: self.security_value,
            funding_result: self.funding_result.map(|Json(result)| result),
            updated_at: self.updated_at,
        })
    }
}

/// Database row for a funding calculation history record
#[derive(Debug, Clone, FromRow)]
pub struct CalculationRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub calculation_input: Json<CalculationInput>,
    pub calculation_result: Json<FundingResult>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<CalculationRow> for FundingCalculationHistory {
    fn from(row: CalculationRow) -> Self {
        Self {
            id: row.id.into(),
            application_id: row.application_id.into(),
            calculation_input: row.calculation_input.0,
            calculation_result: row.calculation_result.0,
            created_by: row.created_by.map(Into::into),
            created_at: row.created_at,
        }
    }
}

/// Database row for an application note
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub application_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<NoteRow> for ApplicationNote {
    fn from(row: NoteRow) -> Self {
        Self {
            id: row.id.into(),
            application_id: row.application_id.into(),
            title: row.title,
            content: row.content,
            created_by: row.created_by.map(Into::into),
            created_at: row.created_at,
        }
    }
}
