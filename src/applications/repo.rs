use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::{NewApplication, UpdateApplication};

/// Job application record, owned by exactly one user. Every query below
/// filters on `user_id`, so a record is never visible to a non-owner.
#[derive(Debug, Clone, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub position: String,
    pub status: String,
    pub date_applied: Date,
    pub notes: String,
    pub job_url: String,
    pub salary: String,
    pub location: String,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

/// One row of the status aggregation.
#[derive(Debug, FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

impl Application {
    pub async fn list_by_owner(db: &PgPool, owner: Uuid) -> sqlx::Result<Vec<Application>> {
        sqlx::query_as::<_, Application>(
            r#"
            SELECT id, user_id, company, position, status, date_applied,
                   notes, job_url, salary, location, created_at, updated_at
            FROM applications
            WHERE user_id = $1
            ORDER BY date_applied DESC, created_at DESC
            "#,
        )
        .bind(owner)
        .fetch_all(db)
        .await
    }

    /// Insert a new application for `owner`, defaulting `date_applied` to
    /// the current UTC date when the client did not send one.
    pub async fn insert(db: &PgPool, owner: Uuid, new: NewApplication) -> sqlx::Result<Application> {
        let date_applied = new
            .date_applied
            .unwrap_or_else(|| OffsetDateTime::now_utc().date());
        sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications
                (user_id, company, position, status, date_applied,
                 notes, job_url, salary, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, company, position, status, date_applied,
                      notes, job_url, salary, location, created_at, updated_at
            "#,
        )
        .bind(owner)
        .bind(&new.company)
        .bind(&new.position)
        .bind(&new.status)
        .bind(date_applied)
        .bind(&new.notes)
        .bind(&new.job_url)
        .bind(&new.salary)
        .bind(&new.location)
        .fetch_one(db)
        .await
    }

    /// Replace the editable fields of an owned record and stamp
    /// `updated_at`. Returns false when no record matched the id/owner
    /// pair, which deliberately does not distinguish "absent" from
    /// "someone else's".
    pub async fn update(
        db: &PgPool,
        owner: Uuid,
        id: Uuid,
        fields: UpdateApplication,
    ) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE applications
            SET company = $3, position = $4, status = $5, date_applied = $6,
                notes = $7, job_url = $8, salary = $9, location = $10,
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(&fields.company)
        .bind(&fields.position)
        .bind(&fields.status)
        .bind(fields.date_applied)
        .bind(&fields.notes)
        .bind(&fields.job_url)
        .bind(&fields.salary)
        .bind(&fields.location)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an owned record. Same ownership-gated semantics as update.
    pub async fn delete(db: &PgPool, owner: Uuid, id: Uuid) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_owner(db: &PgPool, owner: Uuid) -> sqlx::Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM applications WHERE user_id = $1")
                .bind(owner)
                .fetch_one(db)
                .await?;
        Ok(count)
    }

    /// Counts per observed status value; statuses with no records simply
    /// do not appear.
    pub async fn status_counts(db: &PgPool, owner: Uuid) -> sqlx::Result<Vec<StatusCount>> {
        sqlx::query_as::<_, StatusCount>(
            r#"
            SELECT status, COUNT(*) AS count
            FROM applications
            WHERE user_id = $1
            GROUP BY status
            "#,
        )
        .bind(owner)
        .fetch_all(db)
        .await
    }
}
