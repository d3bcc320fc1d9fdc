//! MySQL-backed one-time code store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool, Row};

use ss_core::domain::entities::OtpCode;
use ss_core::errors::DomainError;
use ss_core::repositories::OtpStore;
use ss_shared::utils::phone::mask_phone_number;

/// Durable code store backed by the `otp_codes` table.
///
/// Expected schema:
///
/// ```sql
/// CREATE TABLE otp_codes (
///     phone      VARCHAR(16)  NOT NULL PRIMARY KEY,
///     code       CHAR(6)      NOT NULL,
///     created_at DATETIME(6)  NOT NULL,
///     expires_at DATETIME(6)  NOT NULL,
///     verified   BOOLEAN      NOT NULL DEFAULT FALSE
/// );
/// ```
pub struct MySqlOtpStore {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlOtpStore {
    /// Create a new store over an existing pool.
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OtpStore for MySqlOtpStore {
    async fn upsert(&self, code: OtpCode) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO otp_codes (phone, code, created_at, expires_at, verified)
            VALUES (?, ?, ?, ?, FALSE)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at),
                verified = FALSE
        "#;

        sqlx::query(query)
            .bind(&code.phone)
            .bind(&code.code)
            .bind(code.created_at)
            .bind(code.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(&code.phone),
                    error = %e,
                    "Failed to upsert OTP row"
                );
                DomainError::storage(format!("failed to store OTP: {}", e))
            })?;

        tracing::debug!(
            phone = %mask_phone_number(&code.phone),
            "Stored OTP row"
        );

        Ok(())
    }

    async fn consume(
        &self,
        phone: &str,
        submitted: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        // Check and flip in one statement: concurrent submissions of the
        // same code race on this UPDATE and only one affects a row.
        let query = r#"
            UPDATE otp_codes
            SET verified = TRUE
            WHERE phone = ? AND code = ? AND verified = FALSE AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(phone)
            .bind(submitted)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(phone),
                    error = %e,
                    "Failed to consume OTP row"
                );
                DomainError::storage(format!("failed to verify OTP: {}", e))
            })?;

        Ok(result.rows_affected() == 1)
    }

    async fn find(&self, phone: &str) -> Result<Option<OtpCode>, DomainError> {
        let query = r#"
            SELECT phone, code, created_at, expires_at, verified
            FROM otp_codes
            WHERE phone = ?
        "#;

        let row = sqlx::query(query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(phone),
                    error = %e,
                    "Failed to fetch OTP row"
                );
                DomainError::storage(format!("failed to fetch OTP: {}", e))
            })?;

        match row {
            Some(row) => {
                let code = OtpCode {
                    phone: row.try_get("phone").map_err(DomainError::storage)?,
                    code: row.try_get("code").map_err(DomainError::storage)?,
                    created_at: row.try_get("created_at").map_err(DomainError::storage)?,
                    expires_at: row.try_get("expires_at").map_err(DomainError::storage)?,
                    verified: row.try_get("verified").map_err(DomainError::storage)?,
                };
                Ok(Some(code))
            }
            None => Ok(None),
        }
    }
}
