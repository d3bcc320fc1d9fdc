//! MySQL-backed profile repository.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Pool, Row};
use uuid::Uuid;

use ss_core::domain::entities::Profile;
use ss_core::errors::DomainError;
use ss_core::repositories::ProfileRepository;
use ss_shared::utils::phone::mask_phone_number;

/// Profile repository backed by the `user_profiles` table.
///
/// Expected schema:
///
/// ```sql
/// CREATE TABLE user_profiles (
///     id                  CHAR(36)     NOT NULL PRIMARY KEY,
///     phone               VARCHAR(16)  NOT NULL UNIQUE,
///     name                VARCHAR(100) NOT NULL,
///     email               VARCHAR(255) NULL,
///     age                 INT          NOT NULL,
///     gender              VARCHAR(32)  NOT NULL,
///     location            VARCHAR(100) NOT NULL,
///     bio                 TEXT         NOT NULL,
///     photo               VARCHAR(512) NULL,
///     is_profile_complete BOOLEAN      NOT NULL DEFAULT FALSE,
///     created_at          DATETIME(6)  NOT NULL
/// );
/// ```
pub struct MySqlProfileRepository {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlProfileRepository {
    /// Create a new repository over an existing pool.
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn map_row(row: MySqlRow) -> Result<Profile, DomainError> {
        let id: String = row.try_get("id").map_err(DomainError::storage)?;
        Ok(Profile {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::storage(format!("invalid profile id: {}", e)))?,
            phone: row.try_get("phone").map_err(DomainError::storage)?,
            name: row.try_get("name").map_err(DomainError::storage)?,
            email: row.try_get("email").map_err(DomainError::storage)?,
            age: row.try_get("age").map_err(DomainError::storage)?,
            gender: row.try_get("gender").map_err(DomainError::storage)?,
            location: row.try_get("location").map_err(DomainError::storage)?,
            bio: row.try_get("bio").map_err(DomainError::storage)?,
            photo: row.try_get("photo").map_err(DomainError::storage)?,
            is_profile_complete: row
                .try_get("is_profile_complete")
                .map_err(DomainError::storage)?,
            created_at: row.try_get("created_at").map_err(DomainError::storage)?,
        })
    }
}

#[async_trait]
impl ProfileRepository for MySqlProfileRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Profile>, DomainError> {
        let query = r#"
            SELECT id, phone, name, email, age, gender, location, bio, photo,
                   is_profile_complete, created_at
            FROM user_profiles
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
                    "Failed to look up profile by phone"
                );
                DomainError::storage(format!("failed to look up profile: {}", e))
            })?;

        row.map(Self::map_row).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, DomainError> {
        let query = r#"
            SELECT id, phone, name, email, age, gender, location, bio, photo,
                   is_profile_complete, created_at
            FROM user_profiles
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %id,
                    error = %e,
                    "Failed to look up profile by id"
                );
                DomainError::storage(format!("failed to look up profile: {}", e))
            })?;

        row.map(Self::map_row).transpose()
    }

    async fn create(&self, profile: Profile) -> Result<Profile, DomainError> {
        let query = r#"
            INSERT INTO user_profiles (
                id, phone, name, email, age, gender, location, bio, photo,
                is_profile_complete, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(profile.id.to_string())
            .bind(&profile.phone)
            .bind(&profile.name)
            .bind(&profile.email)
            .bind(profile.age)
            .bind(&profile.gender)
            .bind(&profile.location)
            .bind(&profile.bio)
            .bind(&profile.photo)
            .bind(profile.is_profile_complete)
            .bind(profile.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(&profile.phone),
                    error = %e,
                    "Failed to create profile"
                );
                DomainError::storage(format!("failed to create profile: {}", e))
            })?;

        tracing::info!(
            user_id = %profile.id,
            phone = %mask_phone_number(&profile.phone),
            "Created profile"
        );

        Ok(profile)
    }
}
