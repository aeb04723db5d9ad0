use sqlx::{any::AnyPoolOptions, AnyPool, Row};

use crate::{api::middleware::error::ApiResult, models::Recipient};

#[derive(Clone)]
pub struct Database {
    pool: AnyPool,
}

impl Database {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = AnyPoolOptions::new()
            .max_connections(20)
            .min_connections(5)
            .connect(database_url)
            .await?;

        // Enable foreign keys for SQLite
        if database_url.starts_with("sqlite") {
            sqlx::query("PRAGMA foreign_keys = ON")
                .execute(&pool)
                .await?;
        }

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("migrations/sqlite").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Fetch profile rows for exactly the given ids. Ids with no matching
    /// row are simply absent from the result; this workflow never writes
    /// user rows.
    pub async fn get_users_by_ids(&self, ids: &[String]) -> ApiResult<Vec<Recipient>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, email, email_subscription_enabled, first_name, last_name
             FROM users
             WHERE id IN ({})",
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id);
        }

        let rows = query.fetch_all(&self.pool).await?;

        let mut recipients = Vec::with_capacity(rows.len());
        for row in rows {
            recipients.push(Recipient {
                id: row.try_get("id")?,
                email: row.try_get("email")?,
                email_subscription_enabled: row
                    .try_get::<Option<i64>, _>("email_subscription_enabled")?
                    .map(|flag| flag != 0),
                first_name: row.try_get("first_name")?,
                last_name: row.try_get("last_name")?,
            });
        }

        Ok(recipients)
    }
}
