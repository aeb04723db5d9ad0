use mailcast::database::Database;
use uuid::Uuid;

pub async fn setup_test_db() -> Database {
    // Install drivers for AnyPool (required for tests)
    sqlx::any::install_default_drivers();

    // File-based SQLite with a unique name per test for parallel execution
    let temp_file = format!("test_{}.db", Uuid::new_v4());
    let db_url = format!("sqlite://{}?mode=rwc", temp_file);

    let db = Database::connect(&db_url)
        .await
        .expect("Failed to connect to test database");

    setup_schema(&db).await;

    db
}

async fn setup_schema(db: &Database) {
    let pool = db.pool();

    sqlx::query(
        "CREATE TABLE users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            email_subscription_enabled INTEGER,
            first_name TEXT,
            last_name TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .expect("Failed to create users table");

    sqlx::query("CREATE INDEX idx_users_email ON users(email)")
        .execute(pool)
        .await
        .ok();
}

/// Insert a user row the way the platform's user management would.
/// `subscribed: None` leaves the opt-out flag NULL (the common case).
pub async fn seed_user(
    db: &Database,
    id: &str,
    email: &str,
    subscribed: Option<bool>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) {
    sqlx::query(
        "INSERT INTO users (id, email, email_subscription_enabled, first_name, last_name, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, datetime('now'), datetime('now'))",
    )
    .bind(id)
    .bind(email)
    .bind(subscribed.map(|v| if v { 1_i64 } else { 0 }))
    .bind(first_name)
    .bind(last_name)
    .execute(db.pool())
    .await
    .expect("Failed to seed user");
}

pub async fn teardown_test_db(db: Database) {
    // Close the connection
    drop(db);
    // Note: Test database files will be cleaned up manually or by .gitignore
}
