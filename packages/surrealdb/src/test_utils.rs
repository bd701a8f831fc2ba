use surrealdb::{Surreal, engine::any::Any};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum TestUtilsError {
    #[error("Database connection failed: {0}")]
    DatabaseConnection(#[from] surrealdb::Error),
}

/// An isolated in-memory database: fresh engine, unique namespace and
/// database name per call.
pub async fn create_test_db() -> Result<Surreal<Any>, TestUtilsError> {
    let db = surrealdb::engine::any::connect("mem://").await?;
    let namespace = format!("test_ns_{}", Uuid::new_v4().simple());
    let database = format!("test_db_{}", Uuid::new_v4().simple());
    db.use_ns(namespace).use_db(database).await?;
    Ok(db)
}
