use shared_types::{AppError, Plan};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// All pricing plans, oldest first.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<Plan>, AppError> {
    let rows = sqlx::query_as::<_, Plan>(
        r#"
        SELECT name, pricing, currency_symbol, duration
        FROM plans
        ORDER BY created_at, id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}
