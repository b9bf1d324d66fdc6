use shared_types::{AppError, LocationRecord};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

/// All locations ordered by province/district name.
pub async fn list(pool: &Pool<Postgres>) -> Result<Vec<LocationRecord>, AppError> {
    let rows = sqlx::query_as::<_, LocationRecord>(
        r#"
        SELECT id, province_district, towns
        FROM locations
        ORDER BY province_district ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}
