use shared_types::{AppError, Business, BusinessPayload};
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

const COLUMNS: &str = r#"id, owner_id, name, description, category, phone, address, towns,
    province_district, zip_code, website, information_website, facebook_page, tiktok_url,
    starting_price, number_of_fields, field_details, payment_methods, facilities,
    business_options, opening_hours, product_images, receipt_url, payment_status,
    last_payment_date, "POS+Website", created_at, updated_at"#;

/// Insert a new listing owned by `payload.owner_id`.
pub async fn create(pool: &Pool<Postgres>, payload: &BusinessPayload) -> Result<Business, AppError> {
    let sql = format!(
        r#"
        INSERT INTO businesses (
            owner_id, name, description, category, phone, address, towns,
            province_district, zip_code, website, information_website, facebook_page,
            tiktok_url, starting_price, number_of_fields, field_details, payment_methods,
            facilities, business_options, opening_hours, product_images, receipt_url,
            payment_status, last_payment_date, "POS+Website"
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                $17, $18, $19, $20, $21, $22, $23, $24, $25)
        RETURNING {COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, Business>(&sql)
        .bind(payload.owner_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.category)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(&payload.towns)
        .bind(&payload.province_district)
        .bind(&payload.zip_code)
        .bind(&payload.website)
        .bind(&payload.information_website)
        .bind(&payload.facebook_page)
        .bind(&payload.tiktok_url)
        .bind(&payload.starting_price)
        .bind(payload.number_of_fields)
        .bind(Json(&payload.field_details))
        .bind(&payload.payment_methods)
        .bind(&payload.facilities)
        .bind(&payload.business_options)
        .bind(&payload.opening_hours)
        .bind(&payload.product_images)
        .bind(&payload.receipt_url)
        .bind(&payload.payment_status)
        .bind(payload.last_payment_date)
        .bind(payload.pos_website)
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

/// Overwrite every writable column of a listing. Only matches rows owned by
/// `payload.owner_id`; returns `None` otherwise.
pub async fn update(
    pool: &Pool<Postgres>,
    id: Uuid,
    payload: &BusinessPayload,
) -> Result<Option<Business>, AppError> {
    let sql = format!(
        r#"
        UPDATE businesses SET
            name = $3, description = $4, category = $5, phone = $6, address = $7,
            towns = $8, province_district = $9, zip_code = $10, website = $11,
            information_website = $12, facebook_page = $13, tiktok_url = $14,
            starting_price = $15, number_of_fields = $16, field_details = $17,
            payment_methods = $18, facilities = $19, business_options = $20,
            opening_hours = $21, product_images = $22, receipt_url = $23,
            payment_status = $24, last_payment_date = $25, "POS+Website" = $26,
            updated_at = now()
        WHERE id = $1 AND owner_id = $2
        RETURNING {COLUMNS}
        "#
    );

    let row = sqlx::query_as::<_, Business>(&sql)
        .bind(id)
        .bind(payload.owner_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.category)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(&payload.towns)
        .bind(&payload.province_district)
        .bind(&payload.zip_code)
        .bind(&payload.website)
        .bind(&payload.information_website)
        .bind(&payload.facebook_page)
        .bind(&payload.tiktok_url)
        .bind(&payload.starting_price)
        .bind(payload.number_of_fields)
        .bind(Json(&payload.field_details))
        .bind(&payload.payment_methods)
        .bind(&payload.facilities)
        .bind(&payload.business_options)
        .bind(&payload.opening_hours)
        .bind(&payload.product_images)
        .bind(&payload.receipt_url)
        .bind(&payload.payment_status)
        .bind(payload.last_payment_date)
        .bind(payload.pos_website)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

/// Find a listing by ID.
pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Business>, AppError> {
    let sql = format!("SELECT {COLUMNS} FROM businesses WHERE id = $1");
    let row = sqlx::query_as::<_, Business>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

/// Listings owned by a user, most recently updated first.
pub async fn list_by_owner(pool: &Pool<Postgres>, owner_id: Uuid) -> Result<Vec<Business>, AppError> {
    let sql = format!(
        "SELECT {COLUMNS} FROM businesses WHERE owner_id = $1 ORDER BY updated_at DESC"
    );
    let rows = sqlx::query_as::<_, Business>(&sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}
