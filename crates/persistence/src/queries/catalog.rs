// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Product and variant queries.

use bakehouse_domain::{Product, ProductVariant};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use super::{flag, unsigned};
use crate::data_models::CatalogData;
use crate::diesel_schema::{product_variants, products};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = products)]
struct ProductRow {
    product_id: i64,
    name: String,
    description: String,
    price_cents: i64,
    quantity_available: i64,
    is_active: i32,
    available_for_delivery: i32,
    available_for_pickup: i32,
    lead_time_days: Option<i32>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = product_variants)]
struct VariantRow {
    variant_id: i64,
    product_id: i64,
    name: String,
    price_cents: i64,
    quantity_available: i64,
    is_active: i32,
}

fn product_from_row(row: ProductRow) -> Result<Product, PersistenceError> {
    Ok(Product {
        id: row.product_id,
        name: row.name,
        description: row.description,
        price_cents: row.price_cents,
        quantity_available: row.quantity_available,
        is_active: flag(row.is_active),
        available_for_delivery: flag(row.available_for_delivery),
        available_for_pickup: flag(row.available_for_pickup),
        lead_time_days: row
            .lead_time_days
            .map(|d| unsigned("lead_time_days", d))
            .transpose()?,
    })
}

fn variant_from_row(row: VariantRow) -> ProductVariant {
    ProductVariant {
        id: row.variant_id,
        product_id: row.product_id,
        name: row.name,
        price_cents: row.price_cents,
        quantity_available: row.quantity_available,
        is_active: flag(row.is_active),
    }
}

/// Lists all products by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_products(conn: &mut SqliteConnection) -> Result<Vec<Product>, PersistenceError> {
    debug!("Listing products");

    let rows: Vec<ProductRow> = products::table
        .select(ProductRow::as_select())
        .order_by(products::product_id.asc())
        .load(conn)?;

    rows.into_iter().map(product_from_row).collect()
}

/// Retrieves a product by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the product does not exist.
pub fn get_product(
    conn: &mut SqliteConnection,
    product_id: i64,
) -> Result<Option<Product>, PersistenceError> {
    debug!(product_id, "Looking up product");

    let row: Option<ProductRow> = products::table
        .filter(products::product_id.eq(product_id))
        .select(ProductRow::as_select())
        .first(conn)
        .optional()?;

    row.map(product_from_row).transpose()
}

/// Lists variants, optionally narrowed to one product.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_variants(
    conn: &mut SqliteConnection,
    product_id: Option<i64>,
) -> Result<Vec<ProductVariant>, PersistenceError> {
    debug!(?product_id, "Listing product variants");

    let mut query = product_variants::table
        .select(VariantRow::as_select())
        .order_by(product_variants::variant_id.asc())
        .into_boxed();

    if let Some(product_id) = product_id {
        query = query.filter(product_variants::product_id.eq(product_id));
    }

    let rows: Vec<VariantRow> = query.load(conn)?;
    Ok(rows.into_iter().map(variant_from_row).collect())
}

/// Loads the whole catalog.
///
/// # Errors
///
/// Returns an error if either query fails.
pub fn load_catalog(conn: &mut SqliteConnection) -> Result<CatalogData, PersistenceError> {
    Ok(CatalogData {
        products: list_products(conn)?,
        variants: list_variants(conn, None)?,
    })
}
