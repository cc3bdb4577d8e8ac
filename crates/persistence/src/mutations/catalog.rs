// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Product and variant mutations.

use bakehouse_domain::{Product, ProductVariant};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use super::{count_column, require_row};
use crate::backend::PersistenceBackend;
use crate::diesel_schema::{product_variants, products};
use crate::error::PersistenceError;

/// Inserts a product and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_product(
    conn: &mut SqliteConnection,
    product: &Product,
) -> Result<i64, PersistenceError> {
    info!(name = %product.name, "Creating product");

    diesel::insert_into(products::table)
        .values((
            products::name.eq(&product.name),
            products::description.eq(&product.description),
            products::price_cents.eq(product.price_cents),
            products::quantity_available.eq(product.quantity_available),
            products::is_active.eq(i32::from(product.is_active)),
            products::available_for_delivery.eq(i32::from(product.available_for_delivery)),
            products::available_for_pickup.eq(i32::from(product.available_for_pickup)),
            products::lead_time_days.eq(product
                .lead_time_days
                .map(|d| count_column("lead_time_days", d))
                .transpose()?),
        ))
        .execute(conn)?;

    let product_id: i64 = conn.get_last_insert_rowid()?;
    info!(product_id, "Product created");
    Ok(product_id)
}

/// Overwrites the product with `product.id`, stock level included.
///
/// # Errors
///
/// Returns `NotFound` if no such product exists.
pub fn update_product(
    conn: &mut SqliteConnection,
    product: &Product,
) -> Result<(), PersistenceError> {
    info!(product_id = product.id, "Updating product");

    let rows: usize = diesel::update(products::table.filter(products::product_id.eq(product.id)))
        .set((
            products::name.eq(&product.name),
            products::description.eq(&product.description),
            products::price_cents.eq(product.price_cents),
            products::quantity_available.eq(product.quantity_available),
            products::is_active.eq(i32::from(product.is_active)),
            products::available_for_delivery.eq(i32::from(product.available_for_delivery)),
            products::available_for_pickup.eq(i32::from(product.available_for_pickup)),
            products::lead_time_days.eq(product
                .lead_time_days
                .map(|d| count_column("lead_time_days", d))
                .transpose()?),
        ))
        .execute(conn)?;

    require_row(rows, "product", product.id)
}

/// Deletes a product and its variants. Order lines keep their name snapshot.
///
/// # Errors
///
/// Returns `NotFound` if no such product exists.
pub fn delete_product(conn: &mut SqliteConnection, product_id: i64) -> Result<(), PersistenceError> {
    info!(product_id, "Deleting product");

    let rows: usize =
        diesel::delete(products::table.filter(products::product_id.eq(product_id)))
            .execute(conn)?;

    require_row(rows, "product", product_id)
}

/// Inserts a variant and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the parent
/// product does not exist.
pub fn create_variant(
    conn: &mut SqliteConnection,
    variant: &ProductVariant,
) -> Result<i64, PersistenceError> {
    info!(product_id = variant.product_id, name = %variant.name, "Creating product variant");

    diesel::insert_into(product_variants::table)
        .values((
            product_variants::product_id.eq(variant.product_id),
            product_variants::name.eq(&variant.name),
            product_variants::price_cents.eq(variant.price_cents),
            product_variants::quantity_available.eq(variant.quantity_available),
            product_variants::is_active.eq(i32::from(variant.is_active)),
        ))
        .execute(conn)?;

    let variant_id: i64 = conn.get_last_insert_rowid()?;
    info!(variant_id, "Product variant created");
    Ok(variant_id)
}

/// Overwrites the variant with `variant.id`.
///
/// # Errors
///
/// Returns `NotFound` if no such variant exists.
pub fn update_variant(
    conn: &mut SqliteConnection,
    variant: &ProductVariant,
) -> Result<(), PersistenceError> {
    info!(variant_id = variant.id, "Updating product variant");

    let rows: usize = diesel::update(
        product_variants::table.filter(product_variants::variant_id.eq(variant.id)),
    )
    .set((
        product_variants::name.eq(&variant.name),
        product_variants::price_cents.eq(variant.price_cents),
        product_variants::quantity_available.eq(variant.quantity_available),
        product_variants::is_active.eq(i32::from(variant.is_active)),
    ))
    .execute(conn)?;

    require_row(rows, "product variant", variant.id)
}

/// Deletes a variant.
///
/// # Errors
///
/// Returns `NotFound` if no such variant exists.
pub fn delete_variant(conn: &mut SqliteConnection, variant_id: i64) -> Result<(), PersistenceError> {
    info!(variant_id, "Deleting product variant");

    let rows: usize = diesel::delete(
        product_variants::table.filter(product_variants::variant_id.eq(variant_id)),
    )
    .execute(conn)?;

    require_row(rows, "product variant", variant_id)
}
