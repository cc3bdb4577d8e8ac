// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Bakehouse storefront.
//!
//! A single `SQLite` connection behind Diesel stores the fulfillment rules
//! (schedules, pickup locations, zones, closures, one-off dates), the
//! catalog, orders with their items and merchant fees, and operator
//! accounts with their sessions.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.
//!
//! ## Checkout
//!
//! `commit_checkout` is the only multi-statement write. It runs in one
//! `IMMEDIATE` transaction and decrements stock with conditional updates,
//! so two concurrent checkouts can never oversell.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use bakehouse::CheckoutPlan;
use bakehouse_domain::{
    CalendarClosure, DeliverySchedule, DeliveryZone, FulfillmentStatus, OneOffDate, OrderStatus,
    PickupLocation, Product, ProductVariant,
};
use diesel::SqliteConnection;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    CatalogData, CommittedOrder, FulfillmentData, MerchantFeeRecord, OperatorData, OrderCommit,
    OrderFilter, OrderItemRecord, OrderRecord, SessionData,
};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter with a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_bakehouse_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter backed by a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        use backend::PersistenceBackend;
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Fulfillment rules
    // ========================================================================

    /// Loads every rule the date resolver and fee calculator read.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn load_fulfillment_data(&mut self) -> Result<FulfillmentData, PersistenceError> {
        queries::fulfillment::load_fulfillment_data(&mut self.conn)
    }

    /// Lists delivery schedules by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_delivery_schedules(&mut self) -> Result<Vec<DeliverySchedule>, PersistenceError> {
        queries::fulfillment::list_delivery_schedules(&mut self.conn)
    }

    /// Retrieves a delivery schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_delivery_schedule(
        &mut self,
        schedule_id: i64,
    ) -> Result<Option<DeliverySchedule>, PersistenceError> {
        queries::fulfillment::get_delivery_schedule(&mut self.conn, schedule_id)
    }

    /// Inserts a delivery schedule and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_delivery_schedule(
        &mut self,
        schedule: &DeliverySchedule,
    ) -> Result<i64, PersistenceError> {
        mutations::fulfillment::create_delivery_schedule(&mut self.conn, schedule)
    }

    /// Overwrites a delivery schedule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the schedule does not exist.
    pub fn update_delivery_schedule(
        &mut self,
        schedule: &DeliverySchedule,
    ) -> Result<(), PersistenceError> {
        mutations::fulfillment::update_delivery_schedule(&mut self.conn, schedule)
    }

    /// Deletes a delivery schedule.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the schedule does not exist.
    pub fn delete_delivery_schedule(&mut self, schedule_id: i64) -> Result<(), PersistenceError> {
        mutations::fulfillment::delete_delivery_schedule(&mut self.conn, schedule_id)
    }

    /// Lists pickup locations by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pickup_locations(&mut self) -> Result<Vec<PickupLocation>, PersistenceError> {
        queries::fulfillment::list_pickup_locations(&mut self.conn)
    }

    /// Retrieves a pickup location.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_pickup_location(
        &mut self,
        location_id: i64,
    ) -> Result<Option<PickupLocation>, PersistenceError> {
        queries::fulfillment::get_pickup_location(&mut self.conn, location_id)
    }

    /// Inserts a pickup location and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_pickup_location(
        &mut self,
        location: &PickupLocation,
    ) -> Result<i64, PersistenceError> {
        mutations::fulfillment::create_pickup_location(&mut self.conn, location)
    }

    /// Overwrites a pickup location.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the location does not exist.
    pub fn update_pickup_location(
        &mut self,
        location: &PickupLocation,
    ) -> Result<(), PersistenceError> {
        mutations::fulfillment::update_pickup_location(&mut self.conn, location)
    }

    /// Deletes a pickup location.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the location does not exist.
    pub fn delete_pickup_location(&mut self, location_id: i64) -> Result<(), PersistenceError> {
        mutations::fulfillment::delete_pickup_location(&mut self.conn, location_id)
    }

    /// Lists delivery zones by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_delivery_zones(&mut self) -> Result<Vec<DeliveryZone>, PersistenceError> {
        queries::fulfillment::list_delivery_zones(&mut self.conn)
    }

    /// Retrieves a delivery zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_delivery_zone(
        &mut self,
        zone_id: i64,
    ) -> Result<Option<DeliveryZone>, PersistenceError> {
        queries::fulfillment::get_delivery_zone(&mut self.conn, zone_id)
    }

    /// Inserts a delivery zone and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_delivery_zone(&mut self, zone: &DeliveryZone) -> Result<i64, PersistenceError> {
        mutations::fulfillment::create_delivery_zone(&mut self.conn, zone)
    }

    /// Overwrites a delivery zone.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the zone does not exist.
    pub fn update_delivery_zone(&mut self, zone: &DeliveryZone) -> Result<(), PersistenceError> {
        mutations::fulfillment::update_delivery_zone(&mut self.conn, zone)
    }

    /// Deletes a delivery zone.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the zone does not exist.
    pub fn delete_delivery_zone(&mut self, zone_id: i64) -> Result<(), PersistenceError> {
        mutations::fulfillment::delete_delivery_zone(&mut self.conn, zone_id)
    }

    /// Lists closures in date order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_closures(&mut self) -> Result<Vec<CalendarClosure>, PersistenceError> {
        queries::fulfillment::list_closures(&mut self.conn)
    }

    /// Inserts a calendar closure and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the date is already closed.
    pub fn create_closure(&mut self, closure: &CalendarClosure) -> Result<i64, PersistenceError> {
        mutations::fulfillment::create_closure(&mut self.conn, closure)
    }

    /// Overwrites a calendar closure.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `UniqueViolation`.
    pub fn update_closure(&mut self, closure: &CalendarClosure) -> Result<(), PersistenceError> {
        mutations::fulfillment::update_closure(&mut self.conn, closure)
    }

    /// Deletes a calendar closure.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the closure does not exist.
    pub fn delete_closure(&mut self, closure_id: i64) -> Result<(), PersistenceError> {
        mutations::fulfillment::delete_closure(&mut self.conn, closure_id)
    }

    /// Lists one-off dates in date order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_one_off_dates(&mut self) -> Result<Vec<OneOffDate>, PersistenceError> {
        queries::fulfillment::list_one_off_dates(&mut self.conn)
    }

    /// Inserts a one-off date and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the `(date, kind)` pair exists.
    pub fn create_one_off_date(&mut self, one_off: &OneOffDate) -> Result<i64, PersistenceError> {
        mutations::fulfillment::create_one_off_date(&mut self.conn, one_off)
    }

    /// Overwrites a one-off date.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `UniqueViolation`.
    pub fn update_one_off_date(&mut self, one_off: &OneOffDate) -> Result<(), PersistenceError> {
        mutations::fulfillment::update_one_off_date(&mut self.conn, one_off)
    }

    /// Deletes a one-off date.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the one-off does not exist.
    pub fn delete_one_off_date(&mut self, one_off_id: i64) -> Result<(), PersistenceError> {
        mutations::fulfillment::delete_one_off_date(&mut self.conn, one_off_id)
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Loads all products and variants.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_catalog(&mut self) -> Result<CatalogData, PersistenceError> {
        queries::catalog::load_catalog(&mut self.conn)
    }

    /// Lists products by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_products(&mut self) -> Result<Vec<Product>, PersistenceError> {
        queries::catalog::list_products(&mut self.conn)
    }

    /// Retrieves a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_product(&mut self, product_id: i64) -> Result<Option<Product>, PersistenceError> {
        queries::catalog::get_product(&mut self.conn, product_id)
    }

    /// Inserts a product and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_product(&mut self, product: &Product) -> Result<i64, PersistenceError> {
        mutations::catalog::create_product(&mut self.conn, product)
    }

    /// Overwrites a product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist.
    pub fn update_product(&mut self, product: &Product) -> Result<(), PersistenceError> {
        mutations::catalog::update_product(&mut self.conn, product)
    }

    /// Deletes a product and its variants.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product does not exist.
    pub fn delete_product(&mut self, product_id: i64) -> Result<(), PersistenceError> {
        mutations::catalog::delete_product(&mut self.conn, product_id)
    }

    /// Lists variants, optionally for one product.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_variants(
        &mut self,
        product_id: Option<i64>,
    ) -> Result<Vec<ProductVariant>, PersistenceError> {
        queries::catalog::list_variants(&mut self.conn, product_id)
    }

    /// Inserts a variant and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_variant(&mut self, variant: &ProductVariant) -> Result<i64, PersistenceError> {
        mutations::catalog::create_variant(&mut self.conn, variant)
    }

    /// Overwrites a variant.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the variant does not exist.
    pub fn update_variant(&mut self, variant: &ProductVariant) -> Result<(), PersistenceError> {
        mutations::catalog::update_variant(&mut self.conn, variant)
    }

    /// Deletes a variant.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the variant does not exist.
    pub fn delete_variant(&mut self, variant_id: i64) -> Result<(), PersistenceError> {
        mutations::catalog::delete_variant(&mut self.conn, variant_id)
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Writes an order, its items and its stock decrements in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientInventory` if stock ran out, in which case
    /// nothing is written.
    pub fn commit_checkout(
        &mut self,
        plan: &CheckoutPlan,
        commit: &OrderCommit,
    ) -> Result<CommittedOrder, PersistenceError> {
        mutations::orders::commit_checkout(&mut self.conn, plan, commit)
    }

    /// Retrieves an order with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_order(&mut self, order_id: i64) -> Result<Option<OrderRecord>, PersistenceError> {
        queries::orders::get_order(&mut self.conn, order_id)
    }

    /// Retrieves an order by its customer-facing number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_order_by_number(
        &mut self,
        order_number: &str,
    ) -> Result<Option<OrderRecord>, PersistenceError> {
        queries::orders::get_order_by_number(&mut self.conn, order_number)
    }

    /// Lists orders matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_orders(
        &mut self,
        filter: &OrderFilter,
    ) -> Result<Vec<OrderRecord>, PersistenceError> {
        queries::orders::list_orders(&mut self.conn, filter)
    }

    /// Counts stored orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_orders(&mut self) -> Result<i64, PersistenceError> {
        queries::orders::count_orders(&mut self.conn)
    }

    /// Lists merchant-fee entries for an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_merchant_fees(
        &mut self,
        order_id: i64,
    ) -> Result<Vec<MerchantFeeRecord>, PersistenceError> {
        queries::orders::list_merchant_fees(&mut self.conn, order_id)
    }

    /// Sets an order's lifecycle status. Callers validate the transition.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order does not exist.
    pub fn update_order_status(
        &mut self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<(), PersistenceError> {
        mutations::orders::update_order_status(&mut self.conn, order_id, status)
    }

    /// Sets an order's fulfillment status. Callers validate the track.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the order does not exist.
    pub fn update_fulfillment_status(
        &mut self,
        order_id: i64,
        status: FulfillmentStatus,
    ) -> Result<(), PersistenceError> {
        mutations::orders::update_fulfillment_status(&mut self.conn, order_id, status)
    }

    // ========================================================================
    // Operators & Sessions
    // ========================================================================

    /// Creates a new operator with a bcrypt-hashed password.
    ///
    /// # Errors
    ///
    /// Returns an error if the login name exists or hashing fails.
    pub fn create_operator(
        &mut self,
        login_name: &str,
        display_name: &str,
        password: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_operator(
            &mut self.conn,
            login_name,
            display_name,
            password,
            role,
        )
    }

    /// Retrieves an operator by login name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator_by_login(
        &mut self,
        login_name: &str,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_login(&mut self.conn, login_name)
    }

    /// Retrieves an operator by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_operator_by_id(
        &mut self,
        operator_id: i64,
    ) -> Result<Option<OperatorData>, PersistenceError> {
        queries::operators::get_operator_by_id(&mut self.conn, operator_id)
    }

    /// Lists operators by login name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_operators(&mut self) -> Result<Vec<OperatorData>, PersistenceError> {
        queries::operators::list_operators(&mut self.conn)
    }

    /// Counts operators.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_operators(&mut self) -> Result<i64, PersistenceError> {
        queries::operators::count_operators(&mut self.conn)
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_last_login(&mut self, operator_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_last_login(&mut self.conn, operator_id)
    }

    /// Verifies a password against a stored bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash cannot be parsed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::operators::verify_password(password, password_hash)
    }

    /// Creates a session and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        operator_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::operators::create_session(
            &mut self.conn,
            session_token,
            operator_id,
            expires_at,
        )
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::operators::get_session_by_token(&mut self.conn, session_token)
    }

    /// Touches a session's last activity timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::operators::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::operators::delete_session(&mut self.conn, session_token)
    }

    /// Deletes expired sessions and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::operators::delete_expired_sessions(&mut self.conn)
    }
}
