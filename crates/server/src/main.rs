// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP server for the Bakehouse storefront and back office.
//!
//! This binary wires the API crate to axum. It owns no business rules:
//! handlers lock the persistence layer, call the API and map errors to
//! status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod checkout;
mod error;
mod routes;
mod session;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use bakehouse::CheckoutSettings;
use bakehouse_api::{LogNotifier, Notifier};
use bakehouse_domain::{BusinessTimezone, ResolverConfig, TaxRate};
use bakehouse_payments::{CheckoutUrls, PaymentProvider, SquareProvider, StripeProvider};
use bakehouse_persistence::Persistence;
use clap::{Parser, ValueEnum};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::checkout::handle_checkout;
use crate::routes::{
    handle_bulk_fulfillment_status, handle_create_closure, handle_create_delivery_schedule,
    handle_create_delivery_zone, handle_create_manual_order, handle_create_one_off_date,
    handle_create_pickup_location, handle_create_product, handle_create_variant,
    handle_delete_closure, handle_delete_delivery_schedule, handle_delete_delivery_zone,
    handle_delete_one_off_date, handle_delete_pickup_location, handle_delete_product,
    handle_delete_variant, handle_delivery_dates, handle_delivery_fee,
    handle_export_delivery_route, handle_export_pickup_list, handle_get_order,
    handle_list_closures, handle_list_delivery_schedules, handle_list_delivery_zones,
    handle_list_one_off_dates, handle_list_orders, handle_list_pickup_locations,
    handle_list_products, handle_login, handle_logout, handle_pickup_dates,
    handle_storefront_pickup_locations, handle_storefront_products, handle_update_closure,
    handle_update_delivery_schedule, handle_update_delivery_status, handle_update_delivery_zone,
    handle_update_one_off_date, handle_update_order_status, handle_update_pickup_location,
    handle_update_pickup_status, handle_update_product, handle_update_variant, handle_whoami,
};

/// Card processor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    /// Online checkout is disabled; staff can still enter manual orders.
    None,
    Stripe,
    Square,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "BAKEHOUSE_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "BAKEHOUSE_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, env = "BAKEHOUSE_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// IANA timezone the bakery operates in
    #[arg(long, env = "BAKEHOUSE_TIMEZONE", default_value = "America/Boise")]
    business_timezone: String,

    /// How many weeks ahead the storefront offers dates
    #[arg(long, env = "BAKEHOUSE_LOOKAHEAD_WEEKS", default_value_t = 4)]
    lookahead_weeks: u32,

    /// Sales tax in basis points (600 = 6%)
    #[arg(long, env = "BAKEHOUSE_TAX_RATE_BPS", default_value_t = 600)]
    tax_rate_bps: u32,

    #[arg(long, env = "BAKEHOUSE_PAYMENT_PROVIDER", value_enum, default_value_t = ProviderKind::None)]
    payment_provider: ProviderKind,

    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    stripe_secret_key: Option<String>,

    #[arg(long, env = "SQUARE_ACCESS_TOKEN", hide_env_values = true)]
    square_access_token: Option<String>,

    #[arg(long, env = "SQUARE_LOCATION_ID")]
    square_location_id: Option<String>,

    /// Where hosted checkout returns the customer after paying
    #[arg(
        long,
        env = "BAKEHOUSE_SUCCESS_URL",
        default_value = "http://localhost:3000/order/success"
    )]
    success_url: String,

    /// Where hosted checkout returns the customer after backing out
    #[arg(
        long,
        env = "BAKEHOUSE_CANCEL_URL",
        default_value = "http://localhost:3000/cart"
    )]
    cancel_url: String,

    /// Login name for the first admin account
    #[arg(long, env = "BAKEHOUSE_ADMIN_LOGIN", default_value = "admin")]
    admin_login: String,

    /// Password for the first admin account. Ignored once any account exists.
    #[arg(long, env = "BAKEHOUSE_ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub persistence: Arc<Mutex<Persistence>>,
    /// `None` when online checkout is disabled.
    pub payments: Option<Arc<dyn PaymentProvider>>,
    pub notifier: Arc<dyn Notifier>,
    pub settings: CheckoutSettings,
    pub checkout_urls: CheckoutUrls,
}

fn checkout_settings(args: &Args) -> Result<CheckoutSettings, Box<dyn std::error::Error>> {
    let timezone: BusinessTimezone = BusinessTimezone::parse(&args.business_timezone)?;
    Ok(CheckoutSettings {
        resolver: ResolverConfig::new(timezone).with_lookahead_weeks(args.lookahead_weeks),
        tax_rate: TaxRate::new(args.tax_rate_bps)?,
    })
}

fn payment_provider(
    args: &Args,
) -> Result<Option<Arc<dyn PaymentProvider>>, Box<dyn std::error::Error>> {
    match args.payment_provider {
        ProviderKind::None => {
            warn!("No payment provider configured; online checkout is disabled");
            Ok(None)
        }
        ProviderKind::Stripe => {
            let secret_key: String = args
                .stripe_secret_key
                .clone()
                .ok_or("--stripe-secret-key is required for the stripe provider")?;
            Ok(Some(Arc::new(StripeProvider::new(secret_key))))
        }
        ProviderKind::Square => {
            let access_token: String = args
                .square_access_token
                .clone()
                .ok_or("--square-access-token is required for the square provider")?;
            let location_id: String = args
                .square_location_id
                .clone()
                .ok_or("--square-location-id is required for the square provider")?;
            Ok(Some(Arc::new(SquareProvider::new(
                access_token,
                location_id,
            ))))
        }
    }
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        // Storefront
        .route("/storefront/products", get(handle_storefront_products))
        .route(
            "/storefront/pickup_locations",
            get(handle_storefront_pickup_locations),
        )
        .route("/storefront/delivery_dates", get(handle_delivery_dates))
        .route("/storefront/pickup_dates", get(handle_pickup_dates))
        .route("/storefront/delivery_fee", post(handle_delivery_fee))
        .route("/checkout", post(handle_checkout))
        // Sessions
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/me", get(handle_whoami))
        // Fulfillment rules
        .route(
            "/admin/delivery_schedules",
            get(handle_list_delivery_schedules).post(handle_create_delivery_schedule),
        )
        .route(
            "/admin/delivery_schedules/{id}",
            axum::routing::put(handle_update_delivery_schedule)
                .delete(handle_delete_delivery_schedule),
        )
        .route(
            "/admin/pickup_locations",
            get(handle_list_pickup_locations).post(handle_create_pickup_location),
        )
        .route(
            "/admin/pickup_locations/{id}",
            axum::routing::put(handle_update_pickup_location).delete(handle_delete_pickup_location),
        )
        .route(
            "/admin/delivery_zones",
            get(handle_list_delivery_zones).post(handle_create_delivery_zone),
        )
        .route(
            "/admin/delivery_zones/{id}",
            axum::routing::put(handle_update_delivery_zone).delete(handle_delete_delivery_zone),
        )
        .route(
            "/admin/closures",
            get(handle_list_closures).post(handle_create_closure),
        )
        .route(
            "/admin/closures/{id}",
            axum::routing::put(handle_update_closure).delete(handle_delete_closure),
        )
        .route(
            "/admin/one_off_dates",
            get(handle_list_one_off_dates).post(handle_create_one_off_date),
        )
        .route(
            "/admin/one_off_dates/{id}",
            axum::routing::put(handle_update_one_off_date).delete(handle_delete_one_off_date),
        )
        // Catalog
        .route(
            "/admin/products",
            get(handle_list_products).post(handle_create_product),
        )
        .route(
            "/admin/products/{id}",
            axum::routing::put(handle_update_product).delete(handle_delete_product),
        )
        .route("/admin/products/{id}/variants", post(handle_create_variant))
        .route(
            "/admin/variants/{id}",
            axum::routing::put(handle_update_variant).delete(handle_delete_variant),
        )
        // Orders
        .route(
            "/admin/orders",
            get(handle_list_orders).post(handle_create_manual_order),
        )
        .route(
            "/admin/orders/fulfillment_status",
            post(handle_bulk_fulfillment_status),
        )
        .route("/admin/orders/{id}", get(handle_get_order))
        .route(
            "/admin/orders/{id}/status",
            post(handle_update_order_status),
        )
        .route(
            "/admin/orders/{id}/delivery_status",
            post(handle_update_delivery_status),
        )
        .route(
            "/admin/orders/{id}/pickup_status",
            post(handle_update_pickup_status),
        )
        .route(
            "/admin/exports/delivery_route",
            get(handle_export_delivery_route),
        )
        .route("/admin/exports/pickup_list", get(handle_export_pickup_list))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Bakehouse Server");

    let settings: CheckoutSettings = checkout_settings(&args)?;
    let payments: Option<Arc<dyn PaymentProvider>> = payment_provider(&args)?;

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    if let Some(password) = &args.admin_password {
        if bakehouse_api::bootstrap_admin(&mut persistence, &args.admin_login, password)? {
            info!(login_name = %args.admin_login, "Created initial admin account");
        }
    }

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        payments,
        notifier: Arc::new(LogNotifier),
        settings,
        checkout_urls: CheckoutUrls {
            success_url: args.success_url.clone(),
            cancel_url: args.cancel_url.clone(),
        },
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!(
        timezone = %settings.resolver.timezone,
        provider = ?args.payment_provider,
        "Server listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode, header},
    };
    use bakehouse_api::{
        CheckoutRequestBody, CheckoutResponse, CreatedResponse, CustomerInfo, FulfillmentRequest,
        LoginRequest, LoginResponse, PaymentRequest,
    };
    use bakehouse_domain::{
        Address, CartLine, DeliverySchedule, DeliveryZone, OrderStatus, PaymentStatus, Product,
        ZipCode,
    };
    use bakehouse_payments::{
        ChargeRequest, CheckoutLine, CheckoutSession, PaymentError, PaymentOutcome,
    };
    use chrono::{DateTime, NaiveTime, TimeZone, Utc, Weekday};
    use tower::ServiceExt;

    use crate::checkout::run_checkout;
    use crate::error::ErrorResponse;

    /// Approves or declines every charge depending on `approve`.
    struct FakeProvider {
        approve: AtomicBool,
    }

    impl FakeProvider {
        fn approving() -> Self {
            Self {
                approve: AtomicBool::new(true),
            }
        }

        fn declining() -> Self {
            Self {
                approve: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl PaymentProvider for FakeProvider {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn create_checkout(
            &self,
            lines: &[CheckoutLine],
            _customer_email: &str,
            _urls: &CheckoutUrls,
            metadata: &BTreeMap<String, String>,
        ) -> Result<CheckoutSession, PaymentError> {
            assert!(!lines.is_empty());
            assert!(metadata.contains_key("checkout_key"));
            Ok(CheckoutSession {
                session_id: String::from("cs_fake_1"),
                url: String::from("https://pay.example.com/cs_fake_1"),
            })
        }

        async fn charge(&self, _request: &ChargeRequest) -> Result<PaymentOutcome, PaymentError> {
            if self.approve.load(Ordering::SeqCst) {
                Ok(PaymentOutcome::Approved {
                    payment_id: String::from("ch_fake_1"),
                })
            } else {
                Ok(PaymentOutcome::Declined {
                    reason: String::from("card_declined"),
                })
            }
        }

        fn merchant_fee(&self, gross_cents: i64) -> Option<i64> {
            Some(gross_cents / 100)
        }
    }

    /// Helper to create test app state with a seeded in-memory store.
    fn create_test_app_state(payments: Option<Arc<dyn PaymentProvider>>) -> (AppState, i64) {
        let mut persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        persistence
            .create_delivery_schedule(&DeliverySchedule {
                id: 0,
                name: String::from("Thursday Delivery"),
                day_of_week: Weekday::Thu,
                cutoff_day: Weekday::Tue,
                cutoff_time: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
                lead_time_days: 0,
                delivery_time_window: String::from("2:00 PM - 6:00 PM"),
                is_active: true,
            })
            .unwrap();
        persistence
            .create_delivery_zone(&DeliveryZone {
                id: 0,
                name: String::from("Downtown"),
                zip_codes: BTreeSet::from([ZipCode::parse("83702").unwrap()]),
                fee_cents: 500,
                priority: 1,
                is_active: true,
            })
            .unwrap();
        let loaf_id: i64 = persistence
            .create_product(&Product {
                id: 0,
                name: String::from("Sourdough Loaf"),
                description: String::new(),
                price_cents: 1200,
                quantity_available: 5,
                is_active: true,
                available_for_delivery: true,
                available_for_pickup: true,
                lead_time_days: None,
            })
            .unwrap();
        bakehouse_api::bootstrap_admin(&mut persistence, "baker", "rye-and-salt").unwrap();
        persistence
            .create_operator("shopper", "Regular", "hunter22", "customer")
            .unwrap();

        let state: AppState = AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            payments,
            notifier: Arc::new(LogNotifier),
            settings: CheckoutSettings {
                resolver: ResolverConfig::default(),
                tax_rate: TaxRate::default(),
            },
            checkout_urls: CheckoutUrls {
                success_url: String::from("https://bakery.example.com/thanks"),
                cancel_url: String::from("https://bakery.example.com/cart"),
            },
        };
        (state, loaf_id)
    }

    /// Tuesday 2026-01-13 10:00 in Boise.
    fn tuesday_morning() -> DateTime<Utc> {
        BusinessTimezone::default()
            .tz()
            .with_ymd_and_hms(2026, 1, 13, 10, 0, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn checkout_body(loaf_id: i64, payment: PaymentRequest) -> CheckoutRequestBody {
        CheckoutRequestBody {
            customer: CustomerInfo {
                name: String::from("Ada Baker"),
                email: String::from("ada@example.com"),
                phone: String::from("208-555-0100"),
            },
            items: vec![CartLine {
                product_id: loaf_id,
                variant_id: None,
                quantity: 2,
            }],
            fulfillment: FulfillmentRequest::Delivery {
                date: String::from("2026-01-15"),
                address: Address {
                    street: String::from("123 Main St"),
                    city: String::from("Boise"),
                    state: String::from("ID"),
                    zip: String::from("83702"),
                },
            },
            notes: String::new(),
            payment,
        }
    }

    fn card() -> PaymentRequest {
        PaymentRequest::Card {
            source_token: String::from("tok_visa"),
            idempotency_key: String::from("idem-1"),
        }
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: String) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn login(app: &Router, login_name: &str, password: &str) -> String {
        let req: LoginRequest = LoginRequest {
            login_name: login_name.to_string(),
            password: password.to_string(),
        };
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/auth/login",
                None,
                serde_json::to_string(&req).unwrap(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let login: LoginResponse = serde_json::from_slice(&bytes).unwrap();
        login.session_token
    }

    #[tokio::test]
    async fn test_storefront_delivery_dates_are_public() {
        let (state, loaf_id) = create_test_app_state(None);
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!(
                        "/storefront/delivery_dates?product_id={loaf_id}&max_dates=2"
                    ))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["dates"].as_array().unwrap().len() <= 2);
    }

    #[tokio::test]
    async fn test_admin_route_without_session_is_unauthorized() {
        let (state, _) = create_test_app_state(None);
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin/orders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let (state, _) = create_test_app_state(None);
        let app: Router = build_router(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/auth/me")
                    .header("Authorization", "Bearer not-a-session")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_customer_session_is_forbidden_from_admin_routes() {
        let (state, _) = create_test_app_state(None);
        let app: Router = build_router(state);
        let token: String = login(&app, "shopper", "hunter22").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin/delivery_zones")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_creates_zone_after_login() {
        let (state, _) = create_test_app_state(None);
        let app: Router = build_router(state);
        let token: String = login(&app, "baker", "rye-and-salt").await;

        let body: serde_json::Value = serde_json::json!({
            "name": "North End",
            "zip_codes": ["83703"],
            "fee_cents": 700,
        });
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/admin/delivery_zones",
                Some(&token),
                body.to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let created: CreatedResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(created.id > 0);
    }

    #[tokio::test]
    async fn test_invalid_zone_is_bad_request() {
        let (state, _) = create_test_app_state(None);
        let app: Router = build_router(state);
        let token: String = login(&app, "baker", "rye-and-salt").await;

        let body: serde_json::Value = serde_json::json!({
            "name": "Nowhere",
            "zip_codes": ["not-a-zip"],
            "fee_cents": 700,
        });
        let response = app
            .oneshot(json_request(
                "POST",
                "/admin/delivery_zones",
                Some(&token),
                body.to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(error.error);
    }

    #[tokio::test]
    async fn test_delivery_route_export_is_csv() {
        let (state, _) = create_test_app_state(None);
        let app: Router = build_router(state);
        let token: String = login(&app, "baker", "rye-and-salt").await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/admin/exports/delivery_route?date=2026-01-15")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::OK);
        let content_type: &str = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/csv"));
    }

    #[tokio::test]
    async fn test_checkout_without_provider_is_unavailable() {
        let (state, loaf_id) = create_test_app_state(None);
        let app: Router = build_router(state);

        let body: CheckoutRequestBody = checkout_body(loaf_id, card());
        let response = app
            .oneshot(json_request(
                "POST",
                "/checkout",
                None,
                serde_json::to_string(&body).unwrap(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), HttpStatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_approved_card_checkout_creates_confirmed_order() {
        let (state, loaf_id) = create_test_app_state(Some(Arc::new(FakeProvider::approving())));

        let response: CheckoutResponse =
            run_checkout(&state, &checkout_body(loaf_id, card()), tuesday_morning())
                .await
                .unwrap();

        assert_eq!(response.status, OrderStatus::Confirmed);
        assert_eq!(response.payment_status, PaymentStatus::Paid);
        assert_eq!(response.order_number, "BH-000001");
        assert!(response.redirect_url.is_none());
        // 2400 + 500 fee + 6% tax on 2900
        assert_eq!(response.total_cents, 3074);

        let mut persistence = state.persistence.lock().await;
        assert_eq!(persistence.count_orders().unwrap(), 1);
        let fees = persistence.list_merchant_fees(response.order_id).unwrap();
        assert_eq!(fees.len(), 1);
        assert_eq!(fees[0].provider, "fake");
        assert_eq!(fees[0].fee_cents, 30);
    }

    #[tokio::test]
    async fn test_declined_card_is_payment_required_and_writes_nothing() {
        let (state, loaf_id) = create_test_app_state(Some(Arc::new(FakeProvider::declining())));

        let err: error::HttpError =
            run_checkout(&state, &checkout_body(loaf_id, card()), tuesday_morning())
                .await
                .unwrap_err();

        assert_eq!(err.status, HttpStatusCode::PAYMENT_REQUIRED);
        let mut persistence = state.persistence.lock().await;
        assert_eq!(persistence.count_orders().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_hosted_checkout_returns_redirect_and_pending_order() {
        let (state, loaf_id) = create_test_app_state(Some(Arc::new(FakeProvider::approving())));

        let response: CheckoutResponse = run_checkout(
            &state,
            &checkout_body(loaf_id, PaymentRequest::HostedCheckout),
            tuesday_morning(),
        )
        .await
        .unwrap();

        assert_eq!(response.status, OrderStatus::Pending);
        assert_eq!(response.payment_status, PaymentStatus::Pending);
        assert_eq!(
            response.redirect_url.as_deref(),
            Some("https://pay.example.com/cs_fake_1")
        );
    }

    #[tokio::test]
    async fn test_checkout_for_unoffered_date_never_reaches_provider() {
        let (state, loaf_id) = create_test_app_state(Some(Arc::new(FakeProvider::approving())));
        let mut body: CheckoutRequestBody = checkout_body(loaf_id, card());
        if let FulfillmentRequest::Delivery { date, .. } = &mut body.fulfillment {
            *date = String::from("2026-01-16");
        }

        let err: error::HttpError = run_checkout(&state, &body, tuesday_morning())
            .await
            .unwrap_err();

        assert_eq!(err.status, HttpStatusCode::UNPROCESSABLE_ENTITY);
        let mut persistence = state.persistence.lock().await;
        assert_eq!(persistence.count_orders().unwrap(), 0);
    }
}
