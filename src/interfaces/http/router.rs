//! API router

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::application::{
    AccountService, BookingSettings, FleetService, LedgerService, ReservationService, TourService,
};
use crate::domain::{PaymentGateway, RepositoryProvider, UnitOfWork};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{SeaOrmRepositoryProvider, SeaOrmUnitOfWork};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    accounts, fleet, health, metrics, payments, request_id, reservations, tour_packages,
    transactions,
};

/// Largest accepted package registration form, image included
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Everything the handlers need, shared by all routes.
/// Handler-specific states are carved out via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub accounts: Arc<AccountService>,
    pub fleet: Arc<FleetService>,
    pub tours: Arc<TourService>,
    pub reservations: Arc<ReservationService>,
    pub ledger: Arc<LedgerService>,
    pub auth: AuthState,
    pub uploads_dir: PathBuf,
    pub metrics: PrometheusHandle,
    pub started_at: Arc<Instant>,
}

impl AppState {
    /// Wire the services over one database connection.
    pub fn new(
        db: DatabaseConnection,
        gateway: Arc<dyn PaymentGateway>,
        booking: BookingSettings,
        jwt_config: JwtConfig,
        bcrypt_cost: u32,
        uploads_dir: PathBuf,
        metrics: PrometheusHandle,
    ) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let uow: Arc<dyn UnitOfWork> = Arc::new(SeaOrmUnitOfWork::new(db.clone()));

        Self {
            accounts: Arc::new(AccountService::new(
                repos.clone(),
                jwt_config.clone(),
                bcrypt_cost,
            )),
            fleet: Arc::new(FleetService::new(repos.clone())),
            tours: Arc::new(TourService::new(repos.clone(), uow.clone())),
            reservations: Arc::new(ReservationService::new(
                repos.clone(),
                uow,
                gateway,
                booking,
            )),
            ledger: Arc::new(LedgerService::new(repos)),
            auth: AuthState { jwt_config },
            uploads_dir,
            metrics,
            started_at: Arc::new(Instant::now()),
            db,
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<AppState> for accounts::AccountHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            accounts: Arc::clone(&s.accounts),
        }
    }
}

impl FromRef<AppState> for fleet::FleetHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            fleet: Arc::clone(&s.fleet),
        }
    }
}

impl FromRef<AppState> for tour_packages::TourHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            tours: Arc::clone(&s.tours),
            uploads_dir: s.uploads_dir.clone(),
        }
    }
}

impl FromRef<AppState> for reservations::ReservationHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            reservations: Arc::clone(&s.reservations),
        }
    }
}

impl FromRef<AppState> for transactions::TransactionHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            ledger: Arc::clone(&s.ledger),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for metrics::MetricsState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            handle: s.metrics.clone(),
        }
    }
}

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    // Accounts and catalogue (public)
    let public_routes = Router::new()
        .route("/api/{role}/registration", post(accounts::register))
        .route("/api/{role}/login", post(accounts::login))
        .route("/api/{role}/refresh", post(accounts::refresh))
        .route("/TourPackage", get(tour_packages::list_tour_packages))
        .route("/TourPackage/{id}", get(tour_packages::get_tour_package))
        .route(
            "/TourPackage/driver/{id}",
            get(tour_packages::list_driver_packages),
        )
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    // Everything else needs a bearer access token
    let protected_routes = Router::new()
        // Fleet
        .route("/car/registration", post(fleet::register_car))
        .route("/car/driver", get(fleet::list_cars))
        .route(
            "/touristPoint/registration",
            post(fleet::register_tourist_point),
        )
        .route("/touristPoint/driver", get(fleet::list_tourist_points))
        // Tour packages
        .route(
            "/TourPackage/registration",
            post(tour_packages::register_tour_package)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route(
            "/TourPackage/{id}/start",
            put(tour_packages::start_tour_package),
        )
        .route(
            "/TourPackage/{id}/finish",
            put(tour_packages::finish_tour_package),
        )
        .route(
            "/driver/start-tourpackage",
            put(tour_packages::driver_start_tour_package),
        )
        // Reservations
        .route("/reservation", post(reservations::create_reservation))
        .route("/reservation/user", get(reservations::list_user_reservations))
        .route(
            "/reservation/tourPackage/{id}",
            get(reservations::list_package_reservations),
        )
        .route(
            "/reservation/{id}/confirm",
            put(reservations::confirm_reservation),
        )
        .route(
            "/reservation/{id}/cancel",
            put(reservations::cancel_reservation),
        )
        // Payments
        .route(
            "/stripe/create-payment-intent",
            post(payments::create_payment_intent),
        )
        // Ledger
        .route(
            "/transaction/driver/all",
            get(transactions::driver_transactions),
        )
        .route("/transaction/driver/totals", get(transactions::driver_totals))
        .route("/transaction/user/totals", get(transactions::user_totals))
        .route(
            "/transaction/user/transactions",
            get(transactions::user_transactions),
        )
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let uploads = ServeDir::new(&state.uploads_dir);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service(tour_packages::UPLOADS_ROUTE, uploads)
        .with_state(state)
        // Middleware
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
}
