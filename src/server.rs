//! Server runtime
//!
//! [`ServerHandle`] owns the whole lifecycle: metrics recorder, database and
//! migrations, payment gateway, REST API and graceful shutdown.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::config::{AppConfig, PaymentConfig, PaymentProvider};
use crate::domain::PaymentGateway;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::init_database;
use crate::infrastructure::payment::{SimulatedGateway, StripeGateway};
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

/// Handle to a running booking service.
pub struct ServerHandle {
    pub config: AppConfig,
    /// Address the API is bound to (useful with port 0)
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: Arc<ShutdownCoordinator>,
    api_task: tokio::task::JoinHandle<()>,
}

/// The process-wide Prometheus recorder; installed once, reused on restart.
fn prometheus_handle() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    if let Some(handle) = PROM_HANDLE.get() {
        return Ok(handle.clone());
    }
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("Prometheus metrics recorder installed");
    Ok(PROM_HANDLE.get_or_init(|| handle).clone())
}

/// Pick the payment adapter named by `payment.provider`.
pub fn build_gateway(cfg: &PaymentConfig) -> Result<Arc<dyn PaymentGateway>, Box<dyn std::error::Error>> {
    match cfg.provider {
        PaymentProvider::Simulated => {
            warn!("Using the simulated payment gateway, no real charges are made");
            Ok(Arc::new(SimulatedGateway::default()))
        }
        PaymentProvider::Stripe => {
            let key = cfg
                .stripe_secret_key
                .clone()
                .ok_or("payment.stripe_secret_key is required for the stripe provider")?;
            Ok(Arc::new(StripeGateway::new(key, cfg.stripe_api_base.clone())))
        }
    }
}

impl ServerHandle {
    /// Start the service with the given options.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Build the payment gateway and services
    /// 4. Bind and serve the REST API
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting tour booking service...");

        let metrics = prometheus_handle()?;

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database_config()).await?;
        if opts.auto_migrate {
            info!("Running database migrations...");
            Migrator::up(&db, None).await?;
            info!("Migrations completed");
        }

        // ── Services ───────────────────────────────────────────
        if app_cfg.uses_default_secret() {
            warn!("security.jwt_secret is the built-in default; set JWT_SECRET in production");
        }
        let gateway = build_gateway(&app_cfg.payment)?;
        let booking = app_cfg.booking_settings();
        info!(
            gateway = gateway.name(),
            currency = %booking.currency,
            settlement_mode = ?booking.settlement_mode,
            timeout_secs = booking.gateway_timeout.as_secs(),
            "Payment configured"
        );

        let state = AppState::new(
            db.clone(),
            gateway,
            booking,
            app_cfg.jwt_config(),
            app_cfg.security.bcrypt_cost,
            app_cfg.storage.uploads_dir.clone(),
            metrics,
        );
        let router = create_api_router(state);

        // ── REST API ───────────────────────────────────────────
        let shutdown = Arc::new(ShutdownCoordinator::new(app_cfg.server.shutdown_timeout));
        let listener = tokio::net::TcpListener::bind(app_cfg.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);

        let api_shutdown = shutdown.signal();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API received shutdown signal");
        });

        let drain = Arc::clone(&shutdown);
        let api_task = tokio::spawn(async move {
            match drain.drain(api_server.into_future()).await {
                Some(Ok(())) => {}
                Some(Err(e)) => error!("REST API server error: {}", e),
                None => warn!("REST API stopped with requests still in flight"),
            }
        });

        Ok(Self {
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the API task to stop, then close the database.
    pub async fn wait(self) {
        if let Err(e) = self.api_task.await {
            error!("REST API task panicked: {}", e);
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
        info!("Tour booking service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        self.trigger_shutdown();
        self.wait().await;
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides
/// `logging.level`; `logging.format = "json"` switches to JSON lines.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
