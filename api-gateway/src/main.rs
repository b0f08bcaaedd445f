//! API Gateway for the banking services

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use account_service::{AccountService, AccountServiceConfig};
use transaction_service::TransactionService;

use api_gateway::api;
use api_gateway::api::account::{
    create_account, deposit, get_account, get_account_by_first_name, get_account_by_last_name,
    wire_transfer, withdraw,
};
use api_gateway::api::transaction::recent_transactions;
use api_gateway::config::AppConfig;
use api_gateway::AppState;

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Account routes
        api::account::create_account,
        api::account::get_account,
        api::account::get_account_by_first_name,
        api::account::get_account_by_last_name,
        api::account::deposit,
        api::account::withdraw,
        api::account::wire_transfer,
        // Transaction routes
        api::transaction::recent_transactions,
    ),
    components(
        schemas(
            // Account API
            api::account::CreateAccountRequest,
            api::account::AmountRequest,
            api::account::TransferRequest,
            api::account::AccountView,

            // Transaction API
            transaction_service::TransactionView,

            // Response models
            api::response::ApiResponse<api::account::AccountView>,
            api::response::ApiListResponse<transaction_service::TransactionView>,
            api::response::ResponseMetadata
        )
    ),
    tags(
        (name = "account", description = "Account management endpoints"),
        (name = "transaction", description = "Transaction history endpoints")
    ),
    info(
        title = "Core Banking API",
        version = "1.0.0",
        description = "API for the banking back-end allowing account management, deposits, withdrawals, wire transfers, and transaction history access"
    )
)]
struct ApiDoc;

/// Banking API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address, defaults to 127.0.0.1 on the configured port
    #[clap(short, long)]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse("tower_http=debug,api_gateway=debug")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Debug logging enabled");

    // Initialize services; DATABASE_URL selects the PostgreSQL store
    let config = AppConfig::new();
    let account_service = match &config.database_url {
        Some(_) => {
            info!("Using the PostgreSQL account store");
            AccountService::with_config(&AccountServiceConfig::from_env()).await?
        }
        None => {
            info!("Using the in-memory account store");
            AccountService::new()
        }
    };
    let account_service = Arc::new(account_service);
    let transaction_service = Arc::new(TransactionService::new(account_service.repository()));

    // Create app state
    let state = Arc::new(AppState {
        account_service,
        transaction_service,
    });

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Set up API routes
    let api_routes = Router::new()
        // Account routes
        .route("/accounts", post(create_account))
        .route("/accounts/:id", get(get_account))
        .route("/accounts/first-name/:first_name", get(get_account_by_first_name))
        .route("/accounts/last-name/:last_name", get(get_account_by_last_name))
        .route("/accounts/:id/deposit", post(deposit))
        .route("/accounts/:id/withdraw", post(withdraw))
        .route("/transfers", post(wire_transfer))
        // Transaction routes
        .route("/accounts/:id/transactions", get(recent_transactions));

    // Set up Swagger UI
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());

    // Combine all routes
    let app = Router::new()
        .nest("/api/v1", api_routes)
        .merge(swagger_ui)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        )
        .with_state(state);

    // Start the server
    let addr = args
        .addr
        .unwrap_or_else(|| format!("127.0.0.1:{}", config.port));
    let addr: std::net::SocketAddr = addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
