mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::routes as auth_routes;
use crate::features::auth::{AuthService, TokenService};
use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::documents::{routes as documents_routes, DocumentService};
use crate::features::navigation::{routes as navigation_routes, LandingService, StructureLoader};
use crate::features::search::{routes as search_routes, SearchService};
use crate::features::settings::{routes as settings_routes, SettingsService};
use crate::features::subcategories::{routes as subcategories_routes, SubcategoryService};
use crate::features::users::{routes as users_routes, UserService};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!(
        "Configuration loaded successfully (environment={}, hidden_policy={})",
        config.app.environment,
        config.portal.hidden_policy
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Row store services
    let user_service = Arc::new(UserService::new(pool.clone(), config.auth.bcrypt_cost));
    let category_service = Arc::new(CategoryService::new(pool.clone()));
    let subcategory_service = Arc::new(SubcategoryService::new(pool.clone()));
    let document_service = Arc::new(DocumentService::new(pool.clone()));
    let settings_service = Arc::new(SettingsService::new(
        pool.clone(),
        config.portal.site_title.clone(),
    ));
    tracing::info!("Row store services initialized");

    // Seed the first admin account on an empty install
    let created = user_service
        .ensure_default_admin(
            &config.auth.admin_username,
            &config.auth.admin_password,
            &config.auth.admin_email,
        )
        .await?;
    if created {
        if config.app.is_production() {
            tracing::warn!(
                "Default admin '{}' created, change its password",
                config.auth.admin_username
            );
        } else {
            tracing::info!(
                "Default admin created: username={}, password={}",
                config.auth.admin_username,
                config.auth.admin_password
            );
        }
    }

    let token_service = Arc::new(TokenService::from_config(&config.auth));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_service),
        Arc::clone(&token_service),
        config.app.is_production(),
    ));
    tracing::info!("Auth service initialized");

    let structure_loader = Arc::new(StructureLoader::new(
        Arc::clone(&category_service),
        Arc::clone(&subcategory_service),
        Arc::clone(&document_service),
        config.portal.hidden_policy,
    ));
    let landing_service = Arc::new(LandingService::new(
        Arc::clone(&structure_loader),
        Arc::clone(&settings_service),
    ));
    let search_service = Arc::new(SearchService::new(Arc::clone(&document_service)));
    tracing::info!("Navigation and search services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Admin routes, all relative to /api/admin
    let admin_routes = Router::new()
        .merge(users_routes::admin_routes(Arc::clone(&user_service)))
        .merge(categories_routes::admin_routes(Arc::clone(&category_service)))
        .merge(subcategories_routes::admin_routes(Arc::clone(
            &subcategory_service,
        )))
        .merge(documents_routes::admin_routes(Arc::clone(&document_service)))
        .merge(settings_routes::admin_routes(Arc::clone(&settings_service)))
        .merge(navigation_routes::admin_routes(Arc::clone(&structure_loader)));

    // Protected routes (require a session token)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes())
        .nest("/api/admin", admin_routes)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .route_layer(axum::middleware::from_fn_with_state(
            middleware::AuthState::new(Arc::clone(&token_service), Arc::clone(&user_service)),
            middleware::auth_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(auth_service))
        .merge(navigation_routes::public_routes(
            structure_loader,
            landing_service,
        ))
        .merge(documents_routes::public_routes(document_service))
        .merge(search_routes::public_routes(search_service))
        .merge(settings_routes::public_routes(settings_service));

    let app = Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
