use std::{future::IntoFuture, process, sync::Arc};

use quillpost::{
    application::{
        admin::posts::AdminPostService,
        error::AppError,
        posts::PostReadService,
        render::MarkdownRenderer,
        repos::{DatabaseHealth, PostsRepo, PostsWriteRepo},
    },
    config,
    infra::{
        auth::HeaderAdminGate,
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState, HttpState, RouterState},
        telemetry,
    },
};
use tokio::sync::oneshot;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    let router_state = build_router_state(repositories.clone(), &settings);

    let result = serve_http(&settings, router_state).await;

    repositories.close().await;
    info!(target = "quillpost::server", "database pool closed");
    result
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    info!(target = "quillpost::migrate", "migrations applied");
    repositories.close().await;
    Ok(())
}

/// Connect the pool and bring the schema up to date.
async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_router_state(
    repositories: Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> RouterState {
    let posts_repo: Arc<dyn PostsRepo> = repositories.clone();
    let posts_write_repo: Arc<dyn PostsWriteRepo> = repositories.clone();
    let health: Arc<dyn DatabaseHealth> = repositories;

    let renderer = Arc::new(MarkdownRenderer::new());
    let http_state = HttpState {
        posts: Arc::new(PostReadService::new(posts_repo.clone(), renderer)),
        health,
    };
    let admin_state = AdminState {
        posts: Arc::new(AdminPostService::new(posts_repo, posts_write_repo)),
        gate: Arc::new(HeaderAdminGate::from_settings(&settings.admin)),
    };

    RouterState {
        http: http_state,
        admin: admin_state,
    }
}

async fn serve_http(settings: &config::Settings, router_state: RouterState) -> Result<(), AppError> {
    let router = http::build_router(router_state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "quillpost::server",
        addr = %settings.server.addr,
        "listening"
    );

    let (draining_tx, draining_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            info!(target = "quillpost::server", "shutdown signal received");
            let _ = draining_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    let result = tokio::select! {
        result = &mut server => result,
        _ = draining_rx => {
            match tokio::time::timeout(settings.server.graceful_shutdown, &mut server).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        target = "quillpost::server",
                        timeout_secs = settings.server.graceful_shutdown.as_secs(),
                        "graceful shutdown timed out; dropping open connections"
                    );
                    Ok(())
                }
            }
        }
    };

    result.map_err(|err| AppError::unexpected(format!("server error: {err}")))
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(
                    target = "quillpost::server",
                    error = %err,
                    "failed to register signal handlers; falling back to ctrl-c"
                );
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
