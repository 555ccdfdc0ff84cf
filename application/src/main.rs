use std::{io, sync::OnceLock};

use application::{config, view::Dashboard, App, Args, Backend, Config};
use common::Month;
use service::{
    infra::{memory::snapshot, Memory},
    Service,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args {
        config: path,
        year,
        month,
    } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let conf = Config::new(path).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(conf.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let period = config::Dashboard {
        year: year.unwrap_or(conf.dashboard.year),
        month: month.unwrap_or(conf.dashboard.month),
    };
    let month = period.month().map_err(|e| {
        log::error!("invalid dashboard period: {e}");
    })?;

    let storage = &conf.storage;
    let memory = if storage.persist {
        log::info!(path = %storage.path.display(), "opening snapshot store");
        Memory::open(snapshot::File::new(storage.path.clone()))
            .await
            .map_err(|e| {
                log::error!("failed to open snapshot store: {e}");
            })?
    } else {
        log::info!("opening in-memory store");
        Memory::new()
    };

    let service = Service::new(conf.service.into(), memory);
    present(service, period.year, month).await
}

/// Opens the [`App`] and prints its [`Dashboard`] as JSON.
async fn present<Db>(
    service: Service<Db>,
    year: i32,
    month: Month,
) -> Result<(), ()>
where
    Service<Db>: Backend,
{
    let app = App::open(service).await.map_err(|e| {
        log::error!("failed to open the bakery: {e}");
    })?;

    let dashboard = Dashboard::new(app.state(), year, month);
    let json = serde_json::to_string_pretty(&dashboard).map_err(|e| {
        log::error!("failed to render `Dashboard`: {e}");
    })?;
    println!("{json}");

    Ok(())
}
