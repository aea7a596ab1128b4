use {
    std::{net::SocketAddr, path::PathBuf, process::exit, sync::Arc},
    tracing::{Level, info, error},
    tracing_subscriber::FmtSubscriber,
    clap::Parser,
    tokio::net::TcpListener,
    tally_server::{ServerConfig, CounterService, SqlDatabase, counter_router},
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    FmtSubscriber::builder().with_max_level(Level::INFO).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("loading config from {path:?}");
            match ServerConfig::load(path.clone()) {
                Ok(v) => v,
                Err(err) => {
                    error!("failed to load config: {err:?}");
                    exit(-1);
                },
            }
        },
        None => ServerConfig::default(),
    };

    let database = match open_database(&config) {
        Ok(v) => v,
        Err(err) => {
            error!("failed to open database: {err:?}");
            exit(-1);
        },
    };

    let service = match CounterService::new(database) {
        Ok(v) => Arc::new(v),
        Err(err) => {
            error!("failed to init counter service: {err:?}");
            exit(-1);
        },
    };

    let addr: SocketAddr = ([0, 0, 0, 0], args.port.unwrap_or(config.port())).into();
    let listener = match TcpListener::bind(addr).await {
        Ok(v) => v,
        Err(err) => {
            error!("failed to bind {addr:?}: {err:?}");
            exit(-1);
        },
    };

    info!("tally server running on {addr:?}");
    if let Err(err) = axum::serve(listener, counter_router(service)).await {
        error!("server error: {err:?}");
        exit(-1);
    }
}

fn open_database(config: &ServerConfig) -> Result<SqlDatabase, tally_server::sql::SqlError> {
    match config.database_path() {
        Some(path) => SqlDatabase::new(path),
        None => SqlDatabase::in_memory(),
    }
}
