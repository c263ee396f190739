use anyhow::{Context, Result};
use clap::Parser;
use gm_screen_server::{
    adapters::outbound::storage::S3Config,
    app::{bind_first_available, candidate_ports, AppBuilder, AppConfig, StorageBackend},
    create_router, DEFAULT_BUCKET_NAME,
};
use std::{path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "gm-screen-server")]
#[command(about = "Static file server with an always-available storage API", long_about = None)]
struct Cli {
    /// Port to listen on; when unset the first free port from 8888-8899 is used
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Directory with the single-page application
    #[arg(long, env = "STATIC_DIR", default_value = ".")]
    static_dir: PathBuf,

    /// Storage backend type: s3, local, memory or none
    #[arg(long, env = "STORAGE_BACKEND", default_value = "s3")]
    storage_backend: String,

    /// Bucket holding the stored values
    #[arg(long, env = "BUCKET_NAME", default_value = DEFAULT_BUCKET_NAME)]
    bucket_name: String,

    /// S3 region; falls back to AWS_REGION / AWS_DEFAULT_REGION
    #[arg(long, env = "S3_REGION")]
    s3_region: Option<String>,

    /// S3 endpoint URL, for S3 compatible services
    #[arg(long, env = "S3_ENDPOINT")]
    s3_endpoint: Option<String>,

    /// S3 access key
    #[arg(long, env = "S3_ACCESS_KEY")]
    s3_access_key: Option<String>,

    /// S3 secret key
    #[arg(long, env = "S3_SECRET_KEY")]
    s3_secret_key: Option<String>,

    /// Allow plain HTTP connections to the S3 endpoint
    #[arg(long, env = "S3_ALLOW_HTTP", default_value = "false")]
    s3_allow_http: bool,

    /// Root directory for the local backend
    #[arg(long, env = "STORAGE_ROOT", default_value = "./data")]
    storage_root: PathBuf,

    /// Timeout in seconds for each remote storage call
    #[arg(long, env = "STORAGE_TIMEOUT_SECS", default_value = "10")]
    storage_timeout_secs: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let storage_backend = match self.storage_backend.as_str() {
            "none" | "offline" => StorageBackend::Disabled,
            "memory" => StorageBackend::InMemory,
            "local" => StorageBackend::Local {
                root: self.storage_root.clone(),
            },
            "s3" => StorageBackend::S3(S3Config {
                region: self.s3_region.clone(),
                access_key: self.s3_access_key.clone(),
                secret_key: self.s3_secret_key.clone(),
                endpoint: self.s3_endpoint.clone(),
                allow_http: self.s3_allow_http,
            }),
            _ => anyhow::bail!("Unknown storage backend: {}", self.storage_backend),
        };

        Ok(AppConfig {
            storage_backend,
            bucket_name: self.bucket_name.clone(),
            operation_timeout: Duration::from_secs(self.storage_timeout_secs),
        })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    cli.init_logging()?;

    info!("Starting GM Screen Server");
    info!("Storage backend: {}", cli.storage_backend);

    let config = cli.to_app_config()?;

    // Never fails on backend problems, the API just runs offline
    let state = AppBuilder::new().with_config(config).build().await;

    let router = create_router(state, &cli.static_dir);

    let ports = candidate_ports(cli.port);
    let listener = bind_first_available(&cli.host, &ports)
        .await
        .context("Failed to bind a listening port")?;
    let addr = listener.local_addr()?;

    info!("Server listening on http://{}", addr);
    info!("Serving static files from {}", cli.static_dir.display());

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
