use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(name = "gm-screen-cli")]
#[command(about = "CLI for exercising the GM Screen storage API", long_about = None)]
struct Cli {
    /// Server URL
    #[arg(short, long, env = "GM_SCREEN_URL", default_value = "http://localhost:8888")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check whether the server can reach its storage backend
    Ping,

    /// Show server diagnostics
    Debug,

    /// Load a stored value
    Load {
        /// Storage key
        key: String,
    },

    /// Save a value
    Save {
        /// Storage key
        key: String,
        /// Value as JSON; anything that is not valid JSON is saved as a string
        value: String,
    },

    /// Delete a stored value
    Delete {
        /// Storage key
        key: String,
    },

    /// Run a ping, save, load, delete, load round trip
    Smoke {
        /// Key used for the test value
        #[arg(long, default_value = "cli-smoke-test")]
        key: String,
    },
}

/// Parse a command line value as JSON, falling back to a JSON string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Which tier handled a storage response
fn tier(response: &Value) -> &'static str {
    let local = response
        .get("useLocalStorage")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let offline = response.get("status").and_then(Value::as_str) == Some("offline");

    if local || offline {
        "local storage"
    } else {
        "cloud storage"
    }
}

struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .with_context(|| format!("Server returned a non-JSON body (status {status})"))?;

        if !status.is_success() {
            anyhow::bail!("Server returned {}: {}", status, body);
        }
        Ok(body)
    }

    async fn ping(&self) -> Result<Value> {
        let response = self
            .http
            .get(self.endpoint("/api/storage/ping"))
            .send()
            .await
            .context("Failed to reach server")?;
        Self::read(response).await
    }

    async fn debug(&self) -> Result<Value> {
        let response = self
            .http
            .get(self.endpoint("/api/debug"))
            .send()
            .await
            .context("Failed to reach server")?;
        Self::read(response).await
    }

    async fn load(&self, key: &str) -> Result<Value> {
        let response = self
            .http
            .get(self.endpoint("/api/storage/load"))
            .query(&[("key", key)])
            .send()
            .await
            .context("Failed to reach server")?;
        Self::read(response).await
    }

    async fn save(&self, key: &str, data: Value) -> Result<Value> {
        let response = self
            .http
            .post(self.endpoint("/api/storage/save"))
            .json(&json!({ "key": key, "data": data }))
            .send()
            .await
            .context("Failed to reach server")?;
        Self::read(response).await
    }

    async fn delete(&self, key: &str) -> Result<Value> {
        let response = self
            .http
            .delete(self.endpoint("/api/storage/delete"))
            .json(&json!({ "key": key }))
            .send()
            .await
            .context("Failed to reach server")?;
        Self::read(response).await
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn smoke(client: &ApiClient, key: &str) -> Result<()> {
    let ping = client.ping().await?;
    println!("ping: {} ({})", ping["status"], tier(&ping));

    let payload = json!({
        "message": "This is test data",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    let saved = client.save(key, payload.clone()).await?;
    println!("save: handled by {}", tier(&saved));

    let loaded = client.load(key).await?;
    let matches = loaded["data"] == payload;
    println!(
        "load: handled by {}, data {}",
        tier(&loaded),
        if matches { "matches" } else { "differs" }
    );

    let deleted = client.delete(key).await?;
    println!("delete: handled by {}", tier(&deleted));

    let reloaded = client.load(key).await?;
    println!(
        "load after delete: data is {}",
        if reloaded["data"].is_null() { "null" } else { "still present" }
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url);

    match cli.command {
        Commands::Ping => print_json(&client.ping().await?),
        Commands::Debug => print_json(&client.debug().await?),
        Commands::Load { key } => print_json(&client.load(&key).await?),
        Commands::Save { key, value } => print_json(&client.save(&key, parse_value(&value)).await?),
        Commands::Delete { key } => print_json(&client.delete(&key).await?),
        Commands::Smoke { key } => smoke(&client, &key).await,
    }
}
