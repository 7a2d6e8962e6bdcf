use clap::Parser;
use lodge_server::ServerConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lodge-server")]
#[command(about = "PIN-gated code lists and Degree 2 chat over JSON files")]
struct Cli {
    /// Port to listen on (all interfaces)
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Directory holding the collection JSON files
    #[arg(long, env = "LODGE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Static front-end directory
    #[arg(long, env = "LODGE_PUBLIC_DIR", default_value = "public")]
    public_dir: PathBuf,

    /// PIN unlocking the free tier
    #[arg(long, env = "LODGE_FREE_PIN", default_value = lodge_server::auth::DEFAULT_FREE_PIN, hide_env_values = true)]
    free_pin: String,

    /// PIN unlocking the premium (Degree 2) tier
    #[arg(long, env = "LODGE_PREMIUM_PIN", default_value = lodge_server::auth::DEFAULT_PREMIUM_PIN, hide_env_values = true)]
    premium_pin: String,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            port: cli.port,
            data_dir: cli.data_dir,
            public_dir: cli.public_dir,
            free_pin: cli.free_pin,
            premium_pin: cli.premium_pin,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lodge_server::run(Cli::parse().into()).await
}
