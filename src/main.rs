use clap::Parser;
use tracing::error;

use ginywow::cli::{Cli, Commands};
use ginywow::config::{get_config, init_config_from};
use ginywow::runtime::modes::{run_cli, run_server};
use ginywow::system::logging::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    init_config_from(&cli.config);

    match cli.command {
        None | Some(Commands::Serve) => {
            let config = get_config();
            // guard 需要存活到进程结束，保证日志刷盘
            let _guard = init_logging(&config.logging)?;

            if let Err(e) = run_server().await {
                error!("Server exited with error: {:#}", e);
                return Err(e);
            }
            Ok(())
        }
        Some(cmd) => {
            if let Err(e) = run_cli(cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
