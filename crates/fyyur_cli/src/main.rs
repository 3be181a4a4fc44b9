use clap::Parser;
use fyyur_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (log_env, env_filter) = fyyur_cli::log_filter(|k| std::env::var(k).ok());
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::debug!("fyyur: log filter: {}", log_env);

    let cli = Cli::parse();
    for line in fyyur_cli::run(cli).await? {
        println!("{line}");
    }
    Ok(())
}
