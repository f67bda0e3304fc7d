use std::process::exit;

use neokikoeru_bucket::config::Config;
use neokikoeru_bucket::github::GithubClient;
use neokikoeru_bucket::{logging, pipeline, Result};

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn run() -> Result<()> {
    let config = Config::from_env(env_lookup);
    let client = GithubClient::new(&config)?;
    pipeline::run(&config, &client, env_lookup)?;
    Ok(())
}

fn main() {
    logging::init_logging();

    if let Err(err) = run() {
        eprintln!("neokikoeru-bucket: {err}");
        exit(1);
    }
}
