use clap::Parser;
use colored::*;
use std::process;
use tracing_subscriber::EnvFilter;

use payload_manager::cli::{Args, Endpoint};
use payload_manager::config::{global_config_dir, Config, FileConfig};
use payload_manager::input::build_request;
use payload_manager::ui::{display_error, display_notice, display_payload, display_templates};
use payload_manager::{Manager, PayloadError, Result};

fn main() {
    let args = Args::parse();

    let result = if args.config_init {
        init_config()
    } else {
        Config::from_env_and_args(&args).and_then(|config| {
            init_tracing(config.log_level());
            run(&args, &config)
        })
    };

    if let Err(e) = result {
        display_error(&e);
        process::exit(1);
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn init_config() -> Result<()> {
    let path = global_config_dir()
        .map(|dir| dir.join("config.yaml"))
        .ok_or_else(|| PayloadError::Other("Could not determine home directory".to_string()))?;
    FileConfig::write_example(&path)?;
    println!(
        "{}",
        format!("Example config written to {}", path.display()).green()
    );
    Ok(())
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let manager = Manager::from_config(config);

    if args.list_templates {
        display_templates(&manager.templates().list());
        return Ok(());
    }

    let request = build_request(args, config)?;
    let template = config.template_name();

    tracing::debug!(
        endpoint = ?config.endpoint,
        template,
        model = request.model().unwrap_or("-"),
        "rendering payload"
    );

    let payload = match config.endpoint {
        Endpoint::ChatCompletions => manager.render_chat_completions(&request, template)?,
        Endpoint::Responses => manager.render_responses(&request, template)?,
        Endpoint::Legacy => {
            let rendered = manager.render_chat_with_tools(&request, template)?;
            display_notice(&rendered.notice);
            rendered.payload
        }
    };

    display_payload(&payload, config.highlight)?;
    Ok(())
}
