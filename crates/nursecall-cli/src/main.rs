mod auth;
mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputFormat};
use nursecall_client::{ApiClient, ApiError};
use output::{print_error, print_warning};

#[tokio::main]
async fn main() {
    // Contained resolver failures are logged as warnings; RUST_LOG controls
    // verbosity. Logs go to stderr so table/JSON output stays pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli).await {
        report_failure(&cli.profile, &e);
        std::process::exit(1);
    }
}

/// Terminal error reporting. 401 clears the stored token (the web client's
/// redirect-to-login analog); validation errors list their field messages.
fn report_failure(profile: &str, error: &anyhow::Error) {
    if let Some(api_err) = error.downcast_ref::<ApiError>() {
        match api_err {
            ApiError::Unauthorized => {
                if let Err(remove_err) = auth::remove_credentials(profile) {
                    print_warning(&format!("could not clear stored credentials: {remove_err}"));
                }
                print_error("Session expired. Run `nursecall login` to sign in again.");
                return;
            }
            ApiError::Validation { body } => {
                for (field, message) in body.field_messages() {
                    print_error(&format!("{field}: {message}"));
                }
                print_error(&format!("{api_err}"));
                return;
            }
            _ => {}
        }
    }
    print_error(&format!("{error:#}"));
}

async fn run(cli: &Cli) -> Result<()> {
    let profile = &cli.profile;
    let format = resolve_format(cli)?;

    match &cli.command {
        Commands::Login(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            commands::auth::login(&server, args, profile).await?;
        }
        Commands::Logout => {
            commands::auth::logout(profile)?;
        }
        Commands::Whoami => {
            commands::auth::whoami(profile)?;
        }
        Commands::Config(args) => match &args.command {
            cli::ConfigCommands::Show => {
                let cfg = config::load_profile(profile)?;
                println!("{}: {}", "Profile".cyan(), profile);
                println!(
                    "{}: {}",
                    "Server".cyan(),
                    cfg.server.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "{}: {}",
                    "Format".cyan(),
                    cfg.format.as_deref().unwrap_or("table")
                );
            }
            cli::ConfigCommands::Set(set_args) => {
                let mut cfg = config::load_profile(profile)?;
                match set_args.key.as_str() {
                    "server" => cfg.server = Some(set_args.value.clone()),
                    "format" => cfg.format = Some(set_args.value.clone()),
                    other => {
                        anyhow::bail!("Unknown config key: {other}. Valid keys: server, format")
                    }
                }
                config::save_profile(profile, &cfg)?;
                output::print_success(&format!("Set {} = {}", set_args.key, set_args.value));
            }
        },
        Commands::Overview => {
            let client = make_client(cli)?;
            commands::auth::overview(&client, format).await?;
        }
        Commands::Hospitals { command } => {
            let client = make_client(cli)?;
            commands::facility::hospitals(&client, command, format).await?;
        }
        Commands::Buildings { command } => {
            let client = make_client(cli)?;
            commands::facility::buildings(&client, command, format).await?;
        }
        Commands::Floors { command } => {
            let client = make_client(cli)?;
            commands::facility::floors(&client, command, format).await?;
        }
        Commands::Wards { command } => {
            let client = make_client(cli)?;
            commands::facility::wards(&client, command, format).await?;
        }
        Commands::Beds { command } => {
            let client = make_client(cli)?;
            commands::equipment::beds(&client, command, format).await?;
        }
        Commands::Devices { command } => {
            let client = make_client(cli)?;
            commands::equipment::devices(&client, command, format).await?;
        }
        Commands::Teams { command } => {
            let client = make_client(cli)?;
            commands::staff::teams(&client, command, format).await?;
        }
        Commands::Nurses { command } => {
            let client = make_client(cli)?;
            commands::staff::nurses(&client, command, format).await?;
        }
        Commands::Assignments { command } => {
            let client = make_client(cli)?;
            commands::staff::assignments(&client, command, format).await?;
        }
        Commands::Patients { command } => {
            let client = make_client(cli)?;
            commands::care::patients(&client, command, format).await?;
        }
        Commands::Calls { command } => {
            let client = make_client(cli)?;
            commands::care::calls(&client, command, format).await?;
        }
    }

    Ok(())
}

/// --format flag, then the profile's configured format, then table.
fn resolve_format(cli: &Cli) -> Result<OutputFormat> {
    if let Some(format) = cli.format {
        return Ok(format);
    }
    let cfg = config::load_profile(&cli.profile)?;
    Ok(match cfg.format.as_deref() {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    })
}

fn make_client(cli: &Cli) -> Result<ApiClient> {
    let server = config::resolve_server(&cli.server, &cli.profile)?;
    let mut client = ApiClient::new(&server)?;
    if let Some(creds) = auth::load_credentials(&cli.profile)? {
        client = client.with_token(creds.access_token);
    }
    Ok(client)
}
