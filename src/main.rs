use clap::Parser;
use mobile_fixtures::cli::commands::{cmd_locators, cmd_login, cmd_validate, format_validation};
use mobile_fixtures::cli::config::{Cli, Commands, build_session_options, load_config, resolve_endpoint};
use mobile_fixtures::cli::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Locators { screen, format } => {
            println!("{}", cmd_locators(screen.as_deref(), &format)?);
        }
        Commands::Validate => {
            let results = cmd_validate();
            print!("{}", format_validation(&results));
            if results.iter().any(|(_, r)| r.is_err()) {
                std::process::exit(1);
            }
        }
        Commands::Login {
            username,
            password,
            trace,
            dry_run,
        } => {
            // Resolve trace path: CLI > config
            let trace = trace.as_deref().or(config.trace.path.as_deref());
            let endpoint = resolve_endpoint(cli.appium_endpoint.as_deref(), &config);
            let options = build_session_options(&endpoint, &config);

            let outcome = cmd_login(&options, &username, &password, trace, dry_run)?;
            println!("{}", outcome);
        }
    }

    Ok(())
}
