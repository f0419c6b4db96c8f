use clap::Parser;
use screen_automation::cli::commands::{cmd_check, cmd_run};
use screen_automation::cli::config::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            flow,
            driver,
            bridge,
            bridge_arg,
            endpoint,
            await_timeout_secs,
            scroll_timeout_secs,
        } => {
            let passed = cmd_run(
                &flow,
                &driver,
                bridge.as_deref(),
                &bridge_arg,
                endpoint.as_deref(),
                await_timeout_secs,
                scroll_timeout_secs,
                cli.trace.as_deref(),
            )?;
            if !passed {
                std::process::exit(1);
            }
        }
        Commands::Check { flow } => {
            cmd_check(&flow)?;
        }
    }

    Ok(())
}
