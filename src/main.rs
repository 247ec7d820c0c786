use std::env;
use std::process::ExitCode;

use anyhow::Result;

mod cli;
mod client;
mod console;
mod display;
mod ops;

use cli::UsageError;
use client::{ProductClient, ReqwestSend, Transport, BASE_URL};
use console::{Console, Term};

#[tokio::main]
async fn main() -> ExitCode {
    let console = Term;
    console.info("");
    console.info("TIENDA ONLINE CLI - product catalog manager");
    console.info(&format!("Connected to {}", BASE_URL));

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&console, &args).await {
        Ok(()) => {
            console.info("");
            console.info("Thanks for using Tienda Online CLI!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Anything that escaped the per-operation recovery
            // boundaries is fatal.
            console.error(&format!("unexpected application error: {err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(console: &dyn Console, args: &[String]) -> Result<()> {
    let command = match cli::parse(args) {
        Ok(cli::Command::Help) => {
            console.info(&cli::help_text());
            return Ok(());
        }
        Ok(command) => command,
        Err(usage) => {
            console.error(&usage.to_string());
            if usage == UsageError::MissingCreateFields {
                console.info("Example: tienda POST products \"Mi Producto\" 29.99 electronics");
            }
            console.info(&cli::help_text());
            return Ok(());
        }
    };

    echo_command(console, args);

    let sender = ReqwestSend::new()?;
    let transport = Transport::new(&sender, console, BASE_URL);
    let client = ProductClient::new(transport);
    ops::dispatch(console, &client, command).await
}

fn echo_command(console: &dyn Console, args: &[String]) {
    let rule = "=".repeat(30);
    console.info("");
    console.info("EXECUTING COMMAND");
    console.info(&rule);
    console.info(&format!(
        "Method: {}",
        args.first().map(String::as_str).unwrap_or("")
    ));
    console.info(&format!(
        "Resource: {}",
        args.get(1).map(String::as_str).unwrap_or("")
    ));
    console.info(&format!("Params: {:?}", args.get(2..).unwrap_or(&[])));
    console.info(&rule);
}
