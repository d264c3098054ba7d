//! example-poller - Example telematics polling shell
//!
//! Logs into a MyRenault / MyDacia account, discovers its vehicles, selects
//! one, and polls battery, HVAC, location, and cockpit data on an interval.
//! Shows the intended division of labor: the client handles authentication,
//! capability gating, and failure classification; the shell only schedules
//! and renders.
//!
//! Usage:
//!   example-poller --locale sv-SE --username driver@example.com --password secret
//!   example-poller -l de-DE -u driver@example.com -w secret --vin VF1AG000164767503 -i 7

use std::time::Duration;

use renault_client::{Credentials, OperationResult, RenaultClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Args {
    locale: String,
    username: String,
    password: String,
    vin: Option<String>,
    interval_mins: u64,
}

fn parse_args() -> anyhow::Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut locale = String::from("sv-SE");
    let mut username: Option<String> = None;
    let mut password: Option<String> = None;
    let mut vin: Option<String> = None;
    let mut interval_mins = 7u64;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--locale" | "-l" => {
                if i + 1 < args.len() {
                    locale = args[i + 1].clone();
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --locale");
                }
            }
            "--username" | "-u" => {
                if i + 1 < args.len() {
                    username = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --username");
                }
            }
            "--password" | "-w" => {
                if i + 1 < args.len() {
                    password = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --password");
                }
            }
            "--vin" => {
                if i + 1 < args.len() {
                    vin = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --vin");
                }
            }
            "--interval-mins" | "-i" => {
                if i + 1 < args.len() {
                    interval_mins = args[i + 1].parse()?;
                    i += 2;
                } else {
                    anyhow::bail!("Missing argument for --interval-mins");
                }
            }
            "--help" | "-h" => {
                eprintln!(
                    r#"example-poller - Example telematics polling shell

Usage: example-poller [OPTIONS]

Options:
  -l, --locale <LOCALE>          Account locale, e.g. sv-SE, de-DE (default: sv-SE)
  -u, --username <EMAIL>         MyRenault / MyDacia account email (or RENAULT_USERNAME)
  -w, --password <PASSWORD>      Account password (or RENAULT_PASSWORD)
      --vin <VIN>                Vehicle to poll (default: first vehicle on the account)
  -i, --interval-mins <MINUTES>  Polling interval in minutes (default: 7)
  -h, --help                     Print this help message
"#
                );
                std::process::exit(0);
            }
            _ => {
                tracing::warn!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    let username = username
        .or_else(|| std::env::var("RENAULT_USERNAME").ok())
        .ok_or_else(|| anyhow::anyhow!("--username or RENAULT_USERNAME is required"))?;
    let password = password
        .or_else(|| std::env::var("RENAULT_PASSWORD").ok())
        .ok_or_else(|| anyhow::anyhow!("--password or RENAULT_PASSWORD is required"))?;

    Ok(Args {
        locale,
        username,
        password,
        vin,
        interval_mins,
    })
}

/// Log one polled value; not-supported outcomes are expected per model and
/// stay at debug level, transient failures warn and the loop keeps going
fn report<T: std::fmt::Debug>(what: &str, result: &OperationResult<T>) {
    match result {
        OperationResult::Ok(data) => tracing::info!("{what}: {data:?}"),
        OperationResult::NotSupported(reason) => tracing::debug!("{what}: {reason}"),
        OperationResult::Error(reason) => tracing::warn!("{what} failed: {reason}"),
    }
}

async fn poll_once(client: &RenaultClient) -> anyhow::Result<()> {
    let (battery, hvac, location, cockpit) = tokio::join!(
        client.battery_status(),
        client.hvac_status(),
        client.location(),
        client.cockpit(),
    );

    report("battery", &battery?);
    report("hvac", &hvac?);
    report("location", &location?);
    report("cockpit", &cockpit?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "example_poller=info,renault_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;

    let mut client = RenaultClient::new(
        Credentials::new(&args.username, &args.password),
        &args.locale,
    )?;

    let account = client.resolve_account().await?;
    tracing::info!(
        account_id = %account.account_id,
        country = account.country.as_deref().unwrap_or("unknown"),
        "account resolved"
    );

    let vehicles = client.list_vehicles().await?;
    if vehicles.is_empty() {
        anyhow::bail!("no vehicles on this account");
    }
    for vehicle in &vehicles {
        tracing::info!(
            vin = %vehicle.vin,
            model = %vehicle.model,
            model_code = %vehicle.model_code,
            "found vehicle"
        );
    }

    let vehicle = match args.vin {
        Some(ref vin) => vehicles
            .iter()
            .find(|v| &v.vin == vin)
            .ok_or_else(|| anyhow::anyhow!("VIN {} not found on this account", vin))?,
        None => &vehicles[0],
    };
    client.set_vehicle(&vehicle.vin, &vehicle.model_code);
    tracing::info!(vin = %vehicle.vin, model = %vehicle.model, "polling vehicle");

    let mut interval = tokio::time::interval(Duration::from_secs(args.interval_mins * 60));
    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = poll_once(&client).await {
                    // Fatal errors (auth, preconditions) end the loop
                    return Err(e);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
