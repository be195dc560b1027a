//! vRealize Operations API CLI binary.
//!
//! Lists platform inventories as JSON lines on stdout; logs and errors go
//! to stderr.

use clap::Parser;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use vropsapi::cli::{Cli, Command, Entity};
use vropsapi::{DecodeMode, Session, VirtualMachine, VropsClient};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Hint: pass --host/--username/--password or set VROPS_HOST, \
                 VROPS_USERNAME and VROPS_PASSWORD"
            );
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let level = level.parse().unwrap_or(tracing::Level::WARN);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(cli: &Cli) -> vropsapi::Result<VropsClient> {
    let decode_mode = if cli.lenient {
        DecodeMode::Lenient
    } else {
        DecodeMode::Strict
    };

    VropsClient::builder()
        .host(cli.host.clone())
        .port(cli.port)
        .scheme(cli.scheme)
        .username(cli.username.clone())
        .password(cli.password.clone())
        .validate_certs(cli.validate_certs)
        .decode_mode(decode_mode)
        .build()
}

async fn run(client: &VropsClient, cli: Cli) -> vropsapi::Result<()> {
    match cli.command {
        Command::List { entity } => handle_list(client, entity, cli.table).await,
    }
}

async fn handle_list(client: &VropsClient, entity: Entity, table: bool) -> vropsapi::Result<()> {
    match entity {
        Entity::VirtualMachine => {
            let mut session = Session::new();
            let machines = client.virtual_machines(&mut session).await?;

            if table {
                let rows: Vec<VirtualMachineRow> =
                    machines.iter().map(VirtualMachineRow::from).collect();
                println!("{}", Table::new(rows));
            } else {
                for machine in &machines {
                    match machine.to_json_string() {
                        Ok(line) => println!("{line}"),
                        Err(e) => eprintln!("Error: {e}"),
                    }
                }
            }
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct VirtualMachineRow {
    name: String,
    id: String,
    #[tabled(rename = "object id")]
    object_id: String,
    #[tabled(rename = "vcenter")]
    vc_id: String,
    monitored: bool,
    errors: usize,
}

impl From<&VirtualMachine> for VirtualMachineRow {
    fn from(machine: &VirtualMachine) -> Self {
        Self {
            name: machine.name.clone(),
            id: machine.id.clone(),
            object_id: machine.object_id.clone(),
            vc_id: machine.vc_id.clone(),
            monitored: machine.service_monitoring_enabled,
            errors: machine.errors.len(),
        }
    }
}
