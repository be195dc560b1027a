//! Basic example demonstrating the vRealize Operations API client.
//!
//! Run with:
//! ```
//! VROPS_HOST=vrops.example.com VROPS_USERNAME=admin VROPS_PASSWORD=secret \
//!     cargo run --example basic
//! ```

use vropsapi::{List, Session, VirtualMachine, VropsClient};

#[tokio::main]
async fn main() -> vropsapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating vRealize Operations client...");
    let client = VropsClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Acquire a token for this session
    let mut session = Session::new();
    client.ensure_authenticated(&mut session).await?;
    println!("Token expires at: {:?}", session.expires_at());

    // List first page of virtual machines
    println!("\n--- Listing Virtual Machines (first page) ---");
    let page = VirtualMachine::list_page(&client, &session, 0, 10).await?;
    println!(
        "Found {} virtual machines (reported total: {})",
        page.len(),
        page.info.total
    );

    for machine in &page {
        println!("  - {} ({})", machine.name, machine.id);
    }

    // Look at the first one in detail
    if let Some(machine) = page.items.first() {
        println!("\n--- Virtual Machine Details ---");
        println!("Name: {}", machine.name);
        println!("  ID: {}", machine.id);
        println!("  Instance UUID: {}", machine.instance_uuid);
        println!("  vCenter: {}", machine.vc_id);
        println!("  Service monitoring: {}", machine.service_monitoring_enabled);
        if !machine.errors.is_empty() {
            println!("  Errors: {:?}", machine.errors);
        }
        println!("\nAs JSON: {}", machine.to_json_string()?);
    }

    // Fetch the complete inventory, page by page
    println!("\n--- Full Inventory ---");
    let machines = client.virtual_machines(&mut session).await?;
    println!("Inventory holds {} virtual machines", machines.len());

    Ok(())
}
