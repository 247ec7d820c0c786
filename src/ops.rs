use anyhow::Result;
use serde_json::Value;

use crate::cli::{self, Command};
use crate::client::{ProductClient, ProductCreate};
use crate::console::Console;
use crate::display::{self, DisplayResult};

/// Runs the resolved command. Each operation owns a local recovery
/// boundary: an API failure is logged with operation context and
/// swallowed, so the process still finishes normally. Only errors
/// raised outside these boundaries reach the caller.
pub async fn dispatch(
    console: &dyn Console,
    client: &ProductClient<'_>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Help => {
            console.info(&cli::help_text());
            Ok(())
        }
        Command::List => list(console, client).await,
        Command::Get { id } => get(console, client, &id).await,
        Command::Create {
            title,
            price,
            category,
        } => create(console, client, &title, &price, &category).await,
        Command::Delete { id } => delete(console, client, &id).await,
    }
}

async fn list(console: &dyn Console, client: &ProductClient<'_>) -> Result<()> {
    match client.list().await {
        Ok(products) => display::render(console, &DisplayResult::ProductList(products)),
        Err(err) => console.error(&format!("Failed to list products: {err}")),
    }
    Ok(())
}

async fn get(console: &dyn Console, client: &ProductClient<'_>, id: &str) -> Result<()> {
    match client.get(id).await {
        Ok(product) => display::render(
            console,
            &DisplayResult::ProductDetail {
                id: id.to_string(),
                product,
            },
        ),
        Err(err) => console.error(&format!("Failed to get product with id {id}: {err}")),
    }
    Ok(())
}

async fn create(
    console: &dyn Console,
    client: &ProductClient<'_>,
    title: &str,
    price: &str,
    category: &str,
) -> Result<()> {
    let request = ProductCreate::new(title, price, category);
    match client.create(&request).await {
        Ok(echo) => {
            // The fake backend may not echo every field back; fall
            // back to the locally supplied values.
            let ack = DisplayResult::CreationAck {
                id: echo.get("id").and_then(Value::as_u64),
                title: field_or(&echo, "title", title),
                price: field_or(&echo, "price", price),
                category: field_or(&echo, "category", category),
            };
            display::render(console, &ack);
        }
        Err(err) => console.error(&format!("Failed to create the product: {err}")),
    }
    Ok(())
}

async fn delete(console: &dyn Console, client: &ProductClient<'_>, id: &str) -> Result<()> {
    match client.delete(id).await {
        Ok(payload) => display::render(
            console,
            &DisplayResult::DeletionAck {
                id: id.to_string(),
                payload,
            },
        ),
        Err(err) => console.error(&format!("Failed to delete product with id {id}: {err}")),
    }
    Ok(())
}

fn field_or(echo: &Value, key: &str, fallback: &str) -> String {
    match echo.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback.to_string(),
    }
}
