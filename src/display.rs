use serde_json::Value;

use crate::client::Product;
use crate::console::Console;

/// Presentation-ready view of an API response, decoupled from the raw
/// JSON shape. Lives only for the duration of rendering.
#[derive(Debug)]
pub enum DisplayResult {
    ProductList(Vec<Product>),
    ProductDetail { id: String, product: Option<Product> },
    CreationAck {
        id: Option<u64>,
        title: String,
        price: String,
        category: String,
    },
    DeletionAck { id: String, payload: Value },
}

const RULE_WIDTH: usize = 50;
const ITEM_RULE_WIDTH: usize = 40;

/// Pure formatting: fixed, deterministic layout per variant, no
/// business logic.
pub fn render(console: &dyn Console, result: &DisplayResult) {
    match result {
        DisplayResult::ProductList(products) => render_list(console, products),
        DisplayResult::ProductDetail { id, product } => render_detail(console, id, product.as_ref()),
        DisplayResult::CreationAck {
            id,
            title,
            price,
            category,
        } => render_creation(console, *id, title, price, category),
        DisplayResult::DeletionAck { id, payload } => render_deletion(console, id, payload),
    }
}

fn header(console: &dyn Console, title: &str) {
    console.info("");
    console.info(title);
    console.info(&"=".repeat(RULE_WIDTH));
}

fn render_list(console: &dyn Console, products: &[Product]) {
    header(console, "PRODUCT CATALOG");

    for product in products {
        console.info("");
        console.info(&format!("ID: {}", product.id));
        console.info(&format!("Title: {}", product.title));
        console.info(&format!("Price: ${}", product.price));
        console.info(&format!("Category: {}", product.category));
        console.info(&format!(
            "Rating: {} ({} reviews)",
            product.rating.rate, product.rating.count
        ));
        console.info(&"-".repeat(ITEM_RULE_WIDTH));
    }

    console.info("");
    console.info(&format!("Total products found: {}", products.len()));
}

fn render_detail(console: &dyn Console, id: &str, product: Option<&Product>) {
    header(console, "PRODUCT DETAILS");

    let Some(product) = product else {
        console.info(&format!("Product {} not found", id));
        return;
    };

    console.info(&format!("ID: {}", product.id));
    console.info(&format!("Title: {}", product.title));
    console.info(&format!("Price: ${}", product.price));
    console.info(&format!("Category: {}", product.category));
    console.info(&format!("Description: {}", product.description));
    console.info(&format!("Image: {}", product.image));
    console.info(&format!(
        "Rating: {} ({} reviews)",
        product.rating.rate, product.rating.count
    ));
    console.info("");
    console.info("✓ Product found");
}

fn render_creation(
    console: &dyn Console,
    id: Option<u64>,
    title: &str,
    price: &str,
    category: &str,
) {
    header(console, "PRODUCT CREATED");

    if let Some(id) = id {
        console.info(&format!("ID: {}", id));
    }
    console.info(&format!("Title: {}", title));
    console.info(&format!("Price: ${}", price));
    console.info(&format!("Category: {}", category));
    console.info("");
    console.info("✓ The product has been added to the catalog");
}

fn render_deletion(console: &dyn Console, id: &str, payload: &Value) {
    header(console, "PRODUCT DELETED");

    console.info(&format!("Deleted ID: {}", id));
    console.info(&format!("Server response: {}", payload));
    console.info("");
    console.info("✓ The product has been removed from the catalog");
}
