use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::transport::{ApiError, Transport};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// Catalog entry as the remote service reports it. Every field is
/// defaulted so a malformed list element degrades to placeholders
/// instead of sinking the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

/// Request body for a new catalog entry. Built transiently per
/// invocation and discarded once the request completes.
#[derive(Debug, Serialize)]
pub struct ProductCreate {
    pub title: String,
    pub price: Value,
    pub description: String,
    pub category: String,
}

impl ProductCreate {
    /// The price token is forwarded as a JSON number when it parses as
    /// a finite decimal and verbatim as a string otherwise; the remote
    /// service is the source of truth for rejecting bad input.
    pub fn new(title: &str, price: &str, category: &str) -> Self {
        let price_value = match price.parse::<f64>() {
            Ok(p) if p.is_finite() => serde_json::Number::from_f64(p)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(price.to_string())),
            _ => Value::String(price.to_string()),
        };

        Self {
            title: title.to_string(),
            price: price_value,
            description: format!("Producto {title} de la categoría {category}"),
            category: category.to_string(),
        }
    }
}

pub struct ProductClient<'a> {
    transport: Transport<'a>,
}

impl<'a> ProductClient<'a> {
    pub fn new(transport: Transport<'a>) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let payload = self.transport.request("GET", "/products", None, &[]).await?;
        let elements = payload.as_array().cloned().unwrap_or_default();
        Ok(elements.into_iter().map(lenient_product).collect())
    }

    /// `None` means the remote answered with an empty or null body,
    /// which is how the fake backend reports an unknown id.
    pub async fn get(&self, id: &str) -> Result<Option<Product>, ApiError> {
        let payload = self
            .transport
            .request("GET", &format!("/products/{id}"), None, &[])
            .await?;
        if payload.is_null() {
            return Ok(None);
        }
        Ok(Some(lenient_product(payload)))
    }

    /// Returns the raw echo payload; the backend may not persist or
    /// echo every field, so callers fall back to their own values.
    pub async fn create(&self, request: &ProductCreate) -> Result<Value, ApiError> {
        let body = serde_json::to_value(request)?;
        self.transport
            .request("POST", "/products", Some(&body), &[])
            .await
    }

    /// Returns the server payload verbatim; its shape is not
    /// validated.
    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.transport
            .request("DELETE", &format!("/products/{id}"), None, &[])
            .await
    }
}

fn lenient_product(value: Value) -> Product {
    serde_json::from_value(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::client::transport::testing::ScriptedSend;
    use crate::client::transport::BASE_URL;
    use crate::console::Recording;

    fn client<'a>(send: &'a ScriptedSend, console: &'a Recording) -> ProductClient<'a> {
        ProductClient::new(Transport::new(send, console, BASE_URL))
    }

    #[test]
    fn create_body_templates_the_description() {
        let request = ProductCreate::new("Remera Rex", "300", "remeras");
        assert_eq!(
            request.description,
            "Producto Remera Rex de la categoría remeras"
        );
    }

    #[test]
    fn numeric_price_is_sent_as_a_json_number() {
        let request = ProductCreate::new("Remera", "29.99", "remeras");
        assert_eq!(request.price, json!(29.99));
    }

    #[test]
    fn non_numeric_price_is_passed_through_verbatim() {
        let request = ProductCreate::new("Remera", "gratis", "remeras");
        assert_eq!(request.price, json!("gratis"));
    }

    #[tokio::test]
    async fn list_decodes_products() {
        let send = ScriptedSend::replying(
            200,
            "OK",
            r#"[{"id":1,"title":"Remera","price":29.99,"description":"d","category":"remeras","image":"http://img","rating":{"rate":3.9,"count":120}}]"#,
        );
        let console = Recording::default();

        let products = client(&send, &console).list().await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].title, "Remera");
        assert_eq!(products[0].rating.count, 120);
        assert_eq!(send.requests()[0].url, format!("{BASE_URL}/products"));
    }

    #[tokio::test]
    async fn malformed_list_element_degrades_to_placeholders() {
        let send = ScriptedSend::replying(
            200,
            "OK",
            r#"[{"id":1,"title":"Remera"},{"title":42}]"#,
        );
        let console = Recording::default();

        let products = client(&send, &console).list().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Remera");
        assert_eq!(products[0].price, 0.0);
        // Wrong-typed element falls back to a fully defaulted product.
        assert_eq!(products[1], Product::default());
    }

    #[tokio::test]
    async fn get_maps_null_body_to_none() {
        let send = ScriptedSend::replying(200, "OK", "null");
        let console = Recording::default();

        let product = client(&send, &console).get("999").await.unwrap();

        assert_eq!(product, None);
        assert_eq!(send.requests()[0].url, format!("{BASE_URL}/products/999"));
    }

    #[tokio::test]
    async fn get_returns_the_product_when_present() {
        let send = ScriptedSend::replying(200, "OK", r#"{"id":42,"title":"Remera"}"#);
        let console = Recording::default();

        let product = client(&send, &console).get("42").await.unwrap().unwrap();

        assert_eq!(product.id, 42);
        assert_eq!(product.title, "Remera");
    }

    #[tokio::test]
    async fn create_posts_the_encoded_body() {
        let send = ScriptedSend::replying(200, "OK", r#"{"id":21}"#);
        let console = Recording::default();
        let request = ProductCreate::new("Remera Rex", "300", "remeras");

        let echo = client(&send, &console).create(&request).await.unwrap();

        assert_eq!(echo, json!({"id": 21}));
        let sent = send.requests();
        assert_eq!(sent[0].method, "POST");
        let body: serde_json::Value =
            serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "title": "Remera Rex",
                "price": 300.0,
                "description": "Producto Remera Rex de la categoría remeras",
                "category": "remeras",
            })
        );
    }

    #[tokio::test]
    async fn delete_returns_the_raw_payload() {
        let send = ScriptedSend::replying(200, "OK", r#"{"id":7,"title":"gone"}"#);
        let console = Recording::default();

        let payload = client(&send, &console).delete("7").await.unwrap();

        assert_eq!(payload, json!({"id": 7, "title": "gone"}));
        assert_eq!(send.requests()[0].method, "DELETE");
        assert_eq!(send.requests()[0].url, format!("{BASE_URL}/products/7"));
    }
}
