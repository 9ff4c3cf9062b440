//! reqwest-backed Larek API client.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use web_larek_core::{Order, OrderResult, ProductList};

use super::{ApiError, LarekApi};
use crate::config::StorefrontConfig;

/// Error body shape: `{ "error": "..." }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Larek API client.
#[derive(Debug, Clone)]
pub struct LarekClient {
    client: reqwest::Client,
    products_url: String,
    order_url: String,
    cdn_url: String,
}

impl LarekClient {
    /// Create a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("web-larek/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            products_url: config.endpoint("/product/"),
            order_url: config.endpoint("/order"),
            cdn_url: config.cdn_url.as_str().to_string(),
        })
    }

    /// Fetch the catalog, resolving image paths against the CDN.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API rejects it, or the body
    /// does not decode.
    pub async fn products(&self) -> Result<ProductList, ApiError> {
        let response = self.client.get(&self.products_url).send().await?;
        let mut list: ProductList = decode(response).await?;
        list.items = list
            .items
            .into_iter()
            .map(|p| p.with_image_base(&self.cdn_url))
            .collect();
        tracing::debug!(total = list.total, items = list.items.len(), "fetched products");
        Ok(list)
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails, the API rejects the order, or the
    /// body does not decode.
    pub async fn order(&self, order: &Order) -> Result<OrderResult, ApiError> {
        let response = self.client.post(&self.order_url).json(order).send().await?;
        decode(response).await
    }
}

impl LarekApi for LarekClient {
    async fn get_products(&self) -> Result<ProductList, ApiError> {
        self.products().await
    }

    async fn submit_order(&self, order: &Order) -> Result<OrderResult, ApiError> {
        self.order(order).await
    }
}

/// Decode a success body, or turn an error status into [`ApiError::Api`]
/// carrying the server's `error` field or the status reason.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&body).map_or_else(
            |_| {
                status
                    .canonical_reason()
                    .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
            },
            |b| b.error,
        );
        return Err(ApiError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use web_larek_core::{Email, PaymentMethod, Phone, Price, ProductId};

    use super::*;

    /// Answer one request with `status` and `body`; the handle yields the raw
    /// request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (StorefrontConfig, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0_u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= head_end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n\
                 content-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });
        let config = StorefrontConfig::from_origin(&format!("http://{addr}")).unwrap();
        (config, handle)
    }

    fn order() -> Order {
        Order {
            payment: PaymentMethod::Card,
            address: "Main St 1".to_string(),
            email: Email::parse("buyer@example.com").unwrap(),
            phone: Phone::parse("+71234567890").unwrap(),
            total: Price::from_units(300),
            items: vec![ProductId::new("a"), ProductId::new("b")],
        }
    }

    #[tokio::test]
    async fn test_products_resolve_images() {
        let (config, server) = serve_once(
            "200 OK",
            r#"{"total":1,"items":[{"id":"a","title":"A","description":"d","image":"/a.svg","category":"софт-скил","price":100}]}"#,
        )
        .await;
        let client = LarekClient::new(&config).unwrap();
        let list = client.get_products().await.unwrap();

        assert_eq!(list.total, 1);
        let product = &list.items[0];
        assert_eq!(product.price, Some(Price::from_units(100)));
        assert_eq!(
            product.image,
            format!("{}/a.svg", config.cdn_url.as_str().trim_end_matches('/'))
        );

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/weblarek/product/ HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_submit_order_posts_json() {
        let (config, server) = serve_once("200 OK", r#"{"id":"o-1","total":300}"#).await;
        let client = LarekClient::new(&config).unwrap();
        let result = client.submit_order(&order()).await.unwrap();
        assert_eq!(result.total, Price::from_units(300));
        assert_eq!(result.id.unwrap().as_str(), "o-1");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/weblarek/order HTTP/1.1"));
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["payment"], "online");
        assert_eq!(json["items"], serde_json::json!(["a", "b"]));
        assert_eq!(json["total"], 300.0);
    }

    #[tokio::test]
    async fn test_error_field_is_used() {
        let (config, _server) = serve_once("400 Bad Request", r#"{"error":"Invalid phone"}"#).await;
        let client = LarekClient::new(&config).unwrap();
        let err = client.submit_order(&order()).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Api { status: 400, ref message } if message == "Invalid phone"
        ));
    }

    #[tokio::test]
    async fn test_status_reason_without_error_field() {
        let (config, _server) = serve_once("503 Service Unavailable", "oops").await;
        let client = LarekClient::new(&config).unwrap();
        let err = client.get_products().await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Api { status: 503, ref message } if message == "Service Unavailable"
        ));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let (config, _server) = serve_once("200 OK", r#"{"total":"many"}"#).await;
        let client = LarekClient::new(&config).unwrap();
        assert!(matches!(
            client.get_products().await,
            Err(ApiError::Parse(_))
        ));
    }
}
