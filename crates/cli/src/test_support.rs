//! Canned catalog service for handler tests.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

/// Base URL nothing listens on.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:1/api";

/// A local HTTP server answering fixed request targets with JSON bodies.
pub struct CannedCatalog {
    pub api_url: Url,
    hits: Arc<AtomicUsize>,
}

impl CannedCatalog {
    /// Serve `routes` (request target, status, body) until the test ends.
    /// Any other target gets a 404.
    pub async fn start(routes: Vec<(&'static str, u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);

                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(buf.get(..n).unwrap_or_default());
                let target = request.split_whitespace().nth(1).unwrap_or("/");

                let route = routes.iter().find(|(path, _, _)| *path == target);
                let (status, body) = route.map_or((404, "{}"), |(_, s, b)| (*s, b.as_str()));
                let response = format!(
                    "HTTP/1.1 {status} Canned\r\n\
                     content-type: application/json\r\n\
                     content-length: {}\r\n\
                     connection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            api_url: Url::parse(&format!("http://{addr}/api")).unwrap(),
            hits,
        }
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Catalog JSON for one product.
pub fn product_json(id: &str, name: &str, price: u32, stock: u32) -> Value {
    json!({
        "_id": id,
        "name": name,
        "image": format!("/{id}.jpg"),
        "price": price,
        "countInStock": stock,
    })
}

/// Catalog JSON for a single page of products.
pub fn page_json(products: &[Value]) -> String {
    json!({ "products": products, "page": 1, "pages": 1 }).to_string()
}
