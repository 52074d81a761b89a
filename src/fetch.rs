// 🌐 Fetcher - raw markup for the source page
//
// No retry: any network or HTTP failure is fatal for the run.

use crate::error::Result;
use std::time::Duration;
use tracing::{debug, info};

/// Anything that can hand back the document body for a URL
///
/// The HTTP implementation is the production one; tests plug in fixed markup.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher with a bounded timeout
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("largest-banks-etl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpFetcher { client })
    }

    /// Wrap an already configured client
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        HttpFetcher { client }
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        info!(url, "fetching source page");

        let response = self.client.get(url).send()?.error_for_status()?;
        let body = response.text()?;

        debug!(bytes = body.len(), "page fetched");
        Ok(body)
    }
}

/// Fixed markup, for offline runs and tests
pub struct StaticPage {
    body: String,
}

impl StaticPage {
    pub fn new(body: impl Into<String>) -> Self {
        StaticPage { body: body.into() }
    }
}

impl PageSource for StaticPage {
    fn fetch(&self, _url: &str) -> Result<String> {
        Ok(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EtlError;

    #[test]
    fn test_static_page_ignores_url() {
        let page = StaticPage::new("<table></table>");
        assert_eq!(page.fetch("https://example.invalid").unwrap(), "<table></table>");
    }

    /// Serve one canned HTTP response on a local port, return its URL
    fn serve_once(response: &'static str) -> String {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{}/banks", addr)
    }

    // Loopback only, so proxy settings from the environment must not apply
    fn local_fetcher() -> HttpFetcher {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap();
        HttpFetcher::from_client(client)
    }

    #[test]
    fn test_http_fetcher_returns_body() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 15\r\nConnection: close\r\n\r\n<table></table>",
        );
        let fetcher = local_fetcher();

        assert_eq!(fetcher.fetch(&url).unwrap(), "<table></table>");
    }

    #[test]
    fn test_http_fetcher_server_error_is_fetch_error() {
        let url = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\noops",
        );
        let fetcher = local_fetcher();

        match fetcher.fetch(&url) {
            Err(EtlError::Fetch(err)) => {
                assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
            }
            other => panic!("expected Fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_http_fetcher_reports_unreachable_host() {
        let fetcher = HttpFetcher::new(Duration::from_millis(500)).unwrap();
        // Port 9 on localhost: nothing listens there
        let result = fetcher.fetch("http://127.0.0.1:9/");
        assert!(matches!(result, Err(EtlError::Fetch(_))));
    }
}
