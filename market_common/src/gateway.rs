//! API gateway: one blocking HTTP GET per logical operation.
//!
//! Every request goes to the configured endpoint with the query
//! `function=<selector>&apikey=<key>&<extra parameters>`. The body is parsed
//! as JSON and checked for the throttling notice Alpha Vantage returns with a
//! `200 OK` status (`{"Information": "... rate limit ..."}`).
//!
//! `Gateway::try_request` keeps the failure class visible to callers, while
//! `Gateway::request` logs it and degrades every failure to `None`.
use std::time::Duration;

use log::{debug, error, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::MarketError;
use crate::function::Function;
use crate::result::Result;

/// Field carrying informational notices, including rate-limit messages.
pub const INFORMATION_FIELD: &str = "Information";

/// Raw HTTP response as seen by the gateway.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Seam between the gateway and the network, so the gateway can be driven
/// without a live endpoint.
pub trait Transport {
    /// Issues a GET to `url` with the given query pairs.
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse>;
}

/// `reqwest` blocking client with an explicit timeout.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds the underlying client; `timeout` bounds each whole request.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("market_client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse> {
        let response = self.client.get(url).query(query).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

/// Returns the throttling notice if `body` is a rate-limit response.
pub fn rate_limit_message(body: &Value) -> Option<&str> {
    body.get(INFORMATION_FIELD)
        .and_then(Value::as_str)
        .filter(|info| info.to_lowercase().contains("rate limit"))
}

/// Issues Alpha Vantage requests with an injected configuration.
pub struct Gateway<T: Transport = HttpTransport> {
    config: ApiConfig,
    transport: T,
}

impl Gateway<HttpTransport> {
    /// Creates a gateway backed by the real HTTP transport.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Gateway { config, transport })
    }
}

impl<T: Transport> Gateway<T> {
    /// Creates a gateway over a caller-supplied transport.
    pub fn with_transport(config: ApiConfig, transport: T) -> Self {
        Gateway { config, transport }
    }

    /// Configuration this gateway was built with.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Transport this gateway sends through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Performs one request and reports the precise failure, if any.
    pub fn try_request(&self, function: Function, params: &[(&str, &str)]) -> Result<Value> {
        debug!("GET {} function={} params={:?}", self.config.base_url, function, params);

        let mut query = vec![
            (String::from("function"), function.to_string()),
            (String::from("apikey"), self.config.api_key.clone()),
        ];
        query.extend(params.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        let response = self.transport.get(&self.config.base_url, &query)?;
        if !(200..300).contains(&response.status) {
            return Err(MarketError::HttpStatus {
                status: response.status,
            });
        }

        let body: Value = serde_json::from_str(&response.body)?;
        if let Some(info) = rate_limit_message(&body) {
            return Err(MarketError::RateLimited(info.to_string()));
        }
        Ok(body)
    }

    /// Performs one request; any failure is logged and surfaces as `None`.
    pub fn request(&self, function: Function, params: &[(&str, &str)]) -> Option<Value> {
        match self.try_request(function, params) {
            Ok(body) => Some(body),
            Err(MarketError::RateLimited(info)) => {
                warn!("Alpha Vantage API Rate Limit Exceeded: {}", info);
                None
            }
            Err(e) => {
                error!("Error making API request: {}", e);
                None
            }
        }
    }

    /// Performs one request and decodes the body into a typed model.
    ///
    /// A body that does not fit `M` is logged and treated like any other failure.
    pub fn request_as<M: DeserializeOwned>(
        &self,
        function: Function,
        params: &[(&str, &str)],
    ) -> Option<M> {
        let body = self.request(function, params)?;
        match serde_json::from_value(body) {
            Ok(model) => Some(model),
            Err(e) => {
                error!("Unexpected {} response shape: {}", function, e);
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    /// In-memory transport returning a canned response and recording queries.
    pub(crate) struct FakeTransport {
        pub(crate) response: Option<HttpResponse>,
        pub(crate) calls: RefCell<Vec<(String, Vec<(String, String)>)>>,
    }

    impl FakeTransport {
        pub(crate) fn ok(body: &str) -> Self {
            Self::with_status(200, body)
        }

        pub(crate) fn with_status(status: u16, body: &str) -> Self {
            FakeTransport {
                response: Some(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
                calls: RefCell::new(Vec::new()),
            }
        }

        pub(crate) fn unreachable() -> Self {
            FakeTransport {
                response: None,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse> {
            self.calls.borrow_mut().push((url.to_string(), query.to_vec()));
            self.response.clone().ok_or_else(|| {
                MarketError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))
            })
        }
    }

    pub(crate) fn gateway(transport: FakeTransport) -> Gateway<FakeTransport> {
        Gateway::with_transport(ApiConfig::new("secret"), transport)
    }

    #[test]
    fn query_carries_function_key_and_params() {
        let gw = gateway(FakeTransport::ok(r#"{"ok": true}"#));
        let body = gw.request(Function::Copper, &[("interval", "monthly")]).unwrap();
        assert_eq!(body["ok"], Value::Bool(true));

        let calls = gw.transport.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (url, query) = &calls[0];
        assert_eq!(url, "https://www.alphavantage.co/query");
        assert_eq!(
            query,
            &vec![
                ("function".to_string(), "COPPER".to_string()),
                ("apikey".to_string(), "secret".to_string()),
                ("interval".to_string(), "monthly".to_string()),
            ]
        );
    }

    #[test]
    fn rate_limit_notice_is_detected_case_insensitively() {
        let body = r#"{"Information": "Thank you for using Alpha Vantage! Our standard API RATE LIMIT is 25 requests per day."}"#;
        let gw = gateway(FakeTransport::ok(body));
        assert!(matches!(
            gw.try_request(Function::GlobalQuote, &[("symbol", "IBM")]),
            Err(MarketError::RateLimited(_))
        ));
        assert!(gw.request(Function::GlobalQuote, &[("symbol", "IBM")]).is_none());
    }

    #[test]
    fn rate_limit_is_empty_whatever_the_status() {
        let body = r#"{"Information": "API rate limit reached"}"#;
        for status in [200, 429, 500] {
            let gw = gateway(FakeTransport::with_status(status, body));
            assert!(gw.request(Function::NewsSentiment, &[]).is_none(), "status {}", status);
        }
    }

    #[test]
    fn other_information_notices_pass_through() {
        let body = r#"{"Information": "The demo API key is for demo purposes only."}"#;
        let gw = gateway(FakeTransport::ok(body));
        assert!(gw.request(Function::TopGainersLosers, &[]).is_some());
    }

    #[test]
    fn non_success_status_is_a_failure() {
        let gw = gateway(FakeTransport::with_status(503, "{}"));
        assert!(matches!(
            gw.try_request(Function::Copper, &[]),
            Err(MarketError::HttpStatus { status: 503 })
        ));
        assert!(gw.request(Function::Copper, &[]).is_none());
    }

    #[test]
    fn transport_and_json_failures_degrade_to_none() {
        let gw = gateway(FakeTransport::unreachable());
        assert!(gw.request(Function::Copper, &[]).is_none());

        let gw = gateway(FakeTransport::ok("<html>oops</html>"));
        assert!(matches!(
            gw.try_request(Function::Copper, &[]),
            Err(MarketError::Json(_))
        ));
        assert!(gw.request(Function::Copper, &[]).is_none());
    }

    #[test]
    fn shape_mismatch_degrades_to_none() {
        #[derive(serde::Deserialize)]
        #[allow(dead_code)]
        struct Needs {
            data: Vec<u32>,
        }
        let gw = gateway(FakeTransport::ok(r#"{"data": "not a list"}"#));
        assert!(gw.request_as::<Needs>(Function::Copper, &[]).is_none());
    }

    #[test]
    fn http_transport_talks_to_a_live_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            // drain headers so closing the socket does not reset the connection
            let mut header = String::new();
            while reader.read_line(&mut header).unwrap() > 2 {
                header.clear();
            }
            let body = r#"{"Global Quote": {"05. price": "123.4500"}}"#;
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            )
            .unwrap();
            request_line
        });

        let config = ApiConfig::new("secret")
            .with_overrides(Some(&format!("http://{}/query", addr)), Some(5));
        let gw = Gateway::new(config).unwrap();
        let body = gw.request(Function::GlobalQuote, &[("symbol", "IBM")]).unwrap();
        assert_eq!(body["Global Quote"]["05. price"], "123.4500");

        let request_line = server.join().unwrap();
        assert!(request_line.starts_with("GET /query?"));
        assert!(request_line.contains("function=GLOBAL_QUOTE"));
        assert!(request_line.contains("apikey=secret"));
        assert!(request_line.contains("symbol=IBM"));
    }
}
