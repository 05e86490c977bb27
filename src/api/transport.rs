use crate::config::Config;
use crate::error::PsnError;
use crate::sanitize;
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

/// Options sent with a request: query parameters for GET/DELETE, JSON body
/// for PUT/POST.
pub type Params = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }

    fn has_body(&self) -> bool {
        matches!(self, Method::Put | Method::Post)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated request primitive the endpoint methods delegate to.
///
/// Implementors resolve the `{{region}}`, `{{psn}}` and `{{lang}}` macros
/// left in URL templates and option values, attach credentials and perform
/// the call. The sanitizers have defaults and may be overridden.
pub trait Transport {
    fn request(&self, method: Method, url: &str, params: Params) -> Result<Value, PsnError>;

    fn get(&self, url: &str, params: Params) -> Result<Value, PsnError> {
        self.request(Method::Get, url, params)
    }

    fn put(&self, url: &str, params: Params) -> Result<Value, PsnError> {
        self.request(Method::Put, url, params)
    }

    fn post(&self, url: &str, params: Params) -> Result<Value, PsnError> {
        self.request(Method::Post, url, params)
    }

    fn delete(&self, url: &str, params: Params) -> Result<Value, PsnError> {
        self.request(Method::Delete, url, params)
    }

    /// Binds `{{id}}` to the sanitized username.
    fn replace_psn_username(&self, url: &str, username: &str) -> String {
        url.replace("{{id}}", &self.clean_psn(username))
    }

    fn clean_psn(&self, username: &str) -> String {
        sanitize::clean_psn(username)
    }

    fn clean_psn_list(&self, value: &str) -> String {
        sanitize::clean_psn_list(value)
    }

    fn clean_np_comm_id(&self, value: &str) -> String {
        sanitize::clean_np_comm_id(value)
    }
}

/// Blocking HTTP transport authenticated with a bearer token.
pub struct HttpTransport {
    config: Config,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(config: Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(concat!("psn_feed/", env!("CARGO_PKG_VERSION")))
            .build();
        HttpTransport { config, agent }
    }

    fn execute_request(&self, method: Method, url: &str, params: Params) -> Result<Value, PsnError> {
        let url = resolve_macros(url, &self.config);
        let params = resolve_params(params, &self.config);

        debug!(%method, %url, "dispatching PSN request");

        let mut request = self
            .agent
            .request(method.as_str(), &url)
            .set("Authorization", &format!("Bearer {}", self.config.access_token))
            .set("Accept", "application/json");

        let response = if method.has_body() {
            request.send_json(Value::Object(params))
        } else {
            for (key, value) in query_pairs(&params) {
                request = request.query(&key, &value);
            }
            request.call()
        };

        match response {
            Ok(resp) => {
                let status = resp.status();
                let body = resp
                    .into_string()
                    .map_err(|e| PsnError::HttpError(e.to_string()))?;
                debug!(status, bytes = body.len(), "PSN response received");
                parse_body(&body)
            }
            Err(ureq::Error::Status(status, resp)) => {
                let body = resp.into_string().unwrap_or_default();
                debug!(status, "PSN request rejected");
                Err(PsnError::ApiError { status, body })
            }
            Err(e) => Err(PsnError::HttpError(e.to_string())),
        }
    }
}

impl Transport for HttpTransport {
    fn request(&self, method: Method, url: &str, params: Params) -> Result<Value, PsnError> {
        self.execute_request(method, url, params)
    }
}

pub fn resolve_macros(template: &str, config: &Config) -> String {
    template
        .replace("{{region}}", &config.region)
        .replace("{{psn}}", &config.online_id)
        .replace("{{lang}}", &config.language)
}

fn resolve_params(params: Params, config: &Config) -> Params {
    params
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key, Value::String(resolve_macros(&s, config))),
            other => (key, other),
        })
        .collect()
}

/// Flattens options into query pairs. Arrays are comma-joined; empty arrays
/// and nulls are omitted.
pub fn query_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let encoded = match value {
                Value::Null => return None,
                Value::Array(items) if items.is_empty() => return None,
                Value::Array(items) => items
                    .iter()
                    .map(scalar_to_string)
                    .collect::<Vec<_>>()
                    .join(","),
                other => scalar_to_string(other),
            };
            Some((key.clone(), encoded))
        })
        .collect()
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_body(body: &str) -> Result<Value, PsnError> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => Params::new(),
        }
    }

    #[test]
    fn macros_resolved_from_config() {
        let mut config = Config::new("t");
        config.region = "eu".to_string();
        config.online_id = "tester".to_string();
        config.language = "fr".to_string();

        let url = resolve_macros(
            "https://{{region}}-tpy.example/users/{{psn}}?lang={{lang}}",
            &config,
        );
        assert_eq!(url, "https://eu-tpy.example/users/tester?lang=fr");
    }

    #[test]
    fn string_params_resolved() {
        let config = Config::new("t");
        let resolved = resolve_params(params(json!({"npLanguage": "{{lang}}", "limit": 32})), &config);
        assert_eq!(resolved["npLanguage"], json!("en"));
        assert_eq!(resolved["limit"], json!(32));
    }

    #[test]
    fn query_pairs_join_arrays_and_skip_empty() {
        let pairs = query_pairs(&params(json!({
            "filters": ["TROPHY", "LIKED"],
            "empty": [],
            "offset": 0,
            "missing": null,
            "sort": "onlineId",
        })));

        assert!(pairs.contains(&("filters".to_string(), "TROPHY,LIKED".to_string())));
        assert!(pairs.contains(&("offset".to_string(), "0".to_string())));
        assert!(pairs.contains(&("sort".to_string(), "onlineId".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "empty" || k == "missing"));
    }

    #[test]
    fn empty_body_is_null() {
        assert_eq!(parse_body("").unwrap(), Value::Null);
        assert_eq!(parse_body("{\"a\":1}").unwrap(), json!({"a": 1}));
        assert!(matches!(parse_body("<html>"), Err(PsnError::JsonError(_))));
    }

    #[test]
    fn username_replacement_is_sanitized() {
        struct Noop;
        impl Transport for Noop {
            fn request(&self, _: Method, _: &str, _: Params) -> Result<Value, PsnError> {
                Ok(Value::Null)
            }
        }

        let url = Noop.replace_psn_username("https://x/users/{{id}}/profile", "bad/name?");
        assert_eq!(url, "https://x/users/badname/profile");
    }

    // One-shot HTTP server on 127.0.0.1 that records what it was sent.

    struct Captured {
        request_line: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl Captured {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        }
    }

    fn serve_once(
        status_line: &'static str,
        reply: &'static str,
    ) -> (u16, thread::JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            let header_end = loop {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break buf.len();
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let mut lines = head.split("\r\n");
            let request_line = lines.next().unwrap_or_default().to_string();
            let headers: Vec<(String, String)> = lines
                .filter_map(|line| line.split_once(':'))
                .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
                .collect();

            let length = headers
                .iter()
                .find(|(k, _)| k == "content-length")
                .and_then(|(_, v)| v.parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < header_end + length {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                reply.len(),
                reply
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();

            Captured {
                request_line,
                headers,
                body,
            }
        });

        (port, handle)
    }

    fn local_transport() -> HttpTransport {
        let mut config = Config::new("secret-token");
        config.online_id = "tester".to_string();
        config.language = "fr".to_string();
        config.timeout = Duration::from_secs(5);
        HttpTransport::new(config)
    }

    #[test]
    fn get_sends_bearer_token_and_query_string() {
        let (port, server) = serve_once("200 OK", r#"{"friendList":[]}"#);
        let url = format!("http://127.0.0.1:{}/{{{{psn}}}}/friendList", port);

        let data = local_transport()
            .get(
                &url,
                params(json!({
                    "npLanguage": "{{lang}}",
                    "limit": 32,
                    "filters": ["TROPHY", "LIKED"],
                    "empty": [],
                })),
            )
            .unwrap();
        let captured = server.join().unwrap();

        assert_eq!(data, json!({"friendList": []}));
        assert!(captured.request_line.starts_with("GET /tester/friendList?"));
        assert!(captured.request_line.contains("npLanguage=fr"));
        assert!(captured.request_line.contains("limit=32"));
        assert!(captured.request_line.contains("filters=TROPHY"));
        assert!(captured.request_line.contains("LIKED"));
        assert!(!captured.request_line.contains("empty="));
        assert_eq!(captured.header("authorization"), Some("Bearer secret-token"));
        assert!(captured.body.is_empty());
    }

    #[test]
    fn delete_sends_query_and_empty_reply_is_null() {
        let (port, server) = serve_once("200 OK", "");
        let url = format!("http://127.0.0.1:{}/{{{{psn}}}}/friendList/pal", port);

        let data = local_transport()
            .delete(&url, params(json!({ "limit": 5 })))
            .unwrap();
        let captured = server.join().unwrap();

        assert_eq!(data, Value::Null);
        assert!(captured.request_line.starts_with("DELETE /tester/friendList/pal?limit=5 "));
        assert!(captured.body.is_empty());
    }

    #[test]
    fn post_sends_json_body() {
        let (port, server) = serve_once("200 OK", r#"{"url":"https://example/x"}"#);
        let url = format!("http://127.0.0.1:{}/{{{{psn}}}}/friendList/pal", port);

        let data = local_transport()
            .post(
                &url,
                params(json!({ "requestMessage": "hi there", "npLanguage": "{{lang}}" })),
            )
            .unwrap();
        let captured = server.join().unwrap();

        assert_eq!(data, json!({"url": "https://example/x"}));
        assert_eq!(captured.request_line, "POST /tester/friendList/pal HTTP/1.1");
        assert!(captured
            .header("content-type")
            .is_some_and(|v| v.starts_with("application/json")));
        assert_eq!(captured.header("authorization"), Some("Bearer secret-token"));

        let body: Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(body, json!({ "requestMessage": "hi there", "npLanguage": "fr" }));
    }

    #[test]
    fn put_sends_empty_json_object() {
        let (port, server) = serve_once("200 OK", "");
        let url = format!("http://127.0.0.1:{}/{{{{psn}}}}/friendList/pal", port);

        local_transport().put(&url, Params::new()).unwrap();
        let captured = server.join().unwrap();

        assert_eq!(captured.request_line, "PUT /tester/friendList/pal HTTP/1.1");
        let body: Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn error_status_becomes_api_error() {
        let (port, server) = serve_once("404 Not Found", r#"{"error":"no such user"}"#);
        let url = format!("http://127.0.0.1:{}/users/ghost/profile", port);

        let err = local_transport().get(&url, Params::new()).unwrap_err();
        server.join().unwrap();

        match err {
            PsnError::ApiError { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, r#"{"error":"no such user"}"#);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn refused_connection_becomes_http_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let url = format!("http://127.0.0.1:{}/x", port);

        let err = local_transport().get(&url, Params::new()).unwrap_err();
        assert!(matches!(err, PsnError::HttpError(_)), "{err:?}");
    }
}
