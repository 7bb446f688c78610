//! GraphQL-over-HTTP transport.
//!
//! The client is synchronous: one request in flight at a time, each call
//! blocks until the server answers or the agent times out.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub operation_name: &'static str,
    pub variables: Value,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<Value>,
}

impl GraphqlError {
    /// `extensions.code`, when the server sent one.
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.get("code")?.as_str()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

pub trait Transport {
    fn execute(&self, request: &GraphqlRequest) -> AppResult<GraphqlResponse>;
}

pub struct HttpTransport {
    agent: ureq::Agent,
    endpoint: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: &str, token: Option<String>, timeout_secs: u64) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs.max(1)))
            .build();
        Self {
            agent,
            endpoint: endpoint.to_string(),
            token,
        }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &GraphqlRequest) -> AppResult<GraphqlResponse> {
        log::debug!("POST {} op={}", self.endpoint, request.operation_name);

        let mut req = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json");
        if let Some(token) = &self.token {
            req = req.set("Authorization", &format!("Bearer {}", token));
        }

        match req.send_json(request) {
            Ok(resp) => resp
                .into_json::<GraphqlResponse>()
                .map_err(|e| AppError::Network(format!("invalid response body: {}", e))),
            Err(ureq::Error::Status(401, _)) => Err(AppError::Unauthorized),
            Err(ureq::Error::Status(status, resp)) => {
                let message = resp.into_string().unwrap_or_default();
                Err(AppError::Http { status, message })
            }
            Err(ureq::Error::Transport(t)) => Err(AppError::Network(t.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single request with `status_line` and hand back the raw request.
    fn serve_once(status_line: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/graphql", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text
                        .lines()
                        .find_map(|l| {
                            l.to_ascii_lowercase()
                                .strip_prefix("content-length:")
                                .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!("{status_line}\r\nContent-Length: 4\r\nConnection: close\r\n\r\nnope");
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&raw).to_string()
        });
        (url, handle)
    }

    fn request() -> GraphqlRequest {
        GraphqlRequest {
            query: "query { tasks { id } }",
            operation_name: "ListTasks",
            variables: Value::Null,
        }
    }

    #[test]
    fn http_401_is_unauthorized_and_token_is_sent() {
        let (url, server) = serve_once("HTTP/1.1 401 Unauthorized");
        let transport = HttpTransport::new(&url, Some("abc.def".into()), 5);

        let err = transport.execute(&request()).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let seen = server.join().unwrap().to_ascii_lowercase();
        assert!(seen.contains("authorization: bearer abc.def"));
        assert!(seen.contains("\"operationname\":\"listtasks\""));
    }

    #[test]
    fn other_statuses_keep_code_and_body() {
        let (url, server) = serve_once("HTTP/1.1 500 Internal Server Error");
        let transport = HttpTransport::new(&url, None, 5);

        match transport.execute(&request()) {
            Err(AppError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "nope");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        let seen = server.join().unwrap().to_ascii_lowercase();
        assert!(!seen.contains("authorization:"));
    }
}
