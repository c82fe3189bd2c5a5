//! Shared test doubles: a recording purge transport and a one-shot HTTP
//! listener that answers scripted responses.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex, Once};
use std::thread::JoinHandle;

use edgepurge_engine::purge::{PurgeFailure, PurgeRequest, PurgeResponse, PurgeTransport};

/// Records every batch it receives; fails the `fail_on`-th call (1-based).
#[derive(Default)]
pub struct RecordingTransport {
    pub calls: RefCell<Vec<(String, Vec<String>)>>,
    pub fail_on: Option<usize>,
}

impl RecordingTransport {
    pub fn failing_on(call: usize) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_on: Some(call),
        }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls.borrow().iter().map(|(_, files)| files.len()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl PurgeTransport for RecordingTransport {
    fn send(&self, request: &PurgeRequest<'_>) -> Result<PurgeResponse, PurgeFailure> {
        let mut calls = self.calls.borrow_mut();
        calls.push((request.zone_id.to_string(), request.files.to_vec()));
        if self.fail_on == Some(calls.len()) {
            return Err(PurgeFailure::Rejected {
                status: 500,
                body: "{\"success\":false}".to_string(),
            });
        }
        Ok(PurgeResponse {
            status: 200,
            body: serde_json::json!({"success": true, "errors": [], "result": {"id": "zone"}}),
        })
    }
}

/// One request as seen by the test server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request_line: String,
    /// Header names lowercased
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Scripted HTTP/1.1 server on 127.0.0.1 answering one response per
/// connection, then shutting down.
pub struct TestServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        let handle = std::thread::spawn(move || {
            for (status, body) in responses {
                let (stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };
                let mut reader = BufReader::new(stream);

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut headers = HashMap::new();
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
                    }
                }
                let length: usize = headers
                    .get("content-length")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
                let mut body_bytes = vec![0u8; length];
                reader.read_exact(&mut body_bytes).unwrap();

                recorded.lock().unwrap().push(RecordedRequest {
                    request_line: request_line.trim_end().to_string(),
                    headers,
                    body: String::from_utf8(body_bytes).unwrap(),
                });

                let response = format!(
                    "HTTP/1.1 {} Scripted\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let mut stream = reader.into_inner();
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/client/v4", port),
            requests,
            handle: Some(handle),
        }
    }

    /// Wait for the server thread and return what it saw.
    pub fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            // The thread ends once all scripted responses are served; when the
            // client stopped early it is still blocked in accept, so only join
            // when every response was consumed.
            if handle.is_finished() {
                handle.join().unwrap();
            }
        }
        self.requests.lock().unwrap().clone()
    }
}

/// An address nothing listens on.
pub fn closed_port_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/client/v4", port)
}

static CLEAR_PROXY: Once = Once::new();

/// Drop proxy settings so requests to 127.0.0.1 go straight to the test
/// server. Call before building any HTTP client.
pub fn clear_proxy_env() {
    CLEAR_PROXY.call_once(|| {
        for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
            std::env::remove_var(var);
        }
    });
}
