#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

pub struct TestResponse {
    status: &'static str,
    content_type: &'static str,
    body: String,
}

impl TestResponse {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            status: "200 OK",
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub fn server_error() -> Self {
        Self {
            status: "500 Internal Server Error",
            content_type: "application/json",
            body: "{}".to_string(),
        }
    }

    pub fn plain_text(body: &str) -> Self {
        Self {
            status: "200 OK",
            content_type: "text/plain",
            body: body.to_string(),
        }
    }
}

// Minimal HTTP server that answers one canned response per connection, in
// order, and records the request line of every request it receives. The
// accept thread is left detached; it dies with the test process even when
// the client stops before consuming every response.
pub struct PagedServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl PagedServer {
    pub fn start(responses: Vec<TestResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for response in responses {
                let (mut stream, _) = match listener.accept() {
                    Ok(connection) => connection,
                    Err(_) => return,
                };

                let mut request_line = String::new();
                {
                    let mut reader = BufReader::new(&stream);
                    if reader.read_line(&mut request_line).is_err() {
                        return;
                    }
                    // Drain the remaining headers before answering
                    loop {
                        let mut header = String::new();
                        match reader.read_line(&mut header) {
                            Ok(0) => break,
                            Ok(_) if header == "\r\n" => break,
                            Ok(_) => {}
                            Err(_) => return,
                        }
                    }
                }
                recorded
                    .lock()
                    .unwrap()
                    .push(request_line.trim_end().to_string());

                let payload = format!(
                    "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    response.status,
                    response.content_type,
                    response.body.len(),
                    response.body
                );
                if stream.write_all(payload.as_bytes()).is_err() {
                    return;
                }
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{}/tramites", addr),
            requests,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}
