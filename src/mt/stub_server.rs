//! Local chat-completions stub for tests
//!
//! Runs on plain OS threads, independent of any tokio runtime in the test,
//! and keeps each connection open for reuse like a real server would.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A running stub; answers every request with the same status and body
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    connections: Arc<AtomicUsize>,
}

impl StubServer {
    /// Answer `POST .../chat/completions` with a completion carrying `content`
    pub fn completion(content: &str) -> Self {
        let body = serde_json::json!({
            "model": "stub-model",
            "choices": [ { "index": 0, "message": { "role": "assistant", "content": content } } ]
        });
        Self::start(200, body.to_string())
    }

    pub fn start(status: u16, body: String) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let connections = Arc::new(AtomicUsize::new(0));

        let (reqs, conns) = (Arc::clone(&requests), Arc::clone(&connections));
        std::thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                conns.fetch_add(1, Ordering::SeqCst);
                let (reqs, body) = (Arc::clone(&reqs), body.clone());
                std::thread::spawn(move || serve_connection(stream, status, &body, &reqs));
            }
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            requests,
            connections,
        }
    }

    /// Request bodies received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

fn serve_connection(stream: TcpStream, status: u16, body: &str, requests: &Mutex<Vec<String>>) {
    let mut writer = match stream.try_clone() {
        Ok(writer) => writer,
        Err(_) => return,
    };
    let mut reader = BufReader::new(stream);

    // Keep-alive: serve requests until the client closes the connection
    loop {
        let mut content_length = 0usize;
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }
        loop {
            line.clear();
            match reader.read_line(&mut line) {
                Ok(0) | Err(_) => return,
                Ok(_) => {}
            }
            let header = line.trim_end();
            if header.is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
        }

        let mut request_body = vec![0u8; content_length];
        if reader.read_exact(&mut request_body).is_err() {
            return;
        }
        if let Ok(mut log) = requests.lock() {
            log.push(String::from_utf8_lossy(&request_body).into_owned());
        }

        let response = format!(
            "HTTP/1.1 {} STUB\r\nContent-Type: application/json\r\n\
             Content-Length: {}\r\nConnection: keep-alive\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        if writer.write_all(response.as_bytes()).is_err() || writer.flush().is_err() {
            return;
        }
    }
}
