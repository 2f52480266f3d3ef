use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, Mutex};

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn body_as_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    pub fn body_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// A canned JSON response. `delay` holds the response back before the
/// first byte is written, which lets tests make one model artificially
/// slower than its siblings.
#[derive(Clone, Debug)]
pub struct MockResponse {
    body: serde_json::Value,
    status: u16,
    delay: Option<Duration>,
}

impl MockResponse {
    pub fn json(body: serde_json::Value) -> Self {
        Self {
            body,
            status: 200,
            delay: None,
        }
    }

    /// A well-formed chat-completions success carrying `text`.
    pub fn completion(text: impl Into<String>) -> Self {
        Self::json(serde_json::json!({
            "choices": [
                {
                    "message": {
                        "content": text.into(),
                    }
                }
            ]
        }))
    }

    /// A non-2xx response with an error body.
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::json(serde_json::json!({ "error": message.into() })).with_status(status)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone, Debug)]
pub struct MockRoute {
    path: String,
    responders: Vec<MockResponse>,
}

impl MockRoute {
    pub fn new(path: impl Into<String>, responders: Vec<MockResponse>) -> Self {
        Self {
            path: path.into(),
            responders,
        }
    }

    pub fn single(path: impl Into<String>, responder: MockResponse) -> Self {
        Self::new(path, vec![responder])
    }
}

#[derive(Clone, Debug)]
struct RouteState {
    responders: Vec<MockResponse>,
    call_count: usize,
}

impl RouteState {
    // Repeats the last responder once the script runs out.
    fn next(&mut self) -> Option<MockResponse> {
        if self.responders.is_empty() {
            return None;
        }

        let idx = self.call_count.min(self.responders.len() - 1);
        self.call_count += 1;
        Some(self.responders[idx].clone())
    }
}

struct MockServerState {
    routes: Mutex<HashMap<String, RouteState>>,
    recordings: Mutex<Vec<RecordedRequest>>,
}

impl MockServerState {
    async fn next_response(&self, path: &str) -> Option<MockResponse> {
        let mut routes = self.routes.lock().await;
        routes.get_mut(path).and_then(|route| route.next())
    }

    async fn record_request(&self, record: RecordedRequest) {
        let mut recordings = self.recordings.lock().await;
        recordings.push(record);
    }

    async fn recordings(&self) -> Vec<RecordedRequest> {
        let recordings = self.recordings.lock().await;
        recordings.clone()
    }
}

pub struct MockModelServer {
    addr: SocketAddr,
    state: Arc<MockServerState>,
    shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
    join_handle: Arc<Mutex<Option<tokio::task::JoinHandle<()>>>>,
}

impl MockModelServer {
    pub async fn start(routes: Vec<MockRoute>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = Arc::new(MockServerState {
            routes: Mutex::new(HashMap::new()),
            recordings: Mutex::new(Vec::new()),
        });

        {
            let mut map = state.routes.lock().await;
            for route in routes {
                map.insert(
                    route.path,
                    RouteState {
                        responders: route.responders,
                        call_count: 0,
                    },
                );
            }
        }

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let state_clone = state.clone();
        let join_handle = tokio::spawn(async move {
            run_server(listener, state_clone, shutdown_rx).await;
        });

        Ok(Self {
            addr,
            state,
            shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
            join_handle: Arc::new(Mutex::new(Some(join_handle))),
        })
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.lock().await.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.join_handle.lock().await.take() {
            let _ = handle.await;
        }
    }

    pub async fn recorded_requests(&self) -> Vec<RecordedRequest> {
        self.state.recordings().await
    }

    pub async fn requests_for(&self, path: &str) -> Vec<RecordedRequest> {
        self.state
            .recordings()
            .await
            .into_iter()
            .filter(|record| record.path == path)
            .collect()
    }
}

impl Drop for MockModelServer {
    fn drop(&mut self) {
        if let Ok(mut tx_opt) = self.shutdown_tx.try_lock() {
            if let Some(tx) = tx_opt.take() {
                let _ = tx.send(());
            }
        }

        if let Ok(mut handle_opt) = self.join_handle.try_lock() {
            if let Some(handle) = handle_opt.take() {
                handle.abort();
            }
        }
    }
}

async fn run_server(
    listener: TcpListener,
    state: Arc<MockServerState>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown_rx => {
                break;
            }
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, _)) => {
                        let state_clone = state.clone();
                        tokio::spawn(async move {
                            let _ = handle_connection(stream, state_clone).await;
                        });
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "mock server accept error");
                        break;
                    }
                }
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    state: Arc<MockServerState>,
) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut temp = [0u8; 1024];
    let mut header_end: Option<usize> = None;
    let mut method = String::new();
    let mut path = String::new();
    let mut headers = HashMap::new();
    let mut content_length = 0usize;

    loop {
        let n = stream.read(&mut temp).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&temp[..n]);

        if header_end.is_none() {
            if let Some(end) = find_header_end(&buffer) {
                header_end = Some(end);
                let head = parse_request_head(&buffer[..end]);
                method = head.method;
                path = head.path;
                headers = head.headers;
                content_length = head.content_length;
            }
        }

        if let Some(end) = header_end {
            if buffer.len() >= end + content_length {
                break;
            }
        }
    }

    let header_end = match header_end {
        Some(end) => end,
        None => return Ok(()),
    };

    let body = if buffer.len() >= header_end + content_length {
        buffer[header_end..header_end + content_length].to_vec()
    } else {
        Vec::new()
    };

    state
        .record_request(RecordedRequest {
            method,
            path: path.clone(),
            headers,
            body,
        })
        .await;

    if let Some(response) = state.next_response(&path).await {
        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }
        send_json_response(response, &mut stream).await
    } else {
        send_not_found(&mut stream).await
    }
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|idx| idx + 4)
}

struct ParsedHead {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    content_length: usize,
}

fn parse_request_head(buffer: &[u8]) -> ParsedHead {
    let head = String::from_utf8_lossy(buffer);
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("").to_string();
    let path = parts.next().unwrap_or("").to_string();

    let mut headers = HashMap::new();
    let mut content_length = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let key = name.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if key == "content-length" {
                content_length = value.parse().unwrap_or(0);
            }
            headers.insert(key, value);
        }
    }

    ParsedHead {
        method,
        path,
        headers,
        content_length,
    }
}

async fn send_not_found(stream: &mut TcpStream) -> std::io::Result<()> {
    let body = b"Not Found";
    let response = format!(
        "HTTP/1.1 404 Not Found\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    stream.write_all(response.as_bytes()).await?;
    stream.write_all(body).await
}

async fn send_json_response(
    response: MockResponse,
    stream: &mut TcpStream,
) -> std::io::Result<()> {
    let body_string = response.body.to_string();
    let header = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        body_string.as_bytes().len()
    );
    stream.write_all(header.as_bytes()).await?;
    stream.write_all(body_string.as_bytes()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completion_response_records_request() {
        if std::env::var("CROSSQUERY_RUN_MOCK_SERVER_TESTS").is_err() {
            eprintln!("skipping mock server integration test");
            return;
        }

        let server = MockModelServer::start(vec![MockRoute::single(
            "/chat/completions",
            MockResponse::completion("hello"),
        )])
        .await
        .expect("server starts");

        let addr = server.address();

        let mut stream = TcpStream::connect(addr).await.expect("connects");
        stream
            .write_all(
                b"POST /chat/completions HTTP/1.1\r\nHost: localhost\r\nContent-Length: 2\r\n\r\nok",
            )
            .await
            .expect("writes request");

        let mut response = String::new();
        let mut reader = tokio::io::BufReader::new(stream);
        reader
            .read_to_string(&mut response)
            .await
            .expect("reads response");

        assert!(response.contains("\"choices\""));

        let records = server.requests_for("/chat/completions").await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].method, "POST");
        assert_eq!(records[0].body_as_string().unwrap(), "ok");

        server.shutdown().await;
    }
}
