use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

/// One scripted HTTP response.
pub struct MockResponse {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}

impl MockResponse {
    #[must_use]
    pub fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: "application/json".to_owned(),
            body,
        }
    }
}

pub struct ServerHandle {
    url: String,
    requests: Arc<AtomicUsize>,
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ServerHandle {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server whose responses follow a script
/// keyed by the zero-based request ordinal.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_scripted_server<F>(respond: F) -> Result<ServerHandle, String>
where
    F: Fn(usize) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();
    let requests = Arc::new(AtomicUsize::new(0));
    let requests_inner = Arc::clone(&requests);

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    let ordinal = requests_inner.fetch_add(1, Ordering::SeqCst);
                    let response = respond(ordinal);
                    thread::spawn(move || handle_client(stream, &response));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(5));
                }
                Err(_) => break,
            }
        }
    });

    Ok(ServerHandle {
        url: format!("http://{}", addr),
        requests,
        shutdown: shutdown_tx,
        thread: Some(handle),
    })
}

/// Spawn a server that always serves a fresh, well-formed joke with a
/// unique id.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_healthy_server() -> Result<ServerHandle, String> {
    spawn_scripted_server(|ordinal| {
        let kind = if ordinal % 3 == 0 {
            "programming"
        } else {
            "general"
        };
        MockResponse::json(format!(
            "{{\"id\": {}, \"type\": \"{}\", \"setup\": \"What is request {}?\", \"punchline\": \"This one.\"}}",
            ordinal + 1,
            kind,
            ordinal + 1
        ))
    })
}

/// An address nothing is listening on.
///
/// # Errors
///
/// Returns an error if no ephemeral port can be reserved.
pub fn refused_url() -> Result<String, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind probe failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("addr probe failed: {}", err))?;
    drop(listener);
    Ok(format!("http://{}", addr))
}

fn handle_client(mut stream: TcpStream, response: &MockResponse) {
    let mut buffer = [0u8; 1024];
    if stream.read(&mut buffer).is_err() {
        return;
    }
    let reason = if response.status == 200 {
        "OK"
    } else {
        "Internal Server Error"
    };
    let payload = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason,
        response.content_type,
        response.body.len(),
        response.body
    );
    if stream.write_all(payload.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}
