//! Mock users API server for testing
//!
//! A tiny HTTP/1.1 server on a random loopback port that implements the
//! users resource over an in-memory list:
//! - GET /api/users returns a JSON array
//! - POST /api/users appends with the next numeric id
//! - PUT /api/users/{id} replaces a user
//! - DELETE /api/users/{id} removes a user

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;

use crate::domain::{User, UserId, UserPayload};

/// Mock server behavior
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Users present at startup
    pub users: Vec<User>,
    /// Answer every request with this status instead of serving it
    pub fail_status: Option<u16>,
    /// Body sent along with `fail_status`
    pub fail_body: String,
}

struct MockState {
    users: Vec<User>,
    next_id: i64,
}

/// Mock users API server
pub struct MockUsersServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockUsersServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(AtomicUsize::new(0));

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let next_id = config
            .users
            .iter()
            .filter_map(|u| u.id.as_str().parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let state = Arc::new(Mutex::new(MockState {
            users: config.users.clone(),
            next_id,
        }));

        let running_clone = running.clone();
        let requests_clone = requests.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        requests_clone.fetch_add(1, Ordering::SeqCst);
                        let cfg = config.clone();
                        let state = state.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &state));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Base URL (scheme + host) for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Connections accepted so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockUsersServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Read one request: head plus a Content-Length body
fn read_request(stream: &mut TcpStream) -> Option<(String, String, String)> {
    stream.set_nonblocking(false).ok()?;
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    let head_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < head_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let mut parts = head.lines().next()?.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();
    let body = String::from_utf8_lossy(&data[head_end..]).to_string();
    Some((method, path, body))
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, state: &Mutex<MockState>) {
    let Some((method, path, body)) = read_request(&mut stream) else {
        return;
    };

    if let Some(status) = config.fail_status {
        send_response(&mut stream, status, &config.fail_body);
        return;
    }

    let mut state = state.lock().unwrap();
    let member_id = path
        .strip_prefix("/api/users/")
        .filter(|id| !id.is_empty())
        .map(|id| UserId::new(percent_decode(id)));

    match (method.as_str(), path.as_str(), member_id) {
        ("GET", "/api/users", None) => {
            let json = serde_json::to_string(&state.users).unwrap();
            send_response(&mut stream, 200, &json);
        }
        ("POST", "/api/users", None) => {
            let Ok(payload) = serde_json::from_str::<UserPayload>(&body) else {
                send_response(&mut stream, 400, "Malformed user body");
                return;
            };
            if state.users.iter().any(|u| u.email == payload.email) {
                let json = json!({"message": "Email already exists"}).to_string();
                send_response(&mut stream, 400, &json);
                return;
            }
            let id = UserId::from(state.next_id);
            state.next_id += 1;
            let user = payload.into_user(id);
            let json = serde_json::to_string(&user).unwrap();
            state.users.push(user);
            send_response(&mut stream, 201, &json);
        }
        ("PUT", _, Some(id)) => {
            let Ok(payload) = serde_json::from_str::<UserPayload>(&body) else {
                send_response(&mut stream, 400, "Malformed user body");
                return;
            };
            match state.users.iter_mut().find(|u| u.id == id) {
                Some(slot) => {
                    *slot = payload.into_user(id);
                    let json = serde_json::to_string(slot).unwrap();
                    send_response(&mut stream, 200, &json);
                }
                None => {
                    let json = json!({"message": format!("User not found with id: {}", id)});
                    send_response(&mut stream, 404, &json.to_string());
                }
            }
        }
        ("DELETE", _, Some(id)) => {
            let before = state.users.len();
            state.users.retain(|u| u.id != id);
            if state.users.len() == before {
                send_response(&mut stream, 404, "");
            } else {
                send_response(&mut stream, 204, "");
            }
        }
        _ => send_response(&mut stream, 404, r#"{"message": "Endpoint not found"}"#),
    }
}

/// Decode `%XX` escapes in a path segment; malformed escapes are kept as-is
fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let byte = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = byte {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::adapters::http::{HttpUsersApi, DELETE_FAILED, FETCH_FAILED, OPERATION_FAILED};
    use crate::domain::result::Error;
    use crate::ports::UsersApi;

    fn seeded() -> MockConfig {
        MockConfig {
            users: vec![
                User::new("1", "Alice", "a@x.com"),
                User::new("2", "Bob", "b@x.com").with_phone("555"),
            ],
            ..Default::default()
        }
    }

    fn client(server: &MockUsersServer) -> HttpUsersApi {
        HttpUsersApi::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_parses_users() {
        let server = MockUsersServer::start(seeded()).unwrap();
        let users = client(&server).list().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Alice");
        assert_eq!(users[1].phone.as_deref(), Some("555"));
    }

    #[tokio::test]
    async fn test_create_then_list_has_server_id() {
        let server = MockUsersServer::start(seeded()).unwrap();
        let api = client(&server);

        api.create(&UserPayload::new("Carol", "c@x.com", Some("777".to_string())))
            .await
            .unwrap();
        let users = api.list().await.unwrap();

        let carol = users.iter().find(|u| u.name == "Carol").unwrap();
        assert_eq!(carol.id.as_str(), "3");
        assert_eq!(carol.email, "c@x.com");
        assert_eq!(carol.phone.as_deref(), Some("777"));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let server = MockUsersServer::start(seeded()).unwrap();
        let api = client(&server);

        api.update(&UserId::new("1"), &UserPayload::new("Alicia", "a@x.com", None))
            .await
            .unwrap();
        api.delete(&UserId::new("2")).await.unwrap();

        let users = api.list().await.unwrap();
        assert_eq!(users, vec![User::new("1", "Alicia", "a@x.com")]);
        assert_eq!(server.request_count(), 3);
    }

    #[tokio::test]
    async fn test_delete_reserved_character_id_hits_that_user() {
        let server = MockUsersServer::start(MockConfig {
            users: vec![
                User::new("7", "Seven", "seven@x.com"),
                User::new("7#x", "Hashed", "hashed@x.com"),
                User::new("a/b", "Slashed", "slashed@x.com"),
            ],
            ..Default::default()
        })
        .unwrap();
        let api = client(&server);

        api.delete(&UserId::new("7#x")).await.unwrap();
        api.update(&UserId::new("a/b"), &UserPayload::new("Slash", "slashed@x.com", None))
            .await
            .unwrap();

        let users = api.list().await.unwrap();
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "a/b"]);
        assert_eq!(users[1].name, "Slash");
    }

    #[tokio::test]
    async fn test_create_surfaces_json_message() {
        let server = MockUsersServer::start(seeded()).unwrap();
        let err = client(&server)
            .create(&UserPayload::new("Al", "a@x.com", None))
            .await
            .unwrap_err();

        match err {
            Error::Server { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Email already exists");
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_surfaces_text_body() {
        let server = MockUsersServer::start(MockConfig {
            fail_status: Some(409),
            fail_body: "Conflict on email".to_string(),
            ..Default::default()
        })
        .unwrap();
        let err = client(&server)
            .update(&UserId::new("1"), &UserPayload::new("Al", "a@x.com", None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Conflict on email");
    }

    #[tokio::test]
    async fn test_create_empty_error_body_uses_fallback() {
        let server = MockUsersServer::start(MockConfig {
            fail_status: Some(500),
            ..Default::default()
        })
        .unwrap();
        let err = client(&server)
            .create(&UserPayload::new("Al", "a@x.com", None))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), OPERATION_FAILED);
    }

    #[tokio::test]
    async fn test_list_and_delete_failures_are_generic() {
        let server = MockUsersServer::start(MockConfig {
            fail_status: Some(500),
            fail_body: r#"{"message": "database down"}"#.to_string(),
            ..Default::default()
        })
        .unwrap();
        let api = client(&server);

        assert_eq!(api.list().await.unwrap_err().to_string(), FETCH_FAILED);
        assert_eq!(
            api.delete(&UserId::new("1")).await.unwrap_err().to_string(),
            DELETE_FAILED
        );
    }
}
