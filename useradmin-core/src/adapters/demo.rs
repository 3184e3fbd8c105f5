//! Local stand-in for the users API
//!
//! Behaves like the real backend for everything the client can observe:
//! server-assigned numeric ids, list order by id, email uniqueness and the
//! same error messages. Used for demo mode (persisted to a JSON file so the
//! data survives between CLI runs) and by tests (in memory, with request
//! counting and failure injection).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::adapters::http::DELETE_FAILED;
use crate::domain::result::{Error, Result};
use crate::domain::{User, UserId, UserPayload};
use crate::ports::UsersApi;

pub const EMAIL_TAKEN: &str = "Email already exists";

/// Sample users for demo mode
pub fn generate_demo_users() -> Vec<User> {
    vec![
        User::new("1", "Alice Johnson", "alice.johnson@example.com").with_phone("+1 555 0101"),
        User::new("2", "Bob Smith", "bob.smith@example.com").with_phone("+1 555 0102"),
        User::new("3", "Carol Martinez", "carol.m@example.org"),
        User::new("4", "David Lee", "dlee@example.net").with_phone("+44 20 7946 0958"),
        User::new("5", "Eve Adams", "eve@example.com"),
    ]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoState {
    next_id: i64,
    users: Vec<User>,
}

impl DemoState {
    fn seeded(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .filter_map(|u| u.id.as_str().parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self { next_id, users }
    }

    fn email_taken(&self, email: &str, except: Option<&UserId>) -> bool {
        self.users
            .iter()
            .any(|u| Some(&u.id) != except && u.email.eq_ignore_ascii_case(email))
    }
}

/// Injected failure for the next request
#[derive(Debug, Clone)]
enum Fault {
    Offline,
    Status(u16, String),
}

impl Fault {
    fn into_error(self) -> Error {
        match self {
            Fault::Offline => Error::transport("Unable to connect to demo users API"),
            Fault::Status(status, message) => Error::server(status, message),
        }
    }
}

/// In-process users API
#[derive(Debug)]
pub struct DemoUsersApi {
    state: Mutex<DemoState>,
    path: Option<PathBuf>,
    requests: AtomicUsize,
    fault: Mutex<Option<Fault>>,
    list_fault: Mutex<Option<Fault>>,
}

impl DemoUsersApi {
    /// Purely in-memory store holding `users`
    pub fn in_memory(users: Vec<User>) -> Self {
        Self {
            state: Mutex::new(DemoState::seeded(users)),
            path: None,
            requests: AtomicUsize::new(0),
            fault: Mutex::new(None),
            list_fault: Mutex::new(None),
        }
    }

    /// Store backed by `path`, seeded with demo users when the file is missing
    pub fn open(path: &Path) -> Result<Self> {
        let state = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            let state = DemoState::seeded(generate_demo_users());
            write_state(path, &state)?;
            state
        };

        Ok(Self {
            state: Mutex::new(state),
            path: Some(path.to_path_buf()),
            requests: AtomicUsize::new(0),
            fault: Mutex::new(None),
            list_fault: Mutex::new(None),
        })
    }

    /// Number of requests served so far, failed ones included
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Make the next request fail as if the host were unreachable
    pub fn fail_next_offline(&self) {
        *self.lock_fault() = Some(Fault::Offline);
    }

    /// Make the next request fail with `status` and `message`
    pub fn fail_next_with(&self, status: u16, message: impl Into<String>) {
        *self.lock_fault() = Some(Fault::Status(status, message.into()));
    }

    /// Make the next list request fail; mutations still go through
    pub fn fail_next_list_with(&self, status: u16, message: impl Into<String>) {
        *lock(&self.list_fault) = Some(Fault::Status(status, message.into()));
    }

    /// Snapshot of the stored users, without counting as a request
    pub fn stored_users(&self) -> Vec<User> {
        self.lock_state().users.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, DemoState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_fault(&self) -> std::sync::MutexGuard<'_, Option<Fault>> {
        lock(&self.fault)
    }

    /// Count the request and apply any injected fault
    fn begin(&self) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.lock_fault().take() {
            Some(fault) => Err(fault.into_error()),
            None => Ok(()),
        }
    }

    fn persist(&self, state: &DemoState) -> Result<()> {
        match &self.path {
            Some(path) => write_state(path, state),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn write_state(path: &Path, state: &DemoState) -> Result<()> {
    let content = serde_json::to_string_pretty(state)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[async_trait]
impl UsersApi for DemoUsersApi {
    async fn list(&self) -> Result<Vec<User>> {
        self.begin()?;
        if let Some(fault) = lock(&self.list_fault).take() {
            return Err(fault.into_error());
        }
        Ok(self.lock_state().users.clone())
    }

    async fn create(&self, payload: &UserPayload) -> Result<()> {
        self.begin()?;
        let mut state = self.lock_state();
        if state.email_taken(&payload.email, None) {
            return Err(Error::server(400, EMAIL_TAKEN));
        }

        let id = UserId::from(state.next_id);
        state.next_id += 1;
        state.users.push(payload.clone().into_user(id));
        self.persist(&state)
    }

    async fn update(&self, id: &UserId, payload: &UserPayload) -> Result<()> {
        self.begin()?;
        let mut state = self.lock_state();
        if state.email_taken(&payload.email, Some(id)) {
            return Err(Error::server(400, EMAIL_TAKEN));
        }

        let slot = state
            .users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| Error::server(404, format!("User not found with id: {}", id)))?;
        *slot = payload.clone().into_user(id.clone());
        self.persist(&state)
    }

    async fn delete(&self, id: &UserId) -> Result<()> {
        self.begin()?;
        let mut state = self.lock_state();
        let before = state.users.len();
        state.users.retain(|u| &u.id != id);
        if state.users.len() == before {
            return Err(Error::server(404, DELETE_FAILED));
        }
        self.persist(&state)
    }
}
