//! User list controller - keeps the local list in step with the server
//!
//! The controller owns the cache, the search term, the modal and the toast
//! slot. The server is the only source of truth: every successful mutation
//! is followed by a full refetch, and nothing in the cache is changed ahead
//! of a server answer. Failures leave cache and modal as they were.
//!
//! A mutation the server accepted is reported as a success even when the
//! refetch after it fails; the cache is then flagged stale until the next
//! successful refresh.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{validate, FormValues, Modal, User, UserId, UserPayload};
use crate::ports::{Confirmer, UsersApi};

use super::events::UiEvent;
use super::toast::Toaster;
use super::view::{self, TableView};

pub const CREATED: &str = "User created successfully";
pub const UPDATED: &str = "User updated successfully";
pub const DELETED: &str = "User deleted successfully";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this user?";

pub struct UserListController {
    api: Arc<dyn UsersApi>,
    confirmer: Arc<dyn Confirmer>,
    users: Vec<User>,
    filter: String,
    modal: Modal,
    toaster: Toaster,
    stale: bool,
}

impl UserListController {
    pub fn new(api: Arc<dyn UsersApi>, confirmer: Arc<dyn Confirmer>) -> Self {
        Self::with_toaster(api, confirmer, Toaster::default())
    }

    pub fn with_toaster(
        api: Arc<dyn UsersApi>,
        confirmer: Arc<dyn Confirmer>,
        toaster: Toaster,
    ) -> Self {
        Self {
            api,
            confirmer,
            users: Vec::new(),
            filter: String::new(),
            modal: Modal::new(),
            toaster,
            stale: false,
        }
    }

    // === State ===

    /// The cached collection, as last returned by the server
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// The server changed after the last successful fetch and the refetch failed
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn toaster_mut(&mut self) -> &mut Toaster {
        &mut self.toaster
    }

    /// Current table: cache projected through the search term
    pub fn view(&self) -> TableView {
        view::render(&self.users, &self.filter)
    }

    /// Replace the search term and re-render
    pub fn set_filter(&mut self, query: impl Into<String>) -> TableView {
        self.filter = query.into();
        self.view()
    }

    // === Sync ===

    /// Fetch the full collection and replace the cache
    ///
    /// On failure the cache is untouched and an error toast is raised. No
    /// retry.
    pub async fn refresh(&mut self) -> Result<()> {
        match self.api.list().await {
            Ok(users) => {
                tracing::info!(count = users.len(), "user cache replaced");
                self.users = users;
                self.stale = false;
                Ok(())
            }
            Err(e) => Err(self.fail("refresh", e)),
        }
    }

    /// POST a new user, then refetch
    pub async fn create(&mut self, payload: &UserPayload) -> Result<()> {
        self.send_create(payload).await?;
        self.after_mutation(CREATED).await
    }

    /// PUT over an existing user, then refetch
    pub async fn update(&mut self, id: &UserId, payload: &UserPayload) -> Result<()> {
        self.send_update(id, payload).await?;
        self.after_mutation(UPDATED).await
    }

    /// DELETE a user without asking, then refetch
    pub async fn remove(&mut self, id: &UserId) -> Result<()> {
        let result = self.api.delete(id).await;
        if let Err(e) = result {
            return Err(self.fail("delete", e));
        }
        tracing::info!(%id, "user deleted");
        self.after_mutation(DELETED).await
    }

    /// Ask for confirmation, then delete
    ///
    /// Returns `Ok(false)` when declined; nothing is sent in that case.
    pub async fn request_delete(&mut self, id: &UserId) -> Result<bool> {
        if !self.confirmer.confirm(DELETE_PROMPT) {
            tracing::debug!(%id, "delete declined");
            return Ok(false);
        }
        self.remove(id).await?;
        Ok(true)
    }

    async fn send_create(&mut self, payload: &UserPayload) -> Result<()> {
        let result = self.api.create(payload).await;
        if let Err(e) = result {
            return Err(self.fail("create", e));
        }
        tracing::info!("user created");
        Ok(())
    }

    async fn send_update(&mut self, id: &UserId, payload: &UserPayload) -> Result<()> {
        let result = self.api.update(id, payload).await;
        if let Err(e) = result {
            return Err(self.fail("update", e));
        }
        tracing::info!(%id, "user updated");
        Ok(())
    }

    /// Resynchronize after an accepted mutation, then announce it
    ///
    /// The mutation is applied server-side, so a failed refetch does not
    /// fail the operation. It marks the cache stale and the success toast
    /// still comes last.
    async fn after_mutation(&mut self, message: &str) -> Result<()> {
        if self.refresh().await.is_err() {
            tracing::warn!("refetch after mutation failed; cache is stale");
            self.stale = true;
        }
        self.toaster.success(message);
        Ok(())
    }

    /// Route a failure to the toast slot and hand it back
    fn fail(&mut self, operation: &str, error: Error) -> Error {
        tracing::warn!(operation, error = %error, "request failed");
        if error.is_toast() {
            self.toaster.error(error.to_string());
        }
        error
    }

    // === Modal ===

    pub fn open_create(&mut self) {
        self.modal.open_create();
    }

    /// Open the edit form for a cached user
    ///
    /// Returns `false` and leaves the modal closed when `id` is not cached.
    pub fn open_edit(&mut self, id: &UserId) -> bool {
        match self.users.iter().find(|u| &u.id == id) {
            Some(user) => {
                self.modal.open_edit(user);
                true
            }
            None => {
                tracing::debug!(%id, "edit requested for unknown user");
                false
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Replace the visible form fields of the open modal
    pub fn fill_form(&mut self, values: FormValues) {
        self.modal.fill(values);
    }

    /// Validate the open form and send it
    ///
    /// Validation failures are stored on the modal and returned without any
    /// request. The form's id decides between update (present) and create
    /// (absent). On success the modal closes before the cache is refetched.
    pub async fn submit(&mut self) -> Result<()> {
        if !self.modal.is_open() {
            return Err(Error::Other("No form is open".to_string()));
        }

        self.modal.clear_errors();
        let validated = match validate(self.modal.form()) {
            Ok(validated) => validated,
            Err(errors) => {
                tracing::debug!(fields = errors.len(), "form rejected");
                self.modal.set_errors(errors.clone());
                return Err(Error::Validation(errors));
            }
        };

        let message = match &validated.id {
            Some(id) => {
                self.send_update(id, &validated.payload).await?;
                UPDATED
            }
            None => {
                self.send_create(&validated.payload).await?;
                CREATED
            }
        };

        self.modal.close();
        self.after_mutation(message).await
    }

    // === Events ===

    /// Single entry point for UI interactions
    pub async fn handle(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::AddClicked => self.open_create(),
            UiEvent::EditClicked(id) => {
                self.open_edit(&id);
            }
            UiEvent::DeleteClicked(id) => {
                self.request_delete(&id).await?;
            }
            UiEvent::CloseClicked | UiEvent::BackdropClicked => self.close_modal(),
            UiEvent::SearchInput(query) => {
                self.set_filter(query);
            }
            UiEvent::Submitted(values) => {
                self.fill_form(values);
                self.submit().await?;
            }
        }
        Ok(())
    }
}
