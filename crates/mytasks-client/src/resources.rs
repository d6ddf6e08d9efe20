//! Typed access to users, groups, checklists and items.
//!
//! Every method goes through the gateway verbs, so failures follow the same
//! callback chain: `Ok(None)` means a callback took care of the failure.

use crate::{models::*, Credentials, Request, RequestGateway, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

impl RequestGateway {
    // ==================== Users ====================

    /// List the users visible to the current credentials
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Option<Vec<UserSummary>>> {
        self.fetch(Request::get("/")).await
    }

    /// A user and its groups
    #[instrument(skip(self))]
    pub async fn user(&self, id: &str) -> Result<Option<User>> {
        self.fetch(Request::get(format!("/{}", id))).await
    }

    /// Validate credentials and return the user list they grant access to.
    ///
    /// Like [`RequestGateway::login`] this does not store the credentials.
    pub async fn verify_credentials(&self, credentials: &Credentials) -> Result<Vec<UserSummary>> {
        self.login(credentials).await?.json()
    }

    // ==================== Groups ====================

    #[instrument(skip(self))]
    pub async fn create_group(&self, group: &NewGroup) -> Result<Option<Group>> {
        self.fetch(Request::post("/groups/", group)?).await
    }

    #[instrument(skip(self))]
    pub async fn group(&self, id: &str) -> Result<Option<Group>> {
        self.fetch(Request::get(group_path(id))).await
    }

    /// Merge `changes` into the group
    #[instrument(skip(self, changes))]
    pub async fn update_group<B: Serialize + ?Sized>(&self, id: &str, changes: &B) -> Result<Option<Group>> {
        self.fetch(Request::put(group_path(id), changes)?).await
    }

    /// Delete an empty group
    #[instrument(skip(self))]
    pub async fn delete_group(&self, id: &str) -> Result<Option<DeleteReceipt>> {
        self.fetch(Request::delete(group_path(id))).await
    }

    // ==================== Checklists ====================

    #[instrument(skip(self))]
    pub async fn create_checklist(&self, checklist: &NewChecklist) -> Result<Option<Checklist>> {
        self.fetch(Request::post("/checklists/", checklist)?).await
    }

    #[instrument(skip(self))]
    pub async fn checklist(&self, id: &str) -> Result<Option<Checklist>> {
        self.fetch(Request::get(checklist_path(id))).await
    }

    #[instrument(skip(self, changes))]
    pub async fn update_checklist<B: Serialize + ?Sized>(
        &self,
        id: &str,
        changes: &B,
    ) -> Result<Option<Checklist>> {
        self.fetch(Request::put(checklist_path(id), changes)?).await
    }

    #[instrument(skip(self))]
    pub async fn delete_checklist(&self, id: &str) -> Result<Option<DeleteReceipt>> {
        self.fetch(Request::delete(checklist_path(id))).await
    }

    // ==================== Items ====================

    #[instrument(skip(self))]
    pub async fn create_item(&self, item: &NewItem) -> Result<Option<Item>> {
        self.fetch(Request::post("/items/", item)?).await
    }

    #[instrument(skip(self))]
    pub async fn item(&self, id: &str) -> Result<Option<Item>> {
        self.fetch(Request::get(item_path(id))).await
    }

    #[instrument(skip(self, changes))]
    pub async fn update_item<B: Serialize + ?Sized>(&self, id: &str, changes: &B) -> Result<Option<Item>> {
        self.fetch(Request::put(item_path(id), changes)?).await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: &str) -> Result<Option<DeleteReceipt>> {
        self.fetch(Request::delete(item_path(id))).await
    }

    async fn fetch<T: DeserializeOwned>(&self, request: Request) -> Result<Option<T>> {
        match self.call(request).await? {
            Some(response) => response.json().map(Some),
            None => Ok(None),
        }
    }
}

fn group_path(id: &str) -> String {
    format!("/groups/{}", id)
}

fn checklist_path(id: &str) -> String {
    format!("/checklists/{}", id)
}

fn item_path(id: &str) -> String {
    format!("/items/{}", id)
}
