//! The request store
//!
//! Holds every account and request, and writes the whole state back as a
//! single JSON blob after each mutation:
//!
//! ```text
//! load:   backend[key] → parse (malformed → empty) → seed admin → save
//! mutate: change StoreData → save
//! ```

use crate::storage::backend::KeyValueBackend;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::types::{
    Account, LineItem, Request, RequestStatus, StoreData, DEFAULT_ADMIN_EMAIL,
};
use chrono::Utc;
use std::collections::BTreeMap;

/// Key the blob is stored under unless configured otherwise
pub const DEFAULT_STORAGE_KEY: &str = "request_pro_v10";

/// Accounts and requests, bound to the backend they persist to
pub struct Store {
    backend: Box<dyn KeyValueBackend>,
    key: String,
    data: StoreData,
}

impl Store {
    /// Load the store from `backend`, seeding the default administrator
    pub fn load<B>(backend: B, key: impl Into<String>) -> StorageResult<Self>
    where
        B: KeyValueBackend + 'static,
    {
        let key = key.into();
        let data = match backend.get(&key) {
            Ok(None) => {
                tracing::info!("No stored data under {:?}, starting empty", key);
                StoreData::default()
            }
            Ok(Some(raw)) => match serde_json::from_str::<StoreData>(&raw) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!("Discarding malformed data under {:?}: {}", key, e);
                    StoreData::default()
                }
            },
            Err(StorageError::InvalidEncoding(e)) => {
                tracing::warn!("Discarding undecodable data under {:?}: {}", key, e);
                StoreData::default()
            }
            Err(e) => return Err(e),
        };

        let mut store = Self {
            backend: Box::new(backend),
            key,
            data,
        };

        if store.find_account(DEFAULT_ADMIN_EMAIL).is_none() {
            tracing::info!("Seeding default administrator {}", DEFAULT_ADMIN_EMAIL);
            store.data.accounts.push(Account::default_admin());
            store.save()?;
        }

        tracing::info!(
            "Loaded {} accounts and {} requests",
            store.data.accounts.len(),
            store.data.requests.len()
        );
        Ok(store)
    }

    /// Serialize the full state and write it under the store key
    pub fn save(&mut self) -> StorageResult<()> {
        let content = serde_json::to_string(&self.data)?;
        self.backend.set(&self.key, &content)?;
        tracing::debug!("Saved store under {:?}", self.key);
        Ok(())
    }

    /// Persist `data` and adopt it as the in-memory state.
    ///
    /// The in-memory state is only replaced once the write succeeded.
    fn commit(&mut self, data: StoreData) -> StorageResult<()> {
        let content = serde_json::to_string(&data)?;
        self.backend.set(&self.key, &content)?;
        self.data = data;
        tracing::debug!("Saved store under {:?}", self.key);
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &dyn KeyValueBackend {
        self.backend.as_ref()
    }

    pub fn data(&self) -> &StoreData {
        &self.data
    }

    pub fn accounts(&self) -> &[Account] {
        &self.data.accounts
    }

    /// All requests, newest first
    pub fn requests(&self) -> &[Request] {
        &self.data.requests
    }

    pub fn find_account(&self, email: &str) -> Option<&Account> {
        self.data.accounts.iter().find(|a| a.email == email)
    }

    pub fn find_request(&self, id: i64) -> Option<&Request> {
        self.data.requests.iter().find(|r| r.id == id)
    }

    /// Account matching email and password, only if verified
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Account> {
        self.data
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .filter(|a| a.verified)
    }

    /// Requests owned by `email` (exact match), newest first
    pub fn requests_for(&self, email: &str) -> Vec<&Request> {
        self.data
            .requests
            .iter()
            .filter(|r| r.email == email)
            .collect()
    }

    /// Requests whose owner email contains `query`, ignoring case
    pub fn search_requests(&self, query: &str) -> Vec<&Request> {
        let query = query.to_lowercase();
        self.data
            .requests
            .iter()
            .filter(|r| r.email.to_lowercase().contains(&query))
            .collect()
    }

    /// Append an account and persist. Email uniqueness is not checked.
    pub fn add_account(&mut self, account: Account) -> StorageResult<()> {
        tracing::info!("Adding account {} ({})", account.email, account.role);
        let mut data = self.data.clone();
        data.accounts.push(account);
        self.commit(data)
    }

    pub fn set_verified(&mut self, email: &str, verified: bool) -> StorageResult<()> {
        let mut data = self.data.clone();
        let account = data
            .accounts
            .iter_mut()
            .find(|a| a.email == email)
            .ok_or_else(|| StorageError::AccountNotFound(email.to_string()))?;

        account.verified = verified;
        self.commit(data)?;
        tracing::info!("Account {} verified={}", email, verified);
        Ok(())
    }

    /// Prepend a new pending request and persist, returning its id
    pub fn submit_request(
        &mut self,
        kind: impl Into<String>,
        items: Vec<LineItem>,
        email: impl Into<String>,
    ) -> StorageResult<i64> {
        let request = Request {
            id: self.next_request_id()?,
            kind: kind.into(),
            items,
            email: email.into(),
            status: RequestStatus::Pending,
        };
        let id = request.id;

        tracing::info!(
            "Request {} submitted by {} ({}, {} items)",
            id,
            request.email,
            request.kind,
            request.items.len()
        );
        let mut data = self.data.clone();
        data.requests.insert(0, request);
        self.commit(data)?;
        Ok(id)
    }

    /// Change the status of one request and persist
    pub fn set_status(&mut self, id: i64, status: RequestStatus) -> StorageResult<()> {
        let mut data = self.data.clone();
        let request = data
            .requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StorageError::RequestNotFound(id))?;

        tracing::info!("Request {} status {} -> {}", id, request.status, status);
        request.status = status;
        self.commit(data)
    }

    /// Current Unix milliseconds, bumped past the highest existing id
    fn next_request_id(&self) -> StorageResult<i64> {
        let now = Utc::now().timestamp_millis();
        let highest = self.data.requests.iter().map(|r| r.id).max();
        match highest {
            Some(max) if max >= now => max.checked_add(1).ok_or(StorageError::IdOverflow(max)),
            _ => Ok(now),
        }
    }

    pub fn stats(&self) -> StoreStats {
        let mut by_status = BTreeMap::new();
        for request in &self.data.requests {
            *by_status.entry(request.status.to_string()).or_insert(0) += 1;
        }

        StoreStats {
            accounts: self.data.accounts.len(),
            verified_accounts: self.data.accounts.iter().filter(|a| a.verified).count(),
            requests: self.data.requests.len(),
            by_status,
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("key", &self.key)
            .field("accounts", &self.data.accounts.len())
            .field("requests", &self.data.requests.len())
            .finish()
    }
}

/// Store counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    pub accounts: usize,
    pub verified_accounts: usize,
    pub requests: usize,
    pub by_status: BTreeMap<String, usize>,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "accounts={} (verified={}), requests={}",
            self.accounts, self.verified_accounts, self.requests
        )?;
        for (status, count) in &self.by_status {
            write!(f, ", {}={}", status.to_lowercase(), count)?;
        }
        Ok(())
    }
}
