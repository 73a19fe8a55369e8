//! Request submission form
//!
//! A category plus a dynamic list of editable (name, quantity) rows. Rows
//! carry a form-local id so any one of them can be removed independently.

use crate::session::Session;
use crate::storage::{LineItem, StorageError, Store};
use serde::Serialize;
use thiserror::Error;

/// Alert shown when the form is incomplete
pub const INCOMPLETE_FORM_MESSAGE: &str = "Please provide a category and at least one item.";

/// Quantity a new row starts with
pub const DEFAULT_QTY: &str = "1";

#[derive(Error, Debug)]
pub enum SubmitError {
    /// Nothing was written
    #[error("{0}")]
    Validation(String),

    #[error("No user is logged in")]
    NoSession,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// One editable line of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    pub row_id: u32,
    pub name: String,
    pub qty: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestForm {
    pub category: String,
    pub rows: Vec<ItemRow>,
    #[serde(skip)]
    next_row_id: u32,
}

impl Default for RequestForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestForm {
    /// Empty category with a single blank row
    pub fn new() -> Self {
        let mut form = Self {
            category: String::new(),
            rows: Vec::new(),
            next_row_id: 0,
        };
        form.add_item("", DEFAULT_QTY);
        form
    }

    /// Append a row, returning its id
    pub fn add_item(&mut self, name: impl Into<String>, qty: impl Into<String>) -> u32 {
        let row_id = self.next_row_id;
        self.next_row_id += 1;
        self.rows.push(ItemRow {
            row_id,
            name: name.into(),
            qty: qty.into(),
        });
        row_id
    }

    /// Remove a row. Returns false if no row has that id.
    pub fn remove_item(&mut self, row_id: u32) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.row_id != row_id);
        self.rows.len() != before
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_item_name(&mut self, row_id: u32, name: impl Into<String>) -> bool {
        match self.row_mut(row_id) {
            Some(row) => {
                row.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn set_item_qty(&mut self, row_id: u32, qty: impl Into<String>) -> bool {
        match self.row_mut(row_id) {
            Some(row) => {
                row.qty = qty.into();
                true
            }
            None => false,
        }
    }

    fn row_mut(&mut self, row_id: u32) -> Option<&mut ItemRow> {
        self.rows.iter_mut().find(|row| row.row_id == row_id)
    }

    /// Clear everything and leave one blank row
    pub fn reset(&mut self) {
        self.category.clear();
        self.rows.clear();
        self.add_item("", DEFAULT_QTY);
    }

    /// Rows whose name is not blank, as line items
    pub fn valid_items(&self) -> Vec<LineItem> {
        self.rows
            .iter()
            .filter(|row| !row.name.trim().is_empty())
            .map(|row| LineItem::new(row.name.clone(), row.qty.clone()))
            .collect()
    }

    /// Validate, store the request for the session's account, and reset
    pub fn submit(&mut self, store: &mut Store, session: &Session) -> Result<i64, SubmitError> {
        let account = session.current().ok_or(SubmitError::NoSession)?;

        let items = self.valid_items();
        if self.category.is_empty() || items.is_empty() {
            tracing::debug!(
                "Rejected submission: category={:?}, valid items={}",
                self.category,
                items.len()
            );
            return Err(SubmitError::Validation(INCOMPLETE_FORM_MESSAGE.to_string()));
        }

        let id = store.submit_request(self.category.clone(), items, account.email.clone())?;
        self.reset();
        Ok(id)
    }
}
