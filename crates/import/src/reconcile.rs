//! Per-receipt review list and batch commit.
//!
//! Each parsed line becomes a [`ReconciliationEntry`] with a default action
//! derived from its conflict state. The user flips actions (or removes
//! entries) before the batch commit submits everything still marked
//! Add/Replace, one persistence call at a time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::match_engine::{find_matching_item, size_conflict};
use crate::normalize::convert_parsed_to_manual;
use crate::receipt::{parse_receipt_text, StoreFormat};
use larder_core::quantity::parse_quantity;
use larder_core::{InventoryItem, InventoryStore, ManualInventoryInput, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemAction {
    Add,
    Replace,
    Skip,
}

/// Pure mapping from conflict state to the initial action, kept separate
/// from matching so the state machine is testable in isolation.
pub fn default_action(conflict: Option<&str>) -> ItemAction {
    if conflict.is_some() {
        ItemAction::Skip
    } else {
        ItemAction::Add
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationEntry {
    pub item: ManualInventoryInput,
    pub action: ItemAction,
    pub matched: Option<InventoryItem>,
    pub conflict: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("no review entry at index {0}")]
    BadIndex(usize),
    #[error("replace requires a matched inventory item")]
    NoMatchForReplace,
    #[error("entry has no usable quantity: '{0}'")]
    BadQuantity(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct CommitFailure {
    pub name: String,
    pub error: String,
}

/// Outcome of one batch commit. Best-effort, no atomicity: every eligible
/// entry is attempted and all failures are collected here.
#[derive(Debug, Default)]
pub struct CommitReport {
    pub committed: usize,
    pub skipped: usize,
    pub failures: Vec<CommitFailure>,
}

impl CommitReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ReconcileSession {
    entries: Vec<ReconciliationEntry>,
}

impl ReconcileSession {
    /// Parse → normalize → match per receipt line, against the inventory
    /// snapshot the caller fetched. The snapshot is not re-read mid-pass;
    /// results reflect inventory as of the last fetch.
    pub fn from_receipt(text: &str, format: StoreFormat, inventory: &[InventoryItem]) -> Self {
        let entries = parse_receipt_text(text, format)
            .iter()
            .map(|parsed| {
                let item = convert_parsed_to_manual(parsed, inventory);
                let matched = find_matching_item(&item, inventory);
                let conflict = matched.and_then(|m| size_conflict(&item, m.item));
                let action = default_action(conflict.as_deref());
                if matched.is_none() {
                    tracing::debug!(name = %item.name, upc = ?item.upc, "no inventory match");
                }
                ReconciliationEntry {
                    item,
                    action,
                    matched: matched.map(|m| m.item.clone()),
                    conflict,
                }
            })
            .collect();
        ReconcileSession { entries }
    }

    pub fn entries(&self) -> &[ReconciliationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flip one entry's action. Replace is only legal when the entry has a
    /// matched inventory item.
    pub fn set_action(&mut self, index: usize, action: ItemAction) -> Result<(), ReconcileError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(ReconcileError::BadIndex(index))?;
        if action == ItemAction::Replace && entry.matched.is_none() {
            return Err(ReconcileError::NoMatchForReplace);
        }
        entry.action = action;
        Ok(())
    }

    /// Remove an entry from review unconditionally. No side effects.
    pub fn remove(&mut self, index: usize) -> Result<ReconciliationEntry, ReconcileError> {
        if index >= self.entries.len() {
            return Err(ReconcileError::BadIndex(index));
        }
        Ok(self.entries.remove(index))
    }

    /// "Add to current quantity": adjust the matched item's stock right
    /// now, bypassing the batch commit. On success the entry leaves the
    /// review list; on failure it stays so the user can retry.
    pub async fn add_to_current<S>(&mut self, index: usize, store: &S) -> Result<(), ReconcileError>
    where
        S: InventoryStore + ?Sized,
    {
        let entry = self.entries.get(index).ok_or(ReconcileError::BadIndex(index))?;
        let qty = parse_quantity(&entry.item.quantity_available)
            .ok_or_else(|| ReconcileError::BadQuantity(entry.item.quantity_available.clone()))?;

        store
            .adjust_quantity(entry.item.upc.as_deref(), &entry.item.name, qty)
            .await?;
        self.entries.remove(index);
        Ok(())
    }

    /// Submit every entry still in Add or Replace state, sequentially.
    ///
    /// Policy on partial failure: keep going, collect every failure in the
    /// report, and retain only the failed entries for retry. Skip entries
    /// are discarded without persistence. There is no rollback and no
    /// mid-batch cancellation.
    pub async fn commit<S>(&mut self, store: &S) -> CommitReport
    where
        S: InventoryStore + ?Sized,
    {
        let mut report = CommitReport::default();
        let mut retained = Vec::new();

        for entry in self.entries.drain(..) {
            match entry.action {
                ItemAction::Skip => report.skipped += 1,
                ItemAction::Add | ItemAction::Replace => {
                    let result = if entry.item.name.trim().is_empty() {
                        // Reject before touching the store.
                        Err(StoreError::MissingField("name"))
                    } else {
                        store.persist_new_item(&entry.item).await.map(|_id| ())
                    };
                    match result {
                        Ok(()) => report.committed += 1,
                        Err(err) => {
                            tracing::warn!(item = %entry.item.name, error = %err,
                                "failed to commit receipt item");
                            report.failures.push(CommitFailure {
                                name: entry.item.name.clone(),
                                error: err.to_string(),
                            });
                            retained.push(entry);
                        }
                    }
                }
            }
        }

        self.entries = retained;
        report
    }
}
