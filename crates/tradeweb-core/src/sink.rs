//! Where submissions go, and what the user is told

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::item::Item;
use crate::transaction::Transaction;
use crate::types::TransactionKind;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Form submitted successfully";
pub const VALIDATION_FAILED_MESSAGE: &str = "validation errors";
pub const SINK_FAILED_MESSAGE: &str = "Submission failed";

/// Payload handed to the result sink after a successful submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub title: String,
    pub kind: TransactionKind,
    pub vendor: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub items: Vec<Item>,
    pub grand_total: Decimal,
}

impl Submission {
    pub fn new(title: impl Into<String>, kind: TransactionKind, transaction: Transaction) -> Self {
        Self {
            title: title.into(),
            kind,
            vendor: transaction.vendor,
            date: transaction.date,
            reference: transaction.reference,
            items: transaction.items,
            grand_total: transaction.grand_total,
        }
    }
}

/// Receiver of validated submissions
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn deliver(&self, submission: &Submission) -> CoreResult<()>;
}

/// Sink that writes each submission to the log
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl ResultSink for LogSink {
    async fn deliver(&self, submission: &Submission) -> CoreResult<()> {
        let payload = serde_json::to_string(submission)?;
        log::info!(
            target: "tradeweb::submission",
            "Submitted data at {}: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            payload
        );
        Ok(())
    }
}

/// Sink that keeps submissions in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    submissions: Mutex<Vec<Submission>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Submission> {
        self.submissions().pop()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn deliver(&self, submission: &Submission) -> CoreResult<()> {
        let mut guard = self.submissions.lock().map_err(|e| CoreError::Sink {
            message: e.to_string(),
        })?;
        guard.push(submission.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// Coarse, transient signal for the user; never carries field detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}
