//! Open form instances, one per mounted page
//!
//! Instances are never shared. Each form sits behind its own lock, so a
//! slow submission on one form never holds up another. When the registry
//! is full the oldest instance is dropped; abandoned drafts are not saved
//! anywhere.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::form::{FormDisplay, TransactionForm};
use crate::types::TransactionKind;

pub type FormId = String;

/// Handle to one open form
pub type SharedForm = Arc<Mutex<TransactionForm>>;

#[derive(Debug)]
pub struct FormRegistry {
    capacity: usize,
    forms: HashMap<FormId, SharedForm>,
    order: VecDeque<FormId>,
}

impl FormRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            forms: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Create a fresh form, returning its id and handle
    pub fn open(&mut self, kind: TransactionKind, display: FormDisplay) -> (FormId, SharedForm) {
        while self.forms.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.forms.remove(&oldest);
                    log::debug!("Evicted form {}", oldest);
                }
                None => break,
            }
        }

        let id = tradeweb_utils::generate_id();
        let form = Arc::new(Mutex::new(TransactionForm::new(kind, display)));
        self.forms.insert(id.clone(), Arc::clone(&form));
        self.order.push_back(id.clone());
        log::debug!("Opened {} form {} ({} open)", kind, id, self.forms.len());
        (id, form)
    }

    pub fn get(&self, id: &str) -> CoreResult<SharedForm> {
        self.forms
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::FormNotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::types::FieldPath;

    fn display() -> FormDisplay {
        FormDisplay {
            title: "Sales Transaction".to_string(),
            background_color: "#f0fdfa".to_string(),
            title_color: "#55c1ee".to_string(),
        }
    }

    #[tokio::test]
    async fn test_open_creates_independent_forms() {
        let mut registry = FormRegistry::new(8);
        let (a, _) = registry.open(TransactionKind::Sales, display());
        let (b, _) = registry.open(TransactionKind::Purchase, display());
        assert_ne!(a, b);

        let form_a = registry.get(&a).unwrap();
        form_a.lock().await.set_field(&FieldPath::Vendor, "Acme").unwrap();
        assert_eq!(form_a.lock().await.draft().vendor, "Acme");

        let form_b = registry.get(&b).unwrap();
        let form_b = form_b.lock().await;
        assert!(form_b.draft().vendor.is_empty());
        assert_eq!(form_b.kind(), TransactionKind::Purchase);
    }

    #[tokio::test]
    async fn test_open_returns_the_registered_handle() {
        let mut registry = FormRegistry::new(8);
        let (id, handle) = registry.open(TransactionKind::Sales, display());
        handle.lock().await.add_item();
        assert_eq!(registry.get(&id).unwrap().lock().await.draft().items.len(), 2);
    }

    #[tokio::test]
    async fn test_locked_form_does_not_block_others() {
        let mut registry = FormRegistry::new(8);
        let (a, _) = registry.open(TransactionKind::Sales, display());
        let (b, _) = registry.open(TransactionKind::Sales, display());

        let form_a = registry.get(&a).unwrap();
        let _held = form_a.lock().await;
        let form_b = registry.get(&b).unwrap();
        assert!(form_b.try_lock().is_ok());
        assert!(form_a.try_lock().is_err());
    }

    #[test]
    fn test_oldest_evicted_at_capacity() {
        let mut registry = FormRegistry::new(2);
        let (first, _) = registry.open(TransactionKind::Sales, display());
        let (second, _) = registry.open(TransactionKind::Sales, display());
        let (third, _) = registry.open(TransactionKind::Sales, display());

        assert!(registry.get(&first).is_err());
        assert!(registry.get(&second).is_ok());
        assert!(registry.get(&third).is_ok());
    }

    #[test]
    fn test_unknown_id() {
        let registry = FormRegistry::new(1);
        let err = registry.get("missing").unwrap_err();
        assert_eq!(err.code(), ErrorCode::FormNotFound);
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let mut registry = FormRegistry::new(0);
        let (first, _) = registry.open(TransactionKind::Sales, display());
        assert!(registry.get(&first).is_ok());
        let (second, _) = registry.open(TransactionKind::Sales, display());
        assert!(registry.get(&first).is_err());
        assert!(registry.get(&second).is_ok());
    }
}
