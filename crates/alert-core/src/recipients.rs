//! Notification recipient list.

use serde::{Deserialize, Serialize};

use crate::error::AlertError;

/// Insertion-ordered, deduplicated email addresses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipientList {
    addresses: Vec<String>,
}

impl RecipientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an address. Rejects addresses without an '@' and a '.', and
    /// addresses already present.
    pub fn add(&mut self, address: &str) -> Result<(), AlertError> {
        let address = address.trim();
        if !address.contains('@') || !address.contains('.') {
            return Err(AlertError::InvalidRecipient(address.to_string()));
        }
        if self.addresses.iter().any(|a| a == address) {
            return Err(AlertError::DuplicateRecipient(address.to_string()));
        }
        self.addresses.push(address.to_string());
        Ok(())
    }

    /// Remove an address by value. Returns false if absent.
    pub fn remove(&mut self, address: &str) -> bool {
        match self.addresses.iter().position(|a| a == address) {
            Some(idx) => {
                self.addresses.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove the address at `index` in insertion order.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index < self.addresses.len() {
            self.addresses.remove(index);
            true
        } else {
            false
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut list = RecipientList::new();
        list.add("b@example.com").unwrap();
        list.add("a@example.com").unwrap();

        assert_eq!(list.as_slice(), ["b@example.com", "a@example.com"]);
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut list = RecipientList::new();
        list.add("a@example.com").unwrap();

        assert_eq!(
            list.add("a@example.com"),
            Err(AlertError::DuplicateRecipient("a@example.com".to_string()))
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_rejects_malformed_addresses() {
        let mut list = RecipientList::new();
        assert!(matches!(
            list.add("not-an-email"),
            Err(AlertError::InvalidRecipient(_))
        ));
        assert!(matches!(
            list.add("missing-dot@example"),
            Err(AlertError::InvalidRecipient(_))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut list = RecipientList::new();
        list.add("a@example.com").unwrap();
        list.add("b@example.com").unwrap();

        assert!(list.remove("a@example.com"));
        assert!(!list.remove("a@example.com"));
        assert!(list.remove_at(0));
        assert!(!list.remove_at(0));
        assert!(list.is_empty());
    }
}
