use super::types::{Enrichment, EnrichmentKind, Message};
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Shared in-memory transcript of the session. Clones share the same
/// underlying store.
#[derive(Debug, Clone)]
pub struct MessageStorage {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageStorage {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn add(&self, message: Message) {
        self.messages.write().push(message);
    }

    pub fn get(&self, id: Uuid) -> Option<Message> {
        self.messages.read().iter().find(|m| m.id == id).cloned()
    }

    pub fn get_all(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    /// Attach an enrichment to a message. Refuses to overwrite an existing
    /// one; returns whether the attachment happened.
    pub fn attach_enrichment(&self, id: Uuid, enrichment: Enrichment) -> bool {
        let mut messages = self.messages.write();
        match messages.iter_mut().find(|m| m.id == id) {
            Some(message) if message.enrichment.is_none() => {
                message.enrichment = Some(enrichment);
                true
            }
            _ => false,
        }
    }

    /// Kind of the enrichment already attached to a message, if any
    pub fn enrichment_kind(&self, id: Uuid) -> Option<EnrichmentKind> {
        self.messages
            .read()
            .iter()
            .find(|m| m.id == id)
            .and_then(|m| m.enrichment.as_ref().map(|e| e.kind()))
    }

    /// Toggle the visibility of a message's enrichment panel. Returns the
    /// new visibility, or None when no enrichment is attached.
    pub fn toggle_enrichment(&self, id: Uuid) -> Option<bool> {
        let mut messages = self.messages.write();
        messages
            .iter_mut()
            .find(|m| m.id == id)
            .and_then(|m| m.enrichment.as_mut().map(|e| e.toggle()))
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageStorage {
    fn default() -> Self {
        Self::new()
    }
}
