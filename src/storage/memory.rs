//! In-memory persona storage
//!
//! Selections are grouped per user in a [`DashMap`]; ids come from one global
//! counter starting at 1. Everything is lost when the process exits.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use super::{NewPersona, PersonaRecord, PersonaStore, StoreResult};

pub struct MemoryStore {
    personas: DashMap<i64, Vec<PersonaRecord>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            personas: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored selections across all users
    pub fn len(&self) -> usize {
        self.personas.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonaStore for MemoryStore {
    async fn save_persona(&self, persona: NewPersona) -> StoreResult<PersonaRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = persona.into_record(id);
        self.personas
            .entry(record.user_id)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn personas_by_user(&self, user_id: i64) -> StoreResult<Vec<PersonaRecord>> {
        Ok(self
            .personas
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn selection(user_id: i64, persona: &str) -> NewPersona {
        NewPersona {
            user_id,
            persona_type: persona.to_string(),
            timestamp: "2024-03-01T12:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_global_and_sequential() {
        let store = MemoryStore::new();
        let a = store.save_persona(selection(1, "innovator")).await.unwrap();
        let b = store.save_persona(selection(2, "artist")).await.unwrap();
        let c = store.save_persona(selection(1, "athlete")).await.unwrap();

        assert_eq!((a.id, b.id, c.id), (1, 2, 3));
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_lookup_by_user_keeps_order() {
        let store = MemoryStore::new();
        store.save_persona(selection(1, "innovator")).await.unwrap();
        store.save_persona(selection(2, "artist")).await.unwrap();
        store.save_persona(selection(1, "athlete")).await.unwrap();

        let personas = store.personas_by_user(1).await.unwrap();
        let types: Vec<&str> = personas.iter().map(|p| p.persona_type.as_str()).collect();
        assert_eq!(types, vec!["innovator", "athlete"]);
    }

    #[tokio::test]
    async fn test_unknown_user_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.personas_by_user(99).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_saves_get_unique_ids() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.save_persona(selection(i % 3, "adventurer")).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
