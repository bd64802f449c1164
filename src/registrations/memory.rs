use std::sync::Mutex;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use super::repo::{RegistrationStore, StoreError};
use super::repo_types::{InsertOutcome, NewRegistration, Registration};

/// In-process store with the same conflict semantics as the Postgres table.
/// Each insert is stamped one second after the previous one so ordering is observable.
pub struct MemoryRegistrationStore {
    inner: Mutex<Inner>,
}

struct Inner {
    rows: Vec<Registration>,
    next_id: i32,
    clock: PrimitiveDateTime,
}

impl MemoryRegistrationStore {
    pub fn new() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            inner: Mutex::new(Inner {
                rows: Vec::new(),
                next_id: 1,
                clock: PrimitiveDateTime::new(now.date(), now.time()),
            }),
        }
    }

    pub fn row_count(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn find_by_email(&self, email: &str) -> Option<Registration> {
        self.lock().rows.iter().find(|r| r.email == email).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryRegistrationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistrationStore for MemoryRegistrationStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, new: &NewRegistration) -> Result<InsertOutcome, StoreError> {
        let mut inner = self.lock();
        if inner.rows.iter().any(|r| r.email == new.email) {
            return Ok(InsertOutcome::Duplicate);
        }

        inner.clock += Duration::seconds(1);
        let created = Registration {
            id: inner.next_id,
            name: new.name.clone(),
            email: new.email.clone(),
            registered_at: inner.clock,
        };
        inner.next_id += 1;
        inner.rows.push(created.clone());
        Ok(InsertOutcome::Created(created))
    }

    async fn list_newest_first(&self) -> Result<Vec<Registration>, StoreError> {
        let mut rows = self.lock().rows.clone();
        rows.sort_by(|a, b| {
            b.registered_at
                .cmp(&a.registered_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_registration(name: &str, email: &str) -> NewRegistration {
        NewRegistration {
            name: name.into(),
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn second_insert_of_same_email_is_duplicate() {
        let store = MemoryRegistrationStore::new();

        let first = store
            .insert(&new_registration("Alice", "a@example.com"))
            .await
            .unwrap();
        assert!(matches!(first, InsertOutcome::Created(ref r) if r.id == 1));

        let second = store
            .insert(&new_registration("Bob", "a@example.com"))
            .await
            .unwrap();
        assert_eq!(second, InsertOutcome::Duplicate);
        assert_eq!(store.row_count(), 1);
        assert_eq!(store.find_by_email("a@example.com").unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn concurrent_inserts_create_exactly_one_row() {
        let store = Arc::new(MemoryRegistrationStore::new());
        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .insert(&new_registration(&format!("n{i}"), "same@example.com"))
                    .await
            }));
        }

        let mut created = 0;
        for task in tasks {
            if let InsertOutcome::Created(_) = task.await.unwrap().unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.row_count(), 1);
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let store = MemoryRegistrationStore::new();
        for (name, email) in [("A", "a@x.io"), ("B", "b@x.io"), ("C", "c@x.io")] {
            store.insert(&new_registration(name, email)).await.unwrap();
        }

        let names: Vec<_> = store
            .list_newest_first()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["C", "B", "A"]);
    }
}
