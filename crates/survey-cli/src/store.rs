//! JSON-file person store.
//!
//! File layout:
//!
//! ```json
//! { "people": [ { "id": 1, "name": "Ada", "aliases": ["<guid>"], "attributes": { "Key": "Value" } } ] }
//! ```
//!
//! Every attribute write re-reads the file, applies the single change, and
//! atomically replaces it, so other writers' changes to unrelated keys are
//! not lost and each write is durable on return.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use survey_core::{
    AttributeStore, AttributeValue, Person, PersonAliasId, PersonResolver, StoreError,
};
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct PeopleFile {
    #[serde(default)]
    people: Vec<PersonRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersonRecord {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    aliases: Vec<PersonAliasId>,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl PersonRecord {
    fn to_person(&self) -> Person {
        Person {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

pub struct JsonPersonStore {
    path: PathBuf,
    // Serializes this process's load-modify-save cycles.
    write_lock: Mutex<()>,
}

impl JsonPersonStore {
    /// Open the store at `path`. A missing file is treated as empty.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        };
        let file = store.load().await?;
        tracing::debug!(path = %store.path.display(), people = file.people.len(), "opened person store");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<PeopleFile, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "person store does not exist yet");
                Ok(PeopleFile::default())
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn save(&self, file: &PeopleFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(file)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl PersonResolver for JsonPersonStore {
    async fn resolve_by_alias(&self, alias: PersonAliasId) -> Result<Option<Person>, StoreError> {
        let file = self.load().await?;
        Ok(file
            .people
            .iter()
            .find(|record| record.aliases.contains(&alias))
            .map(PersonRecord::to_person))
    }
}

#[async_trait]
impl AttributeStore for JsonPersonStore {
    async fn set_attribute(
        &self,
        person: &Person,
        key: &str,
        value: &AttributeValue,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut file = self.load().await?;
        let record = file
            .people
            .iter_mut()
            .find(|record| record.id == person.id)
            .ok_or_else(|| StoreError::NotFound {
                entity_type: String::from("person"),
                id: person.id.to_string(),
            })?;
        record.attributes.insert(key.to_string(), value.as_stored());
        self.save(&file).await
    }
}

/// Attribute store that only logs what would be written.
#[derive(Default)]
pub struct DryRunStore {
    writes: AtomicUsize,
}

impl DryRunStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AttributeStore for DryRunStore {
    async fn set_attribute(
        &self,
        person: &Person,
        key: &str,
        value: &AttributeValue,
    ) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        tracing::info!(person_id = person.id, key, %value, "dry run: would set attribute");
        Ok(())
    }
}
