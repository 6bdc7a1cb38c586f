//! In-memory collaborators for engine tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use survey_client::{ClientError, Lookback, SurveyPage};
use survey_core::{
    Answer, AttributeStore, AttributeValue, Person, PersonAliasId, PersonResolver, ProgressSink,
    QuestionAnswer, StoreError, SurveyResponse,
};
use tokio::time::Instant;

use crate::source::PageSource;

pub const ALIAS: &str = "6f1c2a8e-0c4b-4d0e-9a53-3c2d1e4f5a6b";
pub const OTHER_ALIAS: &str = "0b7d9c1e-2f3a-4b5c-8d6e-7f8091a2b3c4";

pub fn response(alias: Option<&str>, answers: Vec<(i64, Answer)>) -> SurveyResponse {
    SurveyResponse {
        id: Some(1),
        status: String::from("Complete"),
        person_alias: alias.map(str::to_string),
        answers: answers
            .into_iter()
            .map(|(question_id, answer)| QuestionAnswer {
                question_id,
                answer,
            })
            .collect(),
    }
}

pub fn page(page_number: u32, total_pages: u32, responses: Vec<SurveyResponse>) -> SurveyPage {
    SurveyPage {
        page_number,
        total_pages,
        total_count: i64::try_from(responses.len()).unwrap_or_default(),
        responses,
    }
}

// ── Person directory ───────────────────────────────────────────────

/// Person resolver and attribute store backed by hash maps.
#[derive(Default)]
pub struct MemoryDirectory {
    aliases: Mutex<HashMap<PersonAliasId, i64>>,
    attributes: Mutex<HashMap<i64, BTreeMap<String, String>>>,
    writes: Mutex<Vec<(i64, String, String)>>,
    failing_keys: Mutex<HashSet<String>>,
}

impl MemoryDirectory {
    pub fn with_person(id: i64, alias: &str) -> Self {
        let directory = Self::default();
        directory.add_person(id, alias);
        directory
    }

    pub fn add_person(&self, id: i64, alias: &str) {
        let alias: PersonAliasId = alias.parse().unwrap();
        self.aliases.lock().unwrap().insert(alias, id);
    }

    pub fn fail_on_key(&self, key: &str) {
        self.failing_keys.lock().unwrap().insert(key.to_string());
    }

    pub fn attribute(&self, person_id: i64, key: &str) -> Option<String> {
        self.attributes
            .lock()
            .unwrap()
            .get(&person_id)
            .and_then(|attrs| attrs.get(key).cloned())
    }

    pub fn attributes(&self, person_id: i64) -> BTreeMap<String, String> {
        self.attributes
            .lock()
            .unwrap()
            .get(&person_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl PersonResolver for MemoryDirectory {
    async fn resolve_by_alias(&self, alias: PersonAliasId) -> Result<Option<Person>, StoreError> {
        Ok(self.aliases.lock().unwrap().get(&alias).map(|&id| Person {
            id,
            name: format!("Person {id}"),
        }))
    }
}

#[async_trait]
impl AttributeStore for MemoryDirectory {
    async fn set_attribute(
        &self,
        person: &Person,
        key: &str,
        value: &AttributeValue,
    ) -> Result<(), StoreError> {
        if self.failing_keys.lock().unwrap().contains(key) {
            return Err(StoreError::Other(anyhow::anyhow!("write to '{key}' rejected")));
        }
        let stored = value.as_stored();
        self.attributes
            .lock()
            .unwrap()
            .entry(person.id)
            .or_default()
            .insert(key.to_string(), stored.clone());
        self.writes
            .lock()
            .unwrap()
            .push((person.id, key.to_string(), stored));
        Ok(())
    }
}

// ── Progress ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingProgress {
    messages: Mutex<Vec<String>>,
}

impl RecordingProgress {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

// ── Page source ────────────────────────────────────────────────────

pub enum Scripted {
    Page(SurveyPage),
    ApiError(u16),
    /// Body that is not a response envelope.
    Undecodable,
}

/// A recorded `fetch_page` call.
#[derive(Debug, Clone, Copy)]
pub struct Call {
    pub survey_id: u64,
    pub page: u32,
    pub at: Instant,
}

/// Page source that replays scripted pages keyed by `(survey, page)`.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<HashMap<(u64, u32), Scripted>>,
    calls: Mutex<Vec<Call>>,
    lookbacks: Mutex<Vec<Lookback>>,
}

impl ScriptedSource {
    pub fn with_page(self, survey_id: u64, page: SurveyPage) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert((survey_id, page.page_number), Scripted::Page(page));
        self
    }

    pub fn with_page_at(self, survey_id: u64, requested: u32, page: SurveyPage) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert((survey_id, requested), Scripted::Page(page));
        self
    }

    pub fn with_error(self, survey_id: u64, page: u32, status: u16) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert((survey_id, page), Scripted::ApiError(status));
        self
    }

    pub fn with_undecodable(self, survey_id: u64, page: u32) -> Self {
        self.script
            .lock()
            .unwrap()
            .insert((survey_id, page), Scripted::Undecodable);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn pages_requested(&self, survey_id: u64) -> Vec<u32> {
        self.calls()
            .into_iter()
            .filter(|call| call.survey_id == survey_id)
            .map(|call| call.page)
            .collect()
    }

    pub fn lookbacks(&self) -> Vec<Lookback> {
        self.lookbacks.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(
        &self,
        survey_id: u64,
        page: u32,
        lookback: &Lookback,
    ) -> Result<SurveyPage, ClientError> {
        self.calls.lock().unwrap().push(Call {
            survey_id,
            page,
            at: Instant::now(),
        });
        self.lookbacks.lock().unwrap().push(*lookback);

        match self.script.lock().unwrap().get(&(survey_id, page)) {
            Some(Scripted::Page(scripted)) => Ok(scripted.clone()),
            Some(Scripted::ApiError(status)) => Err(ClientError::Api {
                status: *status,
                description: String::from("scripted failure"),
            }),
            Some(Scripted::Undecodable) => Err(ClientError::Decode(
                serde_json::from_str::<u8>("<html>").unwrap_err(),
            )),
            None => Ok(crate::test_support::page(page, page, Vec::new())),
        }
    }
}
