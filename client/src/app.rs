//! Phonebook state and the create-or-replace submission flow.
//!
//! The contact list here is a local cache of the store. Every mutation goes
//! through the remote service first, and the cache is corrected from the
//! outcome: appended on create, replaced in place on update, and evicted
//! when the store reports the entry is already gone.

use persons::{Person, PersonFields};

use crate::{
    notification::{Notification, Notifier, Severity},
    service::{PersonService, ServiceError},
};

/// Interactive yes/no gate for destructive submissions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

pub struct Phonebook<S> {
    service: S,
    persons: Vec<Person>,
    pub new_name: String,
    pub new_number: String,
    pub search: String,
    notifier: Notifier,
}

impl<S: PersonService> Phonebook<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            persons: Vec::new(),
            new_name: String::new(),
            new_number: String::new(),
            search: String::new(),
            notifier: Notifier::default(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ServiceError> {
        self.persons = self.service.get_all().await?;

        Ok(())
    }

    /// Submit the form: create a new entry, or replace the number of the
    /// entry already carrying that name after confirmation.
    pub async fn submit(&mut self, confirm: &mut impl Confirm) {
        let fields = PersonFields {
            name: self.new_name.clone(),
            number: self.new_number.clone(),
        };

        // Exact match: retyping a name with different casing creates a
        // second entry.
        let existing = self
            .persons
            .iter()
            .find(|person| person.name == fields.name)
            .cloned();

        match existing {
            None => self.create(fields).await,
            Some(person) => {
                let prompt = format!(
                    "{} is already added to phonebook, replace the old number with a new one?",
                    person.name
                );
                if confirm.confirm(&prompt) {
                    self.replace_number(person, fields).await;
                }
            }
        }
    }

    async fn create(&mut self, fields: PersonFields) {
        match self.service.create(fields).await {
            Ok(created) => {
                self.notifier
                    .set(format!("Added {}", created.name), Severity::Success);
                self.persons.push(created);
                self.clear_form();
            }
            Err(error) => self.notifier.set(error.to_string(), Severity::Error),
        }
    }

    async fn replace_number(&mut self, existing: Person, fields: PersonFields) {
        match self.service.update(&existing.id, fields).await {
            Ok(updated) => {
                if let Some(entry) = self.persons.iter_mut().find(|person| person.id == updated.id)
                {
                    *entry = updated.clone();
                }
                self.notifier
                    .set(format!("Updated {}'s number", updated.name), Severity::Success);
                self.clear_form();
            }
            Err(ServiceError::NotFound) => {
                // Deleted concurrently; the cached entry is stale.
                self.persons.retain(|person| person.id != existing.id);
                self.notifier.set(
                    format!(
                        "Information of {} has already been removed from server",
                        existing.name
                    ),
                    Severity::Error,
                );
            }
            Err(error) => self.notifier.set(error.to_string(), Severity::Error),
        }
    }

    pub async fn delete(&mut self, id: &str, confirm: &mut impl Confirm) {
        let Some(person) = self.persons.iter().find(|person| person.id == id).cloned() else {
            return;
        };

        if !confirm.confirm(&format!("Delete {} ?", person.name)) {
            return;
        }

        match self.service.remove(&person.id).await {
            Ok(()) => {
                self.persons.retain(|entry| entry.id != person.id);
                self.notifier
                    .set(format!("Deleted {}", person.name), Severity::Success);
            }
            Err(ServiceError::NotFound) => {
                // Already gone on the store; converge to "entry absent".
                self.persons.retain(|entry| entry.id != person.id);
                self.notifier.set(
                    format!(
                        "Information of {} has already been removed from server",
                        person.name
                    ),
                    Severity::Error,
                );
            }
            Err(error) => self.notifier.set(error.to_string(), Severity::Error),
        }
    }

    pub fn visible(&self) -> Vec<&Person> {
        let needle = self.search.to_lowercase();

        self.persons
            .iter()
            .filter(|person| person.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    fn clear_form(&mut self) {
        self.new_name.clear();
        self.new_number.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use persons::{Person, PersonFields};

    use super::{Confirm, Phonebook};
    use crate::{
        notification::Severity,
        service::{PersonService, ServiceError},
    };

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Create(PersonFields),
        Update(String, PersonFields),
        Remove(String),
    }

    #[derive(Default)]
    struct FakeService {
        calls: Mutex<Vec<Call>>,
        reject_create: Option<String>,
        missing_on_update: bool,
        missing_on_remove: bool,
    }

    #[async_trait]
    impl PersonService for FakeService {
        async fn get_all(&self) -> Result<Vec<Person>, ServiceError> {
            Ok(Vec::new())
        }

        async fn create(&self, fields: PersonFields) -> Result<Person, ServiceError> {
            self.calls.lock().unwrap().push(Call::Create(fields.clone()));

            if let Some(message) = &self.reject_create {
                return Err(ServiceError::Rejected(message.clone()));
            }

            Ok(Person {
                id: "7".to_string(),
                name: fields.name,
                number: fields.number,
            })
        }

        async fn update(&self, id: &str, fields: PersonFields) -> Result<Person, ServiceError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Update(id.to_string(), fields.clone()));

            if self.missing_on_update {
                return Err(ServiceError::NotFound);
            }

            Ok(Person {
                id: id.to_string(),
                name: fields.name,
                number: fields.number,
            })
        }

        async fn remove(&self, id: &str) -> Result<(), ServiceError> {
            self.calls.lock().unwrap().push(Call::Remove(id.to_string()));

            if self.missing_on_remove {
                return Err(ServiceError::NotFound);
            }

            Ok(())
        }
    }

    struct Always(bool);

    impl Confirm for Always {
        fn confirm(&mut self, _prompt: &str) -> bool {
            self.0
        }
    }

    fn person(id: &str, name: &str, number: &str) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
            number: number.to_string(),
        }
    }

    fn phonebook_with(service: FakeService, persons: Vec<Person>) -> Phonebook<FakeService> {
        let mut phonebook = Phonebook::new(service);
        phonebook.persons = persons;
        phonebook
    }

    fn fill_form(phonebook: &mut Phonebook<FakeService>, name: &str, number: &str) {
        phonebook.new_name = name.to_string();
        phonebook.new_number = number.to_string();
    }

    #[tokio::test]
    async fn test_new_name_issues_a_create() {
        let mut phonebook = phonebook_with(
            FakeService::default(),
            vec![person("1", "Arto Hellas", "12-3456789")],
        );
        fill_form(&mut phonebook, "Ada Lovelace", "39-44-5323523");

        phonebook.submit(&mut Always(true)).await;

        let calls = phonebook.service.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![Call::Create(PersonFields {
                name: "Ada Lovelace".to_string(),
                number: "39-44-5323523".to_string(),
            })]
        );

        assert_eq!(phonebook.persons.len(), 2);
        assert!(phonebook.persons.iter().any(|p| p.name == "Ada Lovelace"));
        assert_eq!(phonebook.new_name, "");
        assert_eq!(phonebook.new_number, "");

        let notification = phonebook.notification().unwrap();
        assert_eq!(notification.message, "Added Ada Lovelace");
        assert_eq!(notification.severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_duplicate_name_updates_the_existing_entry() {
        let mut phonebook = phonebook_with(
            FakeService::default(),
            vec![
                person("1", "Arto Hellas", "12-3456789"),
                person("2", "Ada Lovelace", "39-4453235"),
            ],
        );
        fill_form(&mut phonebook, "Arto Hellas", "99-9999999");

        phonebook.submit(&mut Always(true)).await;

        let calls = phonebook.service.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![Call::Update(
                "1".to_string(),
                PersonFields {
                    name: "Arto Hellas".to_string(),
                    number: "99-9999999".to_string(),
                }
            )]
        );

        assert_eq!(phonebook.persons.len(), 2);
        let entry = phonebook.persons.iter().find(|p| p.id == "1").unwrap();
        assert_eq!(entry.number, "99-9999999");
        assert_eq!(phonebook.new_name, "");

        assert_eq!(
            phonebook.notification().unwrap().message,
            "Updated Arto Hellas's number"
        );
    }

    #[tokio::test]
    async fn test_declined_replacement_issues_no_call() {
        let mut phonebook = phonebook_with(
            FakeService::default(),
            vec![person("1", "Arto Hellas", "12-3456789")],
        );
        fill_form(&mut phonebook, "Arto Hellas", "99-9999999");

        phonebook.submit(&mut Always(false)).await;

        assert!(phonebook.service.calls.lock().unwrap().is_empty());
        assert_eq!(phonebook.persons[0].number, "12-3456789");
        assert_eq!(phonebook.new_number, "99-9999999");
        assert!(phonebook.notification().is_none());
    }

    #[tokio::test]
    async fn test_names_differing_in_case_are_distinct_entries() {
        let mut phonebook = phonebook_with(
            FakeService::default(),
            vec![person("1", "Arto Hellas", "12-3456789")],
        );
        fill_form(&mut phonebook, "arto hellas", "99-9999999");

        phonebook.submit(&mut Always(true)).await;

        let calls = phonebook.service.calls.lock().unwrap().clone();
        assert!(matches!(calls.as_slice(), [Call::Create(_)]));
    }

    #[tokio::test]
    async fn test_replacing_a_remotely_deleted_entry_evicts_it() {
        let service = FakeService {
            missing_on_update: true,
            ..FakeService::default()
        };
        let mut phonebook = phonebook_with(
            service,
            vec![
                person("1", "Arto Hellas", "12-3456789"),
                person("2", "Ada Lovelace", "39-4453235"),
            ],
        );
        fill_form(&mut phonebook, "Arto Hellas", "99-9999999");

        phonebook.submit(&mut Always(true)).await;

        assert!(phonebook.persons.iter().all(|p| p.id != "1"));
        assert_eq!(phonebook.persons.len(), 1);

        let notification = phonebook.notification().unwrap();
        assert_eq!(
            notification.message,
            "Information of Arto Hellas has already been removed from server"
        );
        assert_eq!(notification.severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_rejected_create_leaves_state_and_form_alone() {
        let service = FakeService {
            reject_create: Some(
                "Person validation failed: number: Path `number` (`123`) is shorter than the minimum allowed length (8)".to_string(),
            ),
            ..FakeService::default()
        };
        let mut phonebook = phonebook_with(service, Vec::new());
        fill_form(&mut phonebook, "Ada Lovelace", "123");

        phonebook.submit(&mut Always(true)).await;

        assert!(phonebook.persons.is_empty());
        assert_eq!(phonebook.new_name, "Ada Lovelace");

        let notification = phonebook.notification().unwrap();
        assert!(notification.message.contains("shorter than the minimum allowed length"));
        assert_eq!(notification.severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_the_entry() {
        let mut phonebook = phonebook_with(
            FakeService::default(),
            vec![person("1", "Arto Hellas", "12-3456789")],
        );

        phonebook.delete("1", &mut Always(true)).await;

        assert_eq!(
            phonebook.service.calls.lock().unwrap().clone(),
            vec![Call::Remove("1".to_string())]
        );
        assert!(phonebook.persons.is_empty());
        assert_eq!(
            phonebook.notification().unwrap().message,
            "Deleted Arto Hellas"
        );
    }

    #[tokio::test]
    async fn test_declined_delete_leaves_the_entry() {
        let mut phonebook = phonebook_with(
            FakeService::default(),
            vec![person("1", "Arto Hellas", "12-3456789")],
        );

        phonebook.delete("1", &mut Always(false)).await;

        assert!(phonebook.service.calls.lock().unwrap().is_empty());
        assert_eq!(phonebook.persons.len(), 1);
    }

    #[tokio::test]
    async fn test_deleting_a_remotely_deleted_entry_still_removes_it() {
        let service = FakeService {
            missing_on_remove: true,
            ..FakeService::default()
        };
        let mut phonebook = phonebook_with(
            service,
            vec![person("1", "Arto Hellas", "12-3456789")],
        );

        phonebook.delete("1", &mut Always(true)).await;

        assert!(phonebook.persons.is_empty());
        assert_eq!(
            phonebook.notification().unwrap().message,
            "Information of Arto Hellas has already been removed from server"
        );
    }

    #[tokio::test]
    async fn test_visible_filters_case_insensitively() {
        let mut phonebook = phonebook_with(
            FakeService::default(),
            vec![
                person("1", "Arto Hellas", "12-3456789"),
                person("2", "Ada Lovelace", "39-4453235"),
            ],
        );
        phonebook.search = "ARTO".to_string();

        let visible = phonebook.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Arto Hellas");

        phonebook.search.clear();
        assert_eq!(phonebook.visible().len(), 2);
    }
}
