//! Process-local repositories backing the API until a document store is wired in.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{ApplicationId, ApplicationStatus, UserRecord};
use super::repository::{ApplicationRecord, ApplicationRepository, RepositoryError, UserRepository};

#[derive(Debug, Default, Clone)]
pub struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl InMemoryApplicationRepository {
    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ApplicationId, ApplicationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("application store poisoned".to_string()))
    }

    fn collect_newest_first<F>(&self, keep: F) -> Result<Vec<ApplicationRecord>, RepositoryError>
    where
        F: Fn(&ApplicationRecord) -> bool,
    {
        let guard = self.lock()?;
        let mut matches: Vec<ApplicationRecord> =
            guard.values().filter(|record| keep(record)).cloned().collect();
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matches)
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        match guard.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record)
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn by_email(&self, email: &str) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.collect_newest_first(|record| record.email().eq_ignore_ascii_case(email))
    }

    fn by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.collect_newest_first(|record| record.status == status)
    }

    fn all(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        self.collect_newest_first(|_| true)
    }

    fn delete(&self, id: &ApplicationId) -> Result<(), RepositoryError> {
        self.lock()?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

/// Users keyed by lower-cased e-mail.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<String, UserRecord>>>,
}

impl InMemoryUserRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, UserRecord>>, RepositoryError> {
        self.users
            .lock()
            .map_err(|_| RepositoryError::Unavailable("user store poisoned".to_string()))
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(self.lock()?.get(&email.to_ascii_lowercase()).cloned())
    }

    fn upsert(&self, user: UserRecord) -> Result<UserRecord, RepositoryError> {
        self.lock()?.insert(user.email.to_ascii_lowercase(), user.clone());
        Ok(user)
    }
}
