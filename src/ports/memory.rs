//! In-Memory-Kollaborateure.

use super::{BlobStore, FileId, FormStore, IdentityProvider, SubmissionId, User};
use crate::error::PortError;
use indexmap::IndexMap;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct StoredSubmission {
    form_id: String,
    content: String,
}

/// Formular- und Submission-Speicher im Arbeitsspeicher.
#[derive(Debug, Default)]
pub struct MemoryFormStore {
    forms: HashMap<String, String>,
    share_urls: HashMap<String, String>,
    submissions: IndexMap<SubmissionId, StoredSubmission>,
    next_submission: u64,
}

impl MemoryFormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Veröffentlicht ein gespeichertes Formular und liefert seine Share-URL.
    pub fn publish(&mut self, form_id: &str) -> Result<String, PortError> {
        if !self.forms.contains_key(form_id) {
            return Err(PortError::NotFound(form_id.to_string()));
        }
        if let Some((url, _)) = self.share_urls.iter().find(|(_, id)| *id == form_id) {
            return Ok(url.clone());
        }
        let url = uuid::Uuid::new_v4().to_string();
        self.share_urls.insert(url.clone(), form_id.to_string());
        log::info!("Formular {} veröffentlicht unter {}", form_id, url);
        Ok(url)
    }

    /// Alle Submissions eines Formulars in Eingangsreihenfolge.
    pub fn submissions_of(&self, form_id: &str) -> Vec<(&str, &str)> {
        self.submissions
            .iter()
            .filter(|(_, s)| s.form_id == form_id)
            .map(|(id, s)| (id.as_str(), s.content.as_str()))
            .collect()
    }

    fn submission(&self, form_id: &str, submission_id: &str) -> Result<&StoredSubmission, PortError> {
        self.submissions
            .get(submission_id)
            .filter(|s| s.form_id == form_id)
            .ok_or_else(|| PortError::NotFound(format!("{form_id}/{submission_id}")))
    }
}

impl FormStore for MemoryFormStore {
    fn save_form(&mut self, form_id: &str, content: &str) -> Result<(), PortError> {
        self.forms.insert(form_id.to_string(), content.to_string());
        Ok(())
    }

    fn load_form(&self, form_id: &str) -> Result<String, PortError> {
        self.forms
            .get(form_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(form_id.to_string()))
    }

    fn submit(&mut self, form_url: &str, content: &str) -> Result<SubmissionId, PortError> {
        let form_id = self
            .share_urls
            .get(form_url)
            .cloned()
            .ok_or_else(|| PortError::NotFound(form_url.to_string()))?;
        self.next_submission += 1;
        let id = self.next_submission.to_string();
        self.submissions.insert(
            id.clone(),
            StoredSubmission {
                form_id,
                content: content.to_string(),
            },
        );
        Ok(id)
    }

    fn load_submission(&self, form_id: &str, submission_id: &str) -> Result<String, PortError> {
        self.submission(form_id, submission_id)
            .map(|s| s.content.clone())
    }

    fn update_submission(
        &mut self,
        form_id: &str,
        submission_id: &str,
        content: &str,
    ) -> Result<(), PortError> {
        self.submission(form_id, submission_id)?;
        if let Some(stored) = self.submissions.get_mut(submission_id) {
            stored.content = content.to_string();
        }
        Ok(())
    }
}

/// Identität mit festem Benutzer (oder anonym).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<User>,
}

impl StaticIdentity {
    /// Kein angemeldeter Benutzer.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}

/// Blob-Speicher im Arbeitsspeicher.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<FileId, (String, Vec<u8>)>,
    reject_reason: Option<String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Speicher, der jeden Upload mit `reason` ablehnt.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            blobs: HashMap::new(),
            reject_reason: Some(reason.into()),
        }
    }

    /// Inhalt und MIME-Typ einer Datei.
    pub fn get(&self, file_id: &str) -> Option<(&str, &[u8])> {
        self.blobs
            .get(file_id)
            .map(|(mime, bytes)| (mime.as_str(), bytes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn upload(&mut self, bytes: &[u8], mime: &str) -> Result<FileId, PortError> {
        if let Some(reason) = &self.reject_reason {
            return Err(PortError::UploadRejected(reason.clone()));
        }
        let id = uuid::Uuid::new_v4().to_string();
        self.blobs
            .insert(id.clone(), (mime.to_string(), bytes.to_vec()));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_published_form() {
        let mut store = MemoryFormStore::new();
        store.save_form("f1", "{}").unwrap();
        assert_eq!(
            store.submit("nope", "{}"),
            Err(PortError::NotFound("nope".into()))
        );

        let url = store.publish("f1").unwrap();
        assert_eq!(store.publish("f1").unwrap(), url);
        let id = store.submit(&url, r#"{"a":"1"}"#).unwrap();
        assert_eq!(store.load_submission("f1", &id).unwrap(), r#"{"a":"1"}"#);
        assert!(store.load_submission("other", &id).is_err());
    }

    #[test]
    fn update_submission_overwrites_content() {
        let mut store = MemoryFormStore::new();
        store.save_form("f1", "{}").unwrap();
        let url = store.publish("f1").unwrap();
        let id = store.submit(&url, "{}").unwrap();
        store.update_submission("f1", &id, r#"{"a":"2"}"#).unwrap();
        assert_eq!(store.submissions_of("f1"), vec![(id.as_str(), r#"{"a":"2"}"#)]);
    }

    #[test]
    fn blob_store_keeps_bytes_and_can_reject() {
        let mut blobs = MemoryBlobStore::new();
        let id = blobs.upload(b"abc", "text/plain").unwrap();
        assert_eq!(blobs.get(&id), Some(("text/plain", &b"abc"[..])));

        let mut rejecting = MemoryBlobStore::rejecting("Quota");
        assert_eq!(
            rejecting.upload(b"abc", "text/plain"),
            Err(PortError::UploadRejected("Quota".into()))
        );
    }

    #[test]
    fn static_identity() {
        assert!(StaticIdentity::anonymous().current_user().is_none());
        let user = User::new("u1", "a@b.de");
        assert_eq!(
            StaticIdentity::signed_in(user.clone()).current_user(),
            Some(user)
        );
    }
}
