//! Fixture-backed query service.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{InitialPage, InitialQuery, PagedQuery, QueryService};
use crate::error::{Error, Result};
use crate::models::{
    AttachmentId, AttachmentRecord, Conditions, RecordId, SortDirection, SortField, SortSpec,
    VersionId,
};

/// Attachments of one parent record, as stored in a JSON fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fixture {
    pub parent_id: RecordId,
    pub media_base_url: String,
    #[serde(default)]
    pub records: Vec<AttachmentRecord>,
}

impl Fixture {
    pub fn from_json_str(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let payload = std::fs::read_to_string(path)?;
        Self::from_json_str(&payload)
    }
}

/// In-memory [`QueryService`] that filters, sorts and windows a record list.
#[derive(Debug)]
pub struct InMemoryQueryService {
    parent_id: RecordId,
    media_base_url: String,
    records: Mutex<Vec<AttachmentRecord>>,
    pending_failure: Mutex<Option<String>>,
}

impl InMemoryQueryService {
    pub fn new(
        parent_id: RecordId,
        media_base_url: impl Into<String>,
        records: Vec<AttachmentRecord>,
    ) -> Self {
        Self {
            parent_id,
            media_base_url: media_base_url.into(),
            records: Mutex::new(records),
            pending_failure: Mutex::new(None),
        }
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        Self::new(fixture.parent_id, fixture.media_base_url, fixture.records)
    }

    pub const fn parent_id(&self) -> &RecordId {
        &self.parent_id
    }

    /// Store a new attachment the way an upload would, returning its id.
    pub async fn upload(
        &self,
        title: impl Into<String>,
        size_bytes: u64,
        file_type: impl Into<String>,
    ) -> AttachmentId {
        let id = AttachmentId::generate();
        let record = AttachmentRecord::new(
            id.clone(),
            title,
            size_bytes,
            file_type,
            VersionId::new(format!("ver-{id}")),
        );
        self.records.lock().await.push(record);
        tracing::debug!(id = %id, "Stored uploaded attachment");
        id
    }

    /// Make the next request fail with the given message.
    pub async fn fail_next(&self, message: impl Into<String>) {
        *self.pending_failure.lock().await = Some(message.into());
    }

    async fn take_failure(&self) -> Result<()> {
        match self.pending_failure.lock().await.take() {
            Some(message) => Err(Error::Fetch(message)),
            None => Ok(()),
        }
    }

    async fn matching(
        &self,
        parent_id: &RecordId,
        conditions: &Conditions,
        sort: SortSpec,
    ) -> Vec<AttachmentRecord> {
        if parent_id != &self.parent_id {
            return Vec::new();
        }

        let mut matching: Vec<AttachmentRecord> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| conditions.matches(record.size_bytes))
            .cloned()
            .collect();
        matching.sort_by(|a, b| compare_records(a, b, sort));
        matching
    }
}

impl QueryService for InMemoryQueryService {
    async fn initial_fetch(&self, query: &InitialQuery) -> Result<InitialPage> {
        self.take_failure().await?;

        let matching = self
            .matching(&query.parent_id, &query.conditions, query.sort)
            .await;
        let total_count = matching.len();
        let records = matching.into_iter().take(query.page_size).collect();

        Ok(InitialPage {
            records,
            total_count,
            media_base_url: self.media_base_url.clone(),
        })
    }

    async fn fetch_by_ids(
        &self,
        parent_id: &RecordId,
        ids: &[AttachmentId],
    ) -> Result<Vec<AttachmentRecord>> {
        self.take_failure().await?;

        if parent_id != &self.parent_id {
            return Ok(Vec::new());
        }

        let records = self.records.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| records.iter().find(|record| &record.id == id).cloned())
            .collect())
    }

    async fn paged_fetch(&self, query: &PagedQuery) -> Result<Vec<AttachmentRecord>> {
        self.take_failure().await?;

        Ok(self
            .matching(&query.parent_id, &query.conditions, query.sort)
            .await
            .into_iter()
            .skip(query.offset)
            .take(query.page_size)
            .collect())
    }
}

fn compare_records(a: &AttachmentRecord, b: &AttachmentRecord, sort: SortSpec) -> Ordering {
    let ordering = match sort.field {
        SortField::CreatedDate => a.created_at.cmp(&b.created_at),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Size => a.size_bytes.unwrap_or(0).cmp(&b.size_bytes.unwrap_or(0)),
    }
    .then_with(|| a.id.cmp(&b.id));

    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SizeBucket;
    use pretty_assertions::assert_eq;

    fn record(id: &str, title: &str, created_at: i64, size_bytes: u64) -> AttachmentRecord {
        AttachmentRecord {
            id: AttachmentId::new(id).unwrap(),
            title: title.to_string(),
            created_at,
            size_bytes: Some(size_bytes),
            file_type: Some("pdf".to_string()),
            latest_version_id: VersionId::new(format!("v-{id}")),
        }
    }

    fn service() -> InMemoryQueryService {
        InMemoryQueryService::new(
            RecordId::new("500A").unwrap(),
            "https://media.example.com",
            vec![
                record("a", "beta", 1, 500),
                record("b", "Alpha", 2, 50 * 1024),
                record("c", "gamma", 3, 500 * 1024),
                record("d", "delta", 4, 20),
            ],
        )
    }

    fn ids(records: &[AttachmentRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    fn initial(conditions: Conditions, sort: SortSpec, page_size: usize) -> InitialQuery {
        InitialQuery {
            parent_id: RecordId::new("500A").unwrap(),
            conditions,
            page_size,
            sort,
        }
    }

    #[tokio::test]
    async fn initial_fetch_sorts_and_limits() {
        let page = service()
            .initial_fetch(&initial(Conditions::Unrestricted, SortSpec::default(), 3))
            .await
            .unwrap();

        assert_eq!(ids(&page.records), vec!["d", "c", "b"]);
        assert_eq!(page.total_count, 4);
        assert_eq!(page.media_base_url, "https://media.example.com");
    }

    #[tokio::test]
    async fn title_sort_is_case_insensitive() {
        let sort = SortSpec::new(SortField::Title, SortDirection::Ascending);
        let page = service()
            .initial_fetch(&initial(Conditions::Unrestricted, sort, 10))
            .await
            .unwrap();

        assert_eq!(ids(&page.records), vec!["b", "a", "d", "c"]);
    }

    #[tokio::test]
    async fn conditions_filter_by_bucket() {
        let conditions = Conditions::Buckets(vec![SizeBucket::Small]);
        let page = service()
            .initial_fetch(&initial(conditions, SortSpec::default(), 10))
            .await
            .unwrap();
        assert_eq!(ids(&page.records), vec!["d", "a"]);
        assert_eq!(page.total_count, 2);

        let empty = service()
            .initial_fetch(&initial(Conditions::Buckets(Vec::new()), SortSpec::default(), 10))
            .await
            .unwrap();
        assert_eq!(empty.total_count, 0);
    }

    #[tokio::test]
    async fn paged_fetch_windows_from_offset() {
        let query = PagedQuery {
            parent_id: RecordId::new("500A").unwrap(),
            conditions: Conditions::Unrestricted,
            page_size: 2,
            offset: 3,
            sort: SortSpec::default(),
        };
        let records = service().paged_fetch(&query).await.unwrap();

        assert_eq!(ids(&records), vec!["a"]);
    }

    #[tokio::test]
    async fn fetch_by_ids_preserves_request_order() {
        let service = service();
        let first = service.upload("scan.png", 4096, "PNG").await;
        let second = service.upload("notes.txt", 12, "TXT").await;

        let records = service
            .fetch_by_ids(service.parent_id(), &[second.clone(), first.clone()])
            .await
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, second);
        assert_eq!(records[1].id, first);
    }

    #[tokio::test]
    async fn other_parent_sees_nothing() {
        let mut query = initial(Conditions::Unrestricted, SortSpec::default(), 10);
        query.parent_id = RecordId::new("500B").unwrap();

        let page = service().initial_fetch(&query).await.unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.total_count, 0);
    }

    #[tokio::test]
    async fn fail_next_fails_exactly_once() {
        let service = service();
        service.fail_next("timed out").await;
        let query = initial(Conditions::Unrestricted, SortSpec::default(), 1);

        let error = service.initial_fetch(&query).await.unwrap_err();
        assert!(matches!(error, Error::Fetch(message) if message == "timed out"));
        assert!(service.initial_fetch(&query).await.is_ok());
    }

    #[test]
    fn fixture_parses_json() {
        let fixture = Fixture::from_json_str(
            r#"{
                "parent_id": "500A",
                "media_base_url": "https://media.example.com",
                "records": [
                    {"id": "069A", "title": "a.pdf", "created_at": 1, "size_bytes": 10,
                     "file_type": "PDF", "latest_version_id": "068A"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(fixture.records.len(), 1);
        assert!(Fixture::from_json_str(r#"{"parent_id": "500A"}"#).is_err());
    }
}
