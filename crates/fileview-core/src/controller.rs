//! Gallery controller.
//!
//! Owns the [`GalleryState`] and drives it from user actions: every action
//! becomes a [`PendingFetch`] tagged with a [`RequestToken`], the fetch is
//! executed against the [`QueryService`], and the response is applied only if
//! its token is still the latest one issued. Older responses are dropped, so a
//! slow "load more" can never land on top of a list replaced by a newer sort.
//!
//! Hosts that run fetches themselves use the split API (`begin_*`, `execute`,
//! `apply`, `fail`); everyone else calls the async one-shot methods.

use std::fmt;

use crate::config::GalleryConfig;
use crate::display::AttributeDeriver;
use crate::error::{Error, Result};
use crate::models::{
    AttachmentId, AttachmentRecord, Conditions, FilterSet, RecordId, SizeBucket, SortField,
    SortSpec,
};
use crate::navigation::{NavigationTarget, Navigator, ATTACHMENTS_RELATIONSHIP};
use crate::notify::{Notification, Notifier};
use crate::query::{InitialPage, InitialQuery, PagedQuery, QueryService};
use crate::state::GalleryState;
use crate::util::{truncate_chars, LOG_TEXT_LIMIT};

/// Monotonic tag identifying an issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Request to run against the query service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    /// First page; the response replaces the list.
    Initial(InitialQuery),
    /// Next page; the response is appended.
    Paged(PagedQuery),
    /// Freshly uploaded attachments; the response is prepended.
    ByIds {
        parent_id: RecordId,
        ids: Vec<AttachmentId>,
    },
    /// Nothing can match the current filters; the list is cleared.
    Cleared,
}

/// Response to a [`FetchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    Initial(InitialPage),
    Paged(Vec<AttachmentRecord>),
    ByIds(Vec<AttachmentRecord>),
    Cleared,
}

/// An issued, not yet applied fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub token: RequestToken,
    pub request: FetchRequest,
}

/// What happened to a response handed back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The state changed.
    Committed,
    /// The fetch failed; the state is untouched and the user was notified.
    Failed,
    /// A newer request superseded this one; the response was dropped.
    Stale,
    /// There was nothing to fetch.
    Skipped,
}

/// Drives a [`GalleryState`] from user actions and query responses.
pub struct GalleryController<Q, N, V> {
    parent_id: RecordId,
    config: GalleryConfig,
    query_service: Q,
    notifier: N,
    navigator: V,
    deriver: AttributeDeriver,
    filters: FilterSet,
    sort: SortSpec,
    state: GalleryState,
    latest_token: u64,
}

impl<Q, N, V> GalleryController<Q, N, V>
where
    Q: QueryService,
    N: Notifier,
    V: Navigator,
{
    /// Create a controller for the attachments of `parent_id`.
    pub fn new(
        parent_id: RecordId,
        config: GalleryConfig,
        query_service: Q,
        notifier: N,
        navigator: V,
    ) -> Result<Self> {
        let config = config.validated()?;
        let deriver = AttributeDeriver::new(
            "",
            config.thumbnail_rendition.clone(),
            config.size_precision,
        );
        let state = GalleryState::new(config.more_threshold, config.title_label.clone());

        Ok(Self {
            parent_id,
            sort: config.default_sort,
            config,
            query_service,
            notifier,
            navigator,
            deriver,
            filters: FilterSet::default(),
            state,
            latest_token: 0,
        })
    }

    pub const fn state(&self) -> &GalleryState {
        &self.state
    }

    pub const fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    pub const fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub const fn parent_id(&self) -> &RecordId {
        &self.parent_id
    }

    pub const fn query_service(&self) -> &Q {
        &self.query_service
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    pub const fn navigator(&self) -> &V {
        &self.navigator
    }

    pub const fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn title(&self) -> String {
        self.state.title()
    }

    // ------------------------------------------------------------------
    // Split API
    // ------------------------------------------------------------------

    /// Issue the initial load with the current filters and sort.
    pub fn begin_mount(&mut self) -> PendingFetch {
        self.begin_replace()
    }

    /// Flip a size filter and issue a reload from offset zero.
    pub fn begin_toggle_filter(&mut self, filter: SizeBucket) -> PendingFetch {
        let active = self.filters.toggle(filter);
        tracing::debug!(filter = %filter, ?active, "Toggled size filter");
        self.begin_replace()
    }

    /// Select a sort field and issue a reload from offset zero.
    pub fn begin_select_sort(&mut self, field: SortField) -> PendingFetch {
        let (field, direction) = self.sort.select(field);
        tracing::debug!(field = %field, direction = direction.as_query(), "Selected sort");
        self.begin_replace()
    }

    /// Issue a fetch for the page after the current offset.
    pub fn begin_load_more(&mut self) -> PendingFetch {
        // The filter selection may have become empty under `ShowNone`; the
        // paged query then matches nothing, like the cleared list it extends.
        let conditions = self
            .filters
            .conditions(self.config.empty_filter_policy)
            .unwrap_or_else(|| Conditions::Buckets(Vec::new()));

        self.issue(FetchRequest::Paged(PagedQuery {
            parent_id: self.parent_id.clone(),
            conditions,
            page_size: self.config.page_size,
            offset: self.state.offset(),
            sort: self.sort,
        }))
    }

    /// Issue a fetch for freshly uploaded attachments.
    ///
    /// Returns `None` when there is nothing to resolve.
    pub fn begin_upload_finished(&mut self, ids: Vec<AttachmentId>) -> Option<PendingFetch> {
        if ids.is_empty() {
            return None;
        }

        Some(self.issue(FetchRequest::ByIds {
            parent_id: self.parent_id.clone(),
            ids,
        }))
    }

    /// Run a request against the query service without touching the state.
    pub async fn execute(&self, request: &FetchRequest) -> Result<FetchResponse> {
        match request {
            FetchRequest::Initial(query) => self
                .query_service
                .initial_fetch(query)
                .await
                .map(FetchResponse::Initial),
            FetchRequest::Paged(query) => self
                .query_service
                .paged_fetch(query)
                .await
                .map(FetchResponse::Paged),
            FetchRequest::ByIds { parent_id, ids } => self
                .query_service
                .fetch_by_ids(parent_id, ids)
                .await
                .map(FetchResponse::ByIds),
            FetchRequest::Cleared => Ok(FetchResponse::Cleared),
        }
    }

    /// Apply a successful response if `token` is still the latest request.
    pub fn apply(&mut self, token: RequestToken, response: FetchResponse) -> Applied {
        if !self.is_latest(token) {
            tracing::warn!(%token, latest = self.latest_token, "Discarding stale response");
            return Applied::Stale;
        }

        match response {
            FetchResponse::Initial(page) => {
                self.deriver.set_media_base_url(&page.media_base_url);
                let records = self.deriver.derive_all(page.records);
                self.state
                    .replace_all(records, page.total_count, Some(self.config.page_size));
            }
            FetchResponse::Paged(records) => {
                let records = self.deriver.derive_all(records);
                self.state.append(records);
            }
            FetchResponse::ByIds(records) => {
                let records = self.deriver.derive_all(records);
                self.state.prepend(records);
            }
            FetchResponse::Cleared => {
                self.state
                    .replace_all(Vec::new(), 0, Some(self.config.page_size));
            }
        }

        self.state.set_busy(false);
        tracing::debug!(%token, items = self.state.len(), "Applied response");
        Applied::Committed
    }

    /// Record a failed fetch if `token` is still the latest request.
    ///
    /// The state is left as it was; the user gets a generic error toast.
    pub fn fail(&mut self, token: RequestToken, error: &Error) -> Applied {
        if !self.is_latest(token) {
            tracing::warn!(%token, %error, "Ignoring failure of superseded request");
            return Applied::Stale;
        }

        tracing::warn!(
            %token,
            error = %truncate_chars(&error.to_string(), LOG_TEXT_LIMIT),
            "Attachment fetch failed"
        );
        self.notifier.notify(Notification::fetch_failed());
        self.state.set_busy(false);
        Applied::Failed
    }

    // ------------------------------------------------------------------
    // One-shot API
    // ------------------------------------------------------------------

    /// Load the first page.
    pub async fn mount(&mut self) -> Applied {
        let pending = self.begin_mount();
        self.run(pending).await
    }

    pub async fn toggle_filter(&mut self, filter: SizeBucket) -> Applied {
        let pending = self.begin_toggle_filter(filter);
        self.run(pending).await
    }

    pub async fn select_sort(&mut self, field: SortField) -> Applied {
        let pending = self.begin_select_sort(field);
        self.run(pending).await
    }

    pub async fn load_more(&mut self) -> Applied {
        let pending = self.begin_load_more();
        self.run(pending).await
    }

    /// Resolve and prepend attachments reported by the upload widget.
    pub async fn upload_finished(&mut self, ids: Vec<AttachmentId>) -> Applied {
        match self.begin_upload_finished(ids) {
            Some(pending) => self.run(pending).await,
            None => Applied::Skipped,
        }
    }

    /// Execute a pending fetch and apply its outcome.
    pub async fn run(&mut self, pending: PendingFetch) -> Applied {
        match self.execute(&pending.request).await {
            Ok(response) => self.apply(pending.token, response),
            Err(error) => self.fail(pending.token, &error),
        }
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Open the preview page on `id`, with the visible roster for browsing.
    ///
    /// Returns the target handed to the navigator.
    pub fn open_preview(&mut self, id: &AttachmentId) -> Result<NavigationTarget> {
        if !self.state.roster().contains(id) {
            return Err(Error::NotFound(id.to_string()));
        }

        let target = NavigationTarget::FilePreview {
            selected_record_id: id.clone(),
            record_ids: self.state.roster().to_delimited(),
        };
        self.navigator.navigate(target.clone());
        Ok(target)
    }

    /// Open the parent record's full attachments list.
    pub fn open_related_list(&mut self) {
        self.navigator.navigate(NavigationTarget::RelatedList {
            record_id: self.parent_id.clone(),
            object_api_name: self.config.parent_object_api_name.clone(),
            relationship_api_name: ATTACHMENTS_RELATIONSHIP.to_string(),
        });
    }

    fn begin_replace(&mut self) -> PendingFetch {
        let request = match self.filters.conditions(self.config.empty_filter_policy) {
            Some(conditions) => FetchRequest::Initial(InitialQuery {
                parent_id: self.parent_id.clone(),
                conditions,
                page_size: self.config.page_size,
                sort: self.sort,
            }),
            None => FetchRequest::Cleared,
        };
        self.issue(request)
    }

    fn issue(&mut self, request: FetchRequest) -> PendingFetch {
        self.latest_token += 1;
        let token = RequestToken(self.latest_token);
        self.state.set_busy(true);
        tracing::debug!(%token, ?request, "Issued attachment fetch");
        PendingFetch { token, request }
    }

    const fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest_token
    }
}
