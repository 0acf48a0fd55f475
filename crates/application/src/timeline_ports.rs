use async_trait::async_trait;

use spaces_core::AppResult;
use spaces_domain::TimelineTab;

/// Lookup-and-load request for a saved timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTimelineRequest {
    /// Saved timeline id.
    pub timeline_id: Option<String>,
    /// Tab shown once loaded.
    pub active_timeline_tab: TimelineTab,
    /// Loads a copy instead of the saved timeline.
    pub duplicate: bool,
    /// Event shown in the graph tab.
    pub graph_event_id: Option<String>,
    /// Opens the timeline flyout once loaded.
    pub open_timeline: bool,
    /// Linked saved search.
    pub saved_search_id: Option<String>,
}

/// Access to URL query parameters registered by the page.
#[async_trait]
pub trait UrlParamRegistry: Send + Sync {
    /// Registers a parameter key and returns its current raw value.
    async fn initial_value(&self, key: &str) -> Option<String>;
}

/// Port loading saved timelines into the page.
#[async_trait]
pub trait TimelineLoader: Send + Sync {
    /// Looks up a timeline by id and loads it.
    async fn query_timeline_by_id(&self, request: QueryTimelineRequest) -> AppResult<()>;
}

/// Experimental feature flags relevant to this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExperimentalFeatures {
    /// Hides the esql timeline tab.
    pub timeline_esql_tab_disabled: bool,
}
