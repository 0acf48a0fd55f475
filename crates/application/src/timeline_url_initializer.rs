use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use spaces_core::{AppError, AppResult};
use spaces_domain::TimelineUrlState;

use crate::{ExperimentalFeatures, QueryTimelineRequest, TimelineLoader, UrlParamRegistry};

/// URL parameter carrying the timeline state.
pub const TIMELINE_URL_PARAM_KEY: &str = "timeline";

/// Loads the timeline named in the URL the first time a value shows up.
pub struct TimelineUrlParamInitializer {
    registry: Arc<dyn UrlParamRegistry>,
    loader: Arc<dyn TimelineLoader>,
    experimental_features: ExperimentalFeatures,
    initialized: Mutex<bool>,
}

impl TimelineUrlParamInitializer {
    /// Creates an initializer that has not loaded anything yet.
    #[must_use]
    pub fn new(
        registry: Arc<dyn UrlParamRegistry>,
        loader: Arc<dyn TimelineLoader>,
        experimental_features: ExperimentalFeatures,
    ) -> Self {
        Self {
            registry,
            loader,
            experimental_features,
            initialized: Mutex::new(false),
        }
    }

    /// Registers the parameter and handles its initial value.
    pub async fn initialize(&self) -> AppResult<bool> {
        let value = self.registry.initial_value(TIMELINE_URL_PARAM_KEY).await;
        self.handle_value(value.as_deref()).await
    }

    /// Handles one parameter value, returning true when a load was dispatched.
    ///
    /// Absent values and values seen after a successful load do nothing.
    pub async fn handle_value(&self, value: Option<&str>) -> AppResult<bool> {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            return Ok(false);
        }
        let Some(value) = value else {
            return Ok(false);
        };

        let state = serde_json::from_str::<TimelineUrlState>(value).map_err(|error| {
            AppError::Validation(format!("invalid '{TIMELINE_URL_PARAM_KEY}' parameter: {error}"))
        })?;

        let request = QueryTimelineRequest {
            active_timeline_tab: state
                .resolve_active_tab(self.experimental_features.timeline_esql_tab_disabled),
            duplicate: false,
            graph_event_id: state.graph_event_id,
            timeline_id: state.id,
            open_timeline: state.is_open,
            saved_search_id: state.saved_search_id,
        };

        info!(
            timeline_id = ?request.timeline_id,
            active_tab = ?request.active_timeline_tab,
            "loading timeline from url"
        );
        self.loader.query_timeline_by_id(request).await?;
        *initialized = true;

        Ok(true)
    }

    /// Returns true once a timeline was loaded.
    pub async fn is_initialized(&self) -> bool {
        *self.initialized.lock().await
    }
}
