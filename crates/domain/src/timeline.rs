use serde::{Deserialize, Serialize};

/// Tabs of the investigation timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimelineTab {
    /// Query tab.
    #[default]
    Query,
    /// Graph tab.
    Graph,
    /// Notes tab.
    Notes,
    /// Pinned events tab.
    Pinned,
    /// Event correlation tab.
    Eql,
    /// Session view tab.
    Session,
    /// Assistant tab.
    SecurityAssistant,
    /// Piped query language tab.
    Esql,
}

/// Timeline state carried in the `timeline` URL parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineUrlState {
    /// Saved timeline id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Active tab, the query tab when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tab: Option<TimelineTab>,
    /// Whether the timeline flyout is open.
    #[serde(default)]
    pub is_open: bool,
    /// Event shown in the graph tab.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_event_id: Option<String>,
    /// Linked saved search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_search_id: Option<String>,
}

impl TimelineUrlState {
    /// Tab to open, falling back to the query tab when the esql tab is off.
    #[must_use]
    pub fn resolve_active_tab(&self, esql_tab_disabled: bool) -> TimelineTab {
        match self.active_tab.unwrap_or_default() {
            TimelineTab::Esql if esql_tab_disabled => TimelineTab::Query,
            tab => tab,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{TimelineTab, TimelineUrlState};

    #[test]
    fn esql_tab_falls_back_to_query_when_disabled() {
        let state = TimelineUrlState {
            active_tab: Some(TimelineTab::Esql),
            ..TimelineUrlState::default()
        };

        assert_eq!(state.resolve_active_tab(true), TimelineTab::Query);
        assert_eq!(state.resolve_active_tab(false), TimelineTab::Esql);
    }

    #[test]
    fn other_tabs_are_kept_and_missing_tab_is_query() {
        let notes = TimelineUrlState {
            active_tab: Some(TimelineTab::Notes),
            ..TimelineUrlState::default()
        };
        assert_eq!(notes.resolve_active_tab(true), TimelineTab::Notes);
        assert_eq!(
            TimelineUrlState::default().resolve_active_tab(true),
            TimelineTab::Query
        );
    }

    #[test]
    fn url_payload_uses_camel_case() {
        let parsed = serde_json::from_str::<TimelineUrlState>(
            r#"{"id":"t-1","activeTab":"securityAssistant","isOpen":true,"graphEventId":"e-9"}"#,
        );

        assert!(matches!(
            parsed,
            Ok(TimelineUrlState {
                active_tab: Some(TimelineTab::SecurityAssistant),
                is_open: true,
                saved_search_id: None,
                ..
            })
        ));
    }
}
