use serde::{Deserialize, Serialize};
use spaces_core::{AppError, AppResult, DEFAULT_SPACE_ID, SpaceId};

/// Route that switches the active space before following `next`.
pub const ENTER_SPACE_PATH: &str = "/spaces/enter";

/// Saved-objects management route filtered by object type.
const OBJECTS_PATH: &str = "/app/management/kibana/objects";

/// Icon used when a content type reports none.
pub const DEFAULT_CONTENT_ICON: &str = "gear";

/// One saved-object type count as reported by the content summary endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummaryItem {
    /// Saved-object type.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Number of objects of this type in the space.
    pub count: u64,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Human readable type name.
    pub display_name: String,
}

/// Content summary payload for one space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceContentSummary {
    /// Per-type counts.
    #[serde(default)]
    pub summary: Vec<ContentSummaryItem>,
}

/// Display row of the space content table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSummaryRow {
    content_type: String,
    count: u64,
    icon: String,
    display_name: String,
    href: String,
}

impl ContentSummaryRow {
    /// Projects a summary item into a row linking to the filtered objects list.
    pub fn from_item(
        item: ContentSummaryItem,
        server_base_path: &str,
        space_id: &SpaceId,
    ) -> AppResult<Self> {
        let next = urlencoding::encode(&format!(
            "{OBJECTS_PATH}?initialQuery=type:({})",
            item.content_type
        ))
        .into_owned();
        let href = add_space_id_to_path(
            server_base_path,
            space_id.as_str(),
            &format!("{ENTER_SPACE_PATH}?next={next}"),
        )?;

        Ok(Self {
            display_name: capitalize(&item.display_name),
            icon: item.icon.unwrap_or_else(|| DEFAULT_CONTENT_ICON.to_owned()),
            content_type: item.content_type,
            count: item.count,
            href,
        })
    }

    /// Returns the saved-object type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.content_type.as_str()
    }

    /// Returns the object count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the icon name.
    #[must_use]
    pub fn icon(&self) -> &str {
        self.icon.as_str()
    }

    /// Returns the capitalized display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the deep link behind the count.
    #[must_use]
    pub fn href(&self) -> &str {
        self.href.as_str()
    }
}

/// Prefixes a path with the space segment of a server base path.
///
/// The default space and an empty id add no `/s/{id}` segment.
pub fn add_space_id_to_path(
    base_path: &str,
    space_id: &str,
    requested_path: &str,
) -> AppResult<String> {
    if !requested_path.is_empty() && !requested_path.starts_with('/') {
        return Err(AppError::Validation(format!(
            "path '{requested_path}' must start with a /"
        )));
    }

    let base_path = base_path.strip_suffix('/').unwrap_or(base_path);
    let path = if space_id.is_empty() || space_id == DEFAULT_SPACE_ID {
        format!("{base_path}{requested_path}")
    } else {
        format!("{base_path}/s/{space_id}{requested_path}")
    };

    if path.is_empty() {
        return Ok("/".to_owned());
    }

    Ok(path)
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize(value: &str) -> String {
    let lowered = value.to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
