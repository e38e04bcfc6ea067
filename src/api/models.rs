use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// A media item returned by the search backend.
///
/// Only `id` is required. Known fields are read when they have a usable
/// shape; anything else, including known fields in an unexpected shape, is
/// kept in `extra` so nothing the backend sends is lost.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Image {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_tagged: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Image {
    /// Image with just an id, used where only identity matters
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: None,
            thumbnail_path: None,
            folder_id: None,
            is_tagged: None,
            tags: None,
            extra: Map::new(),
        }
    }

    /// Path best suited for a grid card: thumbnail when present, else the original
    pub fn preview_path(&self) -> &str {
        non_empty(self.thumbnail_path.as_deref())
            .or_else(|| non_empty(self.path.as_deref()))
            .unwrap_or_default()
    }

    /// Path for the full-size viewer: the original when present, else the thumbnail
    pub fn full_path(&self) -> &str {
        non_empty(self.path.as_deref())
            .or_else(|| non_empty(self.thumbnail_path.as_deref()))
            .unwrap_or_default()
    }

    /// File name part of the path, for captions and alt text
    pub fn file_name(&self) -> &str {
        self.full_path()
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl<'de> Deserialize<'de> for Image {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;

        let id = match fields.remove("id") {
            None => return Err(D::Error::missing_field("id")),
            Some(raw) => id_text(&raw)
                .ok_or_else(|| D::Error::custom(format!("invalid image id {}", raw)))?,
        };

        Ok(Self {
            id,
            path: take_field(&mut fields, &["path"], text),
            thumbnail_path: take_field(&mut fields, &["thumbnail_path", "thumbnailPath"], text),
            folder_id: take_field(&mut fields, &["folder_id", "folderId"], id_text),
            is_tagged: take_field(&mut fields, &["is_tagged", "isTagged"], flag),
            tags: take_field(&mut fields, &["tags"], tag_names),
            extra: fields,
        })
    }
}

/// Remove the first of `names` whose value `parse` accepts.
///
/// Nulls are dropped. Values `parse` rejects stay in `fields`.
fn take_field<T>(
    fields: &mut Map<String, Value>,
    names: &[&str],
    parse: fn(&Value) -> Option<T>,
) -> Option<T> {
    for name in names {
        match fields.get(*name) {
            None => continue,
            Some(Value::Null) => {
                fields.remove(*name);
            }
            Some(value) => {
                if let Some(parsed) = parse(value) {
                    fields.remove(*name);
                    return Some(parsed);
                }
            }
        }
    }
    None
}

/// Ids arrive as strings from some deployments and as integers from others
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// SQLite-backed deployments send 0/1 instead of booleans
fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    }
}

/// Tags as plain strings or as `{"name": ...}` objects
fn tag_names(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|tag| match tag {
            Value::String(name) => Some(name.clone()),
            Value::Object(object) => object.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .collect()
}

/// Coerce a search payload into images.
///
/// Any falsy or non-array payload is zero results, since the backend
/// contract is not strictly typed. Array elements that are not images are
/// skipped.
pub fn images_from_payload(payload: Option<&Value>) -> Vec<Image> {
    match payload {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match Image::deserialize(item) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Skipping malformed search result {}: {}", item, e);
                    None
                }
            })
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            if is_truthy(other) {
                warn!("Search payload is not an array, treating as no results");
            }
            Vec::new()
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Tagged envelope returned by the semantic endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub message: Option<String>,
}

/// A `success: false` envelope, made explicit
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct LogicalFailure(pub String);

impl<T> BackendResponse<T> {
    /// Human readable reason for a failed envelope
    pub fn failure_reason(&self) -> Option<String> {
        if self.success {
            return None;
        }
        Some(
            self.error
                .clone()
                .or_else(|| self.message.clone())
                .unwrap_or_else(|| "Request failed".to_string()),
        )
    }

    /// Turn a `success: false` envelope into an error
    pub fn into_result(self) -> Result<Option<T>, LogicalFailure> {
        match self.failure_reason() {
            Some(reason) => Err(LogicalFailure(reason)),
            None => Ok(self.data),
        }
    }
}

/// Payload of a successful indexing trigger
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexingStarted {
    pub message: String,
}

/// Snapshot of the backend's indexing job
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IndexingStatus {
    #[serde(alias = "isActive")]
    pub is_active: bool,
    #[serde(default)]
    pub current: u64,
    #[serde(default)]
    pub total: u64,
    pub error: Option<String>,
}

impl IndexingStatus {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.current.min(self.total) * 100) / self.total) as u8
    }

    /// One line for the status panel
    pub fn summary(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Indexing failed: {}", error);
        }
        if self.is_active {
            format!(
                "Indexing {} / {} ({}%)",
                self.current,
                self.total,
                self.percent()
            )
        } else if self.total > 0 {
            format!("Indexed {} images", self.total)
        } else {
            "Not indexing".to_string()
        }
    }
}
