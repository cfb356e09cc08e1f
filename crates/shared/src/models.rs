use serde::{Deserialize, Serialize};

/// Name given to markers created without one.
pub const DEFAULT_MARKER_NAME: &str = "Unnamed Star";

pub type MarkerId = u64;

/// A star on the map, as exchanged with `/api/points`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    pub x: i64,
    pub y: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// POST body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMarker {
    pub x: i64,
    pub y: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl NewMarker {
    /// Fill in the creation defaults for missing or blank fields.
    pub fn into_marker(self, id: MarkerId) -> Marker {
        let name = match self.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => DEFAULT_MARKER_NAME.to_string(),
        };
        Marker {
            id,
            x: self.x,
            y: self.y,
            name: Some(name),
            details: Some(self.details.unwrap_or_default()),
        }
    }
}

/// PUT body. Position is immutable after creation, so only text fields appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerUpdate {
    pub id: MarkerId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

impl MarkerUpdate {
    /// Apply to `marker`, keeping fields the update leaves out.
    pub fn apply_to(self, marker: &mut Marker) {
        if let Some(name) = self.name {
            marker.name = Some(name);
        }
        if let Some(details) = self.details {
            marker.details = Some(details);
        }
    }
}

/// DELETE body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerRef {
    pub id: MarkerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
