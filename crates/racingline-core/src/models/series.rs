use serde::{Deserialize, Serialize};

/// A racing championship or category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "seriesInfo")]
    pub series_info: SeriesInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortName", default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Display colour as a hex string, e.g. "#E10600"
    #[serde(default)]
    pub colour: Option<String>,
}

impl Series {
    pub fn id(&self) -> &str {
        &self.series_info.id
    }

    /// Short name when present, otherwise the full name
    pub fn display_name(&self) -> &str {
        self.series_info
            .short_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.series_info.name)
    }
}
