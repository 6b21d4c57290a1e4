use super::datum_kind::DatumKind;
use chrono::Local;
use serde::Serialize;

pub const DEFAULT_COLOR: &str = "#87BBFF";

#[derive(Debug, Clone, Serialize)]
pub struct Datum {
    pub id: i64,
    pub name: String,            // ⇔ data_points.name (max 20 chars)
    pub slug: String,            // ⇔ data_points.slug (UNIQUE)
    pub kind: DatumKind,         // ⇔ data_points.kind ('INT' | ... | 'TIMESTAMP')
    pub unit: Option<String>,    // ⇔ data_points.unit
    pub color: String,           // ⇔ data_points.color ("#RRGGBB")
    pub comment: Option<String>, // ⇔ data_points.comment
    pub created_at: String,      // ⇔ data_points.created_at (ISO8601)
}

impl Datum {
    /// Builds a not-yet-persisted data point (`id = 0`).
    pub fn new(
        name: &str,
        slug: &str,
        kind: DatumKind,
        unit: Option<String>,
        color: &str,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            slug: slug.to_string(),
            kind,
            unit,
            color: color.to_string(),
            comment,
            created_at: Local::now().to_rfc3339(),
        }
    }
}
