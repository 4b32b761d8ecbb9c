//! Trip documents: the packing/paperwork checklist.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DocumentId;

/// A checklist entry such as a passport, visa or insurance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDocument {
    pub id: DocumentId,
    pub title: String,
    /// User-togglable checklist flag.
    pub is_checked: bool,
    /// Optional embedded image, base64 text.
    pub image: Option<String>,
}
