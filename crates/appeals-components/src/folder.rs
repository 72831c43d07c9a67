//! Document folder descriptors
//!
//! A folder is a named grouping of uploaded documents for one case stage.
//! The builders only need the folder id and whether anything was received.

use serde::{Deserialize, Serialize};

/// Virus scan verdict on a document version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirusCheckStatus {
    /// Not yet scanned
    #[default]
    NotScanned,
    /// Clean
    Scanned,
    /// Infected; never shown as received
    Affected,
}

/// Redaction state of a document version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedactionStatus {
    /// Not reviewed for redaction
    #[default]
    Unredacted,
    /// Redacted copy uploaded
    Redacted,
    /// Reviewed, no redaction needed
    NoRedactionRequired,
}

/// Latest uploaded version of a document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentVersion {
    /// Version number, starting at 1
    pub version: u32,

    /// Scan verdict
    #[serde(default)]
    pub virus_check_status: VirusCheckStatus,

    /// Redaction state
    #[serde(default)]
    pub redaction_status: RedactionStatus,
}

/// Document inside a folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document id
    pub id: String,

    /// File name
    pub name: String,

    /// Most recent version, absent while an upload is in flight
    #[serde(default)]
    pub latest_version: Option<DocumentVersion>,
}

impl Document {
    /// Whether the document counts as received
    #[inline]
    #[must_use]
    pub fn is_received(&self) -> bool {
        self.latest_version
            .as_ref()
            .is_some_and(|v| v.virus_check_status != VirusCheckStatus::Affected)
    }
}

/// Folder of documents for one case stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFolder {
    /// Folder id used in upload/manage links
    pub folder_id: u64,

    /// Logical path, e.g. `costs/appellantCostsDecisionLetter`
    pub path: String,

    /// Documents in upload order
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl DocumentFolder {
    /// Create empty folder
    #[inline]
    #[must_use]
    pub fn new(folder_id: u64, path: impl Into<String>) -> Self {
        Self {
            folder_id,
            path: path.into(),
            documents: Vec::new(),
        }
    }

    /// Add document
    #[inline]
    #[must_use]
    pub fn with_document(mut self, document: Document) -> Self {
        self.documents.push(document);
        self
    }

    /// Number of received documents
    #[inline]
    #[must_use]
    pub fn received_count(&self) -> usize {
        self.documents.iter().filter(|d| d.is_received()).count()
    }

    /// Human status for the folder
    #[inline]
    #[must_use]
    pub fn status(&self) -> FolderStatus {
        FolderStatus::of(Some(self))
    }
}

/// Received/not-received status shown beside a folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    /// At least one received document
    Uploaded,
    /// Folder missing or holding no received document
    NotReceived,
}

impl FolderStatus {
    /// Status of an optional folder
    #[must_use]
    pub fn of(folder: Option<&DocumentFolder>) -> Self {
        match folder {
            Some(folder) if folder.received_count() > 0 => Self::Uploaded,
            _ => Self::NotReceived,
        }
    }

    /// Display text
    #[inline]
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::Uploaded => "Uploaded",
            Self::NotReceived => "Not received",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(status: VirusCheckStatus) -> Document {
        Document {
            id: "d1".to_string(),
            name: "letter.pdf".to_string(),
            latest_version: Some(DocumentVersion {
                version: 1,
                virus_check_status: status,
                redaction_status: RedactionStatus::default(),
            }),
        }
    }

    #[test]
    fn missing_folder_is_not_received() {
        assert_eq!(FolderStatus::of(None), FolderStatus::NotReceived);
        assert_eq!(FolderStatus::of(None).text(), "Not received");
    }

    #[test]
    fn empty_folder_is_not_received() {
        assert_eq!(DocumentFolder::new(1, "costs/x").status(), FolderStatus::NotReceived);
    }

    #[test]
    fn clean_document_counts_as_uploaded() {
        let folder = DocumentFolder::new(1, "costs/x").with_document(document(VirusCheckStatus::Scanned));
        assert_eq!(folder.status(), FolderStatus::Uploaded);
    }

    #[test]
    fn infected_document_is_ignored() {
        let folder =
            DocumentFolder::new(1, "costs/x").with_document(document(VirusCheckStatus::Affected));
        assert_eq!(folder.status(), FolderStatus::NotReceived);
    }

    #[test]
    fn folder_deserializes_without_documents() {
        let folder: DocumentFolder =
            serde_json::from_str(r#"{"folderId": 7, "path": "costs/decision"}"#).unwrap();
        assert_eq!(folder.folder_id, 7);
        assert!(folder.documents.is_empty());
    }
}
