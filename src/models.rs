use crate::constants::{EXTERNAL_REMOTE_LOCATIONS, FALLBACK_FILE_NAME};
use crate::utils::sanitize_filename;
use serde::{Deserialize, Serialize};

/// Metadata record for one remote file, as returned by the listing endpoint.
///
/// Only the fields the downloader acts on are typed; everything else the API
/// sends is kept in `extra` so cached page indexes preserve the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub deal_id: Option<i64>,
    #[serde(default)]
    pub remote_location: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FileDescriptor {
    /// True when the content lives in a third-party service (e.g. Google
    /// Docs) and cannot be fetched through the native download endpoint.
    pub fn is_externally_linked(&self) -> bool {
        self.remote_location
            .as_deref()
            .is_some_and(|location| EXTERNAL_REMOTE_LOCATIONS.contains(&location))
    }

    /// Deterministic local filename: `{id:05}_{deal_id:04}_{sanitized_name}`.
    ///
    /// A missing `deal_id` is coerced to 0 and a missing or unusable `name`
    /// falls back to `unnamed_file`. Returns `None` when `id` is absent,
    /// since identity comes from the id alone.
    pub fn local_filename(&self) -> Option<String> {
        let id = self.id?;
        let deal_id = self.deal_id.unwrap_or(0);
        let name = match self.name.as_deref().map(sanitize_filename) {
            Some(name) if !name.is_empty() => name,
            _ => FALLBACK_FILE_NAME.to_string(),
        };
        Some(format!("{id:05}_{deal_id:04}_{name}"))
    }
}

/// Wire shape of one paginated listing response. An absent `data` array is
/// treated the same as an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub data: Option<Vec<FileDescriptor>>,
}

impl ListingPage {
    pub fn into_descriptors(self) -> Vec<FileDescriptor> {
        self.data.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(value: serde_json::Value) -> FileDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_local_filename_basic() {
        let file = descriptor(json!({
            "id": 12782,
            "name": "Contract.pdf",
            "deal_id": 77,
            "remote_location": "s3"
        }));
        assert_eq!(file.local_filename().unwrap(), "12782_0077_Contract.pdf");
    }

    #[test]
    fn test_local_filename_null_name_and_deal() {
        let file = descriptor(json!({ "id": 42, "deal_id": null, "name": null }));
        assert_eq!(file.local_filename().unwrap(), "00042_0000_unnamed_file");
    }

    #[test]
    fn test_local_filename_name_sanitized_to_nothing() {
        let file = descriptor(json!({ "id": 7, "name": "///" }));
        assert_eq!(file.local_filename().unwrap(), "00007_0000_unnamed_file");
    }

    #[test]
    fn test_local_filename_missing_id() {
        let file = descriptor(json!({ "name": "orphan.txt" }));
        assert_eq!(file.local_filename(), None);
    }

    #[test]
    fn test_local_filename_sanitizes_name() {
        let file = descriptor(json!({ "id": 5, "deal_id": 3, "name": "a/b:c.txt" }));
        assert_eq!(file.local_filename().unwrap(), "00005_0003_a_b_c.txt");
    }

    #[test]
    fn test_externally_linked() {
        let linked = descriptor(json!({ "id": 1, "remote_location": "googledocs" }));
        assert!(linked.is_externally_linked());

        let native = descriptor(json!({ "id": 2, "remote_location": "s3" }));
        assert!(!native.is_externally_linked());

        let absent = descriptor(json!({ "id": 3 }));
        assert!(!absent.is_externally_linked());
    }

    #[test]
    fn test_listing_page_absent_data_is_empty() {
        let page: ListingPage = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(page.into_descriptors().is_empty());
    }

    #[test]
    fn test_listing_page_null_data_is_empty() {
        let page: ListingPage = serde_json::from_value(json!({ "data": null })).unwrap();
        assert!(page.into_descriptors().is_empty());
    }

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let raw = json!({
            "id": 9,
            "name": "notes.txt",
            "file_size": 1024,
            "add_time": "2024-01-01 00:00:00"
        });
        let file = descriptor(raw);
        let back = serde_json::to_value(&file).unwrap();
        assert_eq!(back["file_size"], 1024);
        assert_eq!(back["add_time"], "2024-01-01 00:00:00");
    }
}
