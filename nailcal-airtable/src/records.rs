//! Raw Airtable record shapes.
//!
//! Airtable omits empty fields from the `fields` object and returns lookups
//! and links as arrays, so every field here is optional or defaulted. These
//! types stay inside the gateway; `convert` produces the typed core records.

use serde::Deserialize;

/// A record as returned by the records API.
#[derive(Debug, Clone, Deserialize)]
pub struct Record<F> {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: Option<String>,
    pub fields: F,
}

/// One page of a list call. `offset` is present when more pages follow.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<F> {
    pub records: Vec<Record<F>>,
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFields {
    /// ISO 8601 start timestamp. Missing on malformed records.
    #[serde(rename = "Date")]
    pub date: Option<String>,
    /// Linked client record, at most one entry.
    #[serde(rename = "Client", default)]
    pub client: Vec<String>,
    /// Lookup of the linked client's name.
    #[serde(rename = "Client Name", default)]
    pub client_name: Vec<String>,
    /// Free-text label, used by old records created before client links.
    #[serde(rename = "Client Label")]
    pub client_label: Option<String>,
    #[serde(rename = "Procedures", default)]
    pub procedures: Vec<String>,
    /// Operator override, seconds.
    #[serde(rename = "Custom Duration")]
    pub custom_duration: Option<i64>,
    /// Rollup of procedure durations, seconds.
    #[serde(rename = "Total Duration")]
    pub total_duration: Option<i64>,
    #[serde(rename = "Total Price")]
    pub total_price: Option<i64>,
    /// Checkbox; absent when unchecked.
    #[serde(rename = "Me Time", default)]
    pub me_time: bool,
    #[serde(rename = "Me Time Title")]
    pub me_time_title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientFields {
    #[serde(rename = "First Name")]
    pub first_name: Option<String>,
    #[serde(rename = "Last Name")]
    pub last_name: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(rename = "Birthday")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcedureFields {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Seconds.
    #[serde(rename = "Duration")]
    pub duration: Option<i64>,
    #[serde(rename = "Price")]
    pub price: Option<i64>,
    #[serde(rename = "Active", default)]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_with_offset() {
        let body = r#"{
            "records": [
                {
                    "id": "recA",
                    "createdTime": "2025-05-01T09:00:00.000Z",
                    "fields": {"Date": "2025-06-02T10:00:00.000Z", "Client": ["recC1"]}
                }
            ],
            "offset": "itrNextPage/recA"
        }"#;

        let page: ListResponse<BookingFields> = serde_json::from_str(body).unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.offset.as_deref(), Some("itrNextPage/recA"));
        assert_eq!(page.records[0].fields.client, vec!["recC1"]);
        assert!(!page.records[0].fields.me_time);
    }

    #[test]
    fn test_final_page_has_no_offset() {
        let body = r#"{"records": []}"#;
        let page: ListResponse<BookingFields> = serde_json::from_str(body).unwrap();
        assert!(page.records.is_empty());
        assert!(page.offset.is_none());
    }

    #[test]
    fn test_sparse_fields_deserialize() {
        // Airtable drops unchecked checkboxes and empty cells entirely
        let body = r#"{"id": "recB", "fields": {}}"#;
        let record: Record<BookingFields> = serde_json::from_str(body).unwrap();
        assert!(record.fields.date.is_none());
        assert!(record.fields.client.is_empty());
        assert!(!record.fields.me_time);
        assert!(record.created_time.is_none());
    }
}
