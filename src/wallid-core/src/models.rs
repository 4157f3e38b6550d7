use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// CreateCaRequest is the body of `POST /ca`
#[derive(Debug, Clone, Serialize)]
pub struct CreateCaRequest {
    pub wa: String,
    pub admin_email: String,
}

/// CreateTemplateRequest is the body of `POST /template/`
#[derive(Debug, Clone, Serialize)]
pub struct CreateTemplateRequest {
    pub cid: String,
    pub name: String,
    pub wa: String,
    #[serde(rename = "frontendProps")]
    pub frontend_props: Value, // Opaque UI layout, passed through untouched
}

/// IssueCredentialRequest is the body of `POST /credential/create`
#[derive(Debug, Clone, Serialize)]
pub struct IssueCredentialRequest {
    pub cid: String,
    pub tid: String,
    #[serde(rename = "waAdmin")]
    pub wa_admin: String,
    pub data: Value, // Opaque claim payload, passed through untouched
    pub email: String,
}

/// CreateVerifyUrlRequest is the body of `POST /credential/create-verify-url`
#[derive(Debug, Clone, Serialize)]
pub struct CreateVerifyUrlRequest {
    pub id: String,
    pub tid: String,
    pub guid: String,
}

/// A single key/value claim of a credential.
///
/// Serialized as a one-entry object: `{"<key>": <value>}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialEntry {
    pub key: String,
    pub value: Value,
}

impl CredentialEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Serialize for CredentialEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// Builder for the common `[{"<key>": <value>}, ...]` claim list.
/// Duplicate keys are kept as separate entries. Any other payload shape
/// can be passed to the client as a plain `serde_json::Value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CredentialData(Vec<CredentialEntry>);

impl CredentialData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.push(CredentialEntry::new(key, value));
    }

    pub fn entries(&self) -> &[CredentialEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<CredentialEntry>> for CredentialData {
    fn from(entries: Vec<CredentialEntry>) -> Self {
        Self(entries)
    }
}

impl From<CredentialData> for Value {
    fn from(data: CredentialData) -> Self {
        Value::Array(
            data.0
                .into_iter()
                .map(|entry| {
                    let mut map = serde_json::Map::with_capacity(1);
                    map.insert(entry.key, entry.value);
                    Value::Object(map)
                })
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for CredentialData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| CredentialEntry::new(key, value))
                .collect(),
        )
    }
}

/// Generate a fresh correlation id for a verification request
pub fn new_guid() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_data_shape() {
        let data: CredentialData = vec![("name", "Alice"), ("name", "Bob"), ("age", "30")]
            .into_iter()
            .collect();

        assert_eq!(data.len(), 3);
        let expected = json!([{"name": "Alice"}, {"name": "Bob"}, {"age": "30"}]);
        assert_eq!(serde_json::to_value(&data).unwrap(), expected);
        assert_eq!(Value::from(data), expected);
    }

    #[test]
    fn test_issue_request_passes_data_through() {
        let data = json!([{"name": "Alice", "age": 30}, {"name": "Bob"}]);
        let req = IssueCredentialRequest {
            cid: "c".to_string(),
            tid: "t".to_string(),
            wa_admin: "0xABC".to_string(),
            data: data.clone(),
            email: "user@domain.com".to_string(),
        };

        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["data"], data);
        assert!(serde_json::to_string(&req)
            .unwrap()
            .contains(r#""data":[{"name":"Alice","age":30},{"name":"Bob"}]"#));
    }

    #[test]
    fn test_request_wire_keys() {
        let req = IssueCredentialRequest {
            cid: "c".to_string(),
            tid: "t".to_string(),
            wa_admin: "0xABC".to_string(),
            data: CredentialData::new().into(),
            email: "user@domain.com".to_string(),
        };
        let body = serde_json::to_string(&req).unwrap();
        assert_eq!(
            body,
            r#"{"cid":"c","tid":"t","waAdmin":"0xABC","data":[],"email":"user@domain.com"}"#
        );

        let req = CreateTemplateRequest {
            cid: "c".to_string(),
            name: "Card".to_string(),
            wa: "0xABC".to_string(),
            frontend_props: json!({"currentLayout": "Card", "components": []}),
        };
        let body = serde_json::to_string(&req).unwrap();
        assert_eq!(
            body,
            r#"{"cid":"c","name":"Card","wa":"0xABC","frontendProps":{"currentLayout":"Card","components":[]}}"#
        );
    }

    #[test]
    fn test_new_guid_is_unique() {
        let a = new_guid();
        let b = new_guid();
        assert_eq!(a.len(), 36);
        assert_ne!(a, b);
    }
}
