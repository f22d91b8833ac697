//! Common types used across the ledger

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// Page size used when a caller does not send one
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Coarse classification of every failure the ledger can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad or missing input, or a quantity constraint violated
    ValidationFailed,
    /// Unknown item id
    NotFound,
    /// Network or remote server failure between a client and the ledger
    TransportFailure,
    /// Storage or configuration fault inside the ledger
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::NotFound => "not_found",
            ErrorKind::TransportFailure => "transport_failure",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which lots a query admits based on their remaining quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemainFilter {
    #[default]
    All,
    /// `remainQuantities > 0`
    Remaining,
    /// `remainQuantities == 0`
    SoldOut,
}

impl RemainFilter {
    /// Wire encoding: absent = all, `true` = remaining, `false` = sold out
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            None => RemainFilter::All,
            Some(true) => RemainFilter::Remaining,
            Some(false) => RemainFilter::SoldOut,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            RemainFilter::All => None,
            RemainFilter::Remaining => Some(true),
            RemainFilter::SoldOut => Some(false),
        }
    }

    pub fn admits(&self, remain_quantities: i64) -> bool {
        match self {
            RemainFilter::All => true,
            RemainFilter::Remaining => remain_quantities > 0,
            RemainFilter::SoldOut => remain_quantities == 0,
        }
    }
}

/// Filter and pagination for inventory queries.
///
/// One value of this type is threaded through every gateway call, so a
/// command and the refetch that follows it always see the same page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryQuery {
    /// Items per page (`count` is what the admin console sends)
    #[serde(default = "default_page_size", alias = "count")]
    pub page_size: u32,

    /// 1-indexed page number
    #[serde(default = "default_page_index")]
    pub page_index: u32,

    /// Case-insensitive substring over product, purchase order and size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_remain"
    )]
    pub remain: Option<bool>,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page_index() -> u32 {
    1
}

impl Default for InventoryQuery {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_index: 1,
            search: None,
            remain: None,
        }
    }
}

impl InventoryQuery {
    pub fn page(page_size: u32, page_index: u32) -> Self {
        Self {
            page_size,
            page_index,
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_remain(mut self, filter: RemainFilter) -> Self {
        self.remain = filter.as_flag();
        self
    }

    pub fn remain_filter(&self) -> RemainFilter {
        RemainFilter::from_flag(self.remain)
    }

    /// Search text with surrounding whitespace removed; blank counts as absent
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Number of matching items that precede the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.page_index.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// Accepts `true`/`false`, JSON null, and the query-string spellings the
/// console produces (`remain=`, `remain=null`, `remain=all`).
fn deserialize_remain<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Flag(flag)) => Ok(Some(flag)),
        Some(Raw::Text(text)) => match text.trim() {
            "" | "null" | "all" => Ok(None),
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(D::Error::custom(format!(
                "remain must be true, false or empty, got {:?}",
                other
            ))),
        },
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(i64),
    Text(String),
}

/// Optional integer that may arrive as a JSON number or as a numeric string
/// (form inputs in the console submit strings).
pub fn deserialize_lenient_quantity<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawCount>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawCount::Int(n)) => Ok(Some(n)),
        Some(RawCount::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse().map(Some).map_err(|_| {
                D::Error::custom(format!("expected an integer, got {:?}", text))
            })
        }
    }
}

/// Required variant of [`deserialize_lenient_quantity`]
pub fn deserialize_lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_lenient_quantity(deserializer)?
        .ok_or_else(|| D::Error::custom("expected an integer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Counted {
        #[serde(default, deserialize_with = "deserialize_lenient_quantity")]
        quantity: Option<i64>,
    }

    #[test]
    fn test_lenient_quantity() {
        let c: Counted = serde_json::from_str(r#"{"quantity": 4}"#).unwrap();
        assert_eq!(c.quantity, Some(4));

        let c: Counted = serde_json::from_str(r#"{"quantity": " 7 "}"#).unwrap();
        assert_eq!(c.quantity, Some(7));

        let c: Counted = serde_json::from_str(r#"{"quantity": ""}"#).unwrap();
        assert_eq!(c.quantity, None);

        let c: Counted = serde_json::from_str("{}").unwrap();
        assert_eq!(c.quantity, None);

        assert!(serde_json::from_str::<Counted>(r#"{"quantity": "four"}"#).is_err());
    }

    #[test]
    fn test_remain_filter_from_flag() {
        assert_eq!(RemainFilter::from_flag(None), RemainFilter::All);
        assert_eq!(RemainFilter::from_flag(Some(true)), RemainFilter::Remaining);
        assert_eq!(RemainFilter::from_flag(Some(false)), RemainFilter::SoldOut);
    }

    #[test]
    fn test_remain_filter_admits() {
        assert!(RemainFilter::All.admits(0));
        assert!(RemainFilter::All.admits(3));
        assert!(RemainFilter::Remaining.admits(1));
        assert!(!RemainFilter::Remaining.admits(0));
        assert!(RemainFilter::SoldOut.admits(0));
        assert!(!RemainFilter::SoldOut.admits(2));
    }

    #[test]
    fn test_query_defaults_from_empty_json() {
        let query: InventoryQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, InventoryQuery::default());
        assert_eq!(query.page_size, 5);
        assert_eq!(query.page_index, 1);
    }

    #[test]
    fn test_query_accepts_count_alias() {
        let query: InventoryQuery = serde_json::from_str(r#"{"count": 12}"#).unwrap();
        assert_eq!(query.page_size, 12);
    }

    #[test]
    fn test_query_remain_spellings() {
        let query: InventoryQuery = serde_json::from_str(r#"{"remain": true}"#).unwrap();
        assert_eq!(query.remain_filter(), RemainFilter::Remaining);

        let query: InventoryQuery = serde_json::from_str(r#"{"remain": null}"#).unwrap();
        assert_eq!(query.remain_filter(), RemainFilter::All);

        let query: InventoryQuery = serde_json::from_str(r#"{"remain": "false"}"#).unwrap();
        assert_eq!(query.remain_filter(), RemainFilter::SoldOut);

        let query: InventoryQuery = serde_json::from_str(r#"{"remain": ""}"#).unwrap();
        assert_eq!(query.remain_filter(), RemainFilter::All);

        assert!(serde_json::from_str::<InventoryQuery>(r#"{"remain": "maybe"}"#).is_err());
    }

    #[test]
    fn test_search_term_ignores_blank() {
        let query = InventoryQuery::default().with_search("   ");
        assert_eq!(query.search_term(), None);

        let query = InventoryQuery::default().with_search("  shoe ");
        assert_eq!(query.search_term(), Some("shoe"));
    }

    #[test]
    fn test_offset() {
        assert_eq!(InventoryQuery::page(5, 1).offset(), 0);
        assert_eq!(InventoryQuery::page(5, 3).offset(), 10);
        assert_eq!(InventoryQuery::page(5, 0).offset(), 0);
    }
}
