//! Cursor-paginated list envelope

use serde::{Deserialize, Serialize};

/// One page of a list response.
///
/// `data` is kept in the order the server returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Object type, always `list`.
    #[serde(default = "default_object")]
    pub object: String,

    /// Items in this page.
    pub data: Vec<T>,

    /// ID of the first item in this page.
    #[serde(default)]
    pub first_id: Option<String>,

    /// ID of the last item in this page.
    #[serde(default)]
    pub last_id: Option<String>,

    /// Whether more items exist after this page.
    #[serde(default)]
    pub has_more: bool,
}

fn default_object() -> String {
    "list".to_string()
}

impl<T> Page<T> {
    /// Cursor for the next page, if there is one.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_more {
            self.last_id.as_deref()
        } else {
            None
        }
    }

    /// Cursor for the previous page.
    pub fn prev_cursor(&self) -> Option<&str> {
        self.first_id.as_deref()
    }

    /// Whether the page has no items.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_cursors() {
        let page: Page<serde_json::Value> = serde_json::from_value(json!({
            "object": "list",
            "data": [{"id": "vs_1"}, {"id": "vs_2"}],
            "first_id": "vs_1",
            "last_id": "vs_2",
            "has_more": true
        }))
        .unwrap();

        assert_eq!(page.next_cursor(), Some("vs_2"));
        assert_eq!(page.prev_cursor(), Some("vs_1"));
    }

    #[test]
    fn test_last_page_has_no_next_cursor() {
        let page: Page<serde_json::Value> = serde_json::from_value(json!({
            "data": [],
            "first_id": null,
            "last_id": null,
            "has_more": false
        }))
        .unwrap();

        assert!(page.is_empty());
        assert_eq!(page.next_cursor(), None);
        assert_eq!(page.object, "list");
    }
}
