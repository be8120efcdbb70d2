//! Query string encoding for list endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort order by `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Oldest first.
    Asc,
    /// Newest first.
    Desc,
}

impl Order {
    /// Wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination parameters shared by every list operation.
///
/// Values are passed through unvalidated; out-of-range limits are rejected by
/// the service.
///
/// ```rust
/// use turbostore::{ListParams, Order};
///
/// assert_eq!(ListParams::new().to_query_string(), "");
/// assert_eq!(
///     ListParams::new().limit(5).order(Order::Asc).to_query_string(),
///     "?limit=5&order=asc"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Sort order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,

    /// Return items after this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    /// Return items before this ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

impl ListParams {
    /// Create list params with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sort order.
    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the after cursor.
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Set the before cursor.
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Whether no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.order.is_none() && self.after.is_none() && self.before.is_none()
    }

    /// Encode as `?key=value&...` in the fixed order `limit, order, after, before`.
    ///
    /// Returns an empty string when nothing is set.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<String> = Vec::with_capacity(4);

        if let Some(limit) = self.limit {
            pairs.push(format!("limit={}", limit));
        }
        if let Some(order) = self.order {
            pairs.push(format!("order={}", order.as_str()));
        }
        if let Some(after) = &self.after {
            pairs.push(format!("after={}", urlencoding::encode(after)));
        }
        if let Some(before) = &self.before {
            pairs.push(format!("before={}", urlencoding::encode(before)));
        }

        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}
