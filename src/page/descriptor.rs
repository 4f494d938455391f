//! Per-page routing data: template, fixed constraints and resolved state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::route::{BaseUrlInfo, Constraints, Cookie, MatchResult};

/// Ordered string map used for path data and query parameters.
pub type PageData = BTreeMap<String, String>;

// ============================================================================
// PageState
// ============================================================================

/// Values a page instance carries.
///
/// Filled by the router on a successful match, or by the caller before
/// navigating to a page instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Base URL the page was resolved from.
    pub base_url: Option<BaseUrlInfo>,
    /// Path data bound from template placeholders.
    pub data: PageData,
    /// Query parameters.
    pub params: PageData,
    /// Cookies sent along with the page's request.
    pub cookies: Vec<Cookie>,
}

// ============================================================================
// PageDescriptor
// ============================================================================

/// Routing description of one page type plus its instance state.
///
/// # Example
///
/// ```ignore
/// // Two pages sharing one template, told apart by a fixed value.
/// let open = PageDescriptor::new("/orders/{state}").with_data("state", "open");
/// let closed = PageDescriptor::new("/orders/{state}").with_data("state", "closed");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageDescriptor {
    template: String,
    fixed_data: PageData,
    fixed_query: PageData,
    state: PageState,
}

impl PageDescriptor {
    /// Creates a descriptor for a path template.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    /// Adds a fixed path-data value the page requires.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fixed_data.insert(key.into(), value.into());
        self
    }

    /// Adds a fixed query value the page requires.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fixed_query.insert(key.into(), value.into());
        self
    }

    /// Returns the path template.
    #[inline]
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the fixed path-data values.
    #[inline]
    #[must_use]
    pub fn fixed_data(&self) -> &PageData {
        &self.fixed_data
    }

    /// Returns the fixed query values.
    #[inline]
    #[must_use]
    pub fn fixed_query(&self) -> &PageData {
        &self.fixed_query
    }

    /// Returns the matcher constraints.
    #[must_use]
    pub fn constraints(&self) -> Constraints<'_> {
        Constraints {
            data: (!self.fixed_data.is_empty()).then_some(&self.fixed_data),
            query: (!self.fixed_query.is_empty()).then_some(&self.fixed_query),
        }
    }

    /// Returns the instance state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Returns the instance state for editing.
    #[inline]
    pub fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }

    /// Sets one path-data value.
    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.state.data.insert(key.into(), value.into());
    }

    /// Sets one query parameter.
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.state.params.insert(key.into(), value.into());
    }

    /// Path data for URL assembly: fixed values, overlaid by instance data.
    #[must_use]
    pub fn effective_data(&self) -> PageData {
        overlay(&self.fixed_data, &self.state.data)
    }

    /// Query parameters for URL assembly: fixed values, overlaid by instance params.
    #[must_use]
    pub fn effective_params(&self) -> PageData {
        overlay(&self.fixed_query, &self.state.params)
    }

    /// Stores a successful match.
    pub(crate) fn populate(&mut self, base_url: BaseUrlInfo, matched: MatchResult) {
        self.state = PageState {
            base_url: Some(base_url),
            data: matched.data,
            params: matched.params,
            cookies: matched.cookies,
        };
    }
}

fn overlay(base: &PageData, top: &PageData) -> PageData {
    let mut merged = base.clone();
    merged.extend(top.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

// ============================================================================
// Tests
// ============================================================================
