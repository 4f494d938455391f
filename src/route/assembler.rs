//! Reverse direction: render a page template and its data into a URL.

use crate::page::PageData;

use super::base_url::BaseUrlInfo;

// ============================================================================
// Constants
// ============================================================================

/// Scheme of every assembled URL.
pub const SCHEME: &str = "https";

// ============================================================================
// UrlAssembler
// ============================================================================

/// Builds absolute URLs from page templates.
///
/// Two behaviors are kept as-is on purpose:
///
/// - a `{name}` with no entry in `data` stays in the output literally
/// - query keys and values are joined without percent-encoding
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlAssembler;

impl UrlAssembler {
    /// Assembles an absolute URL.
    ///
    /// # Arguments
    ///
    /// * `template` - Path template, e.g. `/users/{id}`
    /// * `data` - Values substituted into `{name}` placeholders
    /// * `params` - Query parameters, joined in map order
    /// * `actual` - Base URL info carried by the page
    /// * `default` - Base URL info of the owning service
    #[must_use]
    pub fn assemble(
        template: &str,
        data: &PageData,
        params: &PageData,
        actual: &BaseUrlInfo,
        default: &BaseUrlInfo,
    ) -> String {
        let base = actual.apply(default);

        let mut path = template.to_string();
        for (name, value) in data {
            path = path.replace(&format!("{{{name}}}"), value);
        }

        let mut url = format!(
            "{SCHEME}://{}{}{}",
            base.host(),
            base.absolute_path.trim_end_matches('/'),
            ensure_leading_slash(&path)
        );

        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }

        url
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

// ============================================================================
// Tests
// ============================================================================
