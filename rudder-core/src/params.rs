//! Query parameter sets for list and watch calls.
use crate::selector::Selector;

/// Parameters for list calls on collections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListParams {
    /// Restrict returned objects by their labels. Defaults to everything.
    pub label_selector: Option<String>,

    /// Limit the number of results per page; the server responds with a
    /// continue token when more results exist.
    pub limit: Option<u32>,

    /// Fetch the next page of a previously limited list.
    pub continue_token: Option<String>,
}

impl ListParams {
    /// Set a raw label selector string.
    #[must_use]
    pub fn labels(mut self, label_selector: &str) -> Self {
        self.label_selector = Some(label_selector.to_string());
        self
    }

    /// Set the label selector from typed terms.
    #[must_use]
    pub fn selector(mut self, selector: &Selector) -> Self {
        if !selector.selects_all() {
            self.label_selector = Some(selector.to_string());
        }
        self
    }

    /// Set a result page limit.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set a continue token from a previous page.
    #[must_use]
    pub fn continue_token(mut self, token: &str) -> Self {
        self.continue_token = Some(token.to_string());
        self
    }
}

/// Parameters for watch calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WatchParams {
    /// Restrict watched objects by their labels. Defaults to everything.
    pub label_selector: Option<String>,

    /// Server-side timeout of the watch call in seconds.
    ///
    /// Bounds the call regardless of activity; defaults to 290s when unset.
    pub timeout: Option<u32>,
}

impl WatchParams {
    /// Set a raw label selector string.
    #[must_use]
    pub fn labels(mut self, label_selector: &str) -> Self {
        self.label_selector = Some(label_selector.to_string());
        self
    }

    /// Set the label selector from typed terms.
    #[must_use]
    pub fn selector(mut self, selector: &Selector) -> Self {
        if !selector.selects_all() {
            self.label_selector = Some(selector.to_string());
        }
        self
    }

    /// Set the server-side watch timeout in seconds.
    #[must_use]
    pub fn timeout(mut self, timeout_secs: u32) -> Self {
        self.timeout = Some(timeout_secs);
        self
    }
}
