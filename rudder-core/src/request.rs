//! Request builder: turns a resource url path into `http::Request` values.
use crate::{
    error::Error,
    params::{ListParams, WatchParams},
};

// watch calls outlive proxies with 300s idle timeouts, stay under it
const DEFAULT_WATCH_TIMEOUT_SECS: u32 = 290;

/// A request builder for a resource collection path.
///
/// Holds the path derived from a [`ResourceIdentity`](crate::ResourceIdentity)
/// and supplies constructors for the protocol's operations. All constructors
/// are pure; the returned `http::Request` values carry JSON bodies as bytes.
#[derive(Debug, Clone)]
pub struct Request {
    /// The path component of the collection url.
    pub url_path: String,
}

impl Request {
    /// New request builder for a collection url path.
    pub fn new<S: Into<String>>(url_path: S) -> Self {
        Self {
            url_path: url_path.into(),
        }
    }

    fn finish(&self, mut qp: form_urlencoded::Serializer<String>) -> String {
        let query = qp.finish();
        if query.is_empty() {
            self.url_path.clone()
        } else {
            format!("{}?{}", self.url_path, query)
        }
    }
}

/// Convenience constructors following the server's API conventions.
impl Request {
    /// List a collection.
    pub fn list(&self, lp: &ListParams) -> Result<http::Request<Vec<u8>>, Error> {
        let mut qp = form_urlencoded::Serializer::new(String::new());
        if let Some(labels) = &lp.label_selector {
            qp.append_pair("labelSelector", labels);
        }
        if let Some(limit) = &lp.limit {
            qp.append_pair("limit", &limit.to_string());
        }
        if let Some(continue_token) = &lp.continue_token {
            qp.append_pair("continue", continue_token);
        }
        let urlstr = self.finish(qp);
        http::Request::get(urlstr).body(vec![]).map_err(Error::Http)
    }

    /// Watch a collection, optionally from a starting cursor.
    ///
    /// Without a cursor the server implicitly starts from its current state.
    pub fn watch(
        &self,
        wp: &WatchParams,
        cursor: Option<&str>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        let mut qp = form_urlencoded::Serializer::new(String::new());
        qp.append_pair("watch", "true");
        if let Some(cursor) = cursor {
            qp.append_pair("resourceVersion", cursor);
        }
        qp.append_pair(
            "timeoutSeconds",
            &wp.timeout.unwrap_or(DEFAULT_WATCH_TIMEOUT_SECS).to_string(),
        );
        if let Some(labels) = &wp.label_selector {
            qp.append_pair("labelSelector", labels);
        }
        let urlstr = self.finish(qp);
        http::Request::get(urlstr).body(vec![]).map_err(Error::Http)
    }

    /// Get a single named instance.
    pub fn get(&self, name: &str) -> Result<http::Request<Vec<u8>>, Error> {
        let urlstr = format!("{}/{}", self.url_path, name);
        http::Request::get(urlstr).body(vec![]).map_err(Error::Http)
    }

    /// Create an instance from an encoded body.
    pub fn create(&self, data: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        http::Request::post(self.url_path.clone())
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(data)
            .map_err(Error::Http)
    }

    /// Replace a named instance with an encoded body.
    ///
    /// The body must carry `metadata.resourceVersion` for the server to
    /// detect conflicting concurrent writes.
    pub fn replace(&self, name: &str, data: Vec<u8>) -> Result<http::Request<Vec<u8>>, Error> {
        let urlstr = format!("{}/{}", self.url_path, name);
        http::Request::put(urlstr)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(data)
            .map_err(Error::Http)
    }

    /// Delete a named instance.
    pub fn delete(&self, name: &str) -> Result<http::Request<Vec<u8>>, Error> {
        let urlstr = format!("{}/{}", self.url_path, name);
        http::Request::delete(urlstr)
            .body(vec![])
            .map_err(Error::Http)
    }
}

/// Subresource constructors.
impl Request {
    /// Get a named instance's subresource.
    pub fn get_subresource(
        &self,
        subresource: &str,
        name: &str,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        let urlstr = format!("{}/{}/{}", self.url_path, name, subresource);
        http::Request::get(urlstr).body(vec![]).map_err(Error::Http)
    }

    /// Replace a named instance's subresource with an encoded body.
    pub fn replace_subresource(
        &self,
        subresource: &str,
        name: &str,
        data: Vec<u8>,
    ) -> Result<http::Request<Vec<u8>>, Error> {
        let urlstr = format!("{}/{}/{}", self.url_path, name, subresource);
        http::Request::put(urlstr)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(data)
            .map_err(Error::Http)
    }
}
