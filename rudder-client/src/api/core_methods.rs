use serde::{de::DeserializeOwned, Serialize};

use crate::{api::Api, Error, Result};
use rudder_core::{codec, object::ObjectList, params::ListParams, ResourceObject};

/// GET/POST/PUT/DELETE abstractions.
impl<K> Api<K>
where
    K: DeserializeOwned,
{
    /// Get a named resource.
    ///
    /// Fails with [`Error::NotFound`] when the object does not exist; use
    /// [`Api::get_opt`] to handle that case as `None`.
    pub async fn get(&self, name: &str) -> Result<K> {
        let req = self.request.get(name)?;
        self.client.request::<K>(req).await
    }

    /// Get a named resource if it exists.
    pub async fn get_opt(&self, name: &str) -> Result<Option<K>> {
        match self.get(name).await {
            Ok(obj) => Ok(Some(obj)),
            Err(Error::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Get a list of resources, everything or a labelled subset.
    ///
    /// The returned list's `metadata.resourceVersion` is the cursor for a
    /// watch picking up right after this snapshot.
    pub async fn list(&self, lp: &ListParams) -> Result<ObjectList<K>> {
        let req = self.request.list(lp)?;
        self.client.request::<ObjectList<K>>(req).await
    }

    /// Create a resource.
    ///
    /// The object's `metadata.name` must be set. Any in-memory status is
    /// not sent; status is only writable through
    /// [`Api::update_status`](Api::update_status).
    pub async fn create(&self, obj: &K) -> Result<K>
    where
        K: Serialize,
    {
        let body = codec::to_json_body_without_status(obj)?;
        let req = self.request.create(body)?;
        self.client.request::<K>(req).await
    }

    /// Replace a resource with a new version of itself.
    ///
    /// The object must carry the `metadata.resourceVersion` of the version
    /// it was derived from; a stale cursor makes the server reject the
    /// write with [`Error::Conflict`], which is surfaced, not retried. Like
    /// [`create`](Api::create) this never writes status.
    pub async fn update(&self, obj: &K) -> Result<K>
    where
        K: Serialize + ResourceObject,
    {
        let name = named(obj, "update")?;
        let body = codec::to_json_body_without_status(obj)?;
        let req = self.request.replace(&name, body)?;
        self.client.request::<K>(req).await
    }

    /// Delete a named resource.
    pub async fn delete(&self, name: &str) -> Result<()> {
        let req = self.request.delete(name)?;
        self.client.request_text(req).await?;
        Ok(())
    }
}

/// The object's name, required for instance-level write calls.
pub(crate) fn named<K: ResourceObject>(obj: &K, verb: &str) -> Result<String> {
    obj.metadata().name.clone().ok_or_else(|| {
        Error::BuildRequest(rudder_core::Error::Validation(format!(
            "{verb} requires metadata.name to be set"
        )))
    })
}
