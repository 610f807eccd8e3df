use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::{core_methods::named, Api},
    Error, Result,
};
use rudder_core::{codec, subresource::Scale, ResourceObject};

/// Methods gated on the identity's subresource capabilities.
///
/// Each checks the capability before building anything: attempting a facet
/// the identity does not declare fails with [`Error::SubresourceDisabled`]
/// and performs no network call.
impl<K> Api<K>
where
    K: DeserializeOwned,
{
    /// Replace the status of a named resource.
    ///
    /// This is the only write path that carries the `status` field; the
    /// server applies nothing but status from the sent document.
    pub async fn update_status(&self, obj: &K) -> Result<K>
    where
        K: Serialize + ResourceObject,
    {
        if !self.identity().has_status() {
            return Err(self.disabled("status"));
        }
        let name = named(obj, "update_status")?;
        let body = codec::to_json_body(obj)?;
        let req = self.request.replace_subresource("status", &name, body)?;
        self.client.request::<K>(req).await
    }

    /// Fetch the scale of a named resource.
    pub async fn get_scale(&self, name: &str) -> Result<Scale> {
        if self.identity().scale_paths().is_none() {
            return Err(self.disabled("scale"));
        }
        let req = self.request.get_subresource("scale", name)?;
        self.client.request::<Scale>(req).await
    }

    /// Replace the scale of a named resource.
    pub async fn update_scale(&self, name: &str, scale: &Scale) -> Result<Scale> {
        if self.identity().scale_paths().is_none() {
            return Err(self.disabled("scale"));
        }
        let body = codec::to_json_body(scale)?;
        let req = self.request.replace_subresource("scale", name, body)?;
        self.client.request::<Scale>(req).await
    }

    fn disabled(&self, subresource: &'static str) -> Error {
        Error::SubresourceDisabled {
            subresource,
            kind: self.identity().kind.clone(),
        }
    }
}
