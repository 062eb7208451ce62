//! The package resource.

use std::collections::HashMap;

use crate::error::TassiError;
use crate::object::{TassiObject, TassiValue};
use crate::resource::{RequestorSlot, Resource, ResourceId};

/// A package moving through the logistics network.
///
/// Collection operations are associated functions from the [`Resource`]
/// trait (`Package::retrieve`, `Package::all`, `Package::update`, ...);
/// a `Package` value is an instance handle for the id-scoped actions.
///
/// # Example
///
/// ```rust,no_run
/// use tassi_api::{Package, Resource};
///
/// # async fn run() -> Result<(), tassi_api::TassiError> {
/// let package = Package::retrieve(4, None).await?;
///
/// let events = Package::new(4).track(None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Package {
    id: Option<ResourceId>,
}

impl Package {
    /// Creates an instance handle for the package with the given id.
    #[must_use]
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    /// Creates an instance handle from a hydrated object, taking its
    /// `id` attribute. The handle has no id when the object lacks one;
    /// instance actions on it then fail with an invalid-request error.
    #[must_use]
    pub fn from_object(object: &TassiObject) -> Self {
        Self {
            id: object.id().and_then(ResourceId::from_value),
        }
    }

    /// Fetches the tracking timeline for this package
    /// (`GET /packages/{id}/track`).
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] when the handle has no id
    /// and [`TassiError::ApiConnection`] on transport failure.
    pub async fn track(
        &self,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<TassiValue, TassiError> {
        self.instance_action("track", None, headers).await
    }

    /// Fetches one of this package's shipping labels
    /// (`GET /packages/{id}/shipping_labels/{label_id}`).
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] when the handle has no id
    /// and [`TassiError::ApiConnection`] on transport failure.
    pub async fn shipping_label(
        &self,
        label_id: impl Into<ResourceId> + Send,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<TassiValue, TassiError> {
        let label_id = label_id.into();
        self.instance_action(&format!("shipping_labels/{label_id}"), None, headers)
            .await
    }
}

impl Resource for Package {
    const NAME: &'static str = "package";

    fn requestor_slot() -> &'static RequestorSlot {
        static SLOT: RequestorSlot = RequestorSlot::new();
        &SLOT
    }

    fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }
}
