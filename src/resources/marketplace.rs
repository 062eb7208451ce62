//! The marketplace resource.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::TassiError;
use crate::object::{TassiObject, TassiValue};
use crate::resource::{RequestorSlot, Resource, ResourceId};

/// A marketplace account shipping through the network.
///
/// Collection operations come from the [`Resource`] trait; a
/// `Marketplace` value is an instance handle for the id-scoped wallet
/// history action.
///
/// # Example
///
/// ```rust,no_run
/// use tassi_api::{Marketplace, Resource};
///
/// # async fn run() -> Result<(), tassi_api::TassiError> {
/// let marketplace = Marketplace::retrieve(1, None).await?;
///
/// let history = Marketplace::new(1).wallet_history(None, None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Marketplace {
    id: Option<ResourceId>,
}

impl Marketplace {
    /// Creates an instance handle for the marketplace with the given id.
    #[must_use]
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    /// Creates an instance handle from a hydrated object, taking its
    /// `id` attribute.
    #[must_use]
    pub fn from_object(object: &TassiObject) -> Self {
        Self {
            id: object.id().and_then(ResourceId::from_value),
        }
    }

    /// Fetches this marketplace's wallet movement history
    /// (`GET /marketplaces/{id}/wallet_history`). Optional params are
    /// placed in the query string.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] when the handle has no id
    /// or `params` is present but not a JSON object, and
    /// [`TassiError::ApiConnection`] on transport failure.
    pub async fn wallet_history(
        &self,
        params: Option<Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<TassiValue, TassiError> {
        self.instance_action("wallet_history", params, headers).await
    }
}

impl Resource for Marketplace {
    const NAME: &'static str = "marketplace";

    fn requestor_slot() -> &'static RequestorSlot {
        static SLOT: RequestorSlot = RequestorSlot::new();
        &SLOT
    }

    fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }
}
