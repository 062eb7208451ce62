//! The shipment resource.

use crate::object::TassiObject;
use crate::resource::{RequestorSlot, Resource, ResourceId};

/// A shipment grouping a package, its customer, and its route.
///
/// Shipments are primarily created (`Shipment::create`); the remaining
/// operations come from the [`Resource`] trait.
///
/// # Example
///
/// ```rust,no_run
/// use serde_json::json;
/// use tassi_api::{Resource, Shipment};
///
/// # async fn run() -> Result<(), tassi_api::TassiError> {
/// let shipment = Shipment::create(
///     json!({
///         "marketplace_id": "1",
///         "package": {"description": "Colis test", "weight": 5},
///         "route": {"origin": "Cotonou", "destination": "Porto-Novo"},
///     }),
///     None,
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Shipment {
    id: Option<ResourceId>,
}

impl Shipment {
    /// Creates an instance handle for the shipment with the given id.
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
}

impl Resource for Shipment {
    const NAME: &'static str = "shipment";

    fn requestor_slot() -> &'static RequestorSlot {
        static SLOT: RequestorSlot = RequestorSlot::new();
        &SLOT
    }

    fn id(&self) -> Option<&ResourceId> {
        self.id.as_ref()
    }
}
