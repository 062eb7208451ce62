//! Generic resource layer: path derivation and CRUD primitives.
//!
//! This module defines the [`Resource`] trait, which turns a resource
//! type's identity into its wire paths and provides the shared
//! retrieve/all/create/update/delete operations plus an instance-scoped
//! sub-path escape hatch. Concrete resources implement the trait by
//! naming themselves and supplying a [`RequestorSlot`]; everything else
//! is a default method.
//!
//! # Implementing a resource
//!
//! ```rust
//! use tassi_api::{RequestorSlot, Resource, ResourceId};
//!
//! pub struct Carrier {
//!     id: Option<ResourceId>,
//! }
//!
//! impl Resource for Carrier {
//!     const NAME: &'static str = "carrier";
//!
//!     fn requestor_slot() -> &'static RequestorSlot {
//!         static SLOT: RequestorSlot = RequestorSlot::new();
//!         &SLOT
//!     }
//!
//!     fn id(&self) -> Option<&ResourceId> {
//!         self.id.as_ref()
//!     }
//! }
//!
//! assert_eq!(Carrier::collection_path(), "/carriers");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{Map, Value};

use crate::error::TassiError;
use crate::object::TassiValue;
use crate::requestor::{HttpMethod, Requestor};

/// Pluralizes a resource name for its collection path.
///
/// The rule is a fixed, non-linguistic heuristic: a trailing `y` is
/// replaced with `ies`; otherwise a trailing `s` gets `es` appended;
/// otherwise `s` is appended. Callers may depend on its exact output
/// (including for irregular words), so it must not be "improved" with a
/// real inflection library.
#[must_use]
pub fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        return format!("{stem}ies");
    }
    if word.ends_with('s') {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// The identifier of a resource instance, as it appears in URLs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceId {
    /// A numeric identifier.
    Int(i64),
    /// A string identifier.
    Str(String),
}

impl ResourceId {
    /// Extracts an identifier from a hydrated attribute value, for
    /// building an instance handle out of a retrieved object.
    #[must_use]
    pub fn from_value(value: &TassiValue) -> Option<Self> {
        match value {
            TassiValue::Number(number) => number.as_i64().map(Self::Int),
            TassiValue::String(text) => Some(Self::Str(text.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

/// A per-resource-type requestor cell: lazily constructs a default
/// [`Requestor`] on first use and can be replaced at any time via
/// [`set`](Self::set). Replacement is the substitution seam tests use.
///
/// First use is race-free: concurrent callers observing an empty slot
/// serialize on the write lock and share the single requestor the
/// winner installed.
#[derive(Debug)]
pub struct RequestorSlot {
    inner: RwLock<Option<Arc<Requestor>>>,
}

impl RequestorSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Installs a requestor, replacing any previously resolved one.
    pub fn set(&self, requestor: Arc<Requestor>) {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(requestor);
    }

    /// Returns the installed requestor, constructing the default one on
    /// first use.
    pub fn get(&self) -> Arc<Requestor> {
        {
            let slot = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(requestor) = slot.as_ref() {
                return Arc::clone(requestor);
            }
        }

        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slot.get_or_insert_with(|| Arc::new(Requestor::new())))
    }
}

impl Default for RequestorSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// A Tassi API resource with CRUD operations derived from its name.
///
/// Implementors supply [`NAME`](Self::NAME) (the lowercase singular
/// name, which doubles as the response-body unwrap key), a static
/// [`RequestorSlot`], and access to the instance id. The collection path
/// is `/` plus the pluralized name; the instance path appends `/{id}`.
///
/// Every operation issues exactly one HTTP call and suspends until it
/// completes; there are no retries and no internal parallelism.
#[allow(async_fn_in_trait)]
pub trait Resource {
    /// The lowercase singular resource name (e.g. `"package"`).
    const NAME: &'static str;

    /// Returns the static requestor slot owned by this resource type.
    fn requestor_slot() -> &'static RequestorSlot;

    /// Returns the instance identifier, if this handle has one.
    fn id(&self) -> Option<&ResourceId>;

    /// Returns the requestor, constructing the default one on first use.
    #[must_use]
    fn requestor() -> Arc<Requestor> {
        Self::requestor_slot().get()
    }

    /// Replaces the requestor for this resource type.
    fn set_requestor(requestor: Arc<Requestor>) {
        Self::requestor_slot().set(requestor);
    }

    /// Returns the collection path, `/` plus the pluralized name.
    #[must_use]
    fn collection_path() -> String {
        format!("/{}", pluralize(Self::NAME))
    }

    /// Returns the instance path for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] when `id` is absent,
    /// naming the resource type in the message.
    fn instance_path(id: Option<&ResourceId>) -> Result<String, TassiError> {
        id.map_or_else(
            || {
                Err(TassiError::InvalidRequest(format!(
                    "Could not determine which URL to request: {} instance has an invalid id (none)",
                    Self::NAME
                )))
            },
            |id| Ok(format!("{}/{id}", Self::collection_path())),
        )
    }

    /// Returns the instance path of this handle.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] when the handle has no id.
    fn instance_url(&self) -> Result<String, TassiError> {
        Self::instance_path(self.id())
    }

    /// Retrieves a single instance by id.
    ///
    /// The response body is unwrapped under the singular resource name
    /// when that key is present and non-null, then hydrated.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::ApiConnection`] on transport failure.
    async fn retrieve(
        id: impl Into<ResourceId> + Send,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<TassiValue, TassiError> {
        let id = id.into();
        let path = Self::instance_path(Some(&id))?;

        let envelope = Self::requestor()
            .request(HttpMethod::Get, &path, None, headers)
            .await?;
        Ok(TassiValue::hydrate(unwrap_singular(
            Self::NAME,
            envelope.data,
        )))
    }

    /// Lists the collection. The full raw body is hydrated; locating
    /// the list and any pagination keys within it is the caller's
    /// concern.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] before any network call
    /// when `params` is present but not a JSON object, and
    /// [`TassiError::ApiConnection`] on transport failure.
    async fn all(
        params: Option<Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<TassiValue, TassiError> {
        let params = validate_params(Self::NAME, params)?;
        let path = Self::collection_path();

        let envelope = Self::requestor()
            .request(HttpMethod::Get, &path, params.as_ref(), headers)
            .await?;
        Ok(TassiValue::hydrate(envelope.data))
    }

    /// Creates an instance from `params`.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] before any network call
    /// when `params` is not a JSON object, and
    /// [`TassiError::ApiConnection`] on transport failure.
    async fn create(
        params: Value,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<TassiValue, TassiError> {
        let params = validate_params(Self::NAME, Some(params))?;
        let path = Self::collection_path();

        let envelope = Self::requestor()
            .request(HttpMethod::Post, &path, params.as_ref(), headers)
            .await?;
        Ok(TassiValue::hydrate(unwrap_singular(
            Self::NAME,
            envelope.data,
        )))
    }

    /// Updates the instance identified by `id` with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] before any network call
    /// when `params` is not a JSON object, and
    /// [`TassiError::ApiConnection`] on transport failure.
    async fn update(
        id: impl Into<ResourceId> + Send,
        params: Value,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<TassiValue, TassiError> {
        let params = validate_params(Self::NAME, Some(params))?;
        let id = id.into();
        let path = Self::instance_path(Some(&id))?;

        let envelope = Self::requestor()
            .request(HttpMethod::Put, &path, params.as_ref(), headers)
            .await?;
        Ok(TassiValue::hydrate(unwrap_singular(
            Self::NAME,
            envelope.data,
        )))
    }

    /// Deletes this instance. Fire-and-forget: the response body is
    /// discarded and the handle stays valid.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] when the handle has no id
    /// and [`TassiError::ApiConnection`] on transport failure.
    async fn delete(&self, headers: Option<&HashMap<String, String>>) -> Result<(), TassiError> {
        let path = self.instance_url()?;

        Self::requestor()
            .request(HttpMethod::Delete, &path, None, headers)
            .await?;
        Ok(())
    }

    /// Issues a GET to an arbitrary sub-path under this instance's URL,
    /// through the same parameter-validation and hydration pipeline as
    /// the CRUD primitives. This is the escape hatch resource-specific
    /// actions (tracking, wallet history) are built on.
    ///
    /// # Errors
    ///
    /// Returns [`TassiError::InvalidRequest`] when the handle has no id
    /// or `params` is present but not a JSON object, and
    /// [`TassiError::ApiConnection`] on transport failure.
    async fn instance_action(
        &self,
        action: &str,
        params: Option<Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<TassiValue, TassiError> {
        let params = validate_params(Self::NAME, params)?;
        let path = format!("{}/{action}", self.instance_url()?);

        let envelope = Self::requestor()
            .request(HttpMethod::Get, &path, params.as_ref(), headers)
            .await?;
        Ok(TassiValue::hydrate(envelope.data))
    }
}

/// Checks that params, when present, are a JSON object, and extracts the
/// mapping. `null` counts as absent.
fn validate_params(
    name: &str,
    params: Option<Value>,
) -> Result<Option<Map<String, Value>>, TassiError> {
    match params {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(TassiError::InvalidRequest(format!(
            "You must pass a JSON object as the parameters for {name} API calls"
        ))),
    }
}

/// Unwraps a singular response body: when the body is an object with a
/// non-null value under `name`, that value is the payload; otherwise the
/// body is used as-is.
fn unwrap_singular(name: &str, mut data: Value) -> Value {
    if let Value::Object(ref mut map) = data {
        if map.get(name).is_some_and(|value| !value.is_null()) {
            if let Some(inner) = map.remove(name) {
                return inner;
            }
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Widget {
        id: Option<ResourceId>,
    }

    impl Resource for Widget {
        const NAME: &'static str = "widget";

        fn requestor_slot() -> &'static RequestorSlot {
            static SLOT: RequestorSlot = RequestorSlot::new();
            &SLOT
        }

        fn id(&self) -> Option<&ResourceId> {
            self.id.as_ref()
        }
    }

    #[test]
    fn test_pluralize_rules() {
        assert_eq!(pluralize("package"), "packages");
        assert_eq!(pluralize("marketplace"), "marketplaces");
        assert_eq!(pluralize("shipment"), "shipments");
        // Trailing-y and trailing-s rules.
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("bus"), "buses");
    }

    #[test]
    fn test_collection_path() {
        assert_eq!(Widget::collection_path(), "/widgets");
    }

    #[test]
    fn test_instance_path_with_id() {
        let id = ResourceId::from(7);
        assert_eq!(Widget::instance_path(Some(&id)).unwrap(), "/widgets/7");

        let id = ResourceId::from("w_abc123");
        assert_eq!(
            Widget::instance_path(Some(&id)).unwrap(),
            "/widgets/w_abc123"
        );
    }

    #[test]
    fn test_instance_path_without_id_is_invalid_request() {
        let error = Widget::instance_path(None).unwrap_err();

        assert!(matches!(error, TassiError::InvalidRequest(_)));
        assert!(error.to_string().contains("widget"));
        assert!(error.to_string().contains("invalid id"));
    }

    #[test]
    fn test_instance_url_uses_handle_id() {
        let widget = Widget {
            id: Some(ResourceId::from(3)),
        };
        assert_eq!(widget.instance_url().unwrap(), "/widgets/3");

        let widget = Widget { id: None };
        assert!(matches!(
            widget.instance_url(),
            Err(TassiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_validate_params_accepts_objects_and_absence() {
        assert!(validate_params("widget", None).unwrap().is_none());
        assert!(validate_params("widget", Some(Value::Null))
            .unwrap()
            .is_none());

        let map = validate_params("widget", Some(json!({"x": 1})))
            .unwrap()
            .unwrap();
        assert_eq!(map.get("x"), Some(&json!(1)));
    }

    #[test]
    fn test_validate_params_rejects_non_objects() {
        for bad in [json!([1, 2, 3]), json!("x"), json!(4), json!(true)] {
            let error = validate_params("widget", Some(bad)).unwrap_err();
            assert!(matches!(error, TassiError::InvalidRequest(_)));
            assert!(error.to_string().contains("widget"));
        }
    }

    #[test]
    fn test_unwrap_singular_prefers_name_key() {
        let data = json!({"widget": {"id": 1}, "meta": {}});
        assert_eq!(unwrap_singular("widget", data), json!({"id": 1}));
    }

    #[test]
    fn test_unwrap_singular_falls_back_to_raw_body() {
        let data = json!({"id": 1, "name": "Market1"});
        assert_eq!(unwrap_singular("widget", data.clone()), data);
    }

    #[test]
    fn test_unwrap_singular_ignores_null_value() {
        let data = json!({"widget": null, "id": 1});
        assert_eq!(unwrap_singular("widget", data.clone()), data);
    }

    #[test]
    fn test_resource_id_display_and_conversions() {
        assert_eq!(ResourceId::from(4).to_string(), "4");
        assert_eq!(ResourceId::from("pkg_1").to_string(), "pkg_1");
        assert_eq!(ResourceId::from(2_u32), ResourceId::Int(2));
    }

    #[test]
    fn test_resource_id_from_hydrated_value() {
        assert_eq!(
            ResourceId::from_value(&TassiValue::hydrate(json!(4))),
            Some(ResourceId::Int(4))
        );
        assert_eq!(
            ResourceId::from_value(&TassiValue::hydrate(json!("pkg_1"))),
            Some(ResourceId::Str("pkg_1".to_string()))
        );
        assert_eq!(ResourceId::from_value(&TassiValue::Null), None);
    }

    #[test]
    fn test_requestor_slot_override_replaces_default() {
        let slot = RequestorSlot::new();
        let first = slot.get();

        let replacement = Arc::new(Requestor::new());
        slot.set(Arc::clone(&replacement));

        assert!(Arc::ptr_eq(&slot.get(), &replacement));
        assert!(!Arc::ptr_eq(&slot.get(), &first));
    }

    #[test]
    fn test_requestor_slot_resolves_once() {
        let slot = RequestorSlot::new();
        let first = slot.get();
        let second = slot.get();

        assert!(Arc::ptr_eq(&first, &second));
    }
}
