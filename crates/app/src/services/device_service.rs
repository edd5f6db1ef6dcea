//! Device service — use-cases for managing the device catalog.

use std::str::FromStr;

use depot_domain::device::{Device, DeviceState};
use depot_domain::error::{DepotError, NotFoundError, ValidationError};
use depot_domain::id::DeviceId;

use crate::ports::DeviceRepository;

/// Trim `value` and treat blank or absent input as "not supplied".
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a state string leniently: blank or unrecognized input means
/// "no state specified" at this layer, not an error. Strict validation of
/// filter values happens at the HTTP boundary instead.
fn parse_state(raw: Option<&str>) -> Option<DeviceState> {
    non_blank(raw).and_then(|s| DeviceState::from_str(s).ok())
}

/// Application service for device catalog operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new device after validating domain invariants.
    ///
    /// The optional `state` string is parsed leniently; when absent or
    /// unrecognized the device starts out [`DeviceState::Available`].
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] when name or brand is blank, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn create_device(
        &self,
        name: &str,
        brand: &str,
        state: Option<&str>,
    ) -> Result<Device, DepotError> {
        let mut builder = Device::builder().name(name).brand(brand);
        if let Some(state) = parse_state(state) {
            builder = builder.state(state);
        }
        let device = builder.build()?;
        self.repo.create(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, DepotError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, DepotError> {
        self.repo.get_all().await
    }

    /// List devices whose brand matches `brand` exactly (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] when `brand` is blank, or a
    /// storage error from the repository.
    pub async fn get_devices_by_brand(&self, brand: &str) -> Result<Vec<Device>, DepotError> {
        let brand = brand.trim();
        if brand.is_empty() {
            return Err(ValidationError::EmptyBrand.into());
        }
        self.repo.get_by_brand(brand).await
    }

    /// List devices currently in `state`.
    ///
    /// The state arrives pre-parsed: the HTTP boundary rejects unparseable
    /// filter values before this method is reached.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn get_devices_by_state(&self, state: DeviceState) -> Result<Vec<Device>, DepotError> {
        self.repo.get_by_state(state).await
    }

    /// Full replace (PUT semantics): name, brand, and state must all be
    /// supplied and non-blank before the device is even loaded.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] when a required field is blank or
    /// the device is in use, [`DepotError::NotFound`] when `id` is unknown,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn replace_device(
        &self,
        id: DeviceId,
        name: Option<&str>,
        brand: Option<&str>,
        state: Option<&str>,
    ) -> Result<Device, DepotError> {
        let name = non_blank(name).ok_or(ValidationError::EmptyName)?;
        let brand = non_blank(brand).ok_or(ValidationError::EmptyBrand)?;
        let state = non_blank(state).ok_or(ValidationError::EmptyState)?;

        let mut device = self.get_device(id).await?;
        device.update(Some(name), Some(brand), parse_state(Some(state)))?;
        self.repo.update(device).await
    }

    /// Partial update (PATCH semantics): blank or absent fields fall back to
    /// the device's current values.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] when the device is in use (any
    /// patch resolves name and brand, see below), [`DepotError::NotFound`]
    /// when `id` is unknown, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        name: Option<&str>,
        brand: Option<&str>,
        state: Option<&str>,
    ) -> Result<Device, DepotError> {
        let mut device = self.get_device(id).await?;

        let name = non_blank(name).map_or_else(|| device.name.clone(), ToString::to_string);
        let brand = non_blank(brand).map_or_else(|| device.brand.clone(), ToString::to_string);
        let state = parse_state(state).unwrap_or(device.state);

        // The resolved values are passed back through `update`, so a
        // state-only patch on an in-use device still trips the
        // name/brand lock.
        device.update(Some(&name), Some(&brand), Some(state))?;
        self.repo.update(device).await
    }

    /// Delete a device by id. In-use devices cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] when the device is in use,
    /// [`DepotError::NotFound`] when `id` is unknown, or a storage error
    /// from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), DepotError> {
        let device = self.get_device(id).await?;
        if device.state == DeviceState::InUse {
            return Err(ValidationError::DeviceInUse.into());
        }
        self.repo.delete(device.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    struct InMemoryDeviceRepo {
        store: Mutex<HashMap<DeviceId, Device>>,
        next_id: AtomicI64,
    }

    impl Default for InMemoryDeviceRepo {
        fn default() -> Self {
            Self {
                store: Mutex::new(HashMap::new()),
                next_id: AtomicI64::new(1),
            }
        }
    }

    impl DeviceRepository for InMemoryDeviceRepo {
        fn create(
            &self,
            mut device: Device,
        ) -> impl Future<Output = Result<Device, DepotError>> + Send {
            device.id = DeviceId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let mut store = self.store.lock().unwrap();
            store.insert(device.id, device.clone());
            async { Ok(device) }
        }

        fn get_by_id(
            &self,
            id: DeviceId,
        ) -> impl Future<Output = Result<Option<Device>, DepotError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DepotError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Device> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn get_by_brand(
            &self,
            brand: &str,
        ) -> impl Future<Output = Result<Vec<Device>, DepotError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Device> = store.values().filter(|d| d.brand == brand).cloned().collect();
            async { Ok(result) }
        }

        fn get_by_state(
            &self,
            state: DeviceState,
        ) -> impl Future<Output = Result<Vec<Device>, DepotError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Device> = store.values().filter(|d| d.state == state).cloned().collect();
            async { Ok(result) }
        }

        fn update(
            &self,
            device: Device,
        ) -> impl Future<Output = Result<Device, DepotError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.insert(device.id, device.clone());
            async { Ok(device) }
        }

        fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DepotError>> + Send {
            let mut store = self.store.lock().unwrap();
            store.remove(&id);
            async { Ok(()) }
        }
    }

    fn make_service() -> DeviceService<InMemoryDeviceRepo> {
        DeviceService::new(InMemoryDeviceRepo::default())
    }

    #[tokio::test]
    async fn should_create_device_when_valid() {
        let svc = make_service();

        let created = svc.create_device("iPhone", "Apple", None).await.unwrap();
        assert_eq!(created.id, DeviceId::new(1));
        assert_eq!(created.state, DeviceState::Available);

        let fetched = svc.get_device(created.id).await.unwrap();
        assert_eq!(fetched.name, "iPhone");
        assert_eq!(fetched.brand, "Apple");
    }

    #[tokio::test]
    async fn should_parse_state_string_case_insensitively_on_create() {
        let svc = make_service();
        let created = svc
            .create_device("Galaxy", "Samsung", Some("inuse"))
            .await
            .unwrap();
        assert_eq!(created.state, DeviceState::InUse);
    }

    #[tokio::test]
    async fn should_default_state_when_create_state_is_unrecognized() {
        let svc = make_service();
        let created = svc
            .create_device("Galaxy", "Samsung", Some("Broken"))
            .await
            .unwrap();
        assert_eq!(created.state, DeviceState::Available);
    }

    #[tokio::test]
    async fn should_reject_create_when_name_is_blank() {
        let svc = make_service();
        let result = svc.create_device("   ", "Apple", None).await;
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_device_missing() {
        let svc = make_service();
        let result = svc.get_device(DeviceId::new(999)).await;
        assert!(matches!(result, Err(DepotError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_list_all_devices() {
        let svc = make_service();
        svc.create_device("iPhone", "Apple", None).await.unwrap();
        svc.create_device("Galaxy", "Samsung", None).await.unwrap();

        let all = svc.list_devices().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_filter_devices_by_brand_with_exact_match() {
        let svc = make_service();
        svc.create_device("iPhone", "Apple", None).await.unwrap();
        svc.create_device("MacBook", "Apple", None).await.unwrap();
        svc.create_device("Galaxy", "Samsung", None).await.unwrap();

        let apple = svc.get_devices_by_brand("Apple").await.unwrap();
        assert_eq!(apple.len(), 2);

        // Brand matching is case-sensitive.
        let lowercase = svc.get_devices_by_brand("apple").await.unwrap();
        assert!(lowercase.is_empty());
    }

    #[tokio::test]
    async fn should_reject_blank_brand_filter() {
        let svc = make_service();
        let result = svc.get_devices_by_brand("  ").await;
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::EmptyBrand))
        ));
    }

    #[tokio::test]
    async fn should_filter_devices_by_state() {
        let svc = make_service();
        svc.create_device("iPhone", "Apple", Some("InUse")).await.unwrap();
        svc.create_device("Galaxy", "Samsung", None).await.unwrap();

        let in_use = svc.get_devices_by_state(DeviceState::InUse).await.unwrap();
        assert_eq!(in_use.len(), 1);
        assert_eq!(in_use[0].name, "iPhone");
    }

    #[tokio::test]
    async fn should_replace_device_when_all_fields_supplied() {
        let svc = make_service();
        let created = svc.create_device("Old", "Apple", None).await.unwrap();

        let updated = svc
            .replace_device(created.id, Some("New"), Some("Apple"), Some("Inactive"))
            .await
            .unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.brand, "Apple");
        assert_eq!(updated.state, DeviceState::Inactive);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn should_reject_replace_when_a_required_field_is_missing() {
        let svc = make_service();
        let created = svc.create_device("iPhone", "Apple", None).await.unwrap();

        let result = svc
            .replace_device(created.id, None, Some("Apple"), Some("Available"))
            .await;
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::EmptyName))
        ));

        let result = svc
            .replace_device(created.id, Some("iPhone"), Some(" "), Some("Available"))
            .await;
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::EmptyBrand))
        ));

        let result = svc
            .replace_device(created.id, Some("iPhone"), Some("Apple"), None)
            .await;
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::EmptyState))
        ));
    }

    #[tokio::test]
    async fn should_validate_replace_input_before_loading_the_device() {
        // Missing fields fail even for ids that do not exist.
        let svc = make_service();
        let result = svc.replace_device(DeviceId::new(999), None, None, None).await;
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_keep_state_when_replace_state_is_unrecognized() {
        let svc = make_service();
        let created = svc
            .create_device("iPhone", "Apple", Some("Inactive"))
            .await
            .unwrap();

        let updated = svc
            .replace_device(created.id, Some("iPhone"), Some("Apple"), Some("Broken"))
            .await
            .unwrap();
        assert_eq!(updated.state, DeviceState::Inactive);
    }

    #[tokio::test]
    async fn should_reject_replace_when_renaming_in_use_device() {
        let svc = make_service();
        let created = svc
            .create_device("iPhone", "Apple", Some("InUse"))
            .await
            .unwrap();

        let result = svc
            .replace_device(created.id, Some("New"), Some("Apple"), Some("Available"))
            .await;
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::NameBrandLocked))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_replacing_missing_device() {
        let svc = make_service();
        let result = svc
            .replace_device(DeviceId::new(999), Some("N"), Some("B"), Some("Available"))
            .await;
        assert!(matches!(result, Err(DepotError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_patch_only_supplied_fields() {
        let svc = make_service();
        let created = svc.create_device("N", "B", None).await.unwrap();

        let updated = svc
            .update_device(created.id, None, None, Some("Inactive"))
            .await
            .unwrap();
        assert_eq!(updated.name, "N");
        assert_eq!(updated.brand, "B");
        assert_eq!(updated.state, DeviceState::Inactive);
    }

    #[tokio::test]
    async fn should_patch_name_only() {
        let svc = make_service();
        let created = svc.create_device("Old", "Apple", None).await.unwrap();

        let updated = svc
            .update_device(created.id, Some("New"), None, None)
            .await
            .unwrap();
        assert_eq!(updated.name, "New");
        assert_eq!(updated.brand, "Apple");
        assert_eq!(updated.state, DeviceState::Available);
    }

    #[tokio::test]
    async fn should_reject_state_only_patch_while_in_use() {
        // The fallback resolves name and brand to their current values, and
        // the name/brand lock triggers on any supplied value. A state-only
        // patch on an in-use device is therefore rejected.
        let svc = make_service();
        let created = svc
            .create_device("iPhone", "Apple", Some("InUse"))
            .await
            .unwrap();

        let result = svc
            .update_device(created.id, None, None, Some("Available"))
            .await;
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::NameBrandLocked))
        ));
    }

    #[tokio::test]
    async fn should_return_not_found_when_patching_missing_device() {
        let svc = make_service();
        let result = svc
            .update_device(DeviceId::new(999), Some("N"), None, None)
            .await;
        assert!(matches!(result, Err(DepotError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_device() {
        let svc = make_service();
        let created = svc.create_device("iPhone", "Apple", None).await.unwrap();

        svc.delete_device(created.id).await.unwrap();

        let result = svc.get_device(created.id).await;
        assert!(matches!(result, Err(DepotError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_reject_delete_when_device_in_use() {
        let svc = make_service();
        let created = svc
            .create_device("iPhone", "Apple", Some("InUse"))
            .await
            .unwrap();

        let result = svc.delete_device(created.id).await;
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::DeviceInUse))
        ));

        // Still present.
        assert!(svc.get_device(created.id).await.is_ok());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_device() {
        let svc = make_service();
        let result = svc.delete_device(DeviceId::new(999)).await;
        assert!(matches!(result, Err(DepotError::NotFound(_))));
    }
}
