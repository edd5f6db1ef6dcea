//! Storage port — the repository contract for device persistence.

use std::future::Future;

use depot_domain::device::{Device, DeviceState};
use depot_domain::error::DepotError;
use depot_domain::id::DeviceId;

/// Persistence capabilities required by the device use-cases, independent of
/// storage technology.
///
/// Callers cancel an in-flight operation by dropping the returned future;
/// implementations must abort rather than complete silently. Single-record
/// writes are atomic: read methods never observe a partial write.
pub trait DeviceRepository {
    /// Persist a new device, returning it with its storage-assigned id.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, DepotError>> + Send;

    /// Fetch one device, or `None` when the id is unknown.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DepotError>> + Send;

    /// Snapshot of all devices, in unspecified order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, DepotError>> + Send;

    /// Devices whose brand matches exactly (case-sensitive).
    fn get_by_brand(
        &self,
        brand: &str,
    ) -> impl Future<Output = Result<Vec<Device>, DepotError>> + Send;

    /// Devices currently in the given state.
    fn get_by_state(
        &self,
        state: DeviceState,
    ) -> impl Future<Output = Result<Vec<Device>, DepotError>> + Send;

    /// Persist the full current field values of an already-loaded device.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, DepotError>> + Send;

    /// Remove the record.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DepotError>> + Send;
}
