//! Device — a catalogued asset with a name, a brand, and an operational state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DepotError, ValidationError};
use crate::id::DeviceId;
use crate::time::{self, Timestamp};

/// Operational state of a [`Device`].
///
/// The state governs mutability and deletability: name and brand are frozen
/// while a device is [`InUse`](DeviceState::InUse), and an in-use device
/// cannot be deleted. State changes themselves are always allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceState {
    /// Ready to be handed out. The default for new devices.
    #[default]
    Available,
    /// Currently handed out; name and brand are frozen.
    InUse,
    /// Retired from circulation but kept on record.
    Inactive,
}

impl DeviceState {
    /// Canonical name of the state. Also the storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::InUse => "InUse",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceState {
    type Err = ValidationError;

    /// Case-insensitive match against the canonical state names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("available") {
            Ok(Self::Available)
        } else if s.eq_ignore_ascii_case("inuse") {
            Ok(Self::InUse)
        } else if s.eq_ignore_ascii_case("inactive") {
            Ok(Self::Inactive)
        } else {
            Err(ValidationError::UnknownState(s.to_string()))
        }
    }
}

/// A catalogued device.
///
/// Construct through [`Device::builder`], which enforces the field
/// invariants. The `id` is assigned by the storage layer on first persist;
/// `created_at` is stamped once at construction. Neither has a mutator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub brand: String,
    pub state: DeviceState,
    pub created_at: Timestamp,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Apply a field-wise update.
    ///
    /// `None` means "no change requested" for that field, while `Some` of a
    /// blank string is a validation error. While the device is in use, any
    /// supplied name or brand is rejected before field-level validation runs.
    /// A supplied state is applied unconditionally, even while in use.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] when a name or brand change is
    /// attempted on an in-use device, or when a supplied field is blank
    /// after trimming.
    pub fn update(
        &mut self,
        name: Option<&str>,
        brand: Option<&str>,
        state: Option<DeviceState>,
    ) -> Result<(), DepotError> {
        if self.state == DeviceState::InUse && (name.is_some() || brand.is_some()) {
            return Err(ValidationError::NameBrandLocked.into());
        }

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptyName.into());
            }
            self.name = name.to_string();
        }

        if let Some(brand) = brand {
            let brand = brand.trim();
            if brand.is_empty() {
                return Err(ValidationError::EmptyBrand.into());
            }
            self.brand = brand.to_string();
        }

        if let Some(state) = state {
            self.state = state;
        }

        Ok(())
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    name: Option<String>,
    brand: Option<String>,
    state: Option<DeviceState>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// Name and brand are trimmed. The state defaults to
    /// [`DeviceState::Available`] and `created_at` to the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] when name or brand is missing or
    /// blank after trimming.
    pub fn build(self) -> Result<Device, DepotError> {
        let name = self.name.as_deref().map_or("", str::trim);
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let brand = self.brand.as_deref().map_or("", str::trim);
        if brand.is_empty() {
            return Err(ValidationError::EmptyBrand.into());
        }

        Ok(Device {
            id: DeviceId::default(),
            name: name.to_string(),
            brand: brand.to_string(),
            state: self.state.unwrap_or_default(),
            created_at: time::now(),
        })
    }
}
