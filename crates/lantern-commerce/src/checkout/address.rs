//! Shipping details and administrative regions.

use serde::{Deserialize, Serialize};

/// A province or ward from the administrative division directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Division code.
    pub code: u32,
    /// Display name.
    pub name: String,
}

impl Region {
    /// Create a region.
    pub fn new(code: u32, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// What the shopper typed and picked on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingInfo {
    /// Receiver's full name.
    pub receiver_name: String,
    /// Receiver's phone number.
    pub receiver_phone: String,
    /// House number and street.
    pub address_line: String,
    /// Top-level region.
    pub province: Option<Region>,
    /// Region within the province.
    pub ward: Option<Region>,
    /// Note for the courier.
    pub note: String,
}

impl ShippingInfo {
    /// Create shipping info with the required text fields.
    pub fn new(
        receiver_name: impl Into<String>,
        receiver_phone: impl Into<String>,
        address_line: impl Into<String>,
    ) -> Self {
        Self {
            receiver_name: receiver_name.into(),
            receiver_phone: receiver_phone.into(),
            address_line: address_line.into(),
            ..Self::default()
        }
    }

    /// Set both region selections.
    pub fn with_regions(mut self, province: Region, ward: Region) -> Self {
        self.province = Some(province);
        self.ward = Some(ward);
        self
    }

    /// Set the courier note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Names of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.receiver_name.trim().is_empty() {
            missing.push("receiver name");
        }
        if self.receiver_phone.trim().is_empty() {
            missing.push("receiver phone");
        }
        if self.address_line.trim().is_empty() {
            missing.push("address line");
        }
        if self.province.is_none() {
            missing.push("province");
        }
        if self.ward.is_none() {
            missing.push("ward");
        }
        missing
    }

    /// Check if every required field is filled.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// `"<address line>, <ward>, <province>"`, once both regions are chosen.
    pub fn full_address(&self) -> Option<String> {
        let ward = self.ward.as_ref()?;
        let province = self.province.as_ref()?;
        Some(format!(
            "{}, {}, {}",
            self.address_line.trim(),
            ward.name,
            province.name
        ))
    }
}
