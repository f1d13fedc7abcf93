/// Display name used when a speaker does not report one
pub const UNNAMED: &str = "Unnamed";

/// Raw speaker description as reported by the device itself. Every field may
/// be absent; a missing field means "unknown", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub uid: Option<String>,
    pub display_name: Option<String>,
    pub serial_number: Option<String>,
    pub mac_address: Option<String>,
}

impl DeviceInfo {
    /// Build a registry record from this description, or `None` when the
    /// device carries no identity (bridge-only nodes report no uid).
    pub fn into_record(self, network_address: &str) -> Option<DeviceRecord> {
        let uid = self.uid.filter(|uid| !uid.is_empty())?;

        Some(DeviceRecord {
            uid,
            display_name: self
                .display_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNNAMED.to_string()),
            network_address: network_address.to_string(),
            serial_number: self.serial_number.unwrap_or_default(),
            mac_address: self.mac_address.unwrap_or_default(),
        })
    }
}

/// Identity and display data for one known zone player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    /// Stable device identifier, unique across the registry
    pub uid: String,
    /// Never empty in the exposed model; falls back to [`UNNAMED`]
    pub display_name: String,
    pub network_address: String,
    pub serial_number: String,
    pub mac_address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_requires_a_uid() {
        let info = DeviceInfo {
            display_name: Some("Kitchen".to_string()),
            ..DeviceInfo::default()
        };
        assert_eq!(info.into_record("192.168.1.140"), None);
    }

    #[test]
    fn missing_name_falls_back_to_unnamed() {
        let info = DeviceInfo {
            uid: Some("RINCON_A".to_string()),
            ..DeviceInfo::default()
        };
        let record = info.into_record("192.168.1.140").unwrap();
        assert_eq!(record.display_name, UNNAMED);
        assert_eq!(record.network_address, "192.168.1.140");
        assert_eq!(record.serial_number, "");
    }
}
