use uuid::Uuid;

// Namespace for accessory identities. Changing it would orphan every
// accessory the host runtime has persisted, so it is fixed forever.
const ACCESSORY_NAMESPACE: Uuid = Uuid::from_u128(0x6c65_7669_746f_6e00_8a4d_3b2f_91c0_55de);

/// Accessory identity derived solely from the device serial, so the same
/// physical device resolves to the same accessory across restarts.
pub fn accessory_uuid(serial: &str) -> Uuid {
    Uuid::new_v5(&ACCESSORY_NAMESPACE, serial.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_serial_same_identity() {
        assert_eq!(accessory_uuid("0D1B2C3D"), accessory_uuid("0D1B2C3D"));
    }

    #[test]
    fn different_serials_differ() {
        assert_ne!(accessory_uuid("0D1B2C3D"), accessory_uuid("0D1B2C3E"));
    }

    #[test]
    fn identity_is_name_based() {
        let id = accessory_uuid("0D1B2C3D");
        assert_eq!(id.get_version(), Some(uuid::Version::Sha1));
    }
}
