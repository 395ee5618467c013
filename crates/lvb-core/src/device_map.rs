use crate::models::Device;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    DimmableLightbulb,
    Switch,
}

/// Decide which service a device gets from its model number. Decora model
/// strings carry a suffix after the dash ("DW6HD-1BZ"), which does not
/// affect capabilities.
pub fn map_device_service(device: &Device) -> ServiceKind {
    let base = device.model.split('-').next().unwrap_or(&device.model);
    match base {
        // On/off switches and plug-in outlets: no level control.
        "DW15S" | "DW15A" | "DW15P" | "D215S" | "D215P" | "D215R" => ServiceKind::Switch,
        _ => ServiceKind::DimmableLightbulb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeviceId, PowerState};

    fn device(model: &str) -> Device {
        Device {
            id: DeviceId(1),
            serial: "A1".into(),
            name: "Fixture".into(),
            manufacturer: "Leviton".into(),
            model: model.into(),
            version: "1.0".into(),
            power: PowerState::Off,
            brightness: 0,
            min_level: 1,
            max_level: 100,
        }
    }

    #[test]
    fn plain_switch_has_no_dimming() {
        assert_eq!(map_device_service(&device("DW15S-1BZ")), ServiceKind::Switch);
        assert_eq!(map_device_service(&device("D215P-2RW")), ServiceKind::Switch);
    }

    #[test]
    fn dimmers_and_unknown_models_get_a_lightbulb() {
        assert_eq!(
            map_device_service(&device("DW6HD-1BZ")),
            ServiceKind::DimmableLightbulb
        );
        assert_eq!(
            map_device_service(&device("XX99Z")),
            ServiceKind::DimmableLightbulb
        );
    }
}
