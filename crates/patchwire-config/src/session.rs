//! Building a live editing session from a rack.

use std::collections::BTreeMap;

use patchwire_core::{Entity, NodeId, ParamId, Patchbay, Port, Transform};

use crate::error::ConfigError;
use crate::rack::{DeviceConfig, PortConfig, Rack};
use crate::scenario::Target;
use crate::settings::Settings;

/// A [`Patchbay`] populated from a [`Rack`], with its ports addressable by
/// `device.port` name.
#[derive(Debug)]
pub struct RackSession {
    /// The running session.
    pub bay: Patchbay,
    ports: BTreeMap<String, Entity>,
}

impl RackSession {
    /// Validates `rack` and spawns it: one node and panel per device, then
    /// its ports on top, in file order.
    pub fn from_rack(rack: &Rack, settings: &Settings) -> Result<Self, ConfigError> {
        rack.validate()?;
        settings.validate()?;

        let mut bay = Patchbay::new(&settings.pointer_name);
        let mut ports = BTreeMap::new();
        for device in &rack.devices {
            Self::spawn_device(&mut bay, &mut ports, device, settings)?;
        }

        tracing::info!(
            rack = %rack.name,
            devices = rack.devices.len(),
            ports = ports.len(),
            "rack session ready"
        );
        Ok(Self { bay, ports })
    }

    fn spawn_device(
        bay: &mut Patchbay,
        ports: &mut BTreeMap<String, Entity>,
        device: &DeviceConfig,
        settings: &Settings,
    ) -> Result<(), ConfigError> {
        let [x, y] = device.position;
        let [w, h] = device.size;
        let handle = bay.add_device(
            &device.name,
            Transform::new(x, y),
            (w, h),
            device.inputs,
            device.outputs,
        );

        let mut params = BTreeMap::new();
        for name in &device.params {
            params.insert(name.as_str(), bay.add_param(&handle, name)?);
        }

        for config in &device.ports {
            let name = device.qualified(config);
            let port = Self::port(device, config, handle.node, &params)?;
            let [dx, dy] = config.offset;
            let at = Transform::new(x + dx, y + dy);
            let radius = config.radius.unwrap_or(settings.port_radius);
            let entity = bay.add_port(&name, port, at, radius);
            tracing::debug!(port = %name, %entity, role = ?port.role(), "port spawned");
            ports.insert(name, entity);
        }
        Ok(())
    }

    fn port(
        device: &DeviceConfig,
        config: &PortConfig,
        node: NodeId,
        params: &BTreeMap<&str, ParamId>,
    ) -> Result<Port, ConfigError> {
        let mut port = match (&config.input, &config.param) {
            (Some(slot), None) => Port::input(node, *slot),
            (None, Some(param)) => {
                let id = params
                    .get(param.as_str())
                    .ok_or_else(|| ConfigError::UnknownParam {
                        device: device.name.clone(),
                        param: param.clone(),
                    })?;
                Port::param(node, *id)
            }
            (None, None) => Port {
                node,
                output: None,
                sink: None,
            },
            (Some(_), Some(_)) => {
                return Err(ConfigError::invalid_port(
                    device.qualified(config),
                    "both input and param set",
                ));
            }
        };
        if let Some(slot) = config.output {
            port = port.with_output(slot);
        }
        Ok(port)
    }

    /// Port entity by `device.port` name.
    pub fn port_entity(&self, name: &str) -> Option<Entity> {
        self.ports.get(name).copied()
    }

    /// All port names, sorted.
    pub fn port_names(&self) -> impl Iterator<Item = &str> {
        self.ports.keys().map(String::as_str)
    }

    /// Screen position of a scenario target.
    pub fn locate(&self, target: &Target) -> Result<Transform, ConfigError> {
        match target {
            Target::Point([x, y]) => Ok(Transform::new(*x, *y)),
            Target::Port(name) => self
                .port_entity(name)
                .and_then(|entity| self.bay.world.transforms.get(&entity).copied())
                .ok_or_else(|| ConfigError::UnknownPort(name.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchwire_core::{PortRole, WirePhase};

    fn rack() -> Rack {
        Rack::new("voice")
            .with_device(
                DeviceConfig::new("osc", [50.0, 50.0])
                    .with_io(0, 1)
                    .with_port(PortConfig::new("out", [30.0, 0.0]).output(0)),
            )
            .with_device(
                DeviceConfig::new("vca", [250.0, 50.0])
                    .with_io(1, 1)
                    .with_param("gain")
                    .with_port(PortConfig::new("in", [-30.0, 0.0]).input(0))
                    .with_port(PortConfig::new("gain", [-30.0, 30.0]).param("gain"))
                    .with_port(PortConfig::new("thru", [30.0, 0.0]).input(0).output(0)),
            )
    }

    #[test]
    fn test_builds_nodes_and_ports() {
        let session = RackSession::from_rack(&rack(), &Settings::default()).unwrap();
        assert_eq!(session.bay.graph.node_count(), 2);
        assert_eq!(
            session.port_names().collect::<Vec<_>>(),
            ["osc.out", "vca.gain", "vca.in", "vca.thru"]
        );
        let thru = session.port_entity("vca.thru").unwrap();
        assert_eq!(session.bay.world.ports[&thru].role(), PortRole::Duplex);
        assert_eq!(session.bay.world.label(thru), Some("vca.thru"));
        assert_eq!(session.bay.wire_count(WirePhase::Dragging), 0);
    }

    #[test]
    fn test_port_positions_are_relative() {
        let session = RackSession::from_rack(&rack(), &Settings::default()).unwrap();
        let at = session.locate(&Target::Port("vca.gain".into())).unwrap();
        assert_eq!(at, Transform::new(220.0, 80.0));
        let at = session.locate(&Target::Point([1.0, 2.0])).unwrap();
        assert_eq!(at, Transform::new(1.0, 2.0));
    }

    #[test]
    fn test_unknown_target_is_error() {
        let session = RackSession::from_rack(&rack(), &Settings::default()).unwrap();
        let err = session.locate(&Target::Port("lfo.out".into())).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPort(ref n) if n == "lfo.out"));
    }

    #[test]
    fn test_invalid_rack_is_not_built() {
        let mut bad = rack();
        bad.devices[1].ports[0].param = Some("gain".into());
        assert!(RackSession::from_rack(&bad, &Settings::default()).is_err());
    }

    #[test]
    fn test_pointer_uses_settings_name() {
        let settings = Settings {
            pointer_name: "stylus".to_string(),
            ..Settings::default()
        };
        let session = RackSession::from_rack(&rack(), &settings).unwrap();
        let pointer = session.bay.pointer();
        assert_eq!(session.bay.world.label(pointer), Some("stylus"));
    }

    #[test]
    fn test_unusable_default_radius_is_rejected() {
        let settings = Settings {
            port_radius: f32::NAN,
            ..Settings::default()
        };
        let err = RackSession::from_rack(&rack(), &settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { key: "port_radius", .. }));
    }
}
