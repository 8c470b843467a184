//! Rack file format: devices, their parameters and their ports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::ConfigError;

/// A rack of devices laid out on screen.
///
/// # TOML Format
///
/// ```toml
/// name = "Basic voice"
///
/// [[devices]]
/// name = "osc"
/// position = [50.0, 50.0]
/// outputs = 1
///
/// [[devices.ports]]
/// name = "out"
/// offset = [30.0, 0.0]
/// output = 0
///
/// [[devices]]
/// name = "vca"
/// position = [250.0, 50.0]
/// inputs = 1
/// outputs = 1
/// params = ["gain"]
///
/// [[devices.ports]]
/// name = "in"
/// offset = [-30.0, 0.0]
/// input = 0
///
/// [[devices.ports]]
/// name = "gain"
/// offset = [-30.0, 30.0]
/// param = "gain"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rack {
    /// Name of the rack.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Devices, in spawn (and draw) order.
    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

/// One device panel and the audio node behind it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// Unique device name; also the node name in the audio graph.
    pub name: String,

    /// Centre of the panel.
    pub position: [f32; 2],

    /// Panel width and height.
    #[serde(default = "default_size")]
    pub size: [f32; 2],

    /// Number of node inputs.
    #[serde(default)]
    pub inputs: u32,

    /// Number of node outputs.
    #[serde(default)]
    pub outputs: u32,

    /// Named, modulatable parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<String>,

    /// Ports on the panel.
    #[serde(default)]
    pub ports: Vec<PortConfig>,
}

fn default_size() -> [f32; 2] {
    [80.0, 80.0]
}

/// A port on a device panel.
///
/// `output` makes the port a source. `input` or `param` (not both) makes it a
/// destination. A port may be both a source and a destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PortConfig {
    /// Name, unique within the device.
    pub name: String,

    /// Position relative to the device centre.
    #[serde(default)]
    pub offset: [f32; 2],

    /// Hit radius; the settings' `port_radius` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,

    /// Node output slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<u32>,

    /// Node input slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<u32>,

    /// Parameter name, declared in the device's `params`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl Rack {
    /// Create an empty rack.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            devices: Vec::new(),
        }
    }

    /// Add a device.
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.devices.push(device);
        self
    }

    /// Load a rack from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let rack = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %rack.name, devices = rack.devices.len(), "rack loaded");
        Ok(rack)
    }

    /// Load a rack from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the rack to a TOML file, creating the parent directory.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
        std::fs::write(path, self.to_toml()?).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Convert the rack to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Total number of ports across all devices.
    pub fn port_count(&self) -> usize {
        self.devices.iter().map(|d| d.ports.len()).sum()
    }

    /// Checks names and every port definition.
    ///
    /// Stops at the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut devices = BTreeSet::new();
        for device in &self.devices {
            if !devices.insert(device.name.as_str()) {
                return Err(ConfigError::DuplicateName {
                    kind: "device",
                    name: device.name.clone(),
                });
            }
            device.validate()?;
        }
        Ok(())
    }
}

impl DeviceConfig {
    /// Create a device at `position` with the default panel size.
    pub fn new(name: impl Into<String>, position: [f32; 2]) -> Self {
        Self {
            name: name.into(),
            position,
            size: default_size(),
            inputs: 0,
            outputs: 0,
            params: Vec::new(),
            ports: Vec::new(),
        }
    }

    /// Set the node's input and output counts.
    pub fn with_io(mut self, inputs: u32, outputs: u32) -> Self {
        self.inputs = inputs;
        self.outputs = outputs;
        self
    }

    /// Declare a parameter.
    pub fn with_param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    /// Add a port.
    pub fn with_port(mut self, port: PortConfig) -> Self {
        self.ports.push(port);
        self
    }

    /// `device.port` name used by scenarios.
    pub fn qualified(&self, port: &PortConfig) -> String {
        format!("{}.{}", self.name, port.name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut params = BTreeSet::new();
        for param in &self.params {
            if !params.insert(param.as_str()) {
                return Err(ConfigError::DuplicateName {
                    kind: "parameter",
                    name: format!("{}.{param}", self.name),
                });
            }
        }

        let mut ports = BTreeSet::new();
        for port in &self.ports {
            if !ports.insert(port.name.as_str()) {
                return Err(ConfigError::DuplicateName {
                    kind: "port",
                    name: self.qualified(port),
                });
            }
            self.validate_port(port)?;
        }
        Ok(())
    }

    fn validate_port(&self, port: &PortConfig) -> Result<(), ConfigError> {
        let name = || self.qualified(port);
        if port.input.is_some() && port.param.is_some() {
            return Err(ConfigError::invalid_port(name(), "both input and param set"));
        }
        if port.output.is_none() && port.input.is_none() && port.param.is_none() {
            return Err(ConfigError::invalid_port(
                name(),
                "needs an output, an input or a param",
            ));
        }
        if let Some(slot) = port.output
            && slot >= self.outputs
        {
            return Err(ConfigError::invalid_port(
                name(),
                format!("output {slot} out of range ({} outputs)", self.outputs),
            ));
        }
        if let Some(slot) = port.input
            && slot >= self.inputs
        {
            return Err(ConfigError::invalid_port(
                name(),
                format!("input {slot} out of range ({} inputs)", self.inputs),
            ));
        }
        if let Some(param) = &port.param
            && !self.params.contains(param)
        {
            return Err(ConfigError::UnknownParam {
                device: self.name.clone(),
                param: param.clone(),
            });
        }
        if port.radius.is_some_and(|r| r <= 0.0 || !r.is_finite()) {
            return Err(ConfigError::invalid_port(name(), "radius must be positive"));
        }
        Ok(())
    }
}

impl PortConfig {
    /// Create a port at `offset` from its device centre, with no capabilities.
    pub fn new(name: impl Into<String>, offset: [f32; 2]) -> Self {
        Self {
            name: name.into(),
            offset,
            ..Self::default()
        }
    }

    /// Make the port a source on output `slot`.
    pub fn output(mut self, slot: u32) -> Self {
        self.output = Some(slot);
        self
    }

    /// Make the port a destination on input `slot`.
    pub fn input(mut self, slot: u32) -> Self {
        self.input = Some(slot);
        self
    }

    /// Make the port a destination on parameter `name`.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.param = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOICE: &str = r#"
name = "voice"

[[devices]]
name = "osc"
position = [50.0, 50.0]
outputs = 1

[[devices.ports]]
name = "out"
offset = [30.0, 0.0]
output = 0

[[devices]]
name = "vca"
position = [250.0, 50.0]
inputs = 1
outputs = 1
params = ["gain"]

[[devices.ports]]
name = "in"
offset = [-30.0, 0.0]
input = 0

[[devices.ports]]
name = "gain"
offset = [-30.0, 30.0]
param = "gain"
radius = 4.0
"#;

    fn voice() -> Rack {
        Rack::from_toml(VOICE).unwrap()
    }

    #[test]
    fn test_parse_rack() {
        let rack = voice();
        assert_eq!(rack.name, "voice");
        assert_eq!(rack.devices.len(), 2);
        assert_eq!(rack.port_count(), 3);
        assert_eq!(rack.devices[0].size, [80.0, 80.0]);
        let gain = &rack.devices[1].ports[1];
        assert_eq!(gain.param.as_deref(), Some("gain"));
        assert_eq!(gain.radius, Some(4.0));
        assert!(rack.validate().is_ok());
    }

    #[test]
    fn test_builder_matches_toml() {
        let built = Rack::new("voice")
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
                    .with_port(PortConfig {
                        radius: Some(4.0),
                        ..PortConfig::new("gain", [-30.0, 30.0]).param("gain")
                    }),
            );
        assert_eq!(built, voice());
        assert_eq!(Rack::from_toml(&built.to_toml().unwrap()).unwrap(), built);
    }

    #[test]
    fn test_duplicate_device_rejected() {
        let mut rack = voice();
        rack.devices.push(DeviceConfig::new("osc", [0.0, 0.0]));
        let err = rack.validate().unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { kind: "device", .. }));
    }

    #[test]
    fn test_duplicate_port_rejected() {
        let mut rack = voice();
        rack.devices[0]
            .ports
            .push(PortConfig::new("out", [0.0, 0.0]).output(0));
        let err = rack.validate().unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { kind: "port", ref name } if name == "osc.out"));
    }

    #[test]
    fn test_input_and_param_rejected() {
        let mut rack = voice();
        rack.devices[1].ports[1].input = Some(0);
        let err = rack.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref port, .. } if port == "vca.gain"));
    }

    #[test]
    fn test_inert_port_rejected() {
        let mut rack = voice();
        rack.devices[0].ports.push(PortConfig::new("blank", [0.0, 0.0]));
        assert!(matches!(
            rack.validate().unwrap_err(),
            ConfigError::InvalidPort { .. }
        ));
    }

    #[test]
    fn test_slot_out_of_range_rejected() {
        let mut rack = voice();
        rack.devices[0].ports[0].output = Some(1);
        let err = rack.validate().unwrap_err();
        assert!(err.to_string().contains("output 1 out of range"), "got: {err}");
    }

    #[test]
    fn test_undeclared_param_rejected() {
        let mut rack = voice();
        rack.devices[1].params.clear();
        assert!(matches!(
            rack.validate().unwrap_err(),
            ConfigError::UnknownParam { .. }
        ));
    }
}
