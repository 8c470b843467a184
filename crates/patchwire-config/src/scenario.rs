//! Scripted pointer gestures replayed against a rack.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use patchwire_core::{TickReport, WireEvent};

use crate::error::ConfigError;
use crate::session::RackSession;

/// Where a gesture happens: a named port or raw screen coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Target {
    /// Centre of the `device.port` port.
    Port(String),
    /// Screen position `[x, y]`.
    Point([f32; 2]),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Port(name) => write!(f, "{name}"),
            Self::Point([x, y]) => write!(f, "({x}, {y})"),
        }
    }
}

/// One scripted input event. Every step but `tick` is followed by one frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    /// Move the pointer.
    Move {
        /// Destination.
        to: Target,
    },
    /// Press, optionally moving there first.
    Press {
        /// Where to press; the current position when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at: Option<Target>,
    },
    /// Release, optionally moving there first.
    Release {
        /// Where to release; the current position when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at: Option<Target>,
    },
    /// Press at `from`, move to `to`, release: three frames.
    Drag {
        /// Press position.
        from: Target,
        /// Release position.
        to: Target,
    },
    /// Run idle frames.
    Tick {
        /// Number of frames.
        #[serde(default = "default_tick_count")]
        count: u32,
    },
}

fn default_tick_count() -> u32 {
    1
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { to } => write!(f, "move to {to}"),
            Self::Press { at: Some(at) } => write!(f, "press at {at}"),
            Self::Press { at: None } => write!(f, "press"),
            Self::Release { at: Some(at) } => write!(f, "release at {at}"),
            Self::Release { at: None } => write!(f, "release"),
            Self::Drag { from, to } => write!(f, "drag {from} → {to}"),
            Self::Tick { count } => write!(f, "tick x{count}"),
        }
    }
}

/// What one step did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Position of the step in the scenario.
    pub index: usize,
    /// The step itself.
    pub step: Step,
    /// One report per frame the step ran.
    pub ticks: Vec<TickReport>,
}

impl StepOutcome {
    /// Every event the step produced, in order.
    pub fn events(&self) -> impl Iterator<Item = &WireEvent> {
        self.ticks.iter().flat_map(|tick| tick.events.iter())
    }
}

/// An ordered list of gestures.
///
/// # TOML Format
///
/// ```toml
/// name = "patch and re-patch"
///
/// [[steps]]
/// action = "drag"
/// from = "osc.out"
/// to = "vca.in"
///
/// [[steps]]
/// action = "press"
/// at = "osc.out"
///
/// [[steps]]
/// action = "move"
/// to = [400.0, 300.0]
///
/// [[steps]]
/// action = "release"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Name of the scenario.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Steps, run in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Create an empty scenario.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            steps: Vec::new(),
        }
    }

    /// Append a step.
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Load a scenario from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a scenario from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Convert the scenario to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Replays every step against `session`.
    ///
    /// Stops at the first step naming an unknown port; steps before it have
    /// already been applied.
    pub fn run(&self, session: &mut RackSession) -> Result<Vec<StepOutcome>, ConfigError> {
        let mut outcomes = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            let ticks = run_step(session, step)?;
            tracing::debug!(index, %step, events = ticks.iter().map(|t| t.events.len()).sum::<usize>(), "step");
            outcomes.push(StepOutcome {
                index,
                step: step.clone(),
                ticks,
            });
        }
        Ok(outcomes)
    }
}

fn run_step(session: &mut RackSession, step: &Step) -> Result<Vec<TickReport>, ConfigError> {
    let mut ticks = Vec::new();
    match step {
        Step::Move { to } => {
            move_to(session, to)?;
            ticks.push(session.bay.tick());
        }
        Step::Press { at } => {
            if let Some(at) = at {
                move_to(session, at)?;
            }
            session.bay.press();
            ticks.push(session.bay.tick());
        }
        Step::Release { at } => {
            if let Some(at) = at {
                move_to(session, at)?;
            }
            session.bay.release();
            ticks.push(session.bay.tick());
        }
        Step::Drag { from, to } => {
            let end = session.locate(to)?;
            move_to(session, from)?;
            session.bay.press();
            ticks.push(session.bay.tick());
            session.bay.move_to(end.x, end.y);
            ticks.push(session.bay.tick());
            session.bay.release();
            ticks.push(session.bay.tick());
        }
        Step::Tick { count } => {
            for _ in 0..*count {
                ticks.push(session.bay.tick());
            }
        }
    }
    Ok(ticks)
}

fn move_to(session: &mut RackSession, target: &Target) -> Result<(), ConfigError> {
    let at = session.locate(target)?;
    session.bay.move_to(at.x, at.y);
    Ok(())
}
