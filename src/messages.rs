// Define message types for the runtime

use serde::{Deserialize, Serialize};

// Command from teleop/scripts -> runtime
// Percent speeds per motor channel, -100..100; positive is forward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveCommand {
    pub left: i8,
    pub right: i8,
}

// Actuation output from runtime -> motor controller
// Has default values because we don't always have an actuation to send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DriveActuation {
    pub left: i8,
    pub right: i8,
}

impl From<&DriveCommand> for DriveActuation {
    fn from(cmd: &DriveCommand) -> Self {
        Self {
            left: cmd.left.clamp(-100, 100),
            right: cmd.right.clamp(-100, 100),
        }
    }
}

impl DriveActuation {
    pub fn is_stopped(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}

/// Health status published by runtime
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeHealth {
    Ok,
    CmdStale,
}
