// Motor control module for the SmartDrive dual-channel controller
//
// Provides:
// - Register map and command constants for the controller
// - Register-level I2C access
// - High-level motor command driver

mod driver;
pub mod bus;
pub mod registers;

pub use bus::{DriveError, SmartDriveBus};
pub use driver::{
    Completion, Direction, Motor, MotorSelect, NextAction, PerformanceParams, SmartDrive,
    POLL_INTERVAL, SETTLE_DELAY, SPEED_FULL, SPEED_MEDIUM, SPEED_SLOW,
};
