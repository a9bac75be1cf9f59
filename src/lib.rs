// SmartDrive runtime: I2C driver for the dual-channel motor controller
// plus a zenoh command loop with watchdog.

pub mod config;
pub mod messages;
pub mod motor;
pub mod runtime;
