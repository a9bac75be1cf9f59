// Timeouts, topics, motor configuration
use std::time::Duration;

// Runtime loop frequency
pub const LOOP_HZ: u64 = 50;

// Command timeout for watchdog
pub const CMD_TIMEOUT: Duration = Duration::from_millis(250);

// Zenoh topics
pub const TOPIC_CMD_DRIVE: &str = "smartdrive/cmd/drive"; // commands
pub const TOPIC_RT_DRIVE: &str = "smartdrive/rt/drive"; // actuation
pub const TOPIC_HEALTH: &str = "smartdrive/state/health"; // health status

// Motor configuration
// I2C bus device for the SmartDrive controller
pub const I2C_BUS: &str = "/dev/i2c-1";

// Enable hardware motor control (set to false for simulation/testing)
pub const MOTOR_ENABLED: bool = true;
