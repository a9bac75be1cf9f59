// 50 Hz loop with watchdog
// If teleop crashes and stops sending commands, the stale-command check
// stops the motors instead of letting the last command run forever.

use std::time::{Duration, Instant};

use linux_embedded_hal::I2cdev;
use tokio::time::interval;
use tracing::{info, warn};

// local imports
use crate::config::{CMD_TIMEOUT, I2C_BUS, LOOP_HZ, MOTOR_ENABLED, TOPIC_CMD_DRIVE, TOPIC_HEALTH, TOPIC_RT_DRIVE};
use crate::messages::{DriveActuation, DriveCommand, RuntimeHealth};
use crate::motor::{Direction, DriveError, MotorSelect, NextAction, SmartDrive};

pub struct Runtime {
    latest_cmd: Option<DriveCommand>,
    cmd_received_at: Instant,
    health: RuntimeHealth,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            latest_cmd: None,
            cmd_received_at: Instant::now(),
            health: RuntimeHealth::CmdStale, // Start stale until first cmd
        }
    }

    /// Process incoming command
    fn on_command(&mut self, cmd: DriveCommand) {
        info!("Received command: {:?}", &cmd);
        self.latest_cmd = Some(cmd);
        self.cmd_received_at = Instant::now();
    }

    /// Compute actuation based on watchdog state
    fn compute_actuation(&mut self) -> DriveActuation {
        let cmd_age = self.cmd_received_at.elapsed();

        if cmd_age > CMD_TIMEOUT {
            // Watchdog triggered - stop the motors
            if self.health != RuntimeHealth::CmdStale {
                warn!("Command stale ({:?} old), stopping motors", cmd_age);
            }
            self.health = RuntimeHealth::CmdStale;
            DriveActuation::default() // Zero speed
        } else if let Some(ref cmd) = self.latest_cmd {
            self.health = RuntimeHealth::Ok;
            DriveActuation::from(cmd)
        } else {
            // No command ever received
            self.health = RuntimeHealth::CmdStale;
            DriveActuation::default()
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate one actuation into motor controller commands
fn apply_actuation(drive: &mut SmartDrive<I2cdev>, act: DriveActuation) -> Result<(), DriveError> {
    if act.is_stopped() {
        return drive.stop(MotorSelect::Both, NextAction::Float);
    }
    apply_channel(drive, MotorSelect::One, act.left)?;
    apply_channel(drive, MotorSelect::Two, act.right)
}

fn apply_channel(
    drive: &mut SmartDrive<I2cdev>,
    select: MotorSelect,
    speed: i8,
) -> Result<(), DriveError> {
    if speed == 0 {
        drive.stop(select, NextAction::Float)
    } else if speed > 0 {
        drive.run_unlimited(select, Direction::Forward, speed as u8)
    } else {
        drive.run_unlimited(select, Direction::Reverse, speed.unsigned_abs())
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Opening Zenoh session...");
    let session = zenoh::open(zenoh::Config::default()).await?;

    info!("Setting up publishers and subscribers...");
    let subscriber = session.declare_subscriber(TOPIC_CMD_DRIVE).await?;
    let pub_actuation = session.declare_publisher(TOPIC_RT_DRIVE).await?;
    let pub_health = session.declare_publisher(TOPIC_HEALTH).await?;

    let mut motors = if MOTOR_ENABLED {
        info!("Opening SmartDrive on {}", I2C_BUS);
        let i2c = I2cdev::new(I2C_BUS)?;
        Some(SmartDrive::new(i2c))
    } else {
        info!("Motor control disabled, running in simulation mode");
        None
    };

    let mut runtime = Runtime::new();
    let mut tick = interval(Duration::from_millis(1000 / LOOP_HZ));
    let mut applied = DriveActuation::default();

    info!(
        "Runtime started: {}Hz loop, {}ms watchdog timeout",
        LOOP_HZ,
        CMD_TIMEOUT.as_millis()
    );
    info!("Subscribed to: {}", TOPIC_CMD_DRIVE);
    info!("Publishing to: {}, {}", TOPIC_RT_DRIVE, TOPIC_HEALTH);

    loop {
        tick.tick().await;

        // 1. Drain all pending commands (non-blocking), keep latest
        while let Ok(Some(sample)) = subscriber.try_recv() {
            let payload = sample.payload().to_bytes();
            match serde_json::from_slice::<DriveCommand>(&payload) {
                Ok(cmd) => {
                    runtime.on_command(cmd);
                }
                Err(e) => {
                    warn!("Failed to parse command: {}", e);
                }
            }
        }

        // 2. Compute actuation (includes watchdog logic)
        let actuation = runtime.compute_actuation();

        // 3. Apply to the motors; best-effort, a bus error must not kill the loop
        if let Some(drive) = motors.as_mut() {
            if actuation != applied {
                match apply_actuation(drive, actuation) {
                    Ok(()) => applied = actuation,
                    Err(e) => warn!("Motor write failed: {}", e),
                }
            }
        }

        // 4. Publish actuation
        let actuation_json = serde_json::to_string(&actuation)?;
        pub_actuation.put(actuation_json).await?;

        // 5. Publish health
        let health_json = serde_json::to_string(&runtime.health)?;
        pub_health.put(health_json).await?;
    }
}
