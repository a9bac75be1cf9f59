// Motor diagnostic: READ-ONLY test to verify the SmartDrive connection
//
// This tool does NOT write anything to the controller - it's completely safe.
// Use this first before running motor_test.
//
// Usage: cargo run --example motor_diagnostic -- [--device /dev/i2c-1] [--address 27]

use clap::Parser;
use linux_embedded_hal::I2cdev;
use smartdrive_runtime::motor::{Motor, SmartDrive};

/// Read-only diagnostic for a SmartDrive motor controller
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// I2C bus device the controller is attached to
    #[arg(short, long, default_value = "/dev/i2c-1")]
    device: String,

    /// 7-bit I2C address of the controller
    #[arg(short, long, default_value_t = 0x1B)]
    address: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║         SmartDrive Motor Diagnostic (READ-ONLY)              ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║  This tool only READS registers - no writes, no movement     ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("I2C bus: {}", args.device);
    println!("Address: 0x{:02X}", args.address);
    println!();

    println!("Step 1: Opening I2C bus...");
    let i2c = match I2cdev::new(&args.device) {
        Ok(i2c) => {
            println!("  ✓ I2C bus opened successfully");
            i2c
        }
        Err(e) => {
            println!("  ✗ Failed to open I2C bus: {}", e);
            println!();
            println!("Troubleshooting:");
            println!("  - Check the bus path is correct (ls /dev/i2c-*)");
            println!("  - Verify the I2C interface is enabled on this board");
            println!("  - Check your user has permission on the device node");
            return Err(e.into());
        }
    };
    let mut drive = SmartDrive::with_address(i2c, args.address);
    println!();

    println!("Step 2: Reading battery voltage...");
    match drive.battery_voltage() {
        Ok(mv) => {
            println!("  Battery: {:.0} mV ({:.2} V)", mv, mv / 1000.0);
            if mv < 6000.0 {
                println!("  ⚠ Voltage looks low - check the motor power supply");
            }
        }
        Err(e) => {
            println!("  ✗ Battery read failed: {}", e);
            println!("  The controller is probably not responding at this address.");
            return Err(e.into());
        }
    }
    println!();

    println!("Step 3: Reading motor state...");
    for (name, motor) in [("Motor 1", Motor::One), ("Motor 2", Motor::Two)] {
        println!("  === {} ===", name);

        match drive.tachometer_position(motor) {
            Ok(pos) => println!("    Tachometer position: {}", pos),
            Err(e) => println!("    Tachometer position: ERROR - {}", e),
        }

        match drive.status(motor) {
            Ok(status) => {
                println!("    Status byte: 0x{:02X}", status);
                if status & 0x40 != 0 {
                    println!("      - timed command still running");
                }
                if status & 0x08 != 0 {
                    println!("      - tacho target not yet reached");
                }
            }
            Err(e) => println!("    Status byte: ERROR - {}", e),
        }

        println!();
    }

    println!("Step 4: Reading PID parameters...");
    match drive.read_performance_parameters() {
        Ok(params) => {
            println!("    Position Kp/Ki/Kd: {}/{}/{}",
                params.position_kp, params.position_ki, params.position_kd);
            println!("    Speed    Kp/Ki/Kd: {}/{}/{}",
                params.speed_kp, params.speed_ki, params.speed_kd);
            println!("    Pass count: {}, tolerance: {}", params.pass_count, params.tolerance);
        }
        Err(e) => println!("    PID parameters: ERROR - {}", e),
    }
    println!();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Diagnostic Complete                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("If the voltage and positions look reasonable:");
    println!("  1. Tachometer positions should be stable while the wheels are still");
    println!("  2. Status bytes should be 0x00 when no command is running");
    println!();
    println!("Next step: Run 'cargo run --example motor_test' with wheels OFF THE GROUND");

    Ok(())
}
