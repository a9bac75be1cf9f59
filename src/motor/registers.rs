// SmartDrive register map and command constants
//
// The controller exposes a flat register file over I2C: a command register,
// per-motor parameter blocks (setpoint/speed/time/control), read-only
// position and status registers, and a PID tuning block. Every address and
// bit value lives here so the rest of the crate never touches raw numbers.

use std::ops::{BitOr, BitOrAssign};

/// Factory-default 7-bit I2C address (0x36 on the wire, shifted right one
/// bit per the bus addressing convention).
pub const DEFAULT_ADDRESS: u8 = 0x36 >> 1;

/// Battery voltage calibration: raw register byte to millivolts.
pub const VOLTAGE_MULTIPLIER: f32 = 212.7;

/// Register addresses for the SmartDrive controller
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Single-byte command register (takes a [`Command`] value)
    Command = 0x41,

    // Motor 1 parameter block
    SetpointM1 = 0x42, // 4 bytes, signed tacho target
    SpeedM1 = 0x46,    // 1 byte, signed
    TimeM1 = 0x47,     // 1 byte, seconds
    CmdBM1 = 0x48,     // reserved
    CmdAM1 = 0x49,     // control byte

    // Motor 2 parameter block
    SetpointM2 = 0x4A,
    SpeedM2 = 0x4E,
    TimeM2 = 0x4F,
    CmdBM2 = 0x50,
    CmdAM2 = 0x51,

    // Read-only state
    PositionM1 = 0x52, // 4 bytes, signed tacho count
    PositionM2 = 0x56,
    StatusM1 = 0x5A, // 1 byte, STATUS_* bits
    StatusM2 = 0x5B,
    TasksM1 = 0x5C,
    TasksM2 = 0x5D,

    // PID tuning block, written as one 14-byte array starting at PositionKp
    PositionKp = 0x5E, // 2 bytes each, little-endian
    PositionKi = 0x60,
    PositionKd = 0x62,
    SpeedKp = 0x64,
    SpeedKi = 0x66,
    SpeedKd = 0x68,
    PassCount = 0x6A, // 1 byte
    PassTolerance = 0x6B, // 1 byte

    Checksum = 0x6C,

    // Power data
    BatteryVoltage = 0x6E, // 1 byte, raw (multiply by VOLTAGE_MULTIPLIER)
    ResetStatus = 0x6F,
    CurrentM1 = 0x70, // 2 bytes, not supported by current firmware
    CurrentM2 = 0x72,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Command register values
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Synchronized start of both motors after their parameter blocks are
    /// pre-loaded (issued after writes when both motors are selected)
    StartBoth = b'S',
    BrakeM1 = b'A',
    BrakeM2 = b'B',
    BrakeBoth = b'C',
    FloatM1 = b'a',
    FloatM2 = b'b',
    FloatBoth = b'c',
    /// Reset both tachometer counts to zero
    ResetEncoders = b'R',
}

/// Control byte: selects which parameters apply to a command.
///
/// Built fresh for every command by OR-ing named bits, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Control(u8);

impl Control {
    pub const NONE: Control = Control(0);
    /// Apply the speed byte
    pub const SPEED: Control = Control(0x01);
    /// Ramp speed changes
    pub const RAMP: Control = Control(0x02);
    /// Tacho target is relative to the current position
    pub const RELATIVE: Control = Control(0x04);
    /// Run to the tacho setpoint
    pub const TACHO: Control = Control(0x08);
    /// Brake when the command completes
    pub const BRAKE: Control = Control(0x10);
    /// Hold position against external force after braking
    pub const HOLD: Control = Control(0x20);
    /// Run for the time byte
    pub const TIME: Control = Control(0x40);
    /// Start immediately (omitted for dual-motor commands, which start on
    /// [`Command::StartBoth`])
    pub const GO: Control = Control(0x80);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Control) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Control {
    type Output = Control;

    fn bitor(self, rhs: Control) -> Control {
        Control(self.0 | rhs.0)
    }
}

impl BitOrAssign for Control {
    fn bitor_assign(&mut self, rhs: Control) {
        self.0 |= rhs.0;
    }
}

/// Status register bit: a timed command is still running
pub const STATUS_TIME_RUNNING: u8 = 0x40;

/// Status register bit: the tacho target has not been reached yet
pub const STATUS_TACHO_RUNNING: u8 = 0x08;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_addresses_are_unique() {
        let mut addrs = vec![
            Register::Command,
            Register::SetpointM1,
            Register::SpeedM1,
            Register::TimeM1,
            Register::CmdBM1,
            Register::CmdAM1,
            Register::SetpointM2,
            Register::SpeedM2,
            Register::TimeM2,
            Register::CmdBM2,
            Register::CmdAM2,
            Register::PositionM1,
            Register::PositionM2,
            Register::StatusM1,
            Register::StatusM2,
            Register::TasksM1,
            Register::TasksM2,
            Register::PositionKp,
            Register::PositionKi,
            Register::PositionKd,
            Register::SpeedKp,
            Register::SpeedKi,
            Register::SpeedKd,
            Register::PassCount,
            Register::PassTolerance,
            Register::Checksum,
            Register::BatteryVoltage,
            Register::ResetStatus,
            Register::CurrentM1,
            Register::CurrentM2,
        ]
        .into_iter()
        .map(Register::addr)
        .collect::<Vec<_>>();

        let n = addrs.len();
        addrs.sort_unstable();
        addrs.dedup();
        assert_eq!(addrs.len(), n, "duplicate register address in map");
    }

    #[test]
    fn motor_blocks_are_mirrored() {
        // The motor 2 block sits exactly 8 registers above the motor 1 block.
        assert_eq!(Register::SetpointM1.addr() + 8, Register::SetpointM2.addr());
        assert_eq!(Register::SpeedM1.addr() + 8, Register::SpeedM2.addr());
        assert_eq!(Register::TimeM1.addr() + 8, Register::TimeM2.addr());
        assert_eq!(Register::CmdAM1.addr() + 8, Register::CmdAM2.addr());
    }

    #[test]
    fn control_bits_compose() {
        let ctrl = Control::SPEED | Control::TIME | Control::BRAKE | Control::GO;
        assert_eq!(ctrl.bits(), 0xD1);
        assert!(ctrl.contains(Control::TIME));
        assert!(!ctrl.contains(Control::TACHO));

        let mut ctrl = Control::NONE;
        ctrl |= Control::SPEED;
        ctrl |= Control::TACHO | Control::RELATIVE;
        assert_eq!(ctrl.bits(), 0x0D);
    }

    #[test]
    fn default_address_is_seven_bit() {
        assert_eq!(DEFAULT_ADDRESS, 0x1B);
    }
}
