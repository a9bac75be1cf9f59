// High-level command driver for the SmartDrive dual motor controller
//
// Translates motor commands (run, stop, run-for-time, run-for-angle,
// run-to-position) into register writes and polls status registers for
// completion. One instance owns the bus for the lifetime of the device.

use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::i2c::I2c;
use tracing::info;

use super::bus::{DriveError, Result, SmartDriveBus};
use super::registers::{
    Command, Control, DEFAULT_ADDRESS, Register, STATUS_TACHO_RUNNING, STATUS_TIME_RUNNING,
    VOLTAGE_MULTIPLIER,
};

/// Pause after issuing a command before the status byte is valid to read.
pub const SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Interval between completion polls.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Convenience speeds; any value between 0 and 100 works.
pub const SPEED_FULL: u8 = 90;
pub const SPEED_MEDIUM: u8 = 60;
pub const SPEED_SLOW: u8 = 25;

/// A single motor channel, for per-motor reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motor {
    One,
    Two,
}

impl Motor {
    fn speed_block(self) -> Register {
        match self {
            Motor::One => Register::SpeedM1,
            Motor::Two => Register::SpeedM2,
        }
    }

    fn setpoint_block(self) -> Register {
        match self {
            Motor::One => Register::SetpointM1,
            Motor::Two => Register::SetpointM2,
        }
    }

    fn position_register(self) -> Register {
        match self {
            Motor::One => Register::PositionM1,
            Motor::Two => Register::PositionM2,
        }
    }

    fn status_register(self) -> Register {
        match self {
            Motor::One => Register::StatusM1,
            Motor::Two => Register::StatusM2,
        }
    }
}

/// Which motor(s) a command addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorSelect {
    One,
    Two,
    Both,
}

impl MotorSelect {
    pub fn motors(self) -> &'static [Motor] {
        match self {
            MotorSelect::One => &[Motor::One],
            MotorSelect::Two => &[Motor::Two],
            MotorSelect::Both => &[Motor::One, Motor::Two],
        }
    }

    pub fn is_both(self) -> bool {
        self == MotorSelect::Both
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    fn apply_i8(self, value: i8) -> i8 {
        match self {
            Direction::Forward => value,
            Direction::Reverse => -value,
        }
    }

    fn apply_i32(self, value: i32) -> i32 {
        match self {
            Direction::Forward => value,
            Direction::Reverse => -value,
        }
    }
}

/// What the controller does once a command completes (or on stop)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    /// Cut power and let the motor coast
    Float,
    /// Apply brakes
    Brake,
    /// Apply brakes and hold position against external force
    BrakeHold,
}

impl NextAction {
    fn control_bits(self) -> Control {
        match self {
            NextAction::Float => Control::NONE,
            NextAction::Brake => Control::BRAKE,
            NextAction::BrakeHold => Control::BRAKE | Control::HOLD,
        }
    }
}

/// Whether a run command blocks until the controller reports completion.
///
/// Waiting polls the status byte every [`POLL_INTERVAL`] and gives up with
/// [`DriveError::Timeout`] once the given bound expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    NoWait,
    WaitFor(Duration),
}

/// PID tuning block: position and speed gains plus pass criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PerformanceParams {
    pub position_kp: u16,
    pub position_ki: u16,
    pub position_kd: u16,
    pub speed_kp: u16,
    pub speed_ki: u16,
    pub speed_kd: u16,
    pub pass_count: u8,
    pub tolerance: u8,
}

impl PerformanceParams {
    /// Layout of the 14-byte register block starting at `PositionKp`:
    /// six little-endian gains, then pass count and tolerance.
    fn to_block(&self) -> [u8; 14] {
        let [pkp_lo, pkp_hi] = self.position_kp.to_le_bytes();
        let [pki_lo, pki_hi] = self.position_ki.to_le_bytes();
        let [pkd_lo, pkd_hi] = self.position_kd.to_le_bytes();
        let [skp_lo, skp_hi] = self.speed_kp.to_le_bytes();
        let [ski_lo, ski_hi] = self.speed_ki.to_le_bytes();
        let [skd_lo, skd_hi] = self.speed_kd.to_le_bytes();
        [
            pkp_lo,
            pkp_hi,
            pki_lo,
            pki_hi,
            pkd_lo,
            pkd_hi,
            skp_lo,
            skp_hi,
            ski_lo,
            ski_hi,
            skd_lo,
            skd_hi,
            self.pass_count,
            self.tolerance,
        ]
    }
}

fn clamp_speed(speed: u8) -> i8 {
    speed.min(100) as i8
}

/// SmartDrive dual-channel motor controller
pub struct SmartDrive<I2C> {
    bus: SmartDriveBus<I2C>,
}

impl<I2C: I2c> SmartDrive<I2C> {
    /// Create a driver at the factory-default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Create a driver at a custom 7-bit address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            bus: SmartDriveBus::new(i2c, address),
        }
    }

    pub fn address(&self) -> u8 {
        self.bus.address()
    }

    /// Write a raw value to the command register
    pub fn command(&mut self, cmd: Command) -> Result<()> {
        self.bus.write_byte(Register::Command, cmd as u8)
    }

    /// Reset both tachometer counts to zero
    pub fn reset_encoders(&mut self) -> Result<()> {
        info!("Resetting tachometer counts");
        self.command(Command::ResetEncoders)
    }

    /// Read the battery voltage in millivolts
    pub fn battery_voltage(&mut self) -> Result<f32> {
        let raw = self.bus.read_byte(Register::BatteryVoltage)?;
        Ok(raw as f32 * VOLTAGE_MULTIPLIER)
    }

    /// Read the signed tachometer count of one motor
    pub fn tachometer_position(&mut self, motor: Motor) -> Result<i32> {
        self.bus.read_i32(motor.position_register())
    }

    /// Read the raw status byte of one motor
    pub fn status(&mut self, motor: Motor) -> Result<u8> {
        self.bus.read_byte(motor.status_register())
    }

    /// Run the selected motor(s) until told otherwise
    pub fn run_unlimited(
        &mut self,
        select: MotorSelect,
        direction: Direction,
        speed: u8,
    ) -> Result<()> {
        let mut ctrl = Control::SPEED | Control::BRAKE;
        if !select.is_both() {
            ctrl |= Control::GO;
        }
        let speed = direction.apply_i8(clamp_speed(speed));
        info!("Run unlimited: {:?} {:?} speed {}", select, direction, speed);

        for &motor in select.motors() {
            self.bus
                .write_array(motor.speed_block(), &[speed as u8, 0, 0, ctrl.bits()])?;
        }
        self.start_both_if_selected(select)
    }

    /// Stop the selected motor(s) with a single command byte
    pub fn stop(&mut self, select: MotorSelect, next_action: NextAction) -> Result<()> {
        let cmd = match (select, next_action) {
            (MotorSelect::One, NextAction::Float) => Command::FloatM1,
            (MotorSelect::Two, NextAction::Float) => Command::FloatM2,
            (MotorSelect::Both, NextAction::Float) => Command::FloatBoth,
            (MotorSelect::One, _) => Command::BrakeM1,
            (MotorSelect::Two, _) => Command::BrakeM2,
            (MotorSelect::Both, _) => Command::BrakeBoth,
        };
        info!("Stop: {:?} {:?} -> {:?}", select, next_action, cmd);
        self.command(cmd)
    }

    /// Run the selected motor(s) for a duration in whole seconds
    pub fn run_seconds(
        &mut self,
        select: MotorSelect,
        direction: Direction,
        speed: u8,
        seconds: u8,
        wait: Completion,
        next_action: NextAction,
    ) -> Result<()> {
        let mut ctrl = Control::SPEED | Control::TIME | next_action.control_bits();
        if !select.is_both() {
            ctrl |= Control::GO;
        }
        let speed = direction.apply_i8(clamp_speed(speed));
        info!(
            "Run {}s: {:?} {:?} speed {}",
            seconds, select, direction, speed
        );

        for &motor in select.motors() {
            self.bus
                .write_array(motor.speed_block(), &[speed as u8, seconds, 0, ctrl.bits()])?;
        }
        self.start_both_if_selected(select)?;

        if let Completion::WaitFor(timeout) = wait {
            thread::sleep(SETTLE_DELAY);
            self.wait_until_time_done(select, timeout)?;
        }
        Ok(())
    }

    /// Turn the selected motor(s) by a relative angle in degrees
    pub fn run_degrees(
        &mut self,
        select: MotorSelect,
        direction: Direction,
        speed: u8,
        degrees: i32,
        wait: Completion,
        next_action: NextAction,
    ) -> Result<()> {
        self.run_tacho(
            select,
            direction.apply_i32(degrees),
            speed,
            Control::RELATIVE,
            wait,
            next_action,
        )
    }

    /// Turn the selected motor(s) by a relative number of full rotations
    pub fn run_rotations(
        &mut self,
        select: MotorSelect,
        direction: Direction,
        speed: u8,
        rotations: i32,
        wait: Completion,
        next_action: NextAction,
    ) -> Result<()> {
        self.run_tacho(
            select,
            direction.apply_i32(rotations * 360),
            speed,
            Control::RELATIVE,
            wait,
            next_action,
        )
    }

    /// Run the selected motor(s) to an absolute tachometer count
    pub fn run_to_position(
        &mut self,
        select: MotorSelect,
        speed: u8,
        target: i32,
        wait: Completion,
        next_action: NextAction,
    ) -> Result<()> {
        self.run_tacho(select, target, speed, Control::NONE, wait, next_action)
    }

    fn run_tacho(
        &mut self,
        select: MotorSelect,
        target: i32,
        speed: u8,
        extra: Control,
        wait: Completion,
        next_action: NextAction,
    ) -> Result<()> {
        let mut ctrl = Control::SPEED | Control::TACHO | extra | next_action.control_bits();
        if !select.is_both() {
            ctrl |= Control::GO;
        }
        let [t1, t2, t3, t4] = target.to_le_bytes();
        let speed = clamp_speed(speed) as u8;
        info!("Run to tacho {}: {:?} speed {}", target, select, speed);

        for &motor in select.motors() {
            self.bus.write_array(
                motor.setpoint_block(),
                &[t1, t2, t3, t4, speed, 0, 0, ctrl.bits()],
            )?;
        }
        self.start_both_if_selected(select)?;

        if let Completion::WaitFor(timeout) = wait {
            thread::sleep(SETTLE_DELAY);
            self.wait_until_tacho_done(select, timeout)?;
        }
        Ok(())
    }

    /// Check whether a timed command has finished on all selected motors
    pub fn is_time_done(&mut self, select: MotorSelect) -> Result<bool> {
        for &motor in select.motors() {
            if self.status(motor)? & STATUS_TIME_RUNNING != 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Check whether a tacho command has finished on all selected motors
    pub fn is_tacho_done(&mut self, select: MotorSelect) -> Result<bool> {
        for &motor in select.motors() {
            if self.status(motor)? & STATUS_TACHO_RUNNING != 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Block until the timed command completes, up to `timeout`
    pub fn wait_until_time_done(&mut self, select: MotorSelect, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_time_done(select)? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DriveError::Timeout { waited: timeout });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Block until the tacho target is reached, up to `timeout`
    pub fn wait_until_tacho_done(&mut self, select: MotorSelect, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_tacho_done(select)? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DriveError::Timeout { waited: timeout });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    /// Write the PID tuning block
    pub fn set_performance_parameters(&mut self, params: &PerformanceParams) -> Result<()> {
        info!("Writing performance parameters: {:?}", params);
        self.bus
            .write_array(Register::PositionKp, &params.to_block())
    }

    /// Read back the PID tuning block
    pub fn read_performance_parameters(&mut self) -> Result<PerformanceParams> {
        Ok(PerformanceParams {
            position_kp: self.bus.read_u16(Register::PositionKp)?,
            position_ki: self.bus.read_u16(Register::PositionKi)?,
            position_kd: self.bus.read_u16(Register::PositionKd)?,
            speed_kp: self.bus.read_u16(Register::SpeedKp)?,
            speed_ki: self.bus.read_u16(Register::SpeedKi)?,
            speed_kd: self.bus.read_u16(Register::SpeedKd)?,
            pass_count: self.bus.read_byte(Register::PassCount)?,
            tolerance: self.bus.read_byte(Register::PassTolerance)?,
        })
    }

    fn start_both_if_selected(&mut self, select: MotorSelect) -> Result<()> {
        if select.is_both() {
            self.command(Command::StartBoth)
        } else {
            Ok(())
        }
    }

    /// Release the underlying I2C bus
    pub fn release(self) -> I2C {
        self.bus.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    const ADDR: u8 = DEFAULT_ADDRESS;

    fn drive(i2c: &I2cMock) -> SmartDrive<I2cMock> {
        SmartDrive::new(i2c.clone())
    }

    #[test]
    fn stop_emits_exactly_one_command_byte() {
        let cases = [
            (MotorSelect::One, NextAction::Float, b'a'),
            (MotorSelect::Two, NextAction::Float, b'b'),
            (MotorSelect::Both, NextAction::Float, b'c'),
            (MotorSelect::One, NextAction::Brake, b'A'),
            (MotorSelect::Two, NextAction::Brake, b'B'),
            (MotorSelect::Both, NextAction::Brake, b'C'),
            (MotorSelect::One, NextAction::BrakeHold, b'A'),
            (MotorSelect::Both, NextAction::BrakeHold, b'C'),
        ];

        for (select, action, expected) in cases {
            let expectations = [Transaction::write(ADDR, vec![0x41, expected])];
            let mut i2c = I2cMock::new(&expectations);

            drive(&i2c).stop(select, action).unwrap();

            i2c.done();
        }
    }

    #[test]
    fn run_unlimited_single_motor_sets_go() {
        // SPEED | BRAKE | GO = 0x91
        let expectations = [Transaction::write(ADDR, vec![0x46, 50, 0, 0, 0x91])];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_unlimited(MotorSelect::One, Direction::Forward, 50)
            .unwrap();

        i2c.done();
    }

    #[test]
    fn run_unlimited_reverse_negates_speed() {
        // -50 as two's complement
        let expectations = [Transaction::write(ADDR, vec![0x46, 0xCE, 0, 0, 0x91])];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_unlimited(MotorSelect::One, Direction::Reverse, 50)
            .unwrap();

        i2c.done();
    }

    #[test]
    fn run_unlimited_both_omits_go_and_issues_combined_start() {
        // SPEED | BRAKE = 0x11, then the 'S' command synchronizes the start
        let expectations = [
            Transaction::write(ADDR, vec![0x46, 40, 0, 0, 0x11]),
            Transaction::write(ADDR, vec![0x4E, 40, 0, 0, 0x11]),
            Transaction::write(ADDR, vec![0x41, b'S']),
        ];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_unlimited(MotorSelect::Both, Direction::Forward, 40)
            .unwrap();

        i2c.done();
    }

    #[test]
    fn run_seconds_with_brake_and_wait_polls_time_bit() {
        // SPEED | TIME | BRAKE | GO = 0xD1; the time bit stays set for one
        // poll and clears on the next.
        let expectations = [
            Transaction::write(ADDR, vec![0x46, 50, 3, 0, 0xD1]),
            Transaction::write_read(ADDR, vec![0x5A], vec![STATUS_TIME_RUNNING]),
            Transaction::write_read(ADDR, vec![0x5A], vec![0x00]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_seconds(
                MotorSelect::One,
                Direction::Forward,
                50,
                3,
                Completion::WaitFor(Duration::from_secs(4)),
                NextAction::Brake,
            )
            .unwrap();

        i2c.done();
    }

    #[test]
    fn run_seconds_brake_hold_sets_hold_bit() {
        // SPEED | TIME | BRAKE | HOLD | GO = 0xF1
        let expectations = [Transaction::write(ADDR, vec![0x4E, 30, 2, 0, 0xF1])];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_seconds(
                MotorSelect::Two,
                Direction::Forward,
                30,
                2,
                Completion::NoWait,
                NextAction::BrakeHold,
            )
            .unwrap();

        i2c.done();
    }

    #[test]
    fn run_degrees_writes_little_endian_setpoint() {
        // 360 = 0x00000168; SPEED | RELATIVE | TACHO | BRAKE | GO = 0x9D
        let expectations = [Transaction::write(
            ADDR,
            vec![0x42, 0x68, 0x01, 0x00, 0x00, 50, 0, 0, 0x9D],
        )];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_degrees(
                MotorSelect::One,
                Direction::Forward,
                50,
                360,
                Completion::NoWait,
                NextAction::Brake,
            )
            .unwrap();

        i2c.done();
    }

    #[test]
    fn run_degrees_reverse_negates_target_not_speed() {
        // -360 = 0xFFFFFE98, speed byte stays 50
        let expectations = [Transaction::write(
            ADDR,
            vec![0x42, 0x98, 0xFE, 0xFF, 0xFF, 50, 0, 0, 0x9D],
        )];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_degrees(
                MotorSelect::One,
                Direction::Reverse,
                50,
                360,
                Completion::NoWait,
                NextAction::Brake,
            )
            .unwrap();

        i2c.done();
    }

    #[test]
    fn run_rotations_scales_by_360() {
        // 2 rotations = 720 = 0x02D0
        let expectations = [Transaction::write(
            ADDR,
            vec![0x42, 0xD0, 0x02, 0x00, 0x00, 25, 0, 0, 0x9D],
        )];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_rotations(
                MotorSelect::One,
                Direction::Forward,
                25,
                2,
                Completion::NoWait,
                NextAction::Brake,
            )
            .unwrap();

        i2c.done();
    }

    #[test]
    fn run_to_position_is_absolute_without_relative_flag() {
        // SPEED | TACHO | GO = 0x89, no RELATIVE bit
        let expectations = [Transaction::write(
            ADDR,
            vec![0x4A, 0xE8, 0x03, 0x00, 0x00, 60, 0, 0, 0x89],
        )];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_to_position(
                MotorSelect::Two,
                60,
                1000,
                Completion::NoWait,
                NextAction::Float,
            )
            .unwrap();

        i2c.done();
    }

    #[test]
    fn run_tacho_both_issues_combined_start() {
        // SPEED | RELATIVE | TACHO | BRAKE = 0x1D, no GO
        let expectations = [
            Transaction::write(ADDR, vec![0x42, 0x68, 0x01, 0x00, 0x00, 50, 0, 0, 0x1D]),
            Transaction::write(ADDR, vec![0x4A, 0x68, 0x01, 0x00, 0x00, 50, 0, 0, 0x1D]),
            Transaction::write(ADDR, vec![0x41, b'S']),
        ];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_degrees(
                MotorSelect::Both,
                Direction::Forward,
                50,
                360,
                Completion::NoWait,
                NextAction::Brake,
            )
            .unwrap();

        i2c.done();
    }

    #[test]
    fn battery_voltage_scales_raw_byte() {
        let expectations = [Transaction::write_read(ADDR, vec![0x6E], vec![56])];
        let mut i2c = I2cMock::new(&expectations);

        let mv = drive(&i2c).battery_voltage().unwrap();
        assert!((mv - 56.0 * VOLTAGE_MULTIPLIER).abs() < f32::EPSILON);

        i2c.done();
    }

    #[test]
    fn battery_voltage_read_failure_is_recoverable() {
        let expectations =
            [Transaction::write_read(ADDR, vec![0x6E], vec![0]).with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);

        assert!(matches!(
            drive(&i2c).battery_voltage(),
            Err(DriveError::Bus(_))
        ));

        i2c.done();
    }

    #[test]
    fn tachometer_position_reads_signed_long() {
        let expectations = [Transaction::write_read(
            ADDR,
            vec![0x56],
            vec![0x98, 0xFE, 0xFF, 0xFF],
        )];
        let mut i2c = I2cMock::new(&expectations);

        assert_eq!(drive(&i2c).tachometer_position(Motor::Two).unwrap(), -360);

        i2c.done();
    }

    #[test]
    fn is_tacho_done_requires_both_motors_clear() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x5A], vec![0x00]),
            Transaction::write_read(ADDR, vec![0x5B], vec![STATUS_TACHO_RUNNING]),
            Transaction::write_read(ADDR, vec![0x5A], vec![0x00]),
            Transaction::write_read(ADDR, vec![0x5B], vec![0x00]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut drive = drive(&i2c);
        assert!(!drive.is_tacho_done(MotorSelect::Both).unwrap());
        assert!(drive.is_tacho_done(MotorSelect::Both).unwrap());

        i2c.done();
    }

    #[test]
    fn wait_until_time_done_times_out() {
        let expectations = [Transaction::write_read(
            ADDR,
            vec![0x5A],
            vec![STATUS_TIME_RUNNING],
        )];
        let mut i2c = I2cMock::new(&expectations);

        let result = drive(&i2c).wait_until_time_done(MotorSelect::One, Duration::ZERO);
        assert!(matches!(result, Err(DriveError::Timeout { .. })));

        i2c.done();
    }

    #[test]
    fn set_performance_parameters_writes_block_low_byte_first() {
        // 300 = 0x012C -> low 44, high 1
        let expectations = [Transaction::write(
            ADDR,
            vec![0x5E, 44, 1, 10, 0, 50, 0, 200, 0, 5, 0, 20, 0, 5, 2],
        )];
        let mut i2c = I2cMock::new(&expectations);

        let params = PerformanceParams {
            position_kp: 300,
            position_ki: 10,
            position_kd: 50,
            speed_kp: 200,
            speed_ki: 5,
            speed_kd: 20,
            pass_count: 5,
            tolerance: 2,
        };
        drive(&i2c).set_performance_parameters(&params).unwrap();

        i2c.done();
    }

    #[test]
    fn read_performance_parameters_round_trips() {
        let expectations = [
            Transaction::write_read(ADDR, vec![0x5E], vec![44, 1]),
            Transaction::write_read(ADDR, vec![0x60], vec![10, 0]),
            Transaction::write_read(ADDR, vec![0x62], vec![50, 0]),
            Transaction::write_read(ADDR, vec![0x64], vec![200, 0]),
            Transaction::write_read(ADDR, vec![0x66], vec![5, 0]),
            Transaction::write_read(ADDR, vec![0x68], vec![20, 0]),
            Transaction::write_read(ADDR, vec![0x6A], vec![5]),
            Transaction::write_read(ADDR, vec![0x6B], vec![2]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let params = drive(&i2c).read_performance_parameters().unwrap();
        assert_eq!(
            params,
            PerformanceParams {
                position_kp: 300,
                position_ki: 10,
                position_kd: 50,
                speed_kp: 200,
                speed_ki: 5,
                speed_kd: 20,
                pass_count: 5,
                tolerance: 2,
            }
        );

        i2c.done();
    }

    #[test]
    fn reset_encoders_issues_reset_command() {
        let expectations = [Transaction::write(ADDR, vec![0x41, b'R'])];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c).reset_encoders().unwrap();

        i2c.done();
    }

    #[test]
    fn speed_is_clamped_to_100() {
        let expectations = [Transaction::write(ADDR, vec![0x46, 100, 0, 0, 0x91])];
        let mut i2c = I2cMock::new(&expectations);

        drive(&i2c)
            .run_unlimited(MotorSelect::One, Direction::Forward, 200)
            .unwrap();

        i2c.done();
    }
}
