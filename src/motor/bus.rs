// Register-level I2C access for the SmartDrive controller
//
// Register writes are a plain I2C write of [register, data...]; reads are a
// write of [register] followed by a repeated-start read of N bytes.
// Multi-byte values are little-endian. Tacho positions are signed 32-bit.

use std::time::Duration;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use tracing::debug;

use super::registers::Register;

/// Error types for SmartDrive communication
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("i2c bus error: {0}")]
    Bus(ErrorKind),

    #[error("timed out after {waited:?} waiting for command completion")]
    Timeout { waited: Duration },
}

pub type Result<T> = std::result::Result<T, DriveError>;

/// SmartDrive register bus - raw reads and writes at a fixed 7-bit address
pub struct SmartDriveBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> SmartDriveBus<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Write a single byte to a register
    pub fn write_byte(&mut self, register: Register, value: u8) -> Result<()> {
        debug!(
            "Write byte to {:?} (0x{:02X}): 0x{:02X}",
            register,
            register.addr(),
            value
        );
        self.i2c
            .write(self.address, &[register.addr(), value])
            .map_err(|e| DriveError::Bus(e.kind()))
    }

    /// Write a byte sequence starting at a register
    pub fn write_array(&mut self, start: Register, data: &[u8]) -> Result<()> {
        debug!(
            "Write {} bytes at {:?} (0x{:02X}): {:02X?}",
            data.len(),
            start,
            start.addr(),
            data
        );
        let mut buf = Vec::with_capacity(1 + data.len());
        buf.push(start.addr());
        buf.extend_from_slice(data);
        self.i2c
            .write(self.address, &buf)
            .map_err(|e| DriveError::Bus(e.kind()))
    }

    /// Read a single byte from a register
    pub fn read_byte(&mut self, register: Register) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register.addr()], &mut buf)
            .map_err(|e| DriveError::Bus(e.kind()))?;
        debug!("Read byte from {:?}: 0x{:02X}", register, buf[0]);
        Ok(buf[0])
    }

    /// Read a signed 32-bit little-endian value from a register
    pub fn read_i32(&mut self, register: Register) -> Result<i32> {
        let mut buf = [0u8; 4];
        self.i2c
            .write_read(self.address, &[register.addr()], &mut buf)
            .map_err(|e| DriveError::Bus(e.kind()))?;
        let value = i32::from_le_bytes(buf);
        debug!("Read i32 from {:?}: {}", register, value);
        Ok(value)
    }

    /// Read an unsigned 16-bit little-endian value from a register
    pub fn read_u16(&mut self, register: Register) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register.addr()], &mut buf)
            .map_err(|e| DriveError::Bus(e.kind()))?;
        let value = u16::from_le_bytes(buf);
        debug!("Read u16 from {:?}: {}", register, value);
        Ok(value)
    }

    /// Release the underlying I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}
