//! ILI9341 command definitions
//!
//! The controller is driven through a small fixed set of opcodes. Each
//! opcode is sent with the DC line low; its parameter bytes (if any) follow
//! with DC high.
//!
//! ## Command Structure
//!
//! 1. Set DC low (command mode)
//! 2. Send the opcode byte
//! 3. Set DC high (data mode)
//! 4. Send parameter bytes or pixel words
//!
//! ## Example
//!
//! ```
//! use ili9341::Command;
//!
//! assert_eq!(Command::ColumnAddressSet.opcode(), 0x2A);
//! assert_eq!(Command::MemoryWrite.opcode(), 0x2C);
//! ```

/// Controller opcodes used by this driver
///
/// Byte values are taken from the ILI9341 datasheet command table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Software reset (0x01)
    ///
    /// Restores register defaults. Wait at least 5ms before the next command.
    SoftwareReset = 0x01,
    /// Sleep out (0x11)
    ///
    /// Turns on the DC/DC converter and oscillator. Wait 120ms afterwards.
    SleepOut = 0x11,
    /// Gamma curve select (0x26)
    ///
    /// Requires 1 byte selecting the curve.
    GammaSet = 0x26,
    /// Display off (0x28)
    DisplayOff = 0x28,
    /// Display on (0x29)
    DisplayOn = 0x29,
    /// Column address set (0x2A)
    ///
    /// Requires 4 bytes: `[start_MSB, start_LSB, end_MSB, end_LSB]`
    ColumnAddressSet = 0x2A,
    /// Page (row) address set (0x2B)
    ///
    /// Requires 4 bytes: `[start_MSB, start_LSB, end_MSB, end_LSB]`
    PageAddressSet = 0x2B,
    /// Memory write (0x2C)
    ///
    /// Resets the write pointer to the window origin; following data words
    /// fill the window in row-major order.
    MemoryWrite = 0x2C,
    /// Memory access control (0x36)
    ///
    /// Requires 1 byte selecting scan direction and RGB/BGR order.
    MemoryAccessControl = 0x36,
    /// Vertical scrolling start address (0x37)
    ///
    /// Requires one 16-bit big-endian line offset.
    VerticalScrollingStartAddress = 0x37,
    /// Pixel format set (0x3A)
    ///
    /// Requires 1 byte; `0x55` selects 16 bits per pixel.
    PixelFormatSet = 0x3A,
    /// Frame rate control in normal mode (0xB1)
    ///
    /// Requires 2 bytes: division ratio and frame rate.
    FrameControlNormal = 0xB1,
    /// Display function control (0xB6)
    ///
    /// Requires 4 bytes.
    DisplayFunctionControl = 0xB6,
    /// Entry mode set (0xB7)
    ///
    /// Requires 1 byte.
    EntryModeSet = 0xB7,
}

impl Command {
    /// Get the wire byte for this opcode
    pub const fn opcode(self) -> u8 {
        self as u8
    }
}

impl From<Command> for u8 {
    fn from(command: Command) -> Self {
        command.opcode()
    }
}

// Power-up parameter bytes

/// Pixel format parameter: 16 bits per pixel on both RGB and MCU interfaces
pub const PIXEL_FORMAT_16BPP: u8 = 0x55;

/// Frame rate control parameters: no oscillator division, 70Hz
pub const FRAME_CONTROL_NORMAL: [u8; 2] = [0x00, 0x1B];

/// Gamma curve 1 (G2.2)
pub const GAMMA_CURVE_1: u8 = 0x01;

/// Entry mode: low voltage detection off, normal gate output
pub const ENTRY_MODE: u8 = 0x07;

/// Display function control parameters
pub const DISPLAY_FUNCTION_CONTROL: [u8; 4] = [0x0A, 0x82, 0x27, 0x00];

/// Encode a start/end address pair as sent with the address-set commands
///
/// Both values are written as full big-endian 16-bit fields.
///
/// ```
/// use ili9341::command::encode_address_range;
///
/// assert_eq!(encode_address_range(0, 319), [0x00, 0x00, 0x01, 0x3F]);
/// ```
pub const fn encode_address_range(start: u16, end: u16) -> [u8; 4] {
    let [start_hi, start_lo] = start.to_be_bytes();
    let [end_hi, end_lo] = end.to_be_bytes();
    [start_hi, start_lo, end_hi, end_lo]
}
