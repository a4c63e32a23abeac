//! SH1106 OLED driver
//!
//! 128x64 panel on I2C. Text is rendered with embedded-graphics' 5x8 mono
//! font into a local page buffer, giving a 25 x 8 character grid that
//! lines up with the controller's 8-pixel pages.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::i2c::I2c;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{SCREEN_COLS, SCREEN_ROWS};

/// Default 7-bit bus address (0x3D with SA0 high)
pub const SH1106_ADDR: u8 = 0x3C;

const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

const CELL_WIDTH: usize = 5;

/// Controller RAM is 132 columns wide; the glass starts at column 2
const COLUMN_OFFSET: u8 = 2;

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

const INIT_SEQUENCE: [u8; 22] = [
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// One bit per pixel, eight rows per byte
struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let bit = 1u8 << (y % 8);
            let byte = &mut self.pages[y / 8][x];
            if color.is_on() {
                *byte |= bit;
            } else {
                *byte &= !bit;
            }
        }
        Ok(())
    }
}

/// SH1106 driver over a blocking I2C bus
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
    frame: FrameBuffer,
    ready: bool,
}

impl<I2C: I2c> Sh1106<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, SH1106_ADDR)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            frame: FrameBuffer {
                pages: [[0; WIDTH]; PAGES],
            },
            ready: false,
        }
    }

    /// Run the power-up sequence and blank the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        for &c in INIT_SEQUENCE.iter() {
            self.command(c)?;
        }
        self.ready = true;
        self.clear()?;
        self.flush()
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.command(cmd::SET_CONTRAST)?;
        self.command(contrast)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, c])
            .map_err(|_| DisplayError::Communication)
    }

    fn check_cell(row: u8, col: u8) -> Result<(), DisplayError> {
        if usize::from(row) >= SCREEN_ROWS || usize::from(col) > SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        Ok(())
    }
}

impl<I2C: I2c> DisplayBackend for Sh1106<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for page in self.frame.pages.iter_mut() {
            page.fill(0);
        }
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        Self::check_cell(row, col)?;
        let origin = Point::new(
            i32::from(col) * CELL_WIDTH as i32,
            i32::from(row) * 8,
        );
        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
        // Infallible target; pixels past the edge are clipped by draw_iter
        let _ = Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut self.frame);
        Ok(())
    }

    fn invert_region(&mut self, row: u8, start_col: u8, end_col: u8) -> Result<(), DisplayError> {
        Self::check_cell(row, start_col)?;
        let page = &mut self.frame.pages[usize::from(row)];
        let start = usize::from(start_col) * CELL_WIDTH;
        let end = (usize::from(end_col) * CELL_WIDTH).min(WIDTH);
        for byte in page.iter_mut().take(end).skip(start) {
            *byte ^= 0xFF;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotInitialized);
        }

        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8)?;
            self.command(cmd::SET_LOW_COLUMN | COLUMN_OFFSET)?;
            self.command(cmd::SET_HIGH_COLUMN)?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.frame.pages[page]);
            self.i2c
                .write(self.address, &data)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    use std::vec::Vec;

    #[derive(Default)]
    struct MockBus {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), ErrorKind> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    fn ready_display() -> Sh1106<MockBus> {
        let mut display = Sh1106::new(MockBus::default());
        display.init().unwrap();
        display.i2c.writes.clear();
        display
    }

    #[test]
    fn test_init_sequence_then_blank_frame() {
        let mut display = Sh1106::new(MockBus::default());
        assert!(!display.is_ready());
        display.init().unwrap();
        assert!(display.is_ready());

        let writes = &display.i2c.writes;
        let commands: Vec<u8> = writes
            .iter()
            .take(INIT_SEQUENCE.len())
            .map(|(_, bytes)| bytes[1])
            .collect();
        assert_eq!(commands.as_slice(), &INIT_SEQUENCE[..]);
        assert!(writes.iter().all(|(addr, _)| *addr == SH1106_ADDR));
        // 8 pages of 3 commands + 1 data write
        assert_eq!(writes.len(), INIT_SEQUENCE.len() + PAGES * 4);
    }

    #[test]
    fn test_flush_before_init() {
        let mut display = Sh1106::new(MockBus::default());
        assert_eq!(display.flush(), Err(DisplayError::NotInitialized));
        assert!(display.i2c.writes.is_empty());
    }

    #[test]
    fn test_text_lands_in_its_cell() {
        let mut display = ready_display();
        display.draw_text(1, 2, "A").unwrap();

        let page = &display.frame.pages[1];
        assert!(page[10..15].iter().any(|&b| b != 0));
        assert!(page[..10].iter().all(|&b| b == 0));
        assert!(page[15..].iter().all(|&b| b == 0));
        assert!(display.frame.pages[0].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invert_region() {
        let mut display = ready_display();
        display.invert_region(0, 0, SCREEN_COLS as u8).unwrap();
        let page = &display.frame.pages[0];
        assert!(page[..125].iter().all(|&b| b == 0xFF));
        assert!(page[125..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_flush_writes_offset_pages() {
        let mut display = ready_display();
        display.invert_region(7, 0, 1).unwrap();
        display.flush().unwrap();

        let writes = &display.i2c.writes;
        assert_eq!(writes.len(), PAGES * 4);
        let last_page = &writes[28..32];
        assert_eq!(last_page[0].1, std::vec![CONTROL_COMMAND, cmd::SET_PAGE_ADDR | 7]);
        assert_eq!(last_page[1].1, std::vec![CONTROL_COMMAND, COLUMN_OFFSET]);
        let data = &last_page[3].1;
        assert_eq!(data.len(), WIDTH + 1);
        assert_eq!(data[0], CONTROL_DATA);
        assert_eq!(&data[1..6], &[0xFF; 5]);
        assert_eq!(data[6], 0);
    }

    #[test]
    fn test_bus_error_maps_to_communication() {
        let mut display = ready_display();
        display.i2c.fail = true;
        assert_eq!(display.flush(), Err(DisplayError::Communication));
    }

    #[test]
    fn test_out_of_range_cell() {
        let mut display = ready_display();
        assert_eq!(
            display.draw_text(8, 0, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
    }
}
