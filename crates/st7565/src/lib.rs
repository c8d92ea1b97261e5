#![cfg_attr(not(test), no_std)]

//! ST7565 (128x64 page-addressed monochrome LCD controller) driver primitives.

mod framebuffer;
pub mod protocol;

#[cfg(feature = "embedded-graphics")]
mod graphics;

pub use framebuffer::{BandBuffer, FrameBuffer, StatusLine};

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use protocol::WIDTH;

/// Consumer of rendered surfaces.
///
/// The renderer only ever pushes whole bands; how they reach the glass is up
/// to the implementation.
pub trait BandSink {
    type Error;

    /// Pushes band `band` (0-based) of the main framebuffer.
    fn flush_band(&mut self, band: usize, data: &[u8; WIDTH]) -> Result<(), Self::Error>;

    /// Pushes the status strip.
    fn flush_status_line(&mut self, data: &[u8; WIDTH]) -> Result<(), Self::Error>;

    /// Pushes every band of the main framebuffer in order.
    fn flush_frame(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        for band in 0..FrameBuffer::BANDS {
            if let Some(data) = frame.band(band) {
                self.flush_band(band, data)?;
            }
        }

        Ok(())
    }
}

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// First visible RAM column (panels wired to a 132-column controller).
    pub column_offset: u8,
    /// Electronic volume, 0..=63.
    pub contrast: u8,
    /// Select 1/7 bias instead of 1/9.
    pub bias_1_7: bool,
    /// Mirror segment (column) scan direction.
    pub segment_reverse: bool,
    /// Mirror common (row) scan direction.
    pub common_reverse: bool,
    /// Display RAM row shown on the top line, 0..=63.
    pub start_line: u8,
    /// Page that receives the status strip.
    pub status_page: u8,
    /// Page that receives band 0 of the main framebuffer.
    pub first_frame_page: u8,
    /// Width of the reset pulse and recovery delay in microseconds.
    pub reset_pulse_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            column_offset: 4,
            contrast: 31,
            bias_1_7: false,
            segment_reverse: false,
            common_reverse: true,
            start_line: 0,
            status_page: 0,
            first_frame_page: 1,
            reset_pulse_us: 1_000,
        }
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<SpiErr, A0Err, RstErr> {
    /// SPI transaction failed.
    Spi(SpiErr),
    /// A0 (command/data select) pin operation failed.
    A0(A0Err),
    /// Reset pin operation failed.
    Reset(RstErr),
    /// Page or column outside the controller RAM.
    InvalidInput,
}

pub type DriverResult<SpiErr, A0Err, RstErr> = Result<(), Error<SpiErr, A0Err, RstErr>>;

/// ST7565 driver over an SPI device plus A0 and reset pins.
#[derive(Debug)]
pub struct St7565<SPI, A0, RST> {
    spi: SPI,
    a0: A0,
    rst: RST,
    config: Config,
}

impl<SPI, A0, RST> St7565<SPI, A0, RST>
where
    SPI: SpiDevice<u8>,
    A0: OutputPin,
    RST: OutputPin,
{
    /// Creates a new driver instance.
    pub fn new(spi: SPI, a0: A0, rst: RST, config: Config) -> Self {
        Self {
            spi,
            a0,
            rst,
            config,
        }
    }

    /// Returns current configuration.
    pub fn config(&self) -> Config {
        self.config
    }

    /// Releases owned bus and pins.
    pub fn release(self) -> (SPI, A0, RST) {
        (self.spi, self.a0, self.rst)
    }

    /// Hardware reset followed by the power-up command sequence.
    pub fn init<D>(&mut self, delay: &mut D) -> DriverResult<SPI::Error, A0::Error, RST::Error>
    where
        D: DelayNs,
    {
        let start_line =
            protocol::build_start_line(self.config.start_line).ok_or(Error::InvalidInput)?;

        self.rst.set_low().map_err(Error::Reset)?;
        delay.delay_us(self.config.reset_pulse_us);
        self.rst.set_high().map_err(Error::Reset)?;
        delay.delay_us(self.config.reset_pulse_us);

        let bias = if self.config.bias_1_7 {
            protocol::CMD_BIAS_1_7
        } else {
            protocol::CMD_BIAS_1_9
        };
        let segment = if self.config.segment_reverse {
            protocol::CMD_SEGMENT_REVERSE
        } else {
            protocol::CMD_SEGMENT_NORMAL
        };
        let common = if self.config.common_reverse {
            protocol::CMD_COMMON_REVERSE
        } else {
            protocol::CMD_COMMON_NORMAL
        };

        self.write_commands(&[
            protocol::CMD_RESET,
            bias,
            segment,
            common,
            protocol::CMD_REGULATION_RATIO | 0x04,
        ])?;
        self.set_contrast(self.config.contrast)?;
        self.write_commands(&[
            protocol::CMD_POWER_CONTROL | protocol::POWER_ALL_ON,
            start_line,
            protocol::CMD_ALL_PIXELS_NORMAL,
            protocol::CMD_INVERSE_OFF,
            protocol::CMD_DISPLAY_ON,
        ])
    }

    /// Updates the electronic volume.
    pub fn set_contrast(&mut self, contrast: u8) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.config.contrast = contrast.min(protocol::MAX_CONTRAST);
        self.write_commands(&protocol::build_contrast_packet(contrast))
    }

    /// Turns the panel output on or off without touching display RAM.
    pub fn set_display_on(&mut self, on: bool) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        let cmd = if on {
            protocol::CMD_DISPLAY_ON
        } else {
            protocol::CMD_DISPLAY_OFF
        };
        self.write_commands(&[cmd])
    }

    /// Writes one full page of column bytes.
    pub fn write_page(
        &mut self,
        page: u8,
        data: &[u8; WIDTH],
    ) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        let address = protocol::build_address_packet(page, self.config.column_offset)
            .ok_or(Error::InvalidInput)?;
        if self.config.column_offset as usize + WIDTH > protocol::RAM_COLUMNS as usize {
            return Err(Error::InvalidInput);
        }

        self.write_commands(&address)?;
        self.write_data(data)
    }

    fn write_commands(&mut self, commands: &[u8]) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.a0.set_low().map_err(Error::A0)?;
        self.spi.write(commands).map_err(Error::Spi)
    }

    fn write_data(&mut self, data: &[u8]) -> DriverResult<SPI::Error, A0::Error, RST::Error> {
        self.a0.set_high().map_err(Error::A0)?;
        self.spi.write(data).map_err(Error::Spi)
    }
}

impl<SPI, A0, RST> BandSink for St7565<SPI, A0, RST>
where
    SPI: SpiDevice<u8>,
    A0: OutputPin,
    RST: OutputPin,
{
    type Error = Error<SPI::Error, A0::Error, RST::Error>;

    fn flush_band(&mut self, band: usize, data: &[u8; WIDTH]) -> Result<(), Self::Error> {
        let page = u8::try_from(band)
            .ok()
            .and_then(|band| band.checked_add(self.config.first_frame_page))
            .ok_or(Error::InvalidInput)?;
        self.write_page(page, data)
    }

    fn flush_status_line(&mut self, data: &[u8; WIDTH]) -> Result<(), Self::Error> {
        self.write_page(self.config.status_page, data)
    }
}

#[cfg(test)]
mod tests {
    use core::{cell::RefCell, convert::Infallible};
    use std::{rc::Rc, vec::Vec};

    use embedded_hal::{
        digital::ErrorType as PinErrorType,
        spi::{ErrorType as SpiErrorType, Operation},
    };

    use super::*;

    #[derive(Default)]
    struct Wire {
        a0_high: bool,
        writes: Vec<(bool, Vec<u8>)>,
    }

    struct MockSpi(Rc<RefCell<Wire>>);
    struct MockA0(Rc<RefCell<Wire>>);
    struct MockPin;
    struct NoDelay;

    impl SpiErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiDevice<u8> for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
            let mut wire = self.0.borrow_mut();
            for op in operations.iter() {
                if let Operation::Write(bytes) = op {
                    let a0 = wire.a0_high;
                    wire.writes.push((a0, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    impl PinErrorType for MockA0 {
        type Error = Infallible;
    }

    impl OutputPin for MockA0 {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().a0_high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().a0_high = true;
            Ok(())
        }
    }

    impl PinErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn driver(config: Config) -> (St7565<MockSpi, MockA0, MockPin>, Rc<RefCell<Wire>>) {
        let wire = Rc::new(RefCell::new(Wire::default()));
        let lcd = St7565::new(
            MockSpi(wire.clone()),
            MockA0(wire.clone()),
            MockPin,
            config,
        );
        (lcd, wire)
    }

    #[test]
    fn init_ends_with_display_on_command() {
        let (mut lcd, wire) = driver(Config::default());
        lcd.init(&mut NoDelay).unwrap();

        let wire = wire.borrow();
        assert!(wire.writes.iter().all(|(a0, _)| !a0));
        let last = wire.writes.last().unwrap();
        assert_eq!(last.1.last(), Some(&protocol::CMD_DISPLAY_ON));
        assert!(wire.writes.iter().any(|(_, b)| b == &[0x81, 31]));
        assert!(wire.writes.iter().any(|(_, b)| b.contains(&protocol::CMD_START_LINE)));
    }

    #[test]
    fn init_applies_configured_start_line() {
        let (mut lcd, wire) = driver(Config {
            start_line: 8,
            ..Config::default()
        });
        lcd.init(&mut NoDelay).unwrap();

        let wire = wire.borrow();
        assert!(wire.writes.iter().any(|(_, b)| b.contains(&0x48)));
    }

    #[test]
    fn init_rejects_start_line_past_last_row() {
        let (mut lcd, wire) = driver(Config {
            start_line: 64,
            ..Config::default()
        });

        assert_eq!(lcd.init(&mut NoDelay), Err(Error::InvalidInput));
        assert!(wire.borrow().writes.is_empty());
    }

    #[test]
    fn status_line_goes_to_status_page_with_column_offset() {
        let (mut lcd, wire) = driver(Config::default());
        let mut data = [0u8; WIDTH];
        data[0] = 0xAA;

        lcd.flush_status_line(&data).unwrap();

        let wire = wire.borrow();
        assert_eq!(wire.writes[0], (false, vec![0xB0, 0x10, 0x04]));
        assert!(wire.writes[1].0);
        assert_eq!(wire.writes[1].1[0], 0xAA);
        assert_eq!(wire.writes[1].1.len(), WIDTH);
    }

    #[test]
    fn frame_bands_follow_the_status_page() {
        let (mut lcd, wire) = driver(Config::default());
        let frame = FrameBuffer::new();

        lcd.flush_frame(&frame).unwrap();

        let wire = wire.borrow();
        let pages: Vec<u8> = wire
            .writes
            .iter()
            .filter(|(a0, _)| !a0)
            .map(|(_, b)| b[0] & 0x0F)
            .collect();
        assert_eq!(pages, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn band_past_controller_ram_is_rejected() {
        let (mut lcd, _) = driver(Config::default());
        let data = [0u8; WIDTH];

        assert_eq!(lcd.flush_band(8, &data), Err(Error::InvalidInput));
    }

    #[test]
    fn column_offset_that_overflows_ram_is_rejected() {
        let (mut lcd, _) = driver(Config {
            column_offset: 8,
            ..Config::default()
        });

        assert_eq!(
            lcd.flush_status_line(&[0u8; WIDTH]),
            Err(Error::InvalidInput)
        );
    }
}
