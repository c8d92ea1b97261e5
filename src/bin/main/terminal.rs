//! Band sink that draws the panel as text rows.

use std::io::{self, Write};

use st7565::{BandSink, protocol::{BAND_ROWS, WIDTH}};

const LIT: char = '#';
const DARK: char = '.';

pub(super) struct TerminalSink<W> {
    out: W,
    bands_written: usize,
}

impl<W: Write> TerminalSink<W> {
    pub(super) fn new(out: W) -> Self {
        Self {
            out,
            bands_written: 0,
        }
    }

    pub(super) fn bands_written(&self) -> usize {
        self.bands_written
    }

    fn write_band(&mut self, data: &[u8; WIDTH]) -> io::Result<()> {
        let mut row = String::with_capacity(WIDTH);
        for bit in 0..BAND_ROWS {
            row.clear();
            row.extend(
                data.iter()
                    .map(|&byte| if byte & (1 << bit) != 0 { LIT } else { DARK }),
            );
            writeln!(self.out, "{row}")?;
        }
        self.bands_written += 1;
        Ok(())
    }
}

impl<W: Write> BandSink for TerminalSink<W> {
    type Error = io::Error;

    fn flush_band(&mut self, _band: usize, data: &[u8; WIDTH]) -> Result<(), Self::Error> {
        self.write_band(data)
    }

    fn flush_status_line(&mut self, data: &[u8; WIDTH]) -> Result<(), Self::Error> {
        self.write_band(data)?;
        writeln!(self.out, "{}", "-".repeat(WIDTH))
    }

    fn flush_frame(&mut self, frame: &st7565::FrameBuffer) -> Result<(), Self::Error> {
        for band in 0..st7565::FrameBuffer::BANDS {
            if let Some(data) = frame.band(band) {
                self.flush_band(band, data)?;
            }
        }
        self.out.flush()
    }
}
