//! Single owner of the frame and status strip.
//!
//! Callers queue [`DrawRequest`]s and call [`Compositor::refresh`], which
//! applies the queue in submission order and then pushes the status strip and
//! every frame band to a [`BandSink`].

use heapless::{Deque, String};
use log::{debug, trace, warn};
use st7565::{BandSink, FrameBuffer, StatusLine};

use crate::{
    font::{Font, FontSet},
    icons::IconSet,
    profile::UiProfile,
    shapes::{draw_line, draw_rectangle},
    status::{StatusRender, StatusSnapshot, compose_status},
    text, views,
};

/// Requests that can wait for one refresh.
pub const QUEUE_DEPTH: usize = 16;
/// Longest text a request carries.
pub const TEXT_BYTES: usize = 32;

pub type RequestText = String<TEXT_BYTES>;

/// Surface a pixel-addressed request draws on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Target {
    #[default]
    Frame,
    Status,
}

/// How a placed text run is blended into its band.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextStyle {
    /// Two-band text on cells of `cell_width` columns.
    Big { cell_width: i32 },
    Small,
    SmallBold,
    SmallNegative,
    SmallNegativeInset,
    SmallBoldNegative,
    SmallBottomInRow,
    SmallOffsetDown(u8),
    SmallOffsetUp(u8),
    SmallInverse,
    SmallBoldInverse,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawRequest {
    /// Blank the frame.
    Clear,
    /// Replace the frame with a modal message.
    Popup(RequestText),
    /// Text run placed by `(start, end, band)`.
    Text {
        text: RequestText,
        start: i32,
        end: i32,
        band: usize,
        style: TextStyle,
    },
    /// Small text anchored at pixel `(x, y)` of the frame.
    SmallAt { text: RequestText, x: i32, y: usize },
    /// 3x5 text at pixel `(x, y)`; `fill` clears strokes when `false`.
    Tiny {
        text: RequestText,
        x: i32,
        y: i32,
        target: Target,
        fill: bool,
    },
    /// 3x5 text cut out of a solid block on the frame.
    TinyNegative { text: RequestText, x: i32, y: i32 },
    /// Big-digit frequency; `raised` carries the top-spill limit column.
    Frequency {
        text: RequestText,
        x: i32,
        band: usize,
        center: bool,
        raised: Option<i32>,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        on: bool,
    },
    Rectangle {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        on: bool,
    },
    /// Rebuild the status strip.
    Status(StatusSnapshot),
}

impl DrawRequest {
    /// Text request, truncated to [`TEXT_BYTES`] on a character boundary.
    pub fn text(text: &str, start: i32, end: i32, band: usize, style: TextStyle) -> Self {
        Self::Text {
            text: request_text(text),
            start,
            end,
            band,
            style,
        }
    }

    pub fn popup(message: &str) -> Self {
        Self::Popup(request_text(message))
    }
}

/// Copies `text` into request storage, dropping whatever does not fit.
pub fn request_text(text: &str) -> RequestText {
    let mut out = RequestText::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            trace!("request text truncated at {} bytes", out.len());
            break;
        }
    }
    out
}

pub struct Compositor<'f, I> {
    frame: FrameBuffer,
    status: StatusLine,
    fonts: FontSet<'f>,
    icons: I,
    profile: UiProfile,
    queue: Deque<DrawRequest, QUEUE_DEPTH>,
    last_status: Option<StatusRender>,
}

impl<'f, I: IconSet> Compositor<'f, I> {
    pub fn new(fonts: FontSet<'f>, icons: I, profile: UiProfile) -> Self {
        Self {
            frame: FrameBuffer::new(),
            status: StatusLine::new(),
            fonts,
            icons,
            profile,
            queue: Deque::new(),
            last_status: None,
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Direct frame access for drawing outside the request queue.
    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status
    }

    pub fn profile(&self) -> UiProfile {
        self.profile
    }

    pub fn set_profile(&mut self, profile: UiProfile) {
        self.profile = profile;
    }

    /// Requests waiting for the next refresh.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Outcome of the most recent status composition.
    pub fn last_status(&self) -> Option<StatusRender> {
        self.last_status
    }

    /// The status strip shows a running timer and should be rebuilt.
    pub fn status_redraw_pending(&self) -> bool {
        self.last_status.is_some_and(|render| render.redraw_pending)
    }

    /// Queues a request. A full queue hands the request back.
    pub fn submit(&mut self, request: DrawRequest) -> Result<(), DrawRequest> {
        self.queue.push_back(request).map_err(|request| {
            warn!("draw queue full ({QUEUE_DEPTH}), request rejected");
            request
        })
    }

    /// Applies one request immediately, bypassing the queue.
    pub fn apply(&mut self, request: &DrawRequest) {
        trace!("apply {request:?}");
        match request {
            DrawRequest::Clear => views::clear(&mut self.frame),
            DrawRequest::Popup(message) => views::popup(&mut self.frame, &self.fonts, message),
            DrawRequest::Text {
                text,
                start,
                end,
                band,
                style,
            } => self.place_text(text, *start, *end, *band, *style),
            DrawRequest::SmallAt { text, x, y } => {
                text::print_small_at(&mut self.frame, &self.fonts.small, text, *x, *y)
            }
            DrawRequest::Tiny {
                text,
                x,
                y,
                target,
                fill,
            } => match target {
                Target::Frame => {
                    text::print_tiny(&mut self.frame, &self.fonts.tiny, text, *x, *y, *fill)
                }
                Target::Status => {
                    text::print_tiny(&mut self.status, &self.fonts.tiny, text, *x, *y, *fill)
                }
            },
            DrawRequest::TinyNegative { text, x, y } => {
                text::print_tiny_negative(&mut self.frame, &self.fonts.tiny, text, *x, *y)
            }
            DrawRequest::Frequency {
                text,
                x,
                band,
                center,
                raised,
            } => match raised {
                Some(max_x_top) => text::print_frequency_raised(
                    &mut self.frame,
                    &self.fonts.big_digits,
                    text,
                    *x,
                    *band,
                    *center,
                    *max_x_top,
                ),
                None => text::print_frequency(
                    &mut self.frame,
                    &self.fonts.big_digits,
                    text,
                    *x,
                    *band,
                    *center,
                ),
            },
            DrawRequest::Line { x1, y1, x2, y2, on } => {
                draw_line(&mut self.frame, *x1, *y1, *x2, *y2, *on)
            }
            DrawRequest::Rectangle { x1, y1, x2, y2, on } => {
                draw_rectangle(&mut self.frame, *x1, *y1, *x2, *y2, *on)
            }
            DrawRequest::Status(snapshot) => {
                let render = compose_status(
                    &mut self.status,
                    &self.fonts,
                    &self.icons,
                    &self.profile,
                    snapshot,
                );
                self.last_status = Some(render);
            }
        }
    }

    /// Applies every queued request, then pushes the status strip and the frame.
    ///
    /// Returns how many requests were applied. On a sink error the surfaces
    /// keep their composed content and the next refresh pushes them again.
    pub fn refresh<S: BandSink>(&mut self, sink: &mut S) -> Result<usize, S::Error> {
        let mut applied = 0;
        while let Some(request) = self.queue.pop_front() {
            self.apply(&request);
            applied += 1;
        }

        sink.flush_status_line(self.status.bytes())?;
        sink.flush_frame(&self.frame)?;

        debug!(
            "refresh applied={} lit={} status_lit={} redraw_pending={}",
            applied,
            self.frame.count_set(),
            self.status.count_set(),
            self.status_redraw_pending()
        );
        Ok(applied)
    }

    fn bold(&self) -> &Font<'f> {
        match (&self.fonts.small_bold, self.profile.small_bold) {
            (Some(bold), true) => bold,
            _ => &self.fonts.small,
        }
    }

    fn place_text(&mut self, text: &str, start: i32, end: i32, band: usize, style: TextStyle) {
        let small = self.fonts.small;
        let bold = *self.bold();
        let frame = &mut self.frame;
        match style {
            TextStyle::Big { cell_width } => {
                text::print_big(frame, &self.fonts.big, text, start, end, band, cell_width)
            }
            TextStyle::Small => text::print_small(frame, &small, text, start, end, band),
            TextStyle::SmallBold => text::print_small(frame, &bold, text, start, end, band),
            TextStyle::SmallNegative => {
                text::print_small_negative(frame, &small, text, start, end, band)
            }
            TextStyle::SmallNegativeInset => {
                text::print_small_negative_inset(frame, &small, text, start, end, band)
            }
            TextStyle::SmallBoldNegative => {
                text::print_small_negative(frame, &bold, text, start, end, band)
            }
            TextStyle::SmallBottomInRow => {
                text::print_small_bottom_in_row(frame, &small, text, start, end, band)
            }
            TextStyle::SmallOffsetDown(offset) => {
                text::print_small_offset_down(frame, &small, text, start, end, band, offset)
            }
            TextStyle::SmallOffsetUp(offset) => {
                text::print_small_offset_up(frame, &small, text, start, end, band, offset)
            }
            TextStyle::SmallInverse => {
                text::print_small_inverse(frame, &small, text, start, end, band)
            }
            TextStyle::SmallBoldInverse => {
                text::print_small_bold_inverse(frame, &bold, text, start, end, band)
            }
        }
    }
}

#[cfg(test)]
mod tests;
