//! Scroll-velocity marquee animator.
//!
//! A marquee strip is the same content repeated `repeat_count` times and
//! translated horizontally by an offset that advances every frame.  The sign
//! of the advance follows the direction the viewport was last scrolled in;
//! the magnitude is a fixed base velocity.  Once one repetition has been
//! measured the offset is wrapped into `[0, unit_width * repeat_count)`.

/// Which way the viewport was last scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    Up,
    #[default]
    Down,
}

/// Whether the content unit width is known yet.
///
/// The transition is one-way: once measured, later measurements only
/// update the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureState {
    Unmeasured,
    Measured,
}

/// Per-instance animation state.  Never shared between animators.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    pub last_scroll_position: f64,
    pub direction: ScrollDirection,
    /// Width of one repetition of the content; `0.0` until measured.
    pub content_unit_width: f64,
    /// Accumulated horizontal translation.
    pub offset: f64,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            last_scroll_position: 0.0,
            direction: ScrollDirection::Down,
            content_unit_width: 0.0,
            offset: 0.0,
        }
    }
}

/// Drives the marquee offset from scroll notifications and frame ticks.
#[derive(Debug, Clone)]
pub struct ScrollVelocityAnimator {
    state: ScrollState,
    /// Offset advance per frame, always applied as a magnitude.
    base_velocity: f64,
    /// How many copies of the content the renderer lays out.
    repeat_count: u32,
}

impl ScrollVelocityAnimator {
    pub fn new(base_velocity: f64, repeat_count: u32) -> Self {
        let base_velocity = if base_velocity.is_finite() {
            base_velocity.abs()
        } else {
            0.0
        };
        Self {
            state: ScrollState::default(),
            base_velocity,
            repeat_count: repeat_count.max(1),
        }
    }

    /// Record a new viewport scroll position.
    ///
    /// Strictly greater than the last position means `Down`, strictly less
    /// means `Up`; an identical reading keeps the current direction.
    /// Non-finite readings are dropped without touching the state.
    pub fn on_scroll_notification(&mut self, new_scroll_position: f64) {
        if !new_scroll_position.is_finite() {
            tracing::debug!("ignoring non-finite scroll position {new_scroll_position}");
            return;
        }
        let last = self.state.last_scroll_position;
        if new_scroll_position > last {
            self.state.direction = ScrollDirection::Down;
        } else if new_scroll_position < last {
            self.state.direction = ScrollDirection::Up;
        }
        self.state.last_scroll_position = new_scroll_position;
    }

    /// Record the measured width of a single content repetition.
    ///
    /// Zero, negative or non-finite widths are treated as a failed
    /// measurement and leave the state untouched.
    pub fn on_content_measured(&mut self, unit_width: f64) {
        if !unit_width.is_finite() || unit_width <= 0.0 {
            tracing::debug!("ignoring unusable content measurement {unit_width}");
            return;
        }
        if self.state.content_unit_width != unit_width {
            tracing::debug!(
                "marquee content measured: {unit_width} x {} copies",
                self.repeat_count
            );
        }
        self.state.content_unit_width = unit_width;
    }

    /// Advance one frame and return the new offset.
    pub fn tick(&mut self) -> f64 {
        let delta = match self.state.direction {
            ScrollDirection::Down => self.base_velocity,
            ScrollDirection::Up => -self.base_velocity,
        };
        let mut offset = self.state.offset + delta;
        if self.state.content_unit_width > 0.0 {
            offset = wrap_offset(offset, self.wrap_period());
        }
        self.state.offset = offset;
        offset
    }

    /// Length of the wrap range, `unit_width * repeat_count`.
    pub fn wrap_period(&self) -> f64 {
        self.state.content_unit_width * f64::from(self.repeat_count)
    }

    pub fn measure_state(&self) -> MeasureState {
        if self.state.content_unit_width > 0.0 {
            MeasureState::Measured
        } else {
            MeasureState::Unmeasured
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn offset(&self) -> f64 {
        self.state.offset
    }

    pub fn direction(&self) -> ScrollDirection {
        self.state.direction
    }

    pub fn base_velocity(&self) -> f64 {
        self.base_velocity
    }
}

/// Reduce `value` into `[0, period)`.
///
/// `f64`'s `%` keeps the sign of the dividend, so a single remainder would
/// leave negative offsets negative.  The second remainder also folds the
/// `value + period == period` rounding case back to zero, which
/// `f64::rem_euclid` does not.  Returns `value` unchanged for a
/// non-positive period.
pub fn wrap_offset(value: f64, period: f64) -> f64 {
    if period.is_nan() || period <= 0.0 {
        return value;
    }
    ((value % period) + period) % period
}
