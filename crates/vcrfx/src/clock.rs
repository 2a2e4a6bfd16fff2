//! Wall clock for the timestamp OSD.
//!
//! The OSD always prints year 2007, so only month, day and time of day are
//! carried.

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Year printed on every timestamp.
pub const OSD_YEAR: u32 = 2007;

/// Date and time shown on the OSD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsdTime {
    /// Month (1-12).
    pub month: u32,
    /// Day of month (1-31).
    pub day: u32,
    /// Hour (0-23).
    pub hour: u32,
    /// Minute (0-59).
    pub minute: u32,
    /// Second (0-59).
    pub second: u32,
}

impl OsdTime {
    /// Creates an OSD time. Fields are taken as given.
    #[must_use]
    pub const fn new(month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Converts a calendar date-time.
    #[must_use]
    pub fn from_naive(at: NaiveDateTime) -> Self {
        Self::new(at.month(), at.day(), at.hour(), at.minute(), at.second().min(59))
    }

    /// Digits in display order: `MM DD YYYY HH MM SS`, year from [`OSD_YEAR`].
    #[must_use]
    pub const fn digits(&self) -> [u8; 14] {
        let [m0, m1] = pair(self.month);
        let [d0, d1] = pair(self.day);
        let [h0, h1] = pair(self.hour);
        let [n0, n1] = pair(self.minute);
        let [s0, s1] = pair(self.second);
        let [y0, y1] = pair(OSD_YEAR / 100);
        let [y2, y3] = pair(OSD_YEAR);
        [m0, m1, d0, d1, y0, y1, y2, y3, h0, h1, n0, n1, s0, s1]
    }
}

const fn pair(v: u32) -> [u8; 2] {
    [(v / 10 % 10) as u8, (v % 10) as u8]
}

/// Source of the time printed on the OSD.
pub trait WallClock {
    /// Current local date and time.
    fn now(&self) -> OsdTime;
}

impl<T: WallClock + ?Sized> WallClock for &T {
    fn now(&self) -> OsdTime {
        (**self).now()
    }
}

/// The system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> OsdTime {
        OsdTime::from_naive(chrono::Local::now().naive_local())
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub OsdTime);

impl WallClock for FixedClock {
    fn now(&self) -> OsdTime {
        self.0
    }
}
