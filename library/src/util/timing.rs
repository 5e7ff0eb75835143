use std::borrow::Cow;
use std::time::Instant;

use log::{self, Level};

pub struct ScopedTimer {
    label: Cow<'static, str>,
    level: Level,
    start: Instant,
}

impl ScopedTimer {
    pub fn with_level(label: impl Into<Cow<'static, str>>, level: Level) -> Self {
        Self {
            label: label.into(),
            level,
            start: Instant::now(),
        }
    }

    pub fn info(label: impl Into<Cow<'static, str>>) -> Self {
        Self::with_level(label, Level::Info)
    }

    pub fn debug(label: impl Into<Cow<'static, str>>) -> Self {
        Self::with_level(label, Level::Debug)
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_millis();
        log::log!(self.level, "{} took {} ms", self.label, duration);
    }
}
