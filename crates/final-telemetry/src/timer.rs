// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use log::Level;
use std::time::{Duration, Instant};

/// Measures a scope and logs how long it took when dropped.
///
/// ```
/// use final_telemetry::ScopedTimer;
///
/// {
///     let _timer = ScopedTimer::new("decode texture");
///     // ... work ...
/// } // logs "decode texture took 0.01 ms" at debug level
/// ```
pub struct ScopedTimer {
    label: String,
    level: Level,
    start: Instant,
}

impl ScopedTimer {
    /// Starts a timer that logs at debug level.
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_level(label, Level::Debug)
    }

    /// Starts a timer that logs at the given level.
    pub fn with_level(label: impl Into<String>, level: Level) -> Self {
        Self {
            label: label.into(),
            level,
            start: Instant::now(),
        }
    }

    /// Time elapsed since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed().as_secs_f64() * 1000.0;
        log::log!(self.level, "{} took {elapsed_ms:.2} ms", self.label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_grows() {
        let timer = ScopedTimer::with_level("test", Level::Trace);
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed() >= Duration::from_millis(2));
    }
}
