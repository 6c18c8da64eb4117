use core::mem;
use winapi::um::{
    profileapi::{QueryPerformanceCounter, QueryPerformanceFrequency},
    winnt::LARGE_INTEGER,
};

lazy_static::lazy_static! {
    static ref PERFORMANCE_FREQUENCY: i64 = unsafe {
        let mut pf: LARGE_INTEGER = mem::zeroed();
        QueryPerformanceFrequency(&mut pf);
        *pf.QuadPart()
    };
}

pub struct Counter {
    start_ticks: i64,
}

impl Counter {
    pub fn start() -> Self {
        Self { start_ticks: Self::count() }
    }

    /// Ticks since `start` and a fresh counter starting now.
    pub fn restart(&mut self) -> TicksElapsed {
        let now = Self::count();
        let elapsed = TicksElapsed(now - self.start_ticks);
        self.start_ticks = now;
        elapsed
    }

    fn count() -> i64 {
        unsafe {
            let mut performance_count: LARGE_INTEGER = mem::zeroed();
            QueryPerformanceCounter(&mut performance_count);
            *performance_count.QuadPart()
        }
    }
}

#[derive(Copy, Clone)]
pub struct TicksElapsed(i64);

impl TicksElapsed {
    pub fn as_secs(self) -> f64 {
        self.0 as f64 / *PERFORMANCE_FREQUENCY as f64
    }

    pub fn as_ms(self) -> f64 {
        (self.0 * 1000) as f64 / *PERFORMANCE_FREQUENCY as f64
    }
}
