use std::time::Duration;

/// Pacing capability invoked after each time step when real-time mode is on.
pub trait Waiter {
    fn wait(&mut self, interval: Duration);
}

/// Blocks the driving thread for the full interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Waiter for ThreadSleeper {
    fn wait(&mut self, interval: Duration) {
        std::thread::sleep(interval);
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWait;

impl Waiter for NoWait {
    fn wait(&mut self, _interval: Duration) {}
}

impl<T: Waiter + ?Sized> Waiter for &mut T {
    fn wait(&mut self, interval: Duration) {
        (**self).wait(interval)
    }
}
