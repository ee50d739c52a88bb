pub mod log;
pub mod sink;
pub mod waiter;

pub use log::LogManager;
pub use sink::{LineSink, MemorySink, NullSink, TeeSink, WriterSink};
pub use waiter::{NoWait, ThreadSleeper, Waiter};
