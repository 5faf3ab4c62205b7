//! 基础设施层：只暴露能力（等待、取当前日期），不包含业务逻辑

pub mod clock;
pub mod sleeper;

pub use clock::{Clock, FixedClock, SystemClock};
pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper};
