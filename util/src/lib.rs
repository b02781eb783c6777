pub mod ext;
pub mod printf;
pub mod report;
pub mod timer;

pub use timer::Lap;
pub use timer::Location;
pub use timer::Timer;

/// Records a lap on `timer` with a message built like `format!`.
///
/// ```
/// let mut timer = util::Timer::new();
/// for i in 0..3 {
///     util::lap!(timer, "Loop iteration {}", i);
/// }
/// assert_eq!(3, timer.laps().len());
/// ```
#[macro_export]
macro_rules! lap {
    ($timer:expr, $($arg:tt)+) => {
        $timer.lap_fmt(format_args!($($arg)+))
    };
}
