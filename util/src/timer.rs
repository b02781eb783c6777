use std::fmt;
use std::fmt::Display;
use std::fmt::Write;
use std::panic;
use std::time::Duration;
use std::time::Instant;

use crate::printf;

const UNKNOWN_FILE: &str = "???";

/// Where a lap was recorded: base file name and line.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Location {
    file: String,
    line: u32,
}

impl Location {
    /// Keeps only the last path component of `file`. An empty file name means
    /// the site is unknown and yields the `???:0` sentinel.
    pub fn new(file: &str, line: u32) -> Location {
        let base = file.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or("");

        if base.is_empty() {
            return Location::unknown();
        }

        Location {
            file: base.to_string(),
            line,
        }
    }

    pub fn unknown() -> Location {
        Location {
            file: UNKNOWN_FILE.to_string(),
            line: 0,
        }
    }

    /// Site of the call into the nearest function not marked `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> Location {
        let site = panic::Location::caller();
        Location::new(site.file(), site.line())
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn is_unknown(&self) -> bool {
        self.file == UNKNOWN_FILE && self.line == 0
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[derive(Debug, Clone)]
pub struct Lap {
    location: Location,
    message: String,
    duration: Duration,
}

impl Lap {
    pub(crate) fn new(location: Location, message: String, duration: Duration) -> Lap {
        Lap {
            location,
            message,
            duration,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Time between the timer's construction and this lap.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Append-only log of laps measured from a single starting instant.
///
/// Recording takes `&mut self`, so a timer has exactly one writer. Share it
/// across threads behind your own lock if you need to.
#[derive(Debug)]
pub struct Timer {
    start: Instant,
    laps: Vec<Lap>,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start: Instant::now(),
            laps: Vec::new(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Records a lap whose message is `template` with printf-style directives
    /// (`%d`, `%s`, `%v`, ...) filled from `args` in order.
    ///
    /// Never fails: mismatched arguments show up as marker text in the
    /// message, see [`printf::sprintf`].
    #[track_caller]
    pub fn lap(&mut self, template: &str, args: &[&dyn Display]) {
        let duration = self.elapsed();
        let location = Location::caller();
        self.push(location, printf::sprintf(template, args), duration);
    }

    /// Records a lap from `format_args!` output. Usually reached through the
    /// [`lap!`](crate::lap) macro.
    #[track_caller]
    pub fn lap_fmt(&mut self, args: fmt::Arguments<'_>) {
        let duration = self.elapsed();
        let location = Location::caller();

        let mut message = String::new();
        if message.write_fmt(args).is_err() {
            message.push_str("%!v(BADDISPLAY)");
        }

        self.push(location, message, duration);
    }

    /// Like [`Timer::lap`] but with a location supplied by the caller.
    pub fn lap_at(&mut self, location: Location, template: &str, args: &[&dyn Display]) {
        let duration = self.elapsed();
        self.push(location, printf::sprintf(template, args), duration);
    }

    fn push(&mut self, location: Location, message: String, duration: Duration) {
        log::trace!("lap {} at {}: {}", self.laps.len(), location, message);
        self.laps.push(Lap::new(location, message, duration));
    }
}

impl Default for Timer {
    fn default() -> Self {
        Timer::new()
    }
}

#[cfg(test)]
mod test {
    use std::thread;

    use super::*;

    #[test]
    fn test_new_timer_is_empty() {
        let timer = Timer::new();
        assert!(timer.laps().is_empty());
    }

    #[test]
    fn test_laps_keep_call_order() {
        let mut timer = Timer::new();
        for i in 0..10 {
            timer.lap("step %d", &[&i]);
        }

        assert_eq!(10, timer.laps().len());
        for (i, lap) in timer.laps().iter().enumerate() {
            assert_eq!(format!("step {}", i), lap.message());
        }
        for pair in timer.laps().windows(2) {
            assert!(pair[0].duration() <= pair[1].duration());
        }
    }

    #[test]
    fn test_printf_message() {
        let mut timer = Timer::new();
        timer.lap("Loop iteration %d", &[&2]);
        assert_eq!("Loop iteration 2", timer.laps()[0].message());
    }

    #[test]
    fn test_lap_records_call_site() {
        let mut timer = Timer::new();
        let line = line!() + 1;
        timer.lap("here", &[]);

        let location = timer.laps()[0].location();
        assert_eq!("timer.rs", location.file());
        assert_eq!(line, location.line());
        assert!(!location.is_unknown());
    }

    #[test]
    fn test_macro_records_call_site() {
        let mut timer = Timer::new();
        let name = "macro";
        let line = line!() + 1;
        crate::lap!(timer, "via {} {}", name, 1);

        let lap = &timer.laps()[0];
        assert_eq!("via macro 1", lap.message());
        assert_eq!("timer.rs", lap.location().file());
        assert_eq!(line, lap.location().line());
    }

    #[test]
    fn test_failing_display_is_not_fatal() {
        struct Broken;

        impl Display for Broken {
            fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
                Err(fmt::Error)
            }
        }

        let mut timer = Timer::new();
        timer.lap_fmt(format_args!("{}", Broken));
        timer.lap("%v!", &[&Broken]);

        assert_eq!("%!v(BADDISPLAY)", timer.laps()[0].message());
        assert_eq!("%!v(BADDISPLAY)!", timer.laps()[1].message());
    }

    #[test]
    fn test_oversized_directives_are_not_fatal() {
        let mut timer = Timer::new();
        timer.lap("%99999999999999999999999d", &[&1]);
        timer.lap("%.70000f", &[&1.5]);
        timer.lap("%.99999999999999999999f", &[&1.5]);

        let messages = timer.laps().iter().map(Lap::message).collect::<Vec<_>>();
        assert_eq!(
            vec!["%!(BADWIDTH)1", "%!(BADPREC)1.500000", "%!(BADPREC)1.500000"],
            messages
        );
    }

    #[test]
    fn test_lap_at_explicit_location() {
        let mut timer = Timer::new();
        timer.lap_at(Location::new("/src/app/main.rs", 42), "explicit", &[]);
        timer.lap_at(Location::new("", 7), "nowhere", &[]);

        assert_eq!("main.rs:42", timer.laps()[0].location().to_string());
        assert_eq!(&Location::unknown(), timer.laps()[1].location());
        assert_eq!("???:0", timer.laps()[1].location().to_string());
    }

    #[test]
    fn test_location_base_name() {
        assert_eq!("lib.rs", Location::new("util/src/lib.rs", 1).file());
        assert_eq!("lib.rs", Location::new("util\\src\\lib.rs", 1).file());
        assert_eq!("lib.rs", Location::new("lib.rs", 1).file());
        assert!(Location::new("util/src/", 3).is_unknown());
    }

    #[test]
    fn test_sleep_between_laps() {
        let mut timer = Timer::new();
        timer.lap("A", &[]);
        thread::sleep(Duration::from_millis(100));
        timer.lap("B", &[]);

        let laps = timer.laps();
        assert_eq!("A", laps[0].message());
        assert_eq!("B", laps[1].message());
        assert!(laps[1].duration() >= Duration::from_millis(100));
        assert!(laps[1].duration() >= laps[0].duration());
    }
}
