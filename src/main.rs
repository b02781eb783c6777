use std::str::FromStr;
use std::thread::sleep;
use std::time::Duration;

use structopt::StructOpt;
use util::ext::duration::DurationExt;
use util::Timer;

#[derive(Debug, StructOpt)]
#[structopt(about = "Records a few laps around simulated work and prints them")]
struct Args {
    /// Number of loop iterations to measure
    #[structopt(long, default_value = "3")]
    iterations: u32,

    /// Simulated work per loop iteration, in milliseconds
    #[structopt(long, default_value = "50")]
    step_ms: u64,

    /// Output format: text, json or both
    #[structopt(long, default_value = "both")]
    format: Format,
}

#[derive(Debug, PartialEq, Copy, Clone)]
enum Format {
    Text,
    Json,
    Both,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "both" => Ok(Format::Both),
            _ => Err(format!("unknown format {:?}, expected text, json or both", s)),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = Args::from_args();
    log::debug!("{:?}", args);

    let mut timer = Timer::new();

    timer.lap("Start processing", &[]);

    sleep(Duration::from_millis(100));
    timer.lap("First step completed", &[]);

    for i in 0..args.iterations {
        sleep(Duration::from_millis(args.step_ms));
        timer.lap("Loop iteration %d", &[&i]);
    }

    sleep(Duration::from_millis(200));
    util::lap!(timer, "Final step completed");

    if args.format != Format::Json {
        timer.print();
    }
    if args.format != Format::Text {
        timer.print_json();
    }

    println!("Total time: {}", timer.elapsed().time_fmt());

    Ok(())
}
