use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, prelude::*};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const MICROS_PER_FRAME: u64 = 1000;

/// Number of serialized messages kept in the lookback window.
pub const WINDOW: usize = 64;

#[derive(Serialize, Deserialize, Debug)]
pub struct Message {
    pub time: SystemTime,
    pub tick: u64,
}

/// Settings for the `window` benchmark.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Number of ticks to run before writing the results.
    pub ticks: u64,
    /// Target duration of a single tick.
    pub frame_duration: Duration,
    /// Prefix of the generated csv file.
    pub output: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            frame_duration: Duration::from_micros(MICROS_PER_FRAME),
            output: "window".to_string(),
        }
    }
}

impl WindowConfig {
    /// Overrides the defaults with positional arguments: `[TICKS] [OUTPUT]`.
    pub fn from_args<I: Iterator<Item = String>>(mut args: I) -> Result<Self, String> {
        let mut config = WindowConfig::default();
        if let Some(ticks) = args.next() {
            config.ticks = ticks
                .parse()
                .map_err(|e| format!("Invalid ticks argument {:?}: {}", ticks, e))?;
        }
        if let Some(output) = args.next() {
            config.output = output;
        }
        Ok(config)
    }
}

pub fn save_to_csv(samples: &[(u64, Duration)], filename: &str) -> io::Result<()> {
    let millis = UNIX_EPOCH
        .elapsed()
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    let mut file = File::create(format!("{}_{}.csv", filename, millis))?;

    for (tick, duration) in samples.iter() {
        file.write_all(format!("{}, {}\n", tick, duration.as_micros()).as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_args() {
        let args = vec!["10".to_string(), "out".to_string()];
        let config = WindowConfig::from_args(args.into_iter()).unwrap();
        assert_eq!(config.ticks, 10);
        assert_eq!(config.output, "out");

        let config = WindowConfig::from_args(std::iter::empty()).unwrap();
        assert_eq!(config.ticks, 600);

        assert!(WindowConfig::from_args(vec!["ten".to_string()].into_iter()).is_err());
    }
}
