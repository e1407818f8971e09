use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Seconds between dispatch ticks of the reminder job runner. Due
    /// queue entries are claimed and executed once per tick.
    pub dispatch_interval_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let default_interval = "60";
        let interval =
            std::env::var("REMINDER_DISPATCH_INTERVAL_SECS").unwrap_or(default_interval.into());
        let dispatch_interval_secs = match interval.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!(
                    "The given REMINDER_DISPATCH_INTERVAL_SECS: {} is not valid, falling back to the default interval: {}.",
                    interval, default_interval
                );
                default_interval.parse::<u64>().unwrap()
            }
        };
        Self {
            dispatch_interval_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
