use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use track_map_lib::{ClientConfig, DEFAULT_ENDPOINT, FilterConfig};

/// Environment variable overriding the map service endpoint
pub const ENDPOINT_ENV: &str = "TRACK_MAP_ENDPOINT";

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Track Map - Make MapQuest static maps from GPX files
pub struct Settings {
    /// Output file (default: <input file name>.jpg)
    #[clap(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Width of the resulting image
    #[clap(long, value_name = "WIDTH", default_value = "1920")]
    pub width: u32,

    /// Height of the resulting image
    #[clap(long, value_name = "HEIGHT", default_value = "1920")]
    pub height: u32,

    /// Zoom level
    #[clap(long, value_name = "N")]
    pub zoom: Option<u32>,

    /// Skip N leading track points
    #[clap(long, value_name = "N", default_value = "0")]
    pub skip_lead: usize,

    /// Skip N trailing track points (counted after the other filters)
    #[clap(long, value_name = "N", default_value = "0")]
    pub skip_trail: usize,

    /// Include every N-th track point only
    #[clap(long, value_name = "N", default_value = "1", value_parser = parse_stride)]
    pub include_every: usize,

    /// GPX file with waypoints to mark on the map
    #[clap(long, value_name = "FILE")]
    pub waypoints: Option<PathBuf>,

    /// Mark the first drawn track point
    #[clap(long, default_value = "false")]
    pub start_waypoint: bool,

    /// Mark the last drawn track point
    #[clap(long, default_value = "false")]
    pub end_waypoint: bool,

    /// Print requested URL
    #[clap(long, default_value = "false")]
    pub print_url: bool,

    /// Request timeout in seconds (0 waits indefinitely)
    #[clap(long, value_name = "SECS", default_value = "30")]
    pub timeout: u64,

    /// Static map endpoint [env: TRACK_MAP_ENDPOINT]
    #[clap(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// MapQuest API key
    #[clap(value_name = "KEY")]
    pub key: String,

    /// GPX file
    #[clap(value_name = "FILE")]
    pub file: PathBuf,
}

fn parse_stride(value: &str) -> Result<usize, String> {
    let stride: usize = value.parse().map_err(|e| format!("{e}"))?;
    if stride == 0 {
        return Err("must be at least 1".to_string());
    }
    Ok(stride)
}

/// Generic function to get environment variable, parsing it to the desired type.
pub fn get_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

impl Settings {
    /// Parse the process arguments, exiting with usage information on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    pub fn filter(&self) -> track_map_lib::Result<FilterConfig> {
        FilterConfig::new(self.skip_lead, self.skip_trail, self.include_every)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: (self.timeout > 0).then(|| Duration::from_secs(self.timeout)),
            ..ClientConfig::default()
        }
    }

    /// `--endpoint`, then the environment, then MapQuest
    pub fn endpoint(&self) -> String {
        self.endpoint
            .clone()
            .or_else(|| get_env(ENDPOINT_ENV))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// `--output`, or the input file name with `.jpg` appended in the working directory
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let mut name: OsString = self
            .file
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("track"));
        name.push(".jpg");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Settings, clap::Error> {
        Settings::try_parse_from(std::iter::once("track-map").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let settings = parse(&["KEY", "tracks/ride.gpx"]).unwrap();
        assert_eq!(settings.key, "KEY");
        assert_eq!(settings.width, 1920);
        assert_eq!(settings.height, 1920);
        assert_eq!(settings.zoom, None);
        assert_eq!(settings.filter().unwrap(), FilterConfig::default());
        assert!(!settings.start_waypoint && !settings.end_waypoint && !settings.print_url);
        assert_eq!(settings.output_path(), PathBuf::from("ride.gpx.jpg"));
        assert_eq!(
            settings.client_config().timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_all_flags() {
        let settings = parse(&[
            "--output",
            "out.png",
            "--width",
            "640",
            "--height",
            "480",
            "--zoom",
            "11",
            "--skip-lead",
            "3",
            "--skip-trail",
            "4",
            "--include-every",
            "5",
            "--waypoints",
            "wpts.gpx",
            "--start-waypoint",
            "--end-waypoint",
            "--print-url",
            "--timeout",
            "0",
            "--endpoint",
            "http://localhost/map",
            "KEY",
            "ride.gpx",
        ])
        .unwrap();

        assert_eq!(settings.output_path(), PathBuf::from("out.png"));
        assert_eq!((settings.width, settings.height), (640, 480));
        assert_eq!(settings.zoom, Some(11));
        let filter = settings.filter().unwrap();
        assert_eq!(
            (filter.skip_lead(), filter.skip_trail(), filter.include_every()),
            (3, 4, 5)
        );
        assert_eq!(settings.waypoints, Some(PathBuf::from("wpts.gpx")));
        assert!(settings.start_waypoint && settings.end_waypoint && settings.print_url);
        assert_eq!(settings.client_config().timeout, None);
        assert_eq!(settings.endpoint(), "http://localhost/map");
    }

    #[test]
    fn test_zero_stride_is_rejected() {
        assert!(parse(&["--include-every", "0", "KEY", "ride.gpx"]).is_err());
    }

    #[test]
    fn test_negative_skip_is_rejected() {
        assert!(parse(&["--skip-lead=-1", "KEY", "ride.gpx"]).is_err());
        assert!(parse(&["--skip-trail=-2", "KEY", "ride.gpx"]).is_err());
    }

    #[test]
    fn test_positionals_are_required() {
        assert!(parse(&["KEY"]).is_err());
        assert!(parse(&[]).is_err());
    }
}
