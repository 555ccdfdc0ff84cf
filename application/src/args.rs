//! [`Args`] definitions.

use clap::Parser;

/// Management tool of a home bakery.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Year to build the dashboard for, overriding the configured one.
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month (`1` to `12`) to highlight, overriding the configured one.
    #[arg(short, long)]
    pub month: Option<u8>,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn defaults_to_local_config() {
        let args = Args::try_parse_from(["bakery"]).unwrap();

        assert_eq!(args.config, "config.toml");
        assert_eq!(args.year, None);
        assert_eq!(args.month, None);
    }

    #[test]
    fn overrides_dashboard_period() {
        let args =
            Args::try_parse_from(["bakery", "-c", "prod.toml", "-m", "2"])
                .unwrap();

        assert_eq!(args.config, "prod.toml");
        assert_eq!(args.month, Some(2));
    }
}
