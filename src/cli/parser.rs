use clap::{Parser, Subcommand};

/// Command-line interface definition for rcactus
/// CLI application to log greenhouse telemetry and chart its history
#[derive(Parser)]
#[command(
    name = "rcactus",
    version = env!("CARGO_PKG_VERSION"),
    about = "Greenhouse telemetry: collect sensor node readings, relay commands and chart the last days",
    long_about = None
)]
pub struct Cli {
    /// Override configuration file path (useful for tests or several nodes)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file
    Init {
        #[arg(long, short = 'f', help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "List settings missing from the configuration file")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Render the temperature and humidity history charts
    Render {
        #[arg(long, value_name = "DIR", help = "Output directory for the images")]
        out: Option<String>,

        #[arg(long, help = "Override the smoothing window (half-width in samples)")]
        smooth: Option<usize>,

        #[arg(long, value_name = "FILE", help = "Also write the chart plans as JSON")]
        plan: Option<String>,

        #[arg(long = "no-image", help = "Skip writing images")]
        no_image: bool,
    },

    /// Queue a parameter change for the sensor node
    Set {
        /// Heater mode: 0=off, 1=on, 2=auto
        #[arg(long)]
        mode: i64,

        /// Heater on below this temperature (°C)
        #[arg(long = "hfrom", allow_negative_numbers = true)]
        heater_from: f64,

        /// Heater off above this temperature (°C)
        #[arg(long = "hto", allow_negative_numbers = true)]
        heater_to: f64,

        /// Light: 0=off, 1=on
        #[arg(long)]
        light: i64,
    },

    /// Show current node settings, pending command and log health
    Status,

    /// Read node lines, append the log and relay pending commands
    Collect {
        #[arg(long, value_name = "PATH", help = "Serial device (default from config)")]
        device: Option<String>,
    },
}
