use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "screen-automation",
    version,
    about = "Identifier-driven screen navigation flows for UI test automation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Write a JSONL trace of session activity to this path
    #[arg(long, global = true)]
    pub trace: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a navigation flow from a YAML file
    Run {
        /// Path to the flow YAML file
        #[arg(long)]
        flow: String,

        /// Driver backend: scripted, remote, http
        #[arg(long, default_value = "scripted")]
        driver: String,

        /// Command to spawn for the remote bridge driver
        #[arg(long)]
        bridge: Option<String>,

        /// Extra arguments passed to the bridge command
        #[arg(long)]
        bridge_arg: Vec<String>,

        /// Base URL for the http driver
        #[arg(long)]
        endpoint: Option<String>,

        /// Existence-wait deadline in seconds
        #[arg(long, default_value_t = 10)]
        await_timeout_secs: u64,

        /// Scroll-search deadline in seconds
        #[arg(long, default_value_t = 30)]
        scroll_timeout_secs: u64,
    },

    /// Parse and validate a flow file without running it
    Check {
        /// Path to the flow YAML file
        #[arg(long)]
        flow: String,
    },
}
