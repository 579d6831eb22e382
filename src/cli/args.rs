use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "kbrowse",
    version,
    about = "Browse workload resources and pause or resume their rollouts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity (-v for verbose, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode: suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable pause and resume
    #[arg(long, global = true)]
    pub read_only: bool,

    /// Call timeout in seconds for each batch
    #[arg(long, value_name = "SECS", global = true)]
    pub call_timeout: Option<u64>,

    /// Resource store file (defaults to resources.json in the data dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Resource kind to browse (e.g. deployments, apps/v1/daemonsets, dp)
    #[arg(long, default_value = "deployments", global = true)]
    pub kind: String,

    /// Only show resources in this namespace
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Config file (defaults to config.toml in the config dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to stderr instead of the log file
    #[arg(long, global = true)]
    pub log_stderr: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive browser (default)
    Ui,

    /// Print the resources of the selected kind
    List,

    /// Pause the rollout of one or more resources (namespace/name)
    Pause {
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<String>,
    },

    /// Resume the rollout of one or more resources (namespace/name)
    Resume {
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_ui() {
        let cli = Cli::try_parse_from(["kbrowse"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.kind, "deployments");
        assert!(!cli.read_only);
    }

    #[test]
    fn pause_takes_many_paths_and_global_flags() {
        let cli = Cli::try_parse_from([
            "kbrowse",
            "pause",
            "default/web",
            "default/api",
            "--read-only",
            "--call-timeout",
            "3",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Pause {
                paths: vec!["default/web".into(), "default/api".into()]
            })
        );
        assert!(cli.read_only);
        assert_eq!(cli.call_timeout, Some(3));
    }

    #[test]
    fn resume_requires_a_path() {
        assert!(Cli::try_parse_from(["kbrowse", "resume"]).is_err());
    }
}
