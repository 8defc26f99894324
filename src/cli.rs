//! Startup options.

use std::path::PathBuf;

use clap::Parser;

/// Command-line options for the agent daemon.
#[derive(Debug, Parser)]
#[command(name = "agentd")]
#[command(about = "Background agent with a domain-socket control interface", long_about = None)]
pub struct Options {
    /// Domain socket for control messages.
    #[arg(long, default_value = "/run/agentd.sock")]
    pub sock: PathBuf,

    /// Log using JSON-lines encoding (pass false for plain text).
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub use_json: bool,

    /// Directory holding loadable agent modules.
    #[arg(long, default_value = "/opt/agentd/lib/modules")]
    pub modules_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::try_parse_from(["agentd"]).unwrap();
        assert_eq!(options.sock, PathBuf::from("/run/agentd.sock"));
        assert!(options.use_json);
        assert_eq!(options.modules_dir, PathBuf::from("/opt/agentd/lib/modules"));
    }

    #[test]
    fn test_overrides() {
        let options = Options::try_parse_from([
            "agentd",
            "--sock",
            "/tmp/agent.sock",
            "--use-json",
            "false",
            "--modules-dir",
            "/tmp/modules",
        ])
        .unwrap();
        assert_eq!(options.sock, PathBuf::from("/tmp/agent.sock"));
        assert!(!options.use_json);
        assert_eq!(options.modules_dir, PathBuf::from("/tmp/modules"));
    }
}
