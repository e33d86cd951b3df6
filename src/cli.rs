// CLI module for argument parsing and request construction

use crate::domain::{ClearRequest, IncludeRequest};
use crate::error::{RecentsError, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// recents - basic recent files management from terminal
///
/// Add files to your desktop's recently used list, or clear it.
#[derive(Parser, Debug, Clone)]
#[command(name = "recents")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Add files to recent files
    ///
    /// Files must be given as arguments after the options.
    #[arg(short = 'a', long = "add", action = ArgAction::SetTrue)]
    pub add: bool,

    /// Clear recent files
    #[arg(short = 'c', long = "clear", action = ArgAction::SetTrue)]
    pub clear: bool,

    /// Touch added files to update their modification date
    ///
    /// Recent files sorted by date then show them at the top.
    #[arg(short = 't', long = "touch", action = ArgAction::SetTrue)]
    pub touch: bool,

    /// Don't prompt for confirmation when clearing
    #[arg(short = 'f', long = "force", action = ArgAction::SetTrue)]
    pub force: bool,

    /// Quiet mode. No unnecessary output, useful for scripting
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    pub quiet: bool,

    /// Print debug logging to stderr
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Registry file to use instead of the configured one
    #[arg(long = "registry", value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Files to add
    #[arg(value_name = "FILE")]
    pub files: Vec<String>,
}

/// The single action selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Include(IncludeRequest),
    Clear(ClearRequest),
}

/// A validated action plus warnings about ignored options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub action: Action,
    pub warnings: Vec<String>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> std::result::Result<Self, clap::Error> {
        Args::try_parse()
    }

    /// Validate the arguments and turn them into exactly one request
    pub fn into_plan(self) -> Result<Plan> {
        let mut warnings = Vec::new();

        let action = match (self.add, self.clear) {
            (true, true) => {
                return Err(RecentsError::Configuration(
                    "Only one action can be performed".to_string(),
                ))
            }
            (false, false) => {
                return Err(RecentsError::Configuration(
                    "No action given. Use --add FILE... or --clear (see --help)".to_string(),
                ))
            }
            (true, false) => {
                if self.force {
                    warnings.push(
                        "Force option (-f) will be ignored as we are just adding files."
                            .to_string(),
                    );
                }
                Action::Include(IncludeRequest::new(self.files, self.touch, self.quiet)?)
            }
            (false, true) => {
                if self.touch {
                    warnings.push(
                        "Touch option (-t) will be ignored as we are clearing recent files."
                            .to_string(),
                    );
                }
                if !self.files.is_empty() {
                    warnings.push(format!(
                        "{} file argument(s) will be ignored as we are clearing recent files.",
                        self.files.len()
                    ));
                }
                Action::Clear(ClearRequest {
                    force: self.force,
                    quiet: self.quiet,
                })
            }
        };

        Ok(Plan { action, warnings })
    }
}
