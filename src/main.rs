use recents::cli::{Action, Args, Plan};
use recents::logging::{self, Verbosity};
use recents::prompt::{confirm_purge, TerminalKeys};
use recents::report;
use recents::{
    ClearOperation, ExitStatus, IncludeOperation, JsonRegistry, MetadataBuilder,
    RealFileSystem, UserConfig,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

fn main() -> ExitCode {
    // Parse command line arguments
    let args = match Args::parse_args() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version print to stdout and succeed
            let status = if e.use_stderr() {
                ExitStatus::Fatal
            } else {
                ExitStatus::Success
            };
            e.print().ok();
            return status.into();
        }
    };

    logging::init(Verbosity::from_flags(args.verbose, args.quiet));

    let quiet = args.quiet;
    let registry_override = args.registry.clone();

    let plan = match args.into_plan() {
        Ok(plan) => plan,
        Err(e) => {
            report::report_fatal(&e, &mut io::stderr()).ok();
            return ExitStatus::Fatal.into();
        }
    };

    if !quiet {
        for warning in &plan.warnings {
            eprintln!("{}", warning);
        }
    }

    run_app(plan, registry_override).into()
}

/// Runs the selected action against the configured registry
fn run_app(plan: Plan, registry_override: Option<PathBuf>) -> ExitStatus {
    // Load user configuration
    let config = UserConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load user config, using defaults");
        UserConfig::default()
    });

    let registry_path = match config.registry_path(registry_override) {
        Ok(path) => path,
        Err(e) => {
            report::report_fatal(&e, &mut io::stderr()).ok();
            return ExitStatus::Fatal;
        }
    };
    debug!(path = %registry_path.display(), "using registry");
    let mut registry = JsonRegistry::open(registry_path);

    let stdout = &mut io::stdout();
    let stderr = &mut io::stderr();

    match plan.action {
        Action::Include(req) => {
            let mut metadata = MetadataBuilder::new();
            if let Some(name) = config.app_name {
                metadata = metadata.with_app_name(name);
            }

            let result = IncludeOperation::new(&RealFileSystem, &metadata).run(&req, &mut registry);
            report::report_include(&result, req.quiet, stdout, stderr).ok();
            result.exit_status
        }
        Action::Clear(req) => {
            let result = ClearOperation::run(&req, &mut registry, || {
                confirm_purge(&mut TerminalKeys::new(), req.quiet, &mut io::stdout())
            });
            report::report_clear(&result, req.quiet, stdout, stderr).ok();
            result.exit_status
        }
    }
}
