//! CLI entrypoint for repo-delegate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.
//!
//! Exit codes: `0` complete, `2` usage or configuration error, `3`
//! execution failure (API error, turn ceiling).

use anyhow::{Context, Result, bail};
use clap::Parser;
use delegate_application::{
    ContextLoaderPort, ConversationLogger, DelegateInput, DelegateMode, DelegateUseCase,
    DispatchLoopUseCase,
};
use delegate_domain::{DispatchOutcome, PromptTemplate, SessionName, TaskPromptContext};
use delegate_infrastructure::{
    ConfigLoader, FileConfig, FunctionToolConverter, JsonSessionStore, JsonlConversationLogger,
    LocalContextLoader, LocalToolExecutor, OpenAiGateway, RepoRoot, ToolContext,
};
use delegate_presentation::{Cli, Command, ConsoleFormatter, ConsoleProgress};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const EXIT_USAGE: u8 = 2;
const EXIT_FAILURE: u8 = 3;

/// Task template override, looked up next to the executable
const SYSTEM_PROMPT_FILE: &str = "system-prompt.md";

/// Everything a run needs, resolved before any network call.
struct RunSetup {
    mode: DelegateMode,
    session: SessionName,
    api_key: String,
    config: FileConfig,
    root: RepoRoot,
    sessions: JsonSessionStore,
    system_prompt: String,
    initial_input: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        let root = detect_repo_root()
            .map(|root| root.path().to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        ConfigLoader::print_config_sources(&root);
        return ExitCode::SUCCESS;
    }

    let Some(command) = cli.command else {
        eprintln!(
            "Usage: repo-delegate review <SESSION> <PROMPT>...\n       repo-delegate execute <TASK_ID> <DESCRIPTION> <PLAN_FILE>"
        );
        return ExitCode::from(EXIT_USAGE);
    };

    let setup = match prepare(&command) {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    run(setup, cli.verbose > 0).await
}

/// Validate arguments and resolve configuration; every failure here is a
/// usage error.
fn prepare(command: &Command) -> Result<RunSetup> {
    let mode = command.mode();
    let Ok(session) = SessionName::new(command.identifier()) else {
        bail!(command.invalid_identifier_message());
    };

    let api_key = non_empty_env("OPENAI_API_KEY").context("OPENAI_API_KEY is required")?;

    let root = detect_repo_root().context("Failed to detect repo root")?;
    let config = ConfigLoader::load(root.path())?;
    info!("Repository root: {}", root);

    let (system_prompt, initial_input) = match command {
        Command::Review { prompt, .. } => (
            PromptTemplate::review_system(&root.to_string(), session.as_str()),
            prompt.join(" "),
        ),
        Command::Execute {
            task_id,
            description,
            plan_file,
        } => {
            let plan_content =
                std::fs::read_to_string(plan_file).context("Failed to read plan file")?;
            let memory = LocalContextLoader::new().load_project_memory(root.path());
            info!("Project memory: {}", memory.source_description());
            (
                task_system_prompt(&TaskPromptContext {
                    repo_root: &root.to_string(),
                    task_id,
                    task_description: description,
                    plan_content: &plan_content,
                    project_memory: &memory.render(),
                }),
                PromptTemplate::task_input(task_id, description),
            )
        }
    };

    let sessions = JsonSessionStore::new(config.session.dir_for(root.path(), mode));
    sessions
        .ensure_dir()
        .context("Failed to create sessions dir")?;
    debug!("Sessions: {}", sessions.dir().display());

    Ok(RunSetup {
        mode,
        session,
        api_key,
        config,
        root,
        sessions,
        system_prompt,
        initial_input,
    })
}

/// Wire the adapters, run the delegation and map the outcome to an exit code.
async fn run(setup: RunSetup, verbose: bool) -> ExitCode {
    let RunSetup {
        mode,
        session,
        api_key,
        config,
        root,
        sessions,
        system_prompt,
        initial_input,
    } = setup;

    // === Dependency Injection ===
    let gateway = match OpenAiGateway::new(api_key, config.api.base_url.clone(), config.api.timeout())
    {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => return blocked(mode, e),
    };

    let context = ToolContext::new(root).with_limits(config.tools.to_limits());
    let executor = Arc::new(if mode.allows_writes() {
        LocalToolExecutor::new(context)
    } else {
        LocalToolExecutor::read_only(context)
    });

    let params = config.execution_params(mode);
    let max_iterations = params.max_iterations;
    info!(
        "Running {} with {} (effort: {})",
        mode,
        params.model,
        params.reasoning_effort.as_deref().unwrap_or("default")
    );

    let mut dispatch =
        DispatchLoopUseCase::new(gateway.clone(), executor, &FunctionToolConverter, params);
    if let Some(logger) = conversation_logger(config.logging.conversation_log.as_deref()) {
        dispatch = dispatch.with_conversation_logger(logger);
    }

    let use_case = DelegateUseCase::new(gateway, Arc::new(sessions), dispatch);
    let progress = if verbose {
        ConsoleProgress::verbose()
    } else {
        ConsoleProgress::new()
    };

    let input = DelegateInput::new(session.clone(), system_prompt, initial_input);
    let output = match use_case.execute(input, &progress).await {
        Ok(output) => output,
        Err(e) => return blocked(mode, e),
    };

    if verbose {
        eprintln!(
            "{}",
            ConsoleFormatter::session_summary(
                session.as_str(),
                output.conversation.as_str(),
                output.resumed
            )
        );
    }

    match output.outcome {
        DispatchOutcome::Complete { turns, .. } => {
            match mode {
                DelegateMode::Execute => println!("{}", ConsoleFormatter::completion(turns)),
                DelegateMode::Review => println!(),
            }
            ExitCode::SUCCESS
        }
        DispatchOutcome::Aborted { .. } => {
            println!();
            blocked(mode, ConsoleFormatter::ceiling_reached(max_iterations))
        }
    }
}

/// Report an execution failure; task runs prefix it with `[BLOCKED]`.
fn blocked(mode: DelegateMode, error: impl std::fmt::Display) -> ExitCode {
    match mode {
        DelegateMode::Execute => eprintln!("{}", ConsoleFormatter::blocked(&error)),
        DelegateMode::Review => eprintln!("{}", error),
    }
    ExitCode::from(EXIT_FAILURE)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// `REPO_ROOT` if set, else the nearest `.git` ancestor of the working
/// directory, else the working directory.
fn detect_repo_root() -> Result<RepoRoot> {
    let cwd = std::env::current_dir()?;
    let explicit = non_empty_env("REPO_ROOT").map(PathBuf::from);
    Ok(RepoRoot::detect(explicit.as_deref(), &cwd)?)
}

/// Task developer prompt: `system-prompt.md` beside the executable when
/// present, else the built-in template.
fn task_system_prompt(ctx: &TaskPromptContext<'_>) -> String {
    let template = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(SYSTEM_PROMPT_FILE)))
        .and_then(|path| std::fs::read_to_string(path).ok());

    match template {
        Some(template) => {
            debug!("Using {} template", SYSTEM_PROMPT_FILE);
            PromptTemplate::render_task_template(&template, ctx)
        }
        None => PromptTemplate::task_system(ctx),
    }
}

fn conversation_logger(path: Option<&Path>) -> Option<Arc<dyn ConversationLogger>> {
    let path = path?;
    match JsonlConversationLogger::new(path) {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Some(Arc::new(logger))
        }
        None => {
            warn!("Conversation log disabled");
            None
        }
    }
}
