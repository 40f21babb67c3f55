use std::path::PathBuf;

use alfred_core::{Feedback, FeedbackError, Icon, IconKind, Item, ModifierKey};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use workflow_common::{
    RuntimeConfig, WorkflowError, error_feedback, file_items_feedback, parse_assignment,
    workflow_root,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Alfred script-filter feedback CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the workflow root directory (the directory holding the marker file).
    Root {
        /// Marker file name; defaults to WORKFLOW_MARKER_FILE or info.plist.
        #[arg(long)]
        marker: Option<String>,
    },
    /// Render a single-item feedback document.
    Item(ItemArgs),
    /// Render one file item per path.
    Files {
        /// Paths to list.
        paths: Vec<String>,
        /// Feedback-level variable, as KEY=VALUE.
        #[arg(long = "var")]
        vars: Vec<String>,
        #[arg(long, value_enum, default_value_t = OutputModeArg::AlfredJson)]
        output: OutputModeArg,
    },
}

#[derive(Debug, Args)]
struct ItemArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    subtitle: Option<String>,
    #[arg(long)]
    arg: Option<String>,
    #[arg(long)]
    uid: Option<String>,
    #[arg(long)]
    autocomplete: Option<String>,
    #[arg(long)]
    valid: bool,
    /// Mark the item as a file (`"type":"file"`).
    #[arg(long)]
    file: bool,
    /// Icon path, or a UTI with `--icon-type filetype`.
    #[arg(long)]
    icon: Option<String>,
    #[arg(long, value_enum, requires = "icon")]
    icon_type: Option<IconTypeArg>,
    /// Text for copy (Cmd+C).
    #[arg(long)]
    copy: Option<String>,
    /// Text for Large Type (Cmd+L).
    #[arg(long)]
    largetype: Option<String>,
    /// Item variable, as KEY=VALUE.
    #[arg(long = "var")]
    vars: Vec<String>,
    /// Feedback-level variable inherited by the item, as KEY=VALUE.
    #[arg(long = "feedback-var")]
    feedback_vars: Vec<String>,
    /// Modifier to create, as KEY or KEY:SUBTITLE.
    #[arg(long = "mod")]
    mods: Vec<String>,
    /// Modifier argument, as KEY=ARG.
    #[arg(long = "mod-arg")]
    mod_args: Vec<String>,
    #[arg(long, value_enum, default_value_t = OutputModeArg::AlfredJson)]
    output: OutputModeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum IconTypeArg {
    Plain,
    Fileicon,
    Filetype,
}

impl From<IconTypeArg> for IconKind {
    fn from(value: IconTypeArg) -> Self {
        match value {
            IconTypeArg::Plain => IconKind::Plain,
            IconTypeArg::Fileicon => IconKind::FileIcon,
            IconTypeArg::Filetype => IconKind::FileType,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputModeArg {
    Human,
    AlfredJson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    User,
    Runtime,
}

#[derive(Debug)]
struct AppError {
    kind: ErrorKind,
    code: &'static str,
    message: String,
}

impl AppError {
    fn user(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            code,
            message: message.into(),
        }
    }

    fn runtime(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            code,
            message: message.into(),
        }
    }

    fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::User => 2,
            ErrorKind::Runtime => 1,
        }
    }
}

const ERROR_CODE_USER_INVALID_VARIABLE: &str = "user.invalid_variable";
const ERROR_CODE_USER_INVALID_MODIFIER: &str = "user.invalid_modifier";
const ERROR_CODE_USER_EMPTY_TITLE: &str = "user.empty_title";
const ERROR_CODE_USER_ROOT_NOT_FOUND: &str = "user.root_not_found";
const ERROR_CODE_RUNTIME_SERIALIZE: &str = "runtime.serialize_failed";
const ERROR_CODE_RUNTIME_WRITE: &str = "runtime.write_failed";

impl Cli {
    fn output_mode_hint(&self) -> OutputModeArg {
        match &self.command {
            Commands::Root { .. } => OutputModeArg::Human,
            Commands::Item(args) => args.output,
            Commands::Files { output, .. } => *output,
        }
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let output_mode = cli.output_mode_hint();

    match run(cli) {
        Ok(stdout) => {
            println!("{stdout}");
        }
        Err(err) => {
            emit_error(output_mode, &err);
            std::process::exit(err.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<String, AppError> {
    let config = RuntimeConfig::from_env();
    run_with_config(cli, &config)
}

fn run_with_config(cli: Cli, config: &RuntimeConfig) -> Result<String, AppError> {
    match cli.command {
        Commands::Root { marker } => {
            let marker = marker.unwrap_or_else(|| config.marker_file.clone());
            tracing::debug!(%marker, "resolving workflow root");
            let root = workflow_root(&marker).map_err(map_workflow_error)?;
            Ok(root.to_string_lossy().to_string())
        }
        Commands::Item(args) => {
            let output = args.output;
            let feedback = build_item_feedback(args)?;
            render(&feedback, output)
        }
        Commands::Files {
            paths,
            vars,
            output,
        } => {
            let variables = parse_assignments(&vars)?;
            let paths: Vec<PathBuf> = paths.iter().map(|raw| config.expand_path(raw)).collect();
            let feedback = file_items_feedback(&paths, &variables, config);
            render(&feedback, output)
        }
    }
}

fn build_item_feedback(args: ItemArgs) -> Result<Feedback, AppError> {
    let mut feedback = Feedback::new();
    for (key, value) in parse_assignments(&args.feedback_vars)? {
        feedback.set_var(key, value);
    }

    let mut item = Item::new(args.title);
    if let Some(subtitle) = args.subtitle {
        item.set_subtitle(subtitle);
    }
    if let Some(arg) = args.arg {
        item.set_arg(arg);
    }
    if let Some(uid) = args.uid {
        item.set_uid(uid);
    }
    if let Some(autocomplete) = args.autocomplete {
        item.set_autocomplete(autocomplete);
    }
    if let Some(path) = args.icon {
        let kind = args.icon_type.map(IconKind::from).unwrap_or_default();
        item.set_icon(Icon::new(path).with_kind(kind));
    }
    if let Some(copy) = args.copy {
        item.set_copy_text(copy);
    }
    if let Some(largetype) = args.largetype {
        item.set_large_type_text(largetype);
    }
    item.set_valid(args.valid).set_file(args.file);
    for (key, value) in parse_assignments(&args.vars)? {
        item.set_var(key, value);
    }

    for raw in &args.mods {
        let (key, subtitle) = match raw.split_once(':') {
            Some((key, subtitle)) => (key, Some(subtitle)),
            None => (raw.as_str(), None),
        };
        let modifier = item.modifier(parse_modifier_key(key)?);
        if let Some(subtitle) = subtitle {
            modifier.set_subtitle(subtitle);
        }
    }
    for raw in &args.mod_args {
        let (key, arg) = parse_assignment(raw).map_err(map_workflow_error)?;
        item.modifier(parse_modifier_key(&key)?).set_arg(arg);
    }

    feedback.push(item);
    Ok(feedback)
}

fn parse_modifier_key(raw: &str) -> Result<ModifierKey, AppError> {
    ModifierKey::parse(raw).ok_or_else(|| {
        AppError::user(
            ERROR_CODE_USER_INVALID_MODIFIER,
            format!("unknown modifier key: {raw} (expected cmd, alt, ctrl, shift, or fn)"),
        )
    })
}

fn parse_assignments(raw: &[String]) -> Result<Vec<(String, String)>, AppError> {
    raw.iter()
        .map(|entry| parse_assignment(entry).map_err(map_workflow_error))
        .collect()
}

fn render(feedback: &Feedback, output: OutputModeArg) -> Result<String, AppError> {
    match output {
        OutputModeArg::AlfredJson => feedback.to_json().map_err(map_feedback_error),
        OutputModeArg::Human => Ok(render_human(feedback)),
    }
}

fn render_human(feedback: &Feedback) -> String {
    let mut lines = Vec::with_capacity(feedback.len());
    for item in feedback.items() {
        if let Some(subtitle) = item.subtitle() {
            lines.push(format!("{} | {}", item.title(), subtitle));
        } else {
            lines.push(item.title().to_string());
        }
    }
    lines.join("\n")
}

fn emit_error(output_mode: OutputModeArg, error: &AppError) {
    match output_mode {
        OutputModeArg::AlfredJson => {
            if let Err(send_error) = error_feedback(error.code, &error.message).send() {
                eprintln!("error[{}]: {}", error.code, error.message);
                eprintln!("error[{ERROR_CODE_RUNTIME_WRITE}]: {send_error}");
            }
        }
        OutputModeArg::Human => {
            eprintln!("error[{}]: {}", error.code, error.message);
        }
    }
}

fn map_workflow_error(error: WorkflowError) -> AppError {
    match error {
        WorkflowError::MarkerNotFound { .. } | WorkflowError::NoCandidates { .. } => {
            AppError::user(ERROR_CODE_USER_ROOT_NOT_FOUND, error.to_string())
        }
        WorkflowError::InvalidVariable(_) => {
            AppError::user(ERROR_CODE_USER_INVALID_VARIABLE, error.to_string())
        }
    }
}

fn map_feedback_error(error: FeedbackError) -> AppError {
    match error {
        FeedbackError::EmptyTitle { .. } => {
            AppError::user(ERROR_CODE_USER_EMPTY_TITLE, error.to_string())
        }
        FeedbackError::Serialize(_) => AppError::runtime(
            ERROR_CODE_RUNTIME_SERIALIZE,
            format!("failed to serialize Alfred feedback: {error}"),
        ),
        FeedbackError::Io(_) => AppError::runtime(ERROR_CODE_RUNTIME_WRITE, error.to_string()),
    }
}
