mod session;

use clap::{Parser, Subcommand, ValueEnum};
use form_spec::{
    FormConfig, FormModel, FormValidator, SubmitError, UuidIds, ValidationResult, build_preview,
    mask, render::value_to_display, render_json_ui, render_text,
};
use session::{SessionResult, load_edits, load_form, load_responses, resolve_config, write_json};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

type CliResult<T> = SessionResult<T>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Form builder CLI",
    long_about = "Creates and edits form definitions, previews them and validates responses against their rules"
)]
struct Cli {
    /// FormConfig JSON file (falls back to FORM_BUILDER_CONFIG).
    #[arg(long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// Log debug events to stderr.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PreviewFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Write a fresh form holding one blank question.
    New {
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Apply a JSON array of edit intents to a form.
    Edit {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "EDITS")]
        edits: PathBuf,
        /// Destination of the edited form (defaults to overwriting FORM).
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Validate responses against a form and list the submission.
    Validate {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "RESPONSES")]
        responses: PathBuf,
    },
    /// Render the respondent preview of a form.
    Preview {
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        #[arg(long, value_name = "RESPONSES")]
        responses: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = PreviewFormat::Text)]
        format: PreviewFormat,
    },
    /// Apply an input mask to raw keystrokes.
    Mask {
        #[arg(long)]
        mask: String,
        #[arg(long)]
        input: String,
    },
    /// Print the JSON schema of the form file format.
    Schema,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = resolve_config(cli.config)?;

    match cli.command {
        Command::New {
            out,
            title,
            description,
        } => run_new(&config, out, title, description),
        Command::Edit { form, edits, out } => run_edit(&config, form, edits, out),
        Command::Validate { form, responses } => run_validate(&config, form, responses),
        Command::Preview {
            form,
            responses,
            format,
        } => run_preview(&config, form, responses, format),
        Command::Mask {
            mask: template,
            input,
        } => {
            println!("{}", mask::apply(&template, &input));
            Ok(())
        }
        Command::Schema => {
            let schema = schemars::schema_for!(FormModel);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run_new(
    config: &FormConfig,
    out: PathBuf,
    title: Option<String>,
    description: Option<String>,
) -> CliResult<()> {
    let mut form = FormModel::new(&mut UuidIds, &config.messages);
    if let Some(title) = title {
        form = form.set_title(title);
    }
    if let Some(description) = description {
        form = form.set_description(description);
    }
    write_json(&out, &form)?;
    println!("Created {}", out.display());
    Ok(())
}

fn run_edit(
    config: &FormConfig,
    form_path: PathBuf,
    edits_path: PathBuf,
    out: Option<PathBuf>,
) -> CliResult<()> {
    let form = load_form(&form_path)?;
    let edits = load_edits(&edits_path)?;
    let edited = form.apply_all(&edits, &mut UuidIds, config)?;
    let target = out.unwrap_or(form_path);
    write_json(&target, &edited)?;
    println!(
        "Applied {} edit(s); {} question(s) written to {}",
        edits.len(),
        edited.questions.len(),
        target.display()
    );
    Ok(())
}

fn run_validate(config: &FormConfig, form_path: PathBuf, responses_path: PathBuf) -> CliResult<()> {
    let form = load_form(&form_path)?;
    let responses = load_responses(&responses_path)?;
    let validator = FormValidator::build(&form.questions, &config.messages);

    match validator.submit(&responses) {
        Ok(answers) => {
            println!("Validation result: valid");
            for answer in answers {
                println!(
                    "  {}: {}",
                    answer.question_text,
                    value_to_display(&answer.response)
                );
            }
            Ok(())
        }
        Err(SubmitError::Invalid(result)) => {
            println!("Validation result: invalid");
            describe_validation(&form, &result);
            Err("validation failed".into())
        }
        Err(err) => Err(err.into()),
    }
}

fn describe_validation(form: &FormModel, result: &ValidationResult) {
    println!("Errors:");
    for question in form.complete_questions() {
        if let Some(message) = result.errors.get(&question.id) {
            println!(
                "  {} ({}) - {}",
                question.question_text.as_deref().unwrap_or_default(),
                question.id,
                message
            );
        }
    }
}

fn run_preview(
    config: &FormConfig,
    form_path: PathBuf,
    responses_path: Option<PathBuf>,
    format: PreviewFormat,
) -> CliResult<()> {
    let form = load_form(&form_path)?;
    let responses = responses_path.as_deref().map(load_responses).transpose()?;
    let payload = build_preview(&form, responses.as_ref(), &config.messages);
    match format {
        PreviewFormat::Text => println!("{}", render_text(&payload)),
        PreviewFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&render_json_ui(&payload))?)
        }
    }
    Ok(())
}
