use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use relief_forms::config::Config;
use relief_forms::donation::impact_preview;
use relief_forms::forms::{self, ProjectContext};
use relief_forms::submit::{RecordingNotifier, SubmissionCoordinator, SubmitAttempt};
use relief_forms::visibility::StaticUrl;
use relief_forms::{FieldErrors, FormSchema, validate};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser)]
#[command(name = "relief-forms", version, about = "Validate and submit the site's forms")]
struct Cli {
    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra form schema in YAML, addressable by its id
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available forms
    Forms,
    /// Print a form's schema
    Schema {
        form: String,
        #[arg(long)]
        json: bool,
    },
    /// Validate values without submitting
    Validate(FormInput),
    /// Validate and submit
    Submit(FormInput),
    /// Show what a donation amount pays for
    Impact { amount: f64 },
}

#[derive(Args)]
struct FormInput {
    form: String,
    /// Field value as key=value, repeatable
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    values: Vec<String>,
    /// Preset donation amount
    #[arg(long)]
    preset: Option<u32>,
    /// Custom donation amount as typed
    #[arg(long)]
    custom: Option<String>,
    /// Project title for the project donation form
    #[arg(long)]
    project_title: Option<String>,
    /// Page address the project donation form is shown on
    #[arg(long)]
    page_url: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading config")?;
    init_logging(&config);

    let extra = match &cli.schema {
        Some(path) => {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("reading schema {}", path.display()))?;
            Some(FormSchema::from_yaml_str(&source)?)
        }
        None => None,
    };

    match cli.command {
        Command::Forms => {
            for name in forms::NAMES {
                println!("{name}");
            }
            if let Some(schema) = &extra {
                println!("{}", schema.id);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Schema { form, json } => {
            let schema = resolve(&form, extra, &ProjectContext::default())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                print!("{}", schema.to_yaml_string()?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate(input) => {
            let schema = resolve(&input.form, extra, &project_context(&input))?;
            let mut coordinator = build(schema, &config, RecordingNotifier::new());
            fill(&mut coordinator, &input)?;

            let errors = validate(coordinator.schema(), coordinator.state().values());
            print_errors(&errors);
            Ok(if errors.is_valid() {
                println!("valid");
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Submit(input) => {
            let schema = resolve(&input.form, extra, &project_context(&input))?;
            let notifier = RecordingNotifier::new();
            let mut coordinator = build(schema, &config, notifier.clone());
            fill(&mut coordinator, &input)?;
            submit(&mut coordinator, &notifier)
        }
        Command::Impact { amount } => {
            match impact_preview(amount, &forms::project_presets()) {
                Some(line) => println!("{line}"),
                None => bail!("no impact to show for {amount}"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.filter.as_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn project_context(input: &FormInput) -> ProjectContext {
    let title = input
        .project_title
        .clone()
        .unwrap_or_else(|| ProjectContext::default().title);

    match &input.page_url {
        Some(url) => ProjectContext::from_url(title, &StaticUrl(url.clone())),
        None => ProjectContext::new(title),
    }
}

fn resolve(name: &str, extra: Option<FormSchema>, project: &ProjectContext) -> Result<FormSchema> {
    if let Some(schema) = extra.filter(|schema| schema.id == name) {
        return Ok(schema);
    }
    if name == "project-donation" {
        return Ok(forms::project_donation(project.clone()));
    }
    forms::by_name(name).ok_or_else(|| anyhow!("unknown form '{name}'"))
}

fn build(
    schema: FormSchema,
    config: &Config,
    notifier: RecordingNotifier,
) -> SubmissionCoordinator {
    SubmissionCoordinator::new(schema, config.submit_port(), Box::new(notifier))
}

fn fill(coordinator: &mut SubmissionCoordinator, input: &FormInput) -> Result<()> {
    for pair in &input.values {
        let (field, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected FIELD=VALUE, got '{pair}'"))?;
        coordinator.set_text(field.trim(), value)?;
    }

    if input.preset.is_none() && input.custom.is_none() {
        return Ok(());
    }

    let amount_field = coordinator
        .schema()
        .amount_field()
        .map(|field| field.id.to_string())
        .ok_or_else(|| anyhow!("form '{}' takes no donation amount", coordinator.schema().id))?;

    if let Some(preset) = input.preset {
        coordinator.select_preset_amount(&amount_field, preset)?;
    }
    if let Some(custom) = &input.custom {
        coordinator.enter_custom_amount(&amount_field, custom)?;
    }
    Ok(())
}

fn submit(
    coordinator: &mut SubmissionCoordinator,
    notifier: &RecordingNotifier,
) -> Result<ExitCode> {
    match coordinator.submit() {
        SubmitAttempt::Blocked(errors) => {
            print_errors(&errors);
            return Ok(ExitCode::FAILURE);
        }
        SubmitAttempt::Ignored => bail!("a submission is already in flight"),
        SubmitAttempt::Started { run_id } => {
            tracing::debug!(run_id, "waiting for submission");
        }
    }

    loop {
        for event in coordinator.tick() {
            tracing::debug!(?event, "form event");
        }
        if !coordinator.is_submitting() {
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    let Some(notification) = notifier.last() else {
        bail!("submission settled without a notification");
    };
    println!("{}", notification.message);

    Ok(match notification.level {
        relief_forms::submit::NotificationLevel::Success => ExitCode::SUCCESS,
        relief_forms::submit::NotificationLevel::Failure => ExitCode::FAILURE,
    })
}

fn print_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        println!("{field}: {message}");
    }
}
