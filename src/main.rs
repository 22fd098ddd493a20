//! Domain Scout - find unregistered domains for AI-generated project names
//!
//! Generates name ideas with an LLM (or takes them from `--names`), checks each
//! `name.tld` over DNS and WHOIS, and offers more rounds until you are done.

use clap::Parser;
use console::style;
use domain_scout::{
    domain::{DnsProber, RegistryResolver, RetryPolicy},
    llm::{self, parser::split_names, NameGenerator},
    session::{Reporter, Session, SessionState},
    types::{
        CandidateDomain, DomainCheck, LlmConfig, LookupOutcome, ProbeConfig, RegistryVerdict,
        RoundReport, SessionConfig, DEFAULT_NAMESERVERS, DEFAULT_PROMPT, DEFAULT_TLD,
    },
    DomainScoutError, Result,
};
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::env;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "domain-scout", version)]
#[command(about = "Check which AI-generated project names are still free as domains", long_about = None)]
struct Args {
    /// Top-level domain to check against
    #[arg(long, default_value = DEFAULT_TLD)]
    tld: String,

    /// Project description used to generate name ideas
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Comma-separated list of names to check in the first round
    #[arg(long)]
    names: Option<String>,

    /// File to append available domains to
    #[arg(long)]
    output: Option<PathBuf>,

    /// LLM provider used to generate names
    #[arg(long, default_value = "openai", value_parser = ["openai", "anthropic"])]
    provider: String,

    /// Model identifier (defaults to the provider's default model)
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature for name generation
    #[arg(long, default_value_t = 0.7)]
    temperature: f32,

    /// Comma-separated DNS servers to query
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_NAMESERVERS)]
    dns_servers: Vec<IpAddr>,

    /// Per-query DNS timeout in seconds
    #[arg(long, default_value_t = 2)]
    dns_timeout: u64,
}

#[tokio::main]
async fn main() {
    // Load .env before the filter reads RUST_LOG
    if let Err(e) = domain_scout::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }
    init_tracing();

    let args = Args::parse();

    if let Err(e) = run_domain_scout(args).await {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Main domain scout workflow
async fn run_domain_scout(args: Args) -> Result<()> {
    let explicit = args.names.as_deref().map(split_names);
    let generator = setup_generator(&args, explicit.is_some())?;

    let dns_timeout = Duration::from_secs(args.dns_timeout.max(1));
    let probe_config = ProbeConfig {
        nameservers: args.dns_servers.clone(),
        timeout: dns_timeout,
        lifetime: dns_timeout * 2 + Duration::from_secs(1),
        retry: RetryPolicy::default(),
    };

    let config = SessionConfig {
        tld: args.tld.clone(),
        prompt: args.prompt.clone(),
        output: args.output.clone(),
    };

    let mut session = Session::new(config, DnsProber::new(&probe_config), RegistryResolver::new())
        .with_reporter(Arc::new(ConsoleReporter::new()));
    if let Some(generator) = generator {
        session = session.with_source(Arc::new(generator));
    }

    let mut state = SessionState::new();
    let mut ask = |_: &SessionState| ask_to_continue();
    session.run(&mut state, explicit, &mut ask).await;

    if state.rounds() > 1 {
        println!();
        println!("📈 Session summary: {} name(s) checked over {} round(s)", state.seen().len(), state.rounds());
        if state.available().is_empty() {
            println!("😔 No available domains found this session.");
        } else {
            for domain in state.available() {
                println!("✅ {}", domain);
            }
        }
    }

    Ok(())
}

/// Build the name generator from environment credentials.
///
/// At least one provider key is required unless the user supplied names, in
/// which case generation is simply unavailable. The selected provider is the
/// default; others with a key act as fallbacks.
fn setup_generator(args: &Args, has_explicit_names: bool) -> Result<Option<NameGenerator>> {
    let generator = NameGenerator::new();

    for provider in llm::available_providers() {
        let Some(api_key) = llm::api_key_var(provider)
            .and_then(|var| env::var(var).ok())
            .filter(|key| !key.trim().is_empty())
        else {
            continue;
        };

        let is_selected = provider == args.provider;
        let model = match (&args.model, is_selected) {
            (Some(model), true) => model.clone(),
            _ => llm::default_model(provider).to_string(),
        };
        let base_url = match provider {
            "openai" => env::var("OPENAI_BASE_URL").ok(),
            _ => None,
        };

        generator.add_provider(&LlmConfig {
            provider: provider.to_string(),
            model,
            api_key,
            base_url,
            temperature: args.temperature,
        })?;
        tracing::debug!(provider, selected = is_selected, "LLM provider configured");
    }

    if generator.is_ready() {
        if generator.has_provider(&args.provider) {
            generator.set_default_provider(&args.provider);
        } else {
            tracing::warn!(provider = %args.provider, "Selected provider has no API key, using fallback providers");
        }
        return Ok(Some(generator));
    }

    if has_explicit_names {
        return Ok(None);
    }

    let var = llm::api_key_var(&args.provider).unwrap_or("OPENAI_API_KEY");
    Err(DomainScoutError::config(format!(
        "No API key for provider '{}'. Set {} or pass --names to check names without generating them.",
        args.provider, var
    )))
}

fn ask_to_continue() -> bool {
    println!();
    inquire::Confirm::new("Generate more names?")
        .with_default(true)
        .prompt()
        .unwrap_or(false)
}

/// Prints session progress to the terminal
struct ConsoleReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn stop_spinner(&self) {
        if let Some(spinner) = self.spinner.lock().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Reporter for ConsoleReporter {
    fn generating(&self, prompt: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Getting ideas for \"{}\"...", prompt));
        spinner.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.lock() = Some(spinner);
    }

    fn generation_failed(&self, error: &DomainScoutError) {
        self.stop_spinner();
        eprintln!("{}", error.user_message());
    }

    fn candidates(&self, round: usize, names: &[String]) {
        self.stop_spinner();
        println!();
        println!("{}", style(format!("Round {}", round)).bold());
        if names.is_empty() {
            println!("No names to check this round.");
        } else {
            println!("Generated names: {}", names.join(", "));
        }
    }

    fn checking(&self, domain: &CandidateDomain) {
        println!("Checking https://{}", domain);
    }

    fn checked(&self, check: &DomainCheck) {
        let ok = style("✔").green().bold();
        let taken = style("✗").red().bold();
        let warn = style("!").yellow().bold();

        match (&check.outcome, &check.verdict) {
            (_, Some(RegistryVerdict::ConfirmedAvailable)) => {
                println!("{} Domain {} is available!", ok, check.domain)
            }
            (_, Some(RegistryVerdict::ConfirmedTaken { .. })) => {
                println!("{} Domain {} is not available via WHOIS", taken, check.domain)
            }
            (_, Some(RegistryVerdict::RegistryError(reason))) => println!("{} WHOIS error {}", warn, reason),
            (LookupOutcome::Resolved { .. }, None) => println!("{} Got DNS response", taken),
            (LookupOutcome::Indeterminate(reason), None) => println!("{} Can't check domain: {}", warn, reason),
            (LookupOutcome::Error(reason), None) => println!("{} DNS error: {}", warn, reason),
            (LookupOutcome::NotFound, None) => println!("{} No registry verdict for {}", warn, check.domain),
        }
    }

    fn output_failed(&self, _path: &Path, error: &DomainScoutError) {
        eprintln!("{}", error.user_message());
    }

    fn round_finished(&self, report: &RoundReport, _state: &SessionState) {
        if !report.duplicates.is_empty() {
            println!(
                "{}",
                style(format!("Skipped {} name(s) already checked this session", report.duplicates.len())).dim()
            );
        }

        let available = report.available();
        if available.is_empty() {
            println!("No available domains found for the given names and TLD.");
        } else {
            println!("---\nAvailable domains:");
            for domain in &available {
                println!("{}", domain);
            }
        }
    }
}
