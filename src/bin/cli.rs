use anyhow::{anyhow, Result};
use colored::*;
use rustyline::error::ReadlineError;
use sec_filings::{
    core::config::FilingsConfig,
    edgar::{query::year_choices, FilingQueryClient, Quarter, ReportType, SearchCriteria},
    form::{FormState, Submit, FETCHING_LABEL},
    repl::{self, Command},
    utils::progress::FetchSpinner,
};
use std::time::Duration;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "sec-filings", about = "Search SEC filings through the filings backend")]
struct Opt {
    /// Backend base URL, overrides SEC_FILINGS_API_URL
    #[structopt(long)]
    api_url: Option<String>,

    /// Request timeout in seconds, overrides SEC_FILINGS_TIMEOUT_SECS
    #[structopt(long)]
    timeout_secs: Option<u64>,

    #[structopt(short, long)]
    ticker: Option<String>,

    /// One of 10-K, 10-Q, 8-K, 13F-NT, 13F-HR, SC 13G, SD
    #[structopt(short = "f", long = "form-type")]
    form_type: Option<ReportType>,

    #[structopt(short, long)]
    year: Option<String>,

    /// Only used with 10-Q
    #[structopt(short, long)]
    quarter: Option<Quarter>,

    #[structopt(long)]
    include_amends: bool,

    #[structopt(short, long)]
    limit: Option<String>,

    #[structopt(long)]
    no_details: bool,

    /// Submit once with the given fields and exit
    #[structopt(long)]
    once: bool,
}

impl Opt {
    fn config(&self) -> Result<FilingsConfig> {
        let mut config = FilingsConfig::from_env()?;
        if let Some(raw) = &self.api_url {
            config = config.with_api_url(FilingsConfig::parse_api_url(raw)?);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    fn form(&self) -> FormState {
        let defaults = SearchCriteria::default();
        let criteria = SearchCriteria {
            ticker: self.ticker.clone().unwrap_or(defaults.ticker),
            report_type: self.form_type.unwrap_or(defaults.report_type),
            year: self.year.clone().unwrap_or(defaults.year),
            quarter: self.quarter.unwrap_or(defaults.quarter),
            include_amends: self.include_amends,
            limit: None,
            download_details: !self.no_details,
        };

        let mut form = FormState::with_criteria(criteria);
        if let Some(limit) = &self.limit {
            form.set_limit_input(limit);
        }
        form
    }
}

fn yes_no(flag: bool) -> ColoredString {
    if flag {
        "Yes".green()
    } else {
        "No".yellow()
    }
}

fn print_form(form: &FormState) {
    let criteria = form.criteria();
    println!("\n{}", "SEC Filings Search".bold());
    println!("  {:<20} {}", "Ticker", criteria.ticker.cyan());
    println!("  {:<20} {}", "Form Type", criteria.report_type.to_string().cyan());
    if form.quarter_visible() {
        println!("  {:<20} {}", "Quarter", criteria.quarter.to_string().cyan());
    }
    println!("  {:<20} {}", "Year", criteria.year.cyan());
    println!("  {:<20} {}", "Include Amendments?", yes_no(criteria.include_amends));
    println!("  {:<20} {}", "Limit", form.limit_input().cyan());
    println!("  {:<20} {}", "Download Details?", yes_no(criteria.download_details));

    let range = form.snapshot().date_range();
    println!(
        "  {}",
        format!("Filed between {} and {}", range.after_date, range.before_date).dimmed()
    );
    let label = format!("[ {} ]", form.submit_label());
    if form.is_loading() {
        println!("\n  {}", label.dimmed());
    } else {
        println!("\n  {}  {}", label.green().bold(), "(type 'fetch')".dimmed());
    }
    println!();
}

fn print_response(form: &FormState) {
    if let Some(rendered) = form.render_response() {
        println!("{}", "Response:".bold());
        println!("{}", rendered);
    }
}

async fn fetch(form: &mut FormState, client: &FilingQueryClient) -> Submit {
    let spinner = FetchSpinner::start(FETCHING_LABEL);
    let outcome = form.submit(client).await;
    match &outcome {
        Submit::Received => spinner.finish("Done"),
        Submit::Failed(_) => spinner.abandon("Failed"),
        Submit::Busy => spinner.abandon("Busy"),
    }
    outcome
}

fn apply(form: &mut FormState, command: Command) {
    match command {
        Command::Ticker(ticker) => form.set_ticker(&ticker),
        Command::ReportType(report_type) => {
            form.set_report_type(report_type);
            if form.quarter_visible() {
                println!("Quarter: {} (change with 'quarter <Qn>')", form.criteria().quarter);
            }
        }
        Command::Year(year) => {
            if !year_choices().contains(&year) {
                println!(
                    "{}",
                    format!("Warning: {} is outside the usual range of years", year).yellow()
                );
            }
            form.set_year(&year);
        }
        Command::Quarter(quarter) => {
            form.set_quarter(quarter);
            if !form.quarter_visible() {
                println!("{}", "Note: the quarter is only used for 10-Q searches".dimmed());
            }
        }
        Command::ToggleAmends => {
            let on = form.toggle_include_amends();
            println!("Include Amendments? {}", yes_no(on));
        }
        Command::ToggleDetails => {
            let on = form.toggle_download_details();
            println!("Download Details? {}", yes_no(on));
        }
        Command::Limit(limit) => form.set_limit_input(&limit),
        Command::Reset => form.reset(),
        Command::Show => print_form(form),
        Command::Help => println!("{}", repl::help_text()),
        Command::Fetch | Command::Quit => {}
    }
}

async fn run_interactive(mut form: FormState, client: &FilingQueryClient) -> Result<()> {
    let mut rl = repl::create_editor()?;

    print_form(&form);
    println!("Type 'help' for commands, 'fetch' to search, 'quit' to exit");

    loop {
        match rl.readline(&format!("{}", "> ".green().bold())) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Fetch) => match fetch(&mut form, client).await {
                        Submit::Received => print_response(&form),
                        Submit::Failed(e) => {
                            eprintln!("{}", format!("Search failed: {}", e).red());
                            print_response(&form);
                        }
                        Submit::Busy => eprintln!("{}", "A search is already running".yellow()),
                    },
                    Ok(command) => apply(&mut form, command),
                    Err(msg) => eprintln!("{}", msg.red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    log::debug!("Saving REPL history");
    if let Err(e) = repl::save_history(&mut rl) {
        log::warn!("Could not save history: {}", e);
    }
    println!("Goodbye!");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    log::debug!("Logger initialized");

    let opt = Opt::from_args();
    let config = opt.config()?;
    log::debug!("Using filings backend at {}", config.api_url);

    let client = FilingQueryClient::new(&config)?;
    let mut form = opt.form();

    if opt.once {
        return match fetch(&mut form, &client).await {
            Submit::Received => {
                print_response(&form);
                Ok(())
            }
            Submit::Failed(e) => Err(anyhow!("Search failed: {}", e)),
            Submit::Busy => Err(anyhow!("A search is already running")),
        };
    }

    run_interactive(form, &client).await
}
