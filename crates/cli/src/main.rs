// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # checkin-report-cli
//!
//! Terminal client for the check-in report dashboard. It shares the session
//! file with the server, so logging in here also logs in the server on its
//! next start.
//!
//! - `login` / `signup` / `logout` / `whoami` manage the account
//! - `regions` lists the regions a report can be requested for
//! - `report` fetches a report, applies the table options and prints one page

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod table;

use std::path::{Path, PathBuf};

use checkin_report::{ReportMode, ViewCommand, ViewState, apply};
use checkin_report_api::{
    Config, DEFAULT_BASE_URL, LoginRequest, REGIONS, ReportOutcome, ReportRequest,
    SessionContext, SignupRequest, XanoClient, fetch_report, login, parse_request_date, signup,
};
use checkin_report_domain::{CsvEncoding, CsvExport, Direction, ResultSet, SchemaPolicy, export_csv};
use checkin_report_persistence::{FileSessionStore, StoredUser};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    Result,
    eyre::{Context, bail},
};
use time::OffsetDateTime;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

use crate::table::render_table;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run().await {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Check-in report terminal client", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    async fn run(self) -> Result<()> {
        let config: Config = self.connection.config();
        let store: FileSessionStore = match &self.connection.session_file {
            Some(path) => FileSessionStore::open(path)?,
            None => FileSessionStore::open_default()?,
        };
        let session: SessionContext<FileSessionStore> = SessionContext::restore(store)?;
        let mut client: Client = Client { config, session };
        client.run(self.command).await
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

/// Where the API lives and how fetched reports are read.
#[derive(Debug, clap::Args)]
struct ConnectionArgs {
    /// Xano report API token
    #[arg(long, global = true, env = "XANO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Xano API base URL
    #[arg(long, global = true, env = "XANO_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Session file. Defaults to the user's local data directory.
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    /// Accept regions outside the known list
    #[arg(long, global = true)]
    allow_any_region: bool,

    /// Field holding the in/out direction, instead of detecting it
    #[arg(long, global = true)]
    status_key: Option<String>,

    /// Date field used for year grouping; repeat for fallbacks
    #[arg(long = "year-key", global = true)]
    year_keys: Vec<String>,

    /// Set aside rows whose fields differ from the first row
    #[arg(long, global = true)]
    quarantine: bool,

    /// Write CSV cells as JSON values instead of standard CSV quoting
    #[arg(long, global = true)]
    legacy_csv: bool,
}

impl ConnectionArgs {
    fn config(&self) -> Config {
        let mut config: Config = Config::new(self.token.clone()).with_base_url(&self.base_url);
        config.check_regions = !self.allow_any_region;
        config.schema_hints.status_key.clone_from(&self.status_key);
        config.schema_hints.year_keys =
            (!self.year_keys.is_empty()).then(|| self.year_keys.clone());
        if self.quarantine {
            config.schema_policy = SchemaPolicy::Quarantine;
        }
        if self.legacy_csv {
            config.csv_encoding = CsvEncoding::JsonCells;
        }
        config
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CHECKIN_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account. Log in afterwards.
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Forget the session
    Logout,

    /// Show the logged-in account
    #[command(visible_alias = "me")]
    Whoami,

    /// List the known regions
    Regions,

    /// Fetch a report and print one page of it
    #[command(visible_alias = "r")]
    Report(ReportArgs),
}

#[derive(Clone, Debug, clap::Args)]
struct ReportArgs {
    /// First check-in date, YYYY-MM-DD
    #[arg(long)]
    start: String,

    /// Last check-in date, YYYY-MM-DD
    #[arg(long)]
    end: String,

    /// Region; required unless --simple
    #[arg(long)]
    region: Option<String>,

    /// Use the simple view: region optional, fixed page size
    #[arg(long)]
    simple: bool,

    /// Keep rows containing this text
    #[arg(long)]
    search: Option<String>,

    /// Hide check-ins (full view only)
    #[arg(long)]
    hide_in: bool,

    /// Hide check-outs (full view only)
    #[arg(long)]
    hide_out: bool,

    /// Sort by this field
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Page to print, starting at 1
    #[arg(long)]
    page: Option<usize>,

    /// Also write the full report as CSV into this directory
    #[arg(long, value_name = "DIR")]
    csv: Option<PathBuf>,
}

impl ReportArgs {
    const fn mode(&self) -> ReportMode {
        if self.simple {
            ReportMode::Simple
        } else {
            ReportMode::Full
        }
    }

    /// The table interactions these options stand for, in the order a user
    /// would make them.
    fn commands(&self, result: ResultSet) -> Vec<ViewCommand> {
        let mut commands: Vec<ViewCommand> = vec![ViewCommand::Load(result)];
        if let Some(search) = &self.search {
            commands.push(ViewCommand::SetSearch(search.clone()));
        }
        if self.hide_in {
            commands.push(ViewCommand::ToggleHide(Direction::In));
        }
        if self.hide_out {
            commands.push(ViewCommand::ToggleHide(Direction::Out));
        }
        if let Some(key) = &self.sort {
            commands.push(ViewCommand::Sort(key.clone()));
            if self.desc {
                commands.push(ViewCommand::Sort(key.clone()));
            }
        }
        if let Some(page_size) = self.page_size {
            commands.push(ViewCommand::SetPageSize(page_size));
        }
        if let Some(page) = self.page {
            commands.push(ViewCommand::SetPage(page));
        }
        commands
    }
}

struct Client {
    config: Config,
    session: SessionContext<FileSessionStore>,
}

impl Client {
    async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Login { email, password } => {
                let backend: XanoClient = XanoClient::new(&self.config)?;
                let request: LoginRequest = LoginRequest { email, password };
                let user: StoredUser = login(&backend, &mut self.session, &request).await?;
                println!("Logged in as {}", user.name);
            }
            Command::Signup {
                first_name,
                last_name,
                email,
                password,
                confirm_password,
            } => {
                let backend: XanoClient = XanoClient::new(&self.config)?;
                let request: SignupRequest = SignupRequest {
                    first_name,
                    last_name,
                    email,
                    password,
                    confirm_password,
                };
                println!("{}", signup(&backend, &request).await?);
            }
            Command::Logout => {
                self.session.logout()?;
                println!("Logged out");
            }
            Command::Whoami => match self.session.user() {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None if self.session.is_logged_in() => println!("{}", self.session.display_name()),
                None => println!("Not logged in"),
            },
            Command::Regions => {
                for region in REGIONS {
                    println!("{region}");
                }
            }
            Command::Report(report) => self.report(&report).await?,
        }
        Ok(())
    }

    async fn report(&self, report: &ReportArgs) -> Result<()> {
        if !self.session.is_logged_in() {
            bail!("Please log in to view reports.");
        }

        let request: ReportRequest = ReportRequest {
            start_date: parse_request_date(Some(&report.start))?,
            end_date: parse_request_date(Some(&report.end))?,
            region: report.region.clone(),
        };
        let backend: XanoClient = XanoClient::new(&self.config)?;
        let outcome: ReportOutcome =
            fetch_report(&backend, &self.config, report.mode(), &request).await?;
        if let Some(notice) = &outcome.notice {
            info!("{notice}");
        }

        if let Some(directory) = &report.csv {
            write_csv(directory, &outcome.result, self.config.csv_encoding)?;
        }

        let state: ViewState = report
            .commands(outcome.result)
            .into_iter()
            .try_fold(ViewState::new(report.mode()), |state, command| {
                apply(&state, command)
            })?;
        println!("{}", render_table(&state.render()));
        Ok(())
    }
}

fn write_csv(directory: &Path, result: &ResultSet, encoding: CsvEncoding) -> Result<()> {
    let timestamp_ms: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    let export: Option<CsvExport> = export_csv(result.source_rows(), encoding, timestamp_ms)?;
    let Some(export) = export else {
        info!("Nothing to export");
        return Ok(());
    };
    let path: PathBuf = directory.join(&export.file_name);
    std::fs::write(&path, export.content)
        .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote CSV");
    Ok(())
}
