use std::error::Error;
use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use toggl_track::dates::{parse_date, parse_since};
use toggl_track::schemas::project::ProjectsQuery;
use toggl_track::schemas::report_time_entry::ReportSearch;
use toggl_track::schemas::time_entry::TimeEntriesQuery;
use toggl_track::{Auth, Config, ConfigError, CurrentUser, ReportTimeEntry, Workspace, config};

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("toggl_track=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| err as Box<dyn Error>)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Login { token } => {
            let path = config::write_token(config_path, &token)?;
            println!("Token saved to {}", path.display());
        }
        Commands::Logged => {
            print_json(&Session::load(config_path)?.current_user()?.logged()?)?;
        }
        Commands::Me => {
            print_json(&Session::load(config_path)?.current_user()?.me()?)?;
        }
        Commands::Workspaces { since } => {
            let since = since.as_deref().map(parse_since).transpose()?;
            let workspace = Session::load(config_path)?.workspace()?;
            print_json(&workspace.list(since)?[..])?;
        }
        Commands::Projects { workspace_id } => {
            let workspace = Session::load(config_path)?.workspace()?;
            let projects = workspace.get_projects(workspace_id, &ProjectsQuery::default())?;
            print_json(&projects[..])?;
        }
        Commands::Entries { start, end } => {
            let query = TimeEntriesQuery {
                start_date: start.as_deref().map(parse_date).transpose()?,
                end_date: end.as_deref().map(parse_date).transpose()?,
                ..Default::default()
            };
            let user = Session::load(config_path)?.current_user()?;
            print_json(&user.get_time_entries(&query)?[..])?;
        }
        Commands::Current => {
            let user = Session::load(config_path)?.current_user()?;
            print_json(&user.get_current_time_entry()?)?;
        }
        Commands::Stop {
            workspace_id,
            time_entry_id,
        } => {
            let workspace = Session::load(config_path)?.workspace()?;
            print_json(&workspace.stop_time_entry(workspace_id, time_entry_id)?)?;
        }
        Commands::Report {
            workspace_id,
            start,
            end,
            page,
        } => {
            let search = ReportSearch {
                start_date: start.as_deref().map(parse_date).transpose()?,
                end_date: end.as_deref().map(parse_date).transpose()?,
                page_number: page,
                ..Default::default()
            };
            let reports = Session::load(config_path)?.reports()?;
            print_json(&reports.search(workspace_id, &search)?[..])?;
        }
    }

    Ok(())
}

/// Resolved settings and credentials for commands that talk to Toggl.
struct Session {
    config: Config,
    auth: Auth,
}

impl Session {
    fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = Config::load_from(path)?;
        let auth = config.auth()?;
        Ok(Self { config, auth })
    }

    fn current_user(&self) -> toggl_track::Result<CurrentUser> {
        CurrentUser::with_base_url(self.config.api_url(), self.auth.clone())
    }

    fn workspace(&self) -> toggl_track::Result<Workspace> {
        Workspace::with_base_url(self.config.api_url(), self.auth.clone())
    }

    fn reports(&self) -> toggl_track::Result<ReportTimeEntry> {
        ReportTimeEntry::with_base_url(self.config.reports_url(), self.auth.clone())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
