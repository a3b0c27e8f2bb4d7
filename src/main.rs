//! Elidune Books - command line front end
//!
//! Browse and edit the book catalog of an Elidune books service.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elidune_books::{
    config::{AppConfig, LoggingConfig},
    error::{AppError, AppResult},
    ui::{
        self, layout::render_layout, list::DELETE_CONFIRMATION, BookFormPage, BookListPage,
        ErrorBoundary, Route, SubmitOutcome,
    },
    validation::BookField,
    AppState,
};

#[derive(Parser)]
#[command(name = "elidune-books", version, about = "Manage the Elidune book catalog")]
struct Cli {
    /// Base URL of the books resource (overrides configuration)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every book
    List,
    /// Search books by title, subtitle or ISBN
    Search { query: String },
    /// Show one book
    Show { id: String },
    /// Add a book
    Add(BookArgs),
    /// Edit a book, by id or ISBN
    Edit {
        id: String,
        #[command(flatten)]
        fields: BookArgs,
    },
    /// Delete a book
    Delete {
        id: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Render a page: `/`, `/add` or `/edit/{id}`
    Open { path: String },
}

#[derive(Args)]
struct BookArgs {
    #[arg(long)]
    isbn: Option<String>,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    subtitle: Option<String>,
    /// Copyright year
    #[arg(long)]
    year: Option<String>,
    /// PENDING, REJECTED or APPROVED
    #[arg(long)]
    status: Option<String>,
}

impl BookArgs {
    fn values(&self) -> [(BookField, Option<&String>); 5] {
        [
            (BookField::Isbn, self.isbn.as_ref()),
            (BookField::Title, self.title.as_ref()),
            (BookField::Subtitle, self.subtitle.as_ref()),
            (BookField::CopyrightYear, self.year.as_ref()),
            (BookField::Status, self.status.as_ref()),
        ]
    }

    /// Apply every given value to the form
    fn apply(&self, page: &mut BookFormPage) -> AppResult<()> {
        for (field, value) in self.values() {
            if let Some(value) = value {
                page.change(field, value)?;
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_tracing(&config.logging);
    tracing::debug!("Using books service at {}", config.api.base_url);

    let state = AppState::new(config)?;
    let mut boundary = ErrorBoundary::new();

    let result = run(&state, cli.command).await;
    let failed = result.is_err();
    println!("{}", boundary.render(|| result));

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("elidune_books={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

async fn run(state: &AppState, command: Command) -> AppResult<String> {
    match command {
        Command::List => ui::render_route(state, &Route::List).await,
        Command::Open { path } => {
            let route: Route = path.parse()?;
            ui::render_route(state, &route).await
        }
        Command::Search { query } => {
            let mut page = BookListPage::open(state);
            page.settled().await;
            page.set_search_term(query);
            page.search().await;
            Ok(render_layout(&Route::List, &page.render()))
        }
        Command::Show { id } => {
            let book = state.api.get_book(&id).await?;
            Ok(ui::render_book(&book))
        }
        Command::Add(fields) => {
            let mut page = BookFormPage::add(state);
            page.settled().await;
            fields.apply(&mut page)?;
            submit(page, &Route::Add).await
        }
        Command::Edit { id, fields } => {
            let mut page = BookFormPage::edit(state, &id);
            page.settled().await;
            if let Some(error) = page.load_error() {
                return Err(AppError::Render(format!("Error: {}", error)));
            }
            if page.loaded_book_id().is_none() {
                return Err(AppError::NotFound(format!("No book with id or ISBN '{}'", id)));
            }
            fields.apply(&mut page)?;
            submit(page, &Route::Edit(id)).await
        }
        Command::Delete { id, yes } => {
            let mut page = BookListPage::open(state);
            page.settled().await;
            let confirmed = yes || confirm(DELETE_CONFIRMATION)?;
            if !confirmed {
                return Ok("Cancelled".to_string());
            }
            if page.delete(&id, true).await {
                Ok(format!("Deleted book {}", id))
            } else {
                Err(AppError::Render(page.notice().unwrap_or_default().to_string()))
            }
        }
    }
}

async fn submit(mut page: BookFormPage, route: &Route) -> AppResult<String> {
    match page.submit().await {
        SubmitOutcome::Saved(book) => Ok(ui::render_book(&book)),
        SubmitOutcome::Invalid => Err(AppError::Render(render_layout(route, &page.render()))),
        SubmitOutcome::Failed => Err(AppError::Render(
            page.submit_error().unwrap_or_default().to_string(),
        )),
    }
}

fn confirm(question: &str) -> AppResult<bool> {
    print!("{} [y/N] ", question);
    io::stdout()
        .flush()
        .map_err(|e| AppError::Render(e.to_string()))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| AppError::Render(e.to_string()))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
