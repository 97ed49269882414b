use std::{process, sync::Arc};

use foglio::{
    application::{
        chrome::ChromeService,
        error::AppError,
        feed::{FeedFilter, FeedService},
    },
    config::{self, Command, Settings},
    domain::selection::CategorySelection,
    infra::{archive::ArchiveRepo, telemetry},
    presentation::views::HomeView,
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let command = cli_args
        .command
        .unwrap_or(Command::Feed(config::FeedArgs::default()));

    match command {
        Command::Feed(args) => run_feed(settings, args.category),
        Command::Categories(_) => run_categories(settings),
        Command::Check(_) => run_check(settings),
    }
}

fn load_source(settings: &Settings) -> Result<Arc<ArchiveRepo>, AppError> {
    let source = ArchiveRepo::load(&settings.content.archive)?;
    info!(
        path = %settings.content.archive.display(),
        posts = source.report().accepted,
        "content archive loaded"
    );
    Ok(Arc::new(source))
}

fn run_feed(settings: Settings, category: Option<String>) -> Result<(), AppError> {
    let source = load_source(&settings)?;

    let mut selection = CategorySelection::new();
    if let Some(category) = category {
        selection.select(category);
    }

    let feed = FeedService::new(source.clone(), settings.feed.clone());
    let chrome = ChromeService::new(source);

    let view = HomeView {
        chrome: chrome.load()?,
        feed: feed.home_view(&FeedFilter::from_selection(&selection))?,
    };

    print_json(&view)
}

fn run_categories(settings: Settings) -> Result<(), AppError> {
    let source = load_source(&settings)?;
    let feed = FeedService::new(source, settings.feed.clone());
    print_json(&feed.category_summaries()?)
}

fn run_check(settings: Settings) -> Result<(), AppError> {
    let source = load_source(&settings)?;
    print_json(source.report())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let encoded = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::unexpected(format!("failed to encode output: {err}")))?;
    println!("{encoded}");
    Ok(())
}
