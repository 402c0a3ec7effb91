use anyhow::{Context, Result};
use clap::{App as Cli, AppSettings, Arg, SubCommand};
use feed_sync::app::{App, Command};
use feed_sync::config::Config;
use feed_sync::logger;
use log::LevelFilter;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = Cli::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom configuration directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Increases logging verbosity"),
        )
        .subcommand(
            SubCommand::with_name("login")
                .about("Stores the access token for feed requests")
                .arg(Arg::with_name("TOKEN").required(true)),
        )
        .subcommand(
            SubCommand::with_name("page")
                .about("Shows a page of the feed")
                .arg(Arg::with_name("NUMBER").default_value("1")),
        )
        .subcommand(
            SubCommand::with_name("create")
                .about("Creates a post")
                .arg(title_arg().required(true))
                .arg(content_arg().required(true))
                .arg(image_arg()),
        )
        .subcommand(
            SubCommand::with_name("edit")
                .about("Edits a post shown on the given page")
                .arg(Arg::with_name("ID").required(true))
                .arg(page_arg())
                .arg(title_arg())
                .arg(content_arg())
                .arg(image_arg()),
        )
        .subcommand(
            SubCommand::with_name("delete")
                .about("Deletes a post shown on the given page")
                .arg(Arg::with_name("ID").required(true))
                .arg(page_arg()),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Shows or updates the user status")
                .arg(Arg::with_name("VALUE")),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    logger::init(level)?;

    let mut config = Config::load(matches.value_of("config").map(Path::new))
        .context("Failed to load configuration")?;

    let command = match matches.subcommand() {
        ("login", Some(sub)) => {
            let token = sub.value_of("TOKEN").unwrap_or_default().to_string();
            config.save_token(token).context("Failed to save access token")?;
            println!("Access token saved.");
            return Ok(());
        }
        ("page", Some(sub)) => Command::Page {
            number: parse_page(sub.value_of("NUMBER"))?,
        },
        ("create", Some(sub)) => Command::Create {
            title: sub.value_of("title").unwrap_or_default().to_string(),
            content: sub.value_of("content").unwrap_or_default().to_string(),
            image: sub.value_of("image").map(PathBuf::from),
        },
        ("edit", Some(sub)) => Command::Edit {
            page: parse_page(sub.value_of("page"))?,
            id: sub.value_of("ID").unwrap_or_default().to_string(),
            title: sub.value_of("title").map(str::to_string),
            content: sub.value_of("content").map(str::to_string),
            image: sub.value_of("image").map(PathBuf::from),
        },
        ("delete", Some(sub)) => Command::Delete {
            page: parse_page(sub.value_of("page"))?,
            id: sub.value_of("ID").unwrap_or_default().to_string(),
        },
        ("status", Some(sub)) => Command::Status {
            value: sub.value_of("VALUE").map(str::to_string),
        },
        _ => {
            eprintln!("{}", matches.usage());
            return Ok(());
        }
    };

    App::start(config, command).await?;
    Ok(())
}

fn parse_page(value: Option<&str>) -> Result<u32> {
    let raw = value.unwrap_or("1");
    raw.parse::<u32>()
        .with_context(|| format!("Invalid page number: {}", raw))
}

fn title_arg() -> Arg<'static, 'static> {
    Arg::with_name("title")
        .short("t")
        .long("title")
        .takes_value(true)
        .help("Post title")
}

fn content_arg() -> Arg<'static, 'static> {
    Arg::with_name("content")
        .short("b")
        .long("content")
        .takes_value(true)
        .help("Post content")
}

fn image_arg() -> Arg<'static, 'static> {
    Arg::with_name("image")
        .short("i")
        .long("image")
        .value_name("FILE")
        .takes_value(true)
        .help("Image file to upload with the post")
}

fn page_arg() -> Arg<'static, 'static> {
    Arg::with_name("page")
        .short("p")
        .long("page")
        .takes_value(true)
        .default_value("1")
        .help("Page the post is listed on")
}
