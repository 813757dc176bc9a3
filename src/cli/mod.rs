mod commands;
pub mod error;
pub mod utils;

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use commands::itwin::ITwinSource;
use commands::{CommandContext, ListParams};

#[derive(Parser)]
#[command(name = "itb")]
#[command(author, version, about = "Browse iTwins, iModels and projects", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: ITB_API_URL env or https://api.bentley.com)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Access token (default: ITB_ACCESS_TOKEN env)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Items requested per page (default: ITB_PAGE_SIZE env or 100)
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// iModel commands
    #[command(name = "imodels")]
    IModels {
        #[command(subcommand)]
        command: IModelCommands,
    },
    /// iTwin commands
    #[command(name = "itwins")]
    ITwins {
        #[command(subcommand)]
        command: ITwinCommands,
    },
    /// Project commands
    Projects {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Named version commands
    Versions {
        #[command(subcommand)]
        command: VersionCommands,
    },
    /// Changeset commands
    Changesets {
        #[command(subcommand)]
        command: ChangesetCommands,
    },
    /// Favorite iTwin commands
    Favorites {
        #[command(subcommand)]
        command: FavoriteCommands,
    },
}

/// Search, sort and output options shared by list commands
#[derive(Args)]
struct ListArgs {
    /// Search text
    #[arg(long)]
    search: Option<String>,
    /// Sort key (e.g. displayName, createdDateTime)
    #[arg(long)]
    sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    desc: bool,
    /// Fetch every page instead of only the first
    #[arg(long)]
    all: bool,
    /// Output format (table or json)
    #[arg(long, default_value = "table")]
    format: String,
}

impl ListArgs {
    fn params(&self) -> ListParams<'_> {
        ListParams {
            search: self.search.as_deref(),
            sort: self.sort.as_deref(),
            descending: self.desc,
            all: self.all,
        }
    }
}

#[derive(Subcommand)]
enum IModelCommands {
    /// List the iModels of an iTwin
    List {
        /// iTwin ID
        #[arg(long)]
        itwin: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Download an iModel thumbnail
    Thumbnail {
        /// iModel ID
        id: String,
        /// Output file; prints a data URL when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ITwinCommands {
    /// List project iTwins
    List {
        /// Only recently used iTwins
        #[arg(long)]
        recent: bool,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects
    List {
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand)]
enum VersionCommands {
    /// List the named versions of an iModel
    List {
        /// iModel ID
        #[arg(long)]
        imodel: String,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand)]
enum ChangesetCommands {
    /// List the changesets of an iModel
    List {
        /// iModel ID
        #[arg(long)]
        imodel: String,
        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand)]
enum FavoriteCommands {
    /// List favorite iTwins
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Mark an iTwin as favorite
    Add {
        /// iTwin ID
        id: String,
    },
    /// Unmark a favorite iTwin
    Remove {
        /// iTwin ID
        id: String,
    },
}

/// Initialize tracing subscriber with env filter, logging to stderr
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "itwin_browser=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let Some(command) = cli.command else {
        // Show help when no command provided
        Cli::command().print_help().map_err(error::CliError::from)?;
        return Ok(());
    };

    let config = Config::new()
        .with_api_url(cli.api_url)
        .with_access_token(cli.token)
        .with_page_size(cli.page_size);
    let ctx = CommandContext::new(config);

    let output = match command {
        Commands::IModels { command } => match command {
            IModelCommands::List { itwin, list } => {
                commands::imodel::list_imodels(&ctx, &itwin, list.params(), &list.format).await
            }
            IModelCommands::Thumbnail { id, out } => {
                commands::imodel::thumbnail(&ctx, &id, out.as_deref()).await
            }
        },
        Commands::ITwins { command } => match command {
            ITwinCommands::List { recent, list } => {
                let source = if recent {
                    ITwinSource::Recent
                } else {
                    ITwinSource::All
                };
                commands::itwin::list_itwins(&ctx, source, list.params(), &list.format).await
            }
        },
        Commands::Projects { command } => match command {
            ProjectCommands::List { list } => {
                commands::project::list_projects(&ctx, list.params(), &list.format).await
            }
        },
        Commands::Versions { command } => match command {
            VersionCommands::List { imodel, list } => {
                commands::version::list_named_versions(&ctx, &imodel, list.params(), &list.format)
                    .await
            }
        },
        Commands::Changesets { command } => match command {
            ChangesetCommands::List { imodel, list } => {
                commands::version::list_changesets(&ctx, &imodel, list.params(), &list.format)
                    .await
            }
        },
        Commands::Favorites { command } => match command {
            FavoriteCommands::List { list } => {
                commands::favorite::list_favorites(&ctx, list.params(), &list.format).await
            }
            FavoriteCommands::Add { id } => commands::favorite::add_favorite(&ctx, &id).await,
            FavoriteCommands::Remove { id } => {
                commands::favorite::remove_favorite(&ctx, &id).await
            }
        },
    }?;

    println!("{}", output);
    Ok(())
}
