use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use blog_core::{render, BlogApi, BlogClient, Dashboard, DashboardConfig, UreqTransport};

#[derive(Debug, Parser)]
#[command(name = "blog-dashboard", about = "Manage blog posts against a /api/blogs server")]
struct Cli {
    /// Host serving /api/blogs; overrides BLOG_API_URL.
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load and show every post.
    List,
    /// Show a single post.
    Show { id: String },
    /// Create a new post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        author: String,
    },
    /// Edit an existing post; omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// Delete a post.
    Delete { id: String },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::from_env().context("loading configuration")?;
    if let Some(url) = cli.url {
        config = config.with_api_url(url)?;
    }
    init_tracing(config.json_logs);

    let client = BlogClient::new(&config.api_url);
    let transport = UreqTransport::new();
    let mut dashboard = Dashboard::new(client.clone());

    if let Command::Show { id } = &cli.command {
        let api = BlogApi::new(client, transport);
        let post = api.get_by_id(id).with_context(|| format!("fetching post {id}"))?;
        print!("{}", render::render_card(&post));
        return Ok(());
    }

    let pending = dashboard.load();
    dashboard.drive(pending, &transport);

    match cli.command {
        Command::List | Command::Show { .. } => {}
        Command::Create {
            title,
            content,
            author,
        } => {
            dashboard.open_for_create();
            let draft = dashboard.draft_mut();
            draft.title = title;
            draft.content = content;
            draft.author = author;
            submit(&mut dashboard, &transport);
        }
        Command::Edit {
            id,
            title,
            content,
            author,
        } => {
            let Some(post) = dashboard.find(&id).cloned() else {
                bail!("no post with id {id}");
            };
            dashboard.open_for_edit(&post);
            let draft = dashboard.draft_mut();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = content;
            }
            if let Some(author) = author {
                draft.author = author;
            }
            submit(&mut dashboard, &transport);
        }
        Command::Delete { id } => {
            let Some(post) = dashboard.find(&id).cloned() else {
                bail!("no post with id {id}");
            };
            let pending = dashboard.delete(&post);
            let Some(refetch) = dashboard.step(pending, &transport) else {
                print!("{}", render::render(dashboard.state()));
                bail!("post {id} was not deleted; see log for details");
            };
            dashboard.drive(refetch, &transport);
        }
    }

    print!("{}", render::render(dashboard.state()));
    if dashboard.state().dialog_open {
        bail!("submit failed; see log for details");
    }
    Ok(())
}

fn submit(dashboard: &mut Dashboard, transport: &UreqTransport) {
    if let Some(pending) = dashboard.submit() {
        dashboard.drive(pending, transport);
    }
}
