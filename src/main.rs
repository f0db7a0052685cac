use clap::{Parser, Subcommand, ValueEnum};
use easel_catalog::catalog::EditionId;
use easel_catalog::config::{self, CatalogConfig};
use easel_catalog::filter::{Facet, FacetValue};
use easel_catalog::inquiry::{ContactForm, InquiryOutbox};
use easel_catalog::repository::InMemoryCatalog;
use easel_catalog::view::{ArtworkDetail, CatalogPage, GalleryView};
use easel_catalog::{codec, output, render};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "easel")]
#[command(about = "Browse, filter, and render an artist's catalog")]
#[command(long_about = "\
Browse, filter, and render an artist's catalog

The catalog is a JSON file with two arrays:

  {
    \"artworks\": [ { \"id\": \"a1\", \"slug\": \"harbour-at-dusk\", \"type\": \"original\", ... } ],
    \"editions\": [ { \"id\": \"e1\", \"artwork_id\": \"a2\", \"edition_size\": 100, ... } ]
  }

Filters use the same query string as the site's address bar:

  type=original|print  status=available|sold|reserved
  medium=<text>        year=<number>        search=<text>

Run 'easel gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Log verbosity; RUST_LOG takes precedence when set
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum Page {
    #[default]
    Gallery,
    Originals,
    Prints,
}

impl From<Page> for CatalogPage {
    fn from(page: Page) -> Self {
        match page {
            Page::Gallery => CatalogPage::Gallery,
            Page::Originals => CatalogPage::Originals,
            Page::Prints => CatalogPage::Prints,
        }
    }
}

#[derive(clap::Args)]
struct CatalogArgs {
    /// Catalog JSON file
    #[arg(long, default_value = "catalog.json")]
    catalog: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// List the artworks matching a filter query
    Browse {
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Filter query string, e.g. "type=print&status=available"
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, value_enum, default_value = "gallery")]
        page: Page,
    },
    /// Print the query string after toggling one filter value
    Toggle {
        #[arg(long, default_value = "")]
        query: String,
        /// type, status, medium, year, or search
        facet: String,
        value: String,
    },
    /// Show one artwork with its editions
    Show {
        #[command(flatten)]
        catalog: CatalogArgs,
        slug: String,
        /// Edition to select instead of the first
        #[arg(long)]
        edition: Option<String>,
    },
    /// Assemble and submit an inquiry for an artwork
    Inquire {
        #[command(flatten)]
        catalog: CatalogArgs,
        slug: String,
        #[arg(long)]
        edition: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        country: String,
        #[arg(long, default_value = "")]
        message: String,
    },
    /// Write an HTML page for a listing, or for one artwork with --slug
    Render {
        #[command(flatten)]
        catalog: CatalogArgs,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, value_enum, default_value = "gallery")]
        page: Page,
        /// Render this artwork's detail page instead of the listing
        #[arg(long)]
        slug: Option<String>,
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    match cli.command {
        Command::Browse {
            catalog,
            query,
            page,
        } => {
            let config = config::load_config_file(&cli.config)?;
            let repo = load_catalog(&catalog.catalog)?;
            let view = GalleryView::open(&repo, page.into(), &query);
            output::print_browse_output(
                view.page().title(),
                &view.href(),
                view.filters(),
                view.results(),
                &config.site.currency,
            );
        }
        Command::Toggle {
            query,
            facet,
            value,
        } => {
            let facet = Facet::from_key(&facet).ok_or_else(|| format!("unknown facet: {facet}"))?;
            let value = FacetValue::parse(facet, &value)
                .ok_or_else(|| format!("invalid {facet} value: {value:?}"))?;
            let mut state = codec::from_query_string(&query);
            state.toggle(value);
            println!("{}", codec::to_query_string(&state));
        }
        Command::Show {
            catalog,
            slug,
            edition,
        } => {
            let config = config::load_config_file(&cli.config)?;
            let repo = load_catalog(&catalog.catalog)?;
            let mut detail = ArtworkDetail::load(&repo, &slug)?;
            select_edition(&mut detail, edition.as_deref());
            output::print_detail_output(&detail, &config.site.currency);
        }
        Command::Inquire {
            catalog,
            slug,
            edition,
            name,
            email,
            country,
            message,
        } => {
            let repo = load_catalog(&catalog.catalog)?;
            let mut detail = ArtworkDetail::load(&repo, &slug)?;
            select_edition(&mut detail, edition.as_deref());
            let outbox = InquiryOutbox::new();
            let form = ContactForm {
                name,
                email,
                country,
                message,
            };
            let draft = detail.inquire(&outbox, &form)?;
            for line in output::format_inquiry_output(&draft) {
                println!("{}", line);
            }
            println!("{}", serde_json::to_string_pretty(&draft)?);
        }
        Command::Render {
            catalog,
            query,
            page,
            slug,
            output,
        } => {
            let config = config::load_config_file(&cli.config)?;
            let repo = load_catalog(&catalog.catalog)?;
            let html = render_page(&repo, &config, &query, page.into(), slug.as_deref())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    info!(path = %path.display(), "wrote page");
                }
                None => println!("{}", html),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<InMemoryCatalog, Box<dyn std::error::Error>> {
    let repo = InMemoryCatalog::load(path)?;
    info!(
        path = %path.display(),
        artworks = repo.artworks().len(),
        editions = repo.editions().len(),
        "loaded catalog"
    );
    Ok(repo)
}

fn select_edition(detail: &mut ArtworkDetail, edition: Option<&str>) {
    if let Some(id) = edition {
        if !detail.select_edition(&EditionId::from(id)) {
            warn!(edition = id, "edition not offered for this artwork; keeping default");
        }
    }
}

fn render_page(
    repo: &InMemoryCatalog,
    config: &CatalogConfig,
    query: &str,
    page: CatalogPage,
    slug: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    let markup = match slug {
        Some(slug) => render::render_detail_page(&ArtworkDetail::load(repo, slug)?, config),
        None => render::render_gallery_page(&GalleryView::open(repo, page, query), config),
    };
    Ok(markup.into_string())
}
