use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use listing_catalog::catalog::{Favorites, FilterSpec, JsonFileStore, PageLink};
use listing_catalog::catalog::{ProductViewModel, PropertyViewModel, ServiceViewModel};
use listing_catalog::{CatalogSource, Config, HttpCatalog, MockCatalog};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-catalog", about = "Browse the property and service catalogue")]
struct Cli {
    /// Use the built-in demo listings instead of the API
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List properties matching the given filters
    Properties {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        /// Derived type such as "Studio" or "T2"
        #[arg(long = "type")]
        type_code: Option<String>,
        #[arg(long)]
        featured: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Print view models as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one property in detail
    Property { id: String },
    /// List shop products
    Products {
        #[arg(long = "type")]
        type_code: Option<String>,
    },
    /// List accompaniment services in display order
    Services,
    /// Toggle a property in the saved favorites
    Favorite { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    config.use_mock |= cli.mock;

    let source = build_source(&config)?;
    info!("Using {} catalogue source", source.source_name());

    match cli.command {
        Command::Properties {
            search,
            city,
            min_price,
            max_price,
            type_code,
            featured,
            page,
            limit,
            json,
        } => {
            let mut filter = FilterSpec::new().price_between(min_price, max_price).page(page, limit);
            filter.search = search;
            filter.city = city;
            filter.type_code = type_code;
            if featured {
                filter.is_featured = Some(true);
            }

            let page = source.properties(&filter).await?;
            let views = page.clone().map(|p| PropertyViewModel::build(&p));

            if json {
                println!("{}", serde_json::to_string_pretty(&views.items)?);
                return Ok(());
            }

            let (first, last) = page.display_range();
            info!("Showing {}-{} of {} properties", first, last, page.total);

            for (i, view) in views.items.iter().enumerate() {
                println!("{}. {} ({})", first + i, view.title, view.monthly_price);
                println!("   {} | {} | {} ch. | {}", view.property_type, view.area, view.beds, view.short_address);
                println!("   ID: {}", view.id);
                println!();
            }
            println!("Pages: {}", render_pages(&page.visible_pages()));
        }
        Command::Property { id } => {
            let property = source.property(&id).await?;
            let view = PropertyViewModel::build(&property);

            println!("{}", view.title);
            println!("   {}", view.full_address);
            println!("   Loyer: {} + charges {}", view.monthly_price, view.charges);
            println!("   Total mensuel: {}", view.total_monthly_cost);
            println!("   Dépôt: {} | Frais de dossier: {}", view.deposit, view.application_fees);
            println!("   {} | {} | {} pièces | {} ch. | {} sdb", view.property_type, view.area, view.rooms, view.beds, view.baths);
            if !view.features.is_empty() {
                println!("   Équipements: {}", view.features.join(", "));
            }
            println!("   Image: {}", view.main_image);
        }
        Command::Products { type_code } => {
            let mut filter = FilterSpec::new();
            filter.type_code = type_code;

            let page = source.products(&filter).await?;
            info!("Found {} products", page.total);

            for (i, view) in page.items.iter().map(ProductViewModel::build).enumerate() {
                match &view.original_price {
                    Some(original) => println!("{}. {} [{}] {} (au lieu de {})", i + 1, view.title, view.type_label, view.price, original),
                    None => println!("{}. {} [{}] {}", i + 1, view.title, view.type_label, view.price),
                }
            }
        }
        Command::Services => {
            let services = source.all_services().await?;
            let services = listing_catalog::catalog::view_model::sort_services_by_order(&services);

            for (i, view) in services.iter().map(ServiceViewModel::build).enumerate() {
                println!("{}. {} ({})", i + 1, view.title, view.price);
                println!("   {}", view.short_description);
            }
        }
        Command::Favorite { id } => {
            let store = JsonFileStore::new(&config.favorites_path);
            let mut favorites = Favorites::load(store);

            if favorites.toggle(&id) {
                info!("⭐ Added {} to favorites", id);
            } else {
                info!("Removed {} from favorites", id);
            }
            println!("{} favorites saved to {}", favorites.ids().len(), config.favorites_path.display());
        }
    }

    Ok(())
}

fn build_source(config: &Config) -> Result<Arc<dyn CatalogSource>> {
    if config.use_mock {
        let catalog = MockCatalog::demo().context("Failed to load demo listings")?;
        return Ok(Arc::new(catalog));
    }

    let fallback = MockCatalog::demo().context("Failed to load fallback services")?;
    let catalog = HttpCatalog::from_config(config)
        .context("Failed to create HTTP client")?
        .with_service_fallback(fallback);
    Ok(Arc::new(catalog))
}

fn render_pages(links: &[PageLink]) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Number(n) => n.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
