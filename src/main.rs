use clap::{Arg, ArgAction, ArgMatches, Command};
use log::debug;

use recipe_browser::{
    detail_resolver, listing_controller, query, BrowserConfig, DetailState, Facet, Selection,
};

fn cli() -> Command {
    let facet_arg = |facet: Facet, help: &'static str| {
        Arg::new(facet.key())
            .long(facet.key())
            .value_name("VALUE")
            .help(help)
            .action(ArgAction::Append)
    };

    Command::new("recipe-browser")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Browse recipes from the configured provider")
        .subcommand_required(true)
        .subcommand(
            Command::new("facets").about("Print the ingredient, country and category options"),
        )
        .subcommand(
            Command::new("list")
                .about("List recipes, optionally filtered")
                .arg(facet_arg(Facet::Ingredient, "Filter by ingredient (repeatable)"))
                .arg(facet_arg(Facet::Country, "Filter by country (repeatable)"))
                .arg(facet_arg(Facet::Category, "Filter by category (repeatable)")),
        )
        .subcommand(
            Command::new("show")
                .about("Show one recipe and the other recipes in its category")
                .arg(Arg::new("id").value_name("ID").required(true)),
        )
}

fn selection_from(matches: &ArgMatches) -> Selection {
    let mut selection = Selection::default();
    for facet in Facet::ALL {
        let values = matches
            .get_many::<String>(facet.key())
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        selection.set(facet, values);
    }
    selection
}

async fn print_facets(config: &BrowserConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut listing = listing_controller(config)?;
    listing.mount().await;

    for facet in Facet::ALL {
        let options = listing.options().get(facet);
        println!("{} ({}):", facet.label(), options.len());
        for option in options {
            println!("  {}", option);
        }
    }
    Ok(())
}

async fn print_listing(
    config: &BrowserConfig,
    selection: &Selection,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut listing = listing_controller(config)?;
    let location = query::listing_url(&config.listing_path, selection);
    debug!("Loading {}", location);
    listing.on_url_change(&location).await?;

    println!("{}", listing.title());
    for recipe in listing.results() {
        println!("- [{}] {} ({}, {})", recipe.id, recipe.name, recipe.category, recipe.area);
    }
    Ok(())
}

async fn print_detail(config: &BrowserConfig, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut detail = detail_resolver(config)?;
    detail
        .on_url_change(&query::detail_url(&config.detail_path, id))
        .await?;

    match detail.state() {
        DetailState::NotFound { id } => {
            println!("No recipe with id {}", id);
            return Ok(());
        }
        DetailState::Idle | DetailState::Loading { .. } => {
            println!("Loading...");
            return Ok(());
        }
        _ => {}
    }

    if let Some(recipe) = detail.recipe() {
        println!("{}", recipe.name);
        println!("Country: {}", recipe.area);
        println!();
        println!("{}", recipe.instructions);
        println!();
        println!("Ingredients:");
        for ingredient in detail.ingredients() {
            println!("  {}", ingredient);
        }
        println!();
        println!("More in {}:", recipe.category);
        for related in detail.related() {
            println!("  [{}] {}", related.id, related.name);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let matches = cli().get_matches();
    let config = BrowserConfig::load()?;
    debug!("Using provider at {}", config.base_url);

    match matches.subcommand() {
        Some(("facets", _)) => print_facets(&config).await,
        Some(("list", sub)) => print_listing(&config, &selection_from(sub)).await,
        Some(("show", sub)) => {
            let id = sub
                .get_one::<String>("id")
                .ok_or("Please provide a recipe id")?;
            print_detail(&config, id).await
        }
        _ => Ok(()),
    }
}
