use std::env;
use anyhow::{anyhow, Result};
use log::error;
use crate::config::{load_config, Config};
use crate::initialization::{init, Mgr};
use crate::models::place::Place;

mod config;
mod errors;
mod favorites;
mod forecast;
mod initialization;
mod manager_astro;
mod manager_meteo;
mod manager_places;
mod models;
mod night;
mod report;
mod seeing;

/// Parsed command line
struct CliArgs {
    query: Option<String>,
    favorite: Option<String>,
    add_favorite: bool,
    remove_favorite: bool,
    list_favorites: bool,
    help: bool,
}

fn main() {
    let args = parse_args(env::args().skip(1));

    if args.help {
        print_usage();
        return;
    }

    let config_path = env::var("NIGHTWATCH_CONFIG")
        .unwrap_or("nightwatch.toml".to_string());
    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => { eprintln!("{}", e); std::process::exit(1); }
    };

    let mgr = match init(&config.general) {
        Ok(m) => m,
        Err(e) => { eprintln!("{}", e); std::process::exit(1); }
    };

    if let Err(e) = run(&config, &mgr, &args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Dispatches between favorites maintenance and the forecast report
///
/// # Arguments
///
/// * 'config' - the loaded configuration
/// * 'mgr' - the manager bundle
/// * 'args' - the parsed command line
fn run(config: &Config, mgr: &Mgr, args: &CliArgs) -> Result<()> {
    let favorites_file = &config.files.favorites_file;

    if args.list_favorites {
        let favorites = favorites::load_favorites(favorites_file)?;
        if favorites.is_empty() {
            println!("No favorites saved yet.");
        }
        for place in favorites {
            println!("{}", place);
        }
        return Ok(());
    }

    let place = resolve_place(config, mgr, args)?;

    if args.remove_favorite {
        if favorites::remove_favorite(favorites_file, &place)? {
            println!("Removed {} from favorites.", place.name);
        } else {
            println!("{} is not a favorite.", place.name);
        }
        return Ok(());
    }

    if args.add_favorite && favorites::add_favorite(favorites_file, &place)? {
        println!("Added {} to favorites.", place.name);
    }

    report::run_report(mgr, &place)
}

/// Resolves the place to report on: a favorite by name, the first
/// geocoder hit for a query, or the configured reference point
///
/// # Arguments
///
/// * 'config' - the loaded configuration
/// * 'mgr' - the manager bundle
/// * 'args' - the parsed command line
fn resolve_place(config: &Config, mgr: &Mgr, args: &CliArgs) -> Result<Place> {
    if let Some(name) = &args.favorite {
        return favorites::find_favorite(&config.files.favorites_file, name)?
            .ok_or(anyhow!("no favorite named '{}'", name));
    }

    if let Some(query) = &args.query {
        let places = mgr.places.search(query)?;
        return places.into_iter().next()
            .ok_or(anyhow!("no places found for '{}'", query));
    }

    Ok(Place {
        name: "Configured location".to_string(),
        address: String::new(),
        lat: config.geo_ref.lat,
        long: config.geo_ref.long,
    })
}

/// Parses the command line into flags and a free text query
///
/// # Arguments
///
/// * 'args' - the raw arguments, program name already skipped
fn parse_args<I: Iterator<Item = String>>(mut args: I) -> CliArgs {
    let mut parsed = CliArgs {
        query: None,
        favorite: None,
        add_favorite: false,
        remove_favorite: false,
        list_favorites: false,
        help: false,
    };
    let mut query_words: Vec<String> = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--favorite" => parsed.favorite = args.next(),
            "--add-favorite" => parsed.add_favorite = true,
            "--remove-favorite" => parsed.remove_favorite = true,
            "--list-favorites" => parsed.list_favorites = true,
            "--help" | "-h" => parsed.help = true,
            _ => query_words.push(arg),
        }
    }

    if !query_words.is_empty() {
        parsed.query = Some(query_words.join(" "));
    }

    parsed
}

fn print_usage() {
    println!("nightwatch {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: nightwatch [options] [place query]");
    println!();
    println!("With no query the configured reference location is used.");
    println!();
    println!("Options:");
    println!("  --favorite <name>    report on a saved favorite");
    println!("  --add-favorite       save the resolved place as a favorite");
    println!("  --remove-favorite    remove the resolved place from the favorites");
    println!("  --list-favorites     print the saved favorites");
    println!("  -h, --help           print this help");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> CliArgs {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn words_join_into_one_query() {
        let parsed = args(&["pic", "du", "midi"]);
        assert_eq!(parsed.query.as_deref(), Some("pic du midi"));
        assert!(!parsed.add_favorite);
    }

    #[test]
    fn flags_are_split_from_the_query() {
        let parsed = args(&["--add-favorite", "atacama"]);
        assert!(parsed.add_favorite);
        assert_eq!(parsed.query.as_deref(), Some("atacama"));
    }

    #[test]
    fn favorite_takes_a_value() {
        let parsed = args(&["--favorite", "Pic du Midi"]);
        assert_eq!(parsed.favorite.as_deref(), Some("Pic du Midi"));
        assert!(parsed.query.is_none());
    }
}
