use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use locres::{Culture, DictionaryLoader, ResourceDictionary, Resources, Result};

/// Load resource dictionaries from a folder and resolve values.
#[derive(Debug, Parser)]
#[command(name = "locres", version)]
struct Args {
    /// Folder to load dictionaries from (searched recursively)
    folder: PathBuf,

    /// Keys to resolve, as `name` or `category/name`; prints the whole
    /// resolved dictionary when omitted
    keys: Vec<String>,

    /// Document format to load
    #[arg(long, value_enum, default_value_t = Format::All)]
    format: Format,

    /// Glob overriding the format's file pattern (requires --format json or xml)
    #[arg(long)]
    pattern: Option<String>,

    /// Culture to resolve values for
    #[arg(long, default_value = "en-US")]
    culture: String,

    /// Culture used when the requested one is not available
    #[arg(long)]
    default_culture: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Xml,
    All,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let resources = Resources::new();
    if let Some(tag) = &args.default_culture {
        resources.set_default_culture(tag.parse()?)?;
    }

    let loader = DictionaryLoader::new(&resources, &args.folder)?;
    match (args.format, &args.pattern) {
        (Format::Json, Some(pattern)) => {
            loader.load_with(".", pattern, |r| locres::l10n::format::json::load(r))?;
        }
        (Format::Xml, Some(pattern)) => {
            loader.load_with(".", pattern, |r| locres::l10n::format::xml::load(r))?;
        }
        (Format::Json, None) => {
            loader.load_json(".")?;
        }
        (Format::Xml, None) => {
            loader.load_xml(".")?;
        }
        (Format::All, _) => {
            loader.load_json(".")?.load_xml(".")?;
        }
    }

    let cultures: Vec<String> = resources.cultures()?.iter().map(Culture::to_string).collect();
    println!("Cultures: {}", cultures.join(", "));

    let requested: Culture = args.culture.parse()?;
    let resolved = resources.current_culture(&requested)?;
    println!("Culture: {} (requested {})", resolved, requested);
    println!("{}", "=".repeat(60));

    if args.keys.is_empty() {
        let dictionary = resources.dictionary(&requested)?.snapshot()?;
        for (key, value) in dictionary.values() {
            println!("{} = {}", key, value);
        }
        return Ok(());
    }

    for key in &args.keys {
        let value = match key.rsplit_once('/') {
            Some((category, name)) => resources.get_in(&requested, category, name)?,
            None => resources.get(&requested, key)?,
        };
        match value {
            Some(value) => println!("{} = {}", key, value),
            None => println!("{} (not found)", key),
        }
    }

    Ok(())
}
