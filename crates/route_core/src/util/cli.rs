use std::path::PathBuf;

use clap::Parser;

use crate::search::EngineKind;

#[derive(Parser)]
#[command(author = "Daniel Holzner", version, about, long_about = None)]
struct Cli {
    /// Path to the csv file with the cities (id,x,y)
    nodes_file: PathBuf,

    /// Path to the csv file with the roads (source,target)
    edges_file: PathBuf,

    /// Id of the origin city
    origin: String,

    /// Id of the destination city
    destination: String,

    /// Search engine to use
    #[arg(short, long, value_enum, default_value_t = EngineKind::Linear)]
    engine: EngineKind,

    /// Print the whole predecessor table of the origin
    #[arg(short, long)]
    table: bool,
}

#[derive(Debug, Clone)]
pub struct Cfg {
    pub nodes_file: PathBuf,
    pub edges_file: PathBuf,
    pub origin: String,
    pub destination: String,
    pub engine: EngineKind,
    pub print_table: bool,
}

impl From<Cli> for Cfg {
    fn from(cli: Cli) -> Self {
        Cfg {
            nodes_file: cli.nodes_file,
            edges_file: cli.edges_file,
            origin: cli.origin.trim().to_string(),
            destination: cli.destination.trim().to_string(),
            engine: cli.engine,
            print_table: cli.table,
        }
    }
}

pub fn parse() -> Cfg {
    Cli::parse().into()
}
