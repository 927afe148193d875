//! Interactive shell to query routes on a map loaded from csv files
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context as _};
use log::info;
use reedline_repl_rs::clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use reedline_repl_rs::{Repl, Result};
use route_core::{
    prelude::*,
    statistics::{average_degree, isolated_nodes, max_degree},
};

/// Print map info
fn info(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let g = context.graph.snapshot();
    Ok(Some(format!(
        "{}\navg. degree: {:.2}, max. degree: {}, isolated cities: {}",
        g,
        average_degree(&g),
        max_degree(&g),
        isolated_nodes(&g)
    )))
}

fn cities(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let g = context.graph.snapshot();
    Ok(Some(g.node_ids().join(" ")))
}

fn route(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let src = arg(&args, "src");
    let dst = arg(&args, "dst");
    let kind = if args.get_flag("heap") {
        EngineKind::Heap
    } else {
        EngineKind::Linear
    };

    let g = context.graph.snapshot();
    let mut engine = kind.engine(&g);
    let result = engine
        .shortest_paths(src)
        .and_then(|table| render_path(&table, dst));

    let mut out = match result {
        Ok(sp) => sp.to_string(),
        Err(err) => err.to_string(),
    };
    out.push_str(&format!("\nTook: {:?}", engine.stats().duration.unwrap_or_default()));
    Ok(Some(out))
}

fn table(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    let src = arg(&args, "src");

    let g = context.graph.snapshot();
    let table = match shortest_paths(&g, src) {
        Ok(table) => table,
        Err(err) => return Ok(Some(err.to_string())),
    };

    let mut rows: Vec<_> = table.iter().collect();
    rows.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut out = String::new();
    for (id, entry) in rows {
        match entry {
            TableEntry::Discovered {
                predecessor,
                distance,
            } => out.push_str(&format!(
                "{}\t{}\t{:.3}\n",
                id,
                predecessor.as_deref().unwrap_or("-"),
                distance
            )),
            TableEntry::Undiscovered => out.push_str(&format!("{}\t-\tunreachable\n", id)),
        }
    }
    Ok(Some(out))
}

fn measure(args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    use rand::seq::SliceRandom;

    let n = *args.get_one::<usize>("n").unwrap_or(&10);

    let g = context.graph.snapshot();
    let ids = g.node_ids();
    let mut rng = rand::thread_rng();

    let mut res = String::new();
    for kind in [EngineKind::Linear, EngineKind::Heap] {
        let mut engine = kind.engine(&g);
        let mut total = Duration::ZERO;
        let mut found = 0;

        for _ in 0..n {
            let (Some(src), Some(dst)) = (ids.choose(&mut rng), ids.choose(&mut rng)) else {
                break;
            };
            let result = engine
                .shortest_paths(src)
                .and_then(|table| render_path(&table, dst));
            total += engine.stats().duration.unwrap_or_default();
            if result.is_ok() {
                found += 1;
            }
        }

        res.push_str(&format!(
            "{:?}: {} queries, {} routes found, avg. {:?}\n",
            kind,
            n,
            found,
            total / n.max(1) as u32
        ));
    }

    Ok(Some(res))
}

fn reload(_args: ArgMatches, context: &mut Context) -> Result<Option<String>> {
    match Graph::from_csv(&context.nodes_file, &context.edges_file) {
        Ok(g) => {
            let msg = g.to_string();
            context.graph.replace(g);
            Ok(Some(msg))
        }
        Err(err) => Ok(Some(format!("Reload failed: {:#}", err))),
    }
}

fn arg<'a>(args: &'a ArgMatches, name: &str) -> &'a str {
    args.get_one::<String>(name)
        .map(|s| s.trim())
        .unwrap_or_default()
}

struct Context {
    nodes_file: PathBuf,
    edges_file: PathBuf,
    graph: SharedGraph,
}

impl Context {
    fn new(nodes_file: PathBuf, edges_file: PathBuf, graph: Graph) -> Self {
        Self {
            nodes_file,
            edges_file,
            graph: SharedGraph::new(graph),
        }
    }
}

fn city_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .value_parser(value_parser!(String))
        .required(true)
        .help(help)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Init Graph
    let mut args = std::env::args().skip(1);
    let nodes_file = PathBuf::from(args.next().context("No path to cities csv given")?);
    let edges_file = PathBuf::from(args.next().context("No path to roads csv given")?);

    let graph = Graph::from_csv(&nodes_file, &edges_file)?;
    info!("{}", graph);
    let context = Context::new(nodes_file, edges_file, graph);

    let mut repl = Repl::new(context)
        .with_name("Routefinder")
        .with_version("v0.1.0")
        .with_description("Simple REPL to find shortest routes between cities")
        .with_banner("Welcome to Routefinder")
        .with_history(PathBuf::from(".route_history"), 100)
        .with_command(Command::new("info").about("Print map info"), info)
        .with_command(Command::new("cities").about("List all cities"), cities)
        .with_command(
            Command::new("route")
                .arg(city_arg("src", "ID of the origin city"))
                .arg(city_arg("dst", "ID of the destination city"))
                .arg(
                    Arg::new("heap")
                        .long("heap")
                        .action(ArgAction::SetTrue)
                        .help("Use the binary heap engine"),
                )
                .about("Calculate the shortest route using Dijkstra's algorithm"),
            route,
        )
        .with_command(
            Command::new("table")
                .arg(city_arg("src", "ID of the origin city"))
                .about("Print the predecessor table of a city"),
            table,
        )
        .with_command(
            Command::new("measure")
                .arg(
                    Arg::new("n")
                        .value_parser(value_parser!(usize))
                        .required(false)
                        .help("Number of random routes to calculate"),
                )
                .about("Measure `n` random route calculations with both engines"),
            measure,
        )
        .with_command(
            Command::new("reload").about("Reload the map from the csv files"),
            reload,
        );

    repl.run().map_err(|err| anyhow!("{}", err))
}
