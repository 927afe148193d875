use anyhow::Context;
use route_core::{
    prelude::*,
    util::cli::{self, Cfg},
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Cfg {
        nodes_file,
        edges_file,
        origin,
        destination,
        engine,
        print_table,
    } = cli::parse();

    let g = Graph::from_csv(&nodes_file, &edges_file).context("Could not load map")?;

    let mut engine = engine.engine(&g);
    let result = engine
        .shortest_paths(&origin)
        .and_then(|table| {
            if print_table {
                print_predecessors(&table);
            }
            render_path(&table, &destination)
        });

    match result {
        Ok(sp) => println!("{}", sp),
        Err(err @ RouteError::CorruptTable { .. }) => return Err(err.into()),
        Err(err) => println!("{}", err),
    }
    println!("{}", engine.stats());

    Ok(())
}

fn print_predecessors(table: &PredecessorTable) {
    let mut rows: Vec<_> = table.iter().collect();
    rows.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (id, entry) in rows {
        match entry {
            TableEntry::Discovered {
                predecessor,
                distance,
            } => println!(
                "{}\t{}\t{}",
                id,
                predecessor.as_deref().unwrap_or("-"),
                distance
            ),
            TableEntry::Undiscovered => println!("{}\t-\tunreachable", id),
        }
    }
}
