use std::sync::Arc;

use pathfinder_core::{prelude::*, statistics::average_out_degree, util::test_graphs::complex_graph};

fn main() {
    env_logger::init();

    let g = Arc::new(complex_graph());
    g.print_info();
    println!("Average out degree: {:.2}", average_out_degree(&g));

    let (Some(start), Some(destination)) = (g.find_node("A"), g.find_node("G")) else {
        eprintln!("Sample graph lacks its endpoints");
        return;
    };

    let registry = AlgorithmRegistry::new();
    for descriptor in registry.descriptors() {
        let alg = registry.create(descriptor.kind);
        let (handle, rx) = match PathRunner::spawn_channel(alg, g.clone(), start, destination) {
            Ok(run) => run,
            Err(e) => {
                eprintln!("{}: {}", descriptor.name, e);
                continue;
            }
        };

        match rx.recv() {
            Ok(stats) => {
                println!("{}", stats);
                if let Some(path) = stats.last_path().filter(|p| !p.is_empty()) {
                    println!("    {} (length {:.1})", path.describe(&g), path.length(&g));
                }
            }
            Err(_) => eprintln!("{}: run ended without statistics", descriptor.name),
        }
        handle.join();
    }
}
