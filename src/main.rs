use kairo::prelude::*;
use std::env;

/// Prints progress updates and the final summary to stdout.
struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn on_update(&self, update: &ProgressUpdate) {
        match &update.current_component {
            Some(name) => println!("  [{:>3.0}%] {}", update.progress * 100.0, name),
            None => println!("  [{:>3.0}%] starting", update.progress * 100.0),
        }
    }

    fn on_finished(&self, record: &RunRecord) {
        println!("Run {} finished with status: {}", record.id, record.status);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: kairo <path/to/workflow.json>");
        std::process::exit(1);
    }

    let workflow_path = &args[1];
    println!("Loading workflow from: {}", workflow_path);

    let document = match WorkflowDocument::from_file(workflow_path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Failed to load workflow: {}", e);
            std::process::exit(1);
        }
    };
    let graph = document.into_graph();
    println!(
        "Loaded {} components and {} connections",
        graph.len(),
        graph.connections().len()
    );

    // Validation phase
    let report = validate(&graph);
    if !report.is_valid() {
        eprintln!("Workflow validation failed:");
        for issue in &report.issues {
            eprintln!("  - {}", issue.message);
        }
        std::process::exit(1);
    }
    println!("Workflow is valid.");

    let order = match execution_order(&graph) {
        Ok(order) => order,
        Err(e) => {
            eprintln!("Failed to compute execution order: {}", e);
            std::process::exit(1);
        }
    };
    println!("Execution order: {}", order.join(" -> "));

    // Execution phase (simulated: no ML backend attached)
    println!("\nRunning workflow with the simulated executor...");
    let runner = Runner::new(SimulatedExecutor);
    let record = runner.run(&graph, &ConsoleSink, &StopHandle::new());

    println!();
    for id in &order {
        if let Some(result) = record.results.get(id) {
            let state = if result.success { "ok" } else { "FAILED" };
            println!("  {:<24} {}", id, state);
        } else {
            println!("  {:<24} not executed", id);
        }
    }

    if !record.succeeded() {
        if let Some(error) = &record.error {
            eprintln!("\nRun failed: {}", error);
        }
        std::process::exit(1);
    }
}
