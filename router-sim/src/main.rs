//! `router-sim` binary entry point (§6).
//!
//! Parses the CLI surface, builds and validates the template, prints the
//! configuration banner, runs the harness, and reports the aggregate
//! min/max/average hop summary the way the original `test_routers` command
//! does.

use clap::Parser;

use router_sim::cli::Cli;
use router_sim::{harness, logging};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_level);

    let template = match harness::prepare(&cli) {
        Ok(template) => template,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    println!("+------------------------------");
    println!("| Network Type = {:?}", cli.topology);
    println!("| Size = {}", cli.size);
    println!("| Dimension = {}", cli.dimension);
    println!("| Mode = {:?}", cli.mode);
    println!("| Dropouts = {}", cli.dropouts);
    println!("| Repeats = {}", cli.repeats);
    println!("| Logging Level = {:?}", cli.log_level);
    println!("+------------------------------");

    let runtime = compio::runtime::Runtime::new().expect("failed to start compio runtime");
    let report = runtime.block_on(harness::run(&cli, &template));

    if let Some(matrix) = &report.matrix {
        println!("{matrix}");
    }

    let num_messages = report.num_messages;
    let average = if num_messages == 0 {
        0.0
    } else {
        f64::from(report.total_hops) / num_messages as f64
    };

    println!();
    println!("+----------------------------------------------");
    println!("| -> Minimum Hops: {}", report.min_hops.unwrap_or(0));
    println!("| -> Maximum Hops: {}", report.max_hops.unwrap_or(0));
    println!("| -> Average Hops: {average}");
    println!("+----------------------------------------------");

    if report.timed_out {
        eprintln!(
            "timed out waiting for {} of {} expected deliveries",
            template.node_count() - num_messages,
            template.node_count()
        );
        std::process::exit(1);
    }
}
