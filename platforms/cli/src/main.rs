use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use spool::programs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Trace each execution step at debug level
    #[clap(short, long)]
    verbose: bool,

    /// Stop after this many steps (0 or less means unbounded)
    #[clap(short, long, default_value_t = 50)]
    max_steps: i64,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut machine = match programs::bit_flip("010011") {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    println!("Input on Tape:");
    println!(" {}", machine.tape());
    println!();

    let mut step_no: i64 = 0;
    while !machine.is_done() {
        step_no += 1;
        println!("step-{step_no}");
        let event = machine.step();
        debug!(%event, "step");
        if cli.max_steps > 0 && step_no >= cli.max_steps {
            println!(" ... max steps, break");
            break;
        }
    }

    println!();
    println!("Result of the Turing machine computation:");
    println!(" {}", machine.tape());
}
