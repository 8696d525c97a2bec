//! Paged Memory Simulator - Main Entry Point
//!
//! Usage: paged-memory-sim [OPTIONS] <logical_size> <page_size> <physical_size> [script_file]
//!
//! Arguments:
//!   logical_size  - Bytes of logical memory available to each process
//!   page_size     - Bytes per page and per physical frame
//!   physical_size - Bytes of shared physical memory
//!   script_file   - Command script (reads stdin when omitted)
//!
//! Options:
//!   -v, --verbose  Log every allocation and translation to stderr
//!       --json     Print memory map and stats as JSON
//!   -h, --help     Print help information

use std::env;
use std::io::{self as stdio, Read};
use std::process;

use paged_memory_sim::io::{parse_script, read_script, run_script};
use paged_memory_sim::logger;
use paged_memory_sim::vm_manager::{MemoryConfig, MemoryManager};

/// Command-line configuration
struct Config {
    logical_memory_size: usize,
    page_size: usize,
    physical_memory_size: usize,
    script_file: Option<String>,
    verbose: bool,
    json: bool,
}

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logger::init(config.verbose) {
        eprintln!("Warning: logger unavailable: {}", e);
    }

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn print_help(program: &str) {
    eprintln!("Paged Memory Simulator - Allocates, frees and translates process pages");
    eprintln!();
    eprintln!("Usage: {} [OPTIONS] <logical_size> <page_size> <physical_size> [script_file]", program);
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  logical_size  - Bytes of logical memory per process");
    eprintln!("  page_size     - Bytes per page / frame");
    eprintln!("  physical_size - Bytes of shared physical memory");
    eprintln!("  script_file   - Command script (stdin if omitted)");
    eprintln!();
    eprintln!("Script commands (one per line, '#' starts a comment):");
    eprintln!("  alloc <pages>            Allocate pages to a new process");
    eprintln!("  free <pid>               Release all pages of a process");
    eprintln!("  access <pid> <address>   Translate a logical address");
    eprintln!("  batch <pid> <address>... Translate many addresses, -1 on failure");
    eprintln!("  map                      Print the physical memory map");
    eprintln!("  stats                    Print frame usage");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --verbose  Log every operation to stderr");
    eprintln!("      --json     Print map and stats as JSON");
    eprintln!("  -h, --help     Print this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} 1024 256 1024 script.txt", program);
    eprintln!("  echo 'alloc 2' | {} -v 1024 256 1024", program);
}

fn parse_size(name: &str, value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid {}: {}", name, value))
}

fn parse_args() -> Result<Config, String> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("paged-memory-sim");

    let mut verbose = false;
    let mut json = false;
    let mut positional: Vec<&String> = Vec::new();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help(program);
                process::exit(0);
            }
            "-v" | "--verbose" => {
                verbose = true;
            }
            "--json" => {
                json = true;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}\nUse --help for usage information.", arg));
            }
            _ => {
                positional.push(arg);
            }
        }
    }

    if positional.len() != 3 && positional.len() != 4 {
        print_help(program);
        return Err(format!("\nError: Expected 3 or 4 arguments, got {}", positional.len()));
    }

    Ok(Config {
        logical_memory_size: parse_size("logical memory size", positional[0])?,
        page_size: parse_size("page size", positional[1])?,
        physical_memory_size: parse_size("physical memory size", positional[2])?,
        script_file: positional.get(3).map(|s| s.to_string()),
        verbose,
        json,
    })
}

/// Main logic separated from main() for cleaner error handling
fn run(config: &Config) -> Result<(), String> {
    // Step 1: Validate sizes and build the manager
    let memory_config = MemoryConfig::new(
        config.logical_memory_size,
        config.page_size,
        config.physical_memory_size,
    )
    .map_err(|e| e.to_string())?;
    let mut mm = MemoryManager::new(memory_config);

    log::info!(
        "logical={} page={} physical={} frames={}",
        config.logical_memory_size,
        config.page_size,
        config.physical_memory_size,
        mm.capacity_frames()
    );

    // Step 2: Load the command script
    let commands = match &config.script_file {
        Some(path) => read_script(path)?,
        None => {
            let mut content = String::new();
            stdio::stdin()
                .read_to_string(&mut content)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            parse_script(&content).map_err(|e| e.to_string())?
        }
    };

    // Step 3: Execute and print status lines
    for line in run_script(&mut mm, &commands, config.json) {
        println!("{}", line);
    }

    Ok(())
}
