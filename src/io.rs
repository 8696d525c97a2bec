use std::fmt;
use std::fs;
use std::path::Path;

use crate::page_table::ProcessId;
use crate::translation::to_output;
use crate::vm_manager::MemoryManager;

/// One line of a command script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Allocate { pages: usize },
    Free { pid: ProcessId },
    Access { pid: ProcessId, address: i64 },
    /// Translate many addresses, printing one space-separated line (-1 for errors)
    Batch { pid: ProcessId, addresses: Vec<i64> },
    Map,
    Stats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

impl Command {
    /// Parse a single non-empty, non-comment line
    pub fn parse(line: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (name, args) = tokens.split_first().ok_or("Empty command")?;

        let expect_args = |n: usize| {
            if args.len() == n {
                Ok(())
            } else {
                Err(format!("'{}' takes {} argument(s), got {}", name, n, args.len()))
            }
        };

        match *name {
            "alloc" | "allocate" => {
                expect_args(1)?;
                let pages = args[0]
                    .parse()
                    .map_err(|_| format!("Invalid page count: {}", args[0]))?;
                Ok(Command::Allocate { pages })
            }
            "free" | "deallocate" => {
                expect_args(1)?;
                Ok(Command::Free { pid: parse_pid(args[0])? })
            }
            "access" | "translate" => {
                expect_args(2)?;
                let pid = parse_pid(args[0])?;
                let address = args[1]
                    .parse()
                    .map_err(|_| format!("Invalid logical address: {}", args[1]))?;
                Ok(Command::Access { pid, address })
            }
            "batch" => {
                let (pid, rest) = args
                    .split_first()
                    .ok_or_else(|| format!("'{}' needs a process id", name))?;
                let pid = parse_pid(pid)?;
                let addresses = rest
                    .iter()
                    .map(|a| a.parse::<i64>().map_err(|_| format!("Invalid logical address: {}", a)))
                    .collect::<Result<Vec<i64>, String>>()?;
                Ok(Command::Batch { pid, addresses })
            }
            "map" => {
                expect_args(0)?;
                Ok(Command::Map)
            }
            "stats" => {
                expect_args(0)?;
                Ok(Command::Stats)
            }
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}

fn parse_pid(token: &str) -> Result<ProcessId, String> {
    token
        .parse()
        .map(ProcessId::new)
        .map_err(|_| format!("Invalid process id: {}", token))
}

/// Parse a whole script. Blank lines and `#` comments are skipped.
pub fn parse_script(content: &str) -> Result<Vec<Command>, ParseError> {
    let mut commands = Vec::new();
    for (i, raw) in content.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let command = Command::parse(line).map_err(|message| ParseError { line: i + 1, message })?;
        commands.push(command);
    }
    Ok(commands)
}

pub fn read_script<P: AsRef<Path>>(path: P) -> Result<Vec<Command>, String> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| format!("Failed to read script file: {}", e))?;
    parse_script(&content).map_err(|e| e.to_string())
}

/// Run one command and return the status lines it produces
pub fn execute(mm: &mut MemoryManager, command: &Command, json: bool) -> Vec<String> {
    match command {
        Command::Allocate { pages } => match mm.allocate(*pages) {
            Ok(pid) => vec![format!(
                "Allocated {} pages in physical memory for process {}",
                pages, pid
            )],
            Err(e) => vec![format!("Error: {}", e)],
        },
        Command::Free { pid } => {
            let pages = mm.frames_of(*pid).map_or(0, |f| f.len());
            match mm.deallocate(*pid) {
                Ok(()) => vec![format!("Deallocated {} pages for process {}", pages, pid)],
                Err(e) => vec![format!("Error: {}", e)],
            }
        }
        Command::Access { pid, address } => match mm.translate(*pid, *address) {
            Ok(pa) => vec![format!(
                "Accessing logical address {} for process {}. Physical address: {}",
                address, pid, pa
            )],
            Err(e) => vec![format!("Error: {}", e)],
        },
        Command::Batch { pid, addresses } => {
            let results: Vec<String> = addresses
                .iter()
                .map(|&address| to_output(&mm.translate(*pid, address)).to_string())
                .collect();
            vec![results.join(" ")]
        }
        Command::Map => {
            let map = mm.memory_map();
            if json {
                vec![to_json(&map)]
            } else {
                map.to_string().lines().map(str::to_string).collect()
            }
        }
        Command::Stats => {
            let stats = mm.stats();
            if json {
                vec![to_json(&stats)]
            } else {
                vec![format!(
                    "Frames: total={} free={} used={} | processes={} | unaddressable bytes={}",
                    stats.total_frames,
                    stats.free_frames,
                    stats.used_frames,
                    stats.processes,
                    stats.unaddressable_bytes
                )]
            }
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("Error: {}", e))
}

pub fn run_script(mm: &mut MemoryManager, commands: &[Command], json: bool) -> Vec<String> {
    commands
        .iter()
        .flat_map(|command| execute(mm, command, json))
        .collect()
}
