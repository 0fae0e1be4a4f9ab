use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::{debug, info};
use serde::Serialize;
use structopt::StructOpt;

use podem::driver::{Podem, PodemConfig, TestOutcome};
use podem::fault::{Fault, FaultSite, StuckAt};
use podem_netlist::parser;

/// Generates stuck-at test patterns for a combinational netlist.
#[derive(StructOpt)]
#[structopt(name = "atpg")]
struct Opt {
    /// Netlist file to load.
    #[structopt(parse(from_os_str))]
    netlist: PathBuf,

    /// Backtracks allowed per fault before aborting it.
    #[structopt(long, default_value = "50")]
    backtrack_limit: u32,

    /// Patterns to generate per testable fault.
    #[structopt(long, default_value = "1")]
    patterns: usize,

    /// Seed for the random fill of unassigned inputs.
    #[structopt(long, default_value = "0")]
    seed: u64,

    /// Target a single fault, e.g. `carry:sa0` or `carry:sa1:in#1`.
    #[structopt(long)]
    fault: Option<String>,

    /// Print a JSON run summary to stderr at the end.
    #[structopt(long)]
    summary: bool,
}

#[derive(Default, Serialize)]
struct Summary {
    faults: usize,
    found: usize,
    untestable: usize,
    aborted: usize,
    backtracks: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let opt = Opt::from_args();

    let text = fs::read_to_string(&opt.netlist)
        .with_context(|| format!("reading {}", opt.netlist.display()))?;
    let circuit = parser::parse(&text)
        .with_context(|| format!("loading {}", opt.netlist.display()))?;

    let mut faults = Fault::enumerate(&circuit);
    if let Some(selector) = &opt.fault {
        faults = select_faults(&circuit, faults, selector)?;
    }
    info!(
        "{}: {} wires, {} primary inputs, {} target fault(s)",
        opt.netlist.display(),
        circuit.wires.len(),
        circuit.inputs.len(),
        faults.len(),
    );

    let config = PodemConfig {
        backtrack_limit: opt.backtrack_limit,
        patterns_per_fault: opt.patterns,
        fill_seed: opt.seed,
    };
    let mut podem = Podem::new(&circuit, config);
    let mut summary = Summary {
        faults: faults.len(),
        ..Summary::default()
    };
    for fault in &faults {
        let run = podem.run(fault);
        summary.backtracks += run.backtracks;
        match run.outcome {
            TestOutcome::Found => {
                summary.found += 1;
                if opt.patterns > 1 {
                    println!("{}", fault.describe(&circuit));
                }
                for pattern in &run.patterns {
                    println!("{pattern}");
                }
                if opt.patterns > 1 {
                    println!();
                }
            }
            TestOutcome::Untestable => {
                summary.untestable += 1;
                debug!("fault {} is redundant", fault.describe(&circuit));
            }
            TestOutcome::Aborted => {
                summary.aborted += 1;
                debug!(
                    "fault {} aborted at {} backtracks",
                    fault.describe(&circuit),
                    run.backtracks
                );
            }
        }
    }
    info!(
        "{} found, {} redundant, {} aborted, {} backtracks total",
        summary.found, summary.untestable, summary.aborted, summary.backtracks,
    );
    if opt.summary {
        eprintln!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

/// Narrows the fault list to a single site, written `wire:sa0|sa1[:in#k]`.
/// The plain form selects the output-side fault of the wire's driver; the
/// `:in#<k>` suffix selects the input-side fault at pin `k` of a gate the
/// wire feeds.
fn select_faults(
    circuit: &podem_netlist::circuit::Circuit,
    faults: Vec<Fault>,
    selector: &str,
) -> Result<Vec<Fault>> {
    let Some((name, rest)) = selector.split_once(':') else {
        bail!("malformed fault selector `{selector}`, expected `wire:sa0|sa1[:in#k]`");
    };
    let (polarity, pin) = match rest.split_once(':') {
        Some((polarity, input)) => {
            let Some(index) = input.strip_prefix("in#") else {
                bail!("malformed pin `{input}` in fault selector, expected `in#<k>`");
            };
            let index: usize = index
                .parse()
                .with_context(|| format!("bad pin index in fault selector `{selector}`"))?;
            (polarity, Some(index))
        }
        None => (rest, None),
    };
    let stuck = match polarity {
        "sa0" => StuckAt::Stuck0,
        "sa1" => StuckAt::Stuck1,
        _ => bail!("unknown polarity `{polarity}` in fault selector"),
    };
    let Some(wire) = circuit.wire_by_name(name) else {
        bail!("no wire named `{name}` in the netlist");
    };
    let site = match pin {
        Some(index) => FaultSite::Input(index),
        None => FaultSite::Output,
    };
    let selected: Vec<Fault> = faults
        .into_iter()
        .filter(|f| f.stuck == stuck && f.site == site && f.site_wire(circuit) == wire)
        .collect();
    if selected.is_empty() {
        bail!("no fault matching `{selector}`");
    }
    Ok(selected)
}
