//! Plan command implementation

use crate::output::{self, OutputFormat};
use crate::{CliConfig, Result};
use clap::Args;
use comfy_table::{Cell, CellAlignment, Color, Table};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use vlsm_planner::{AllocationPlan, PlanRequest, SubnetKind, VlsmAllocator};

/// Exit status when the plan leaves demands unmet
const EXIT_UNMET: u8 = 2;

#[derive(Debug, Clone, Default, Args)]
pub struct PlanArgs {
    /// Base network in CIDR notation (e.g. 169.128.8.0/21)
    #[arg(short, long)]
    pub network: Option<String>,

    /// Usable hosts per subnet, comma separated
    #[arg(short = 'H', long, value_delimiter = ',')]
    pub hosts: Vec<u32>,

    /// Number of point-to-point router links (/30 each)
    #[arg(short = 'l', long)]
    pub router_links: Option<u32>,

    /// Plan file (TOML, YAML or JSON); flags override its values
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output format (table, json, yaml)
    #[arg(short = 'o', long)]
    pub format: Option<OutputFormat>,

    /// Print utilization figures after the table
    #[arg(short, long)]
    pub summary: bool,
}

pub fn execute(args: PlanArgs, config: &CliConfig) -> Result<ExitCode> {
    let plan = run(&args, config)?;

    if plan.is_complete() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_UNMET))
    }
}

/// Allocate and print the plan, returning it for the exit status
fn run(args: &PlanArgs, config: &CliConfig) -> Result<AllocationPlan> {
    let request = resolve_request(args)?;
    debug!(
        base = %request.base_network,
        hosts = request.hosts.len(),
        router_links = request.router_links,
        "Planning subnets"
    );
    let plan = VlsmAllocator::plan(&request)?;

    match args.format.unwrap_or(config.default_format) {
        OutputFormat::Table => {
            println!("{}", build_table(&plan, config.color));
            if args.summary {
                print_summary(&plan);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&plan)?),
    }

    for unmet in plan.unmet() {
        output::warn(&format!(
            "Cannot allocate a subnet for {} hosts (#{}, needs {} addresses)",
            unmet.hosts, unmet.index, unmet.required_addresses
        ));
    }

    Ok(plan)
}

/// Merge the plan file (or the built-in scenario) with command-line flags
///
/// The built-in scenario applies only when neither `--file` nor `--network`
/// is given.
pub fn resolve_request(args: &PlanArgs) -> Result<PlanRequest> {
    let mut request = match (&args.file, &args.network) {
        (Some(path), _) => PlanRequest::from_file(path)?,
        (None, Some(network)) => PlanRequest::new(network.clone(), Vec::new(), 0),
        (None, None) => PlanRequest::reference(),
    };

    if let Some(network) = &args.network {
        request.base_network = network.clone();
    }
    if !args.hosts.is_empty() {
        request.hosts = args.hosts.clone();
    }
    if let Some(router_links) = args.router_links {
        request.router_links = router_links;
    }

    Ok(request)
}

/// Grid of allocated subnets, one row per record
///
/// With `color` off the table is styled as if stdout were not a terminal.
pub fn build_table(plan: &AllocationPlan, color: bool) -> Table {
    let mut table = Table::new();
    if !color {
        table.force_no_tty();
    }
    table.set_header(vec![
        "#",
        "Type",
        "Network",
        "Prefix",
        "Subnet Mask",
        "Usable IP Range",
        "Broadcast",
        "Total Hosts",
    ]);

    for record in plan.allocations() {
        let kind_cell = match record.kind {
            SubnetKind::RouterLink if color => Cell::new(record.kind).fg(Color::Cyan),
            SubnetKind::RouterLink => Cell::new(record.kind),
            SubnetKind::Host(_) => Cell::new(record.kind),
        };

        table.add_row(vec![
            Cell::new(record.index),
            kind_cell,
            Cell::new(record.network),
            Cell::new(record.prefix_label()),
            Cell::new(record.netmask),
            Cell::new(record.usable_range_label()),
            Cell::new(record.broadcast),
            Cell::new(record.usable_hosts).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn print_summary(plan: &AllocationPlan) {
    let summary = plan.summary();

    output::header(&format!("Summary for {}", plan.base()));
    output::kv("Base addresses", &summary.base_size.to_string());
    output::kv(
        "Demands satisfied",
        &format!("{}/{}", summary.satisfied, summary.demands),
    );
    output::kv("Hosts requested", &summary.requested_hosts.to_string());
    output::kv("Addresses allocated", &summary.allocated_addresses.to_string());
    output::kv("Usable addresses", &summary.usable_addresses.to_string());
    output::kv("Addresses free", &summary.unallocated_addresses.to_string());
    output::kv(
        "Utilization",
        &format!("{:.1}%", summary.utilization_percent),
    );
}
