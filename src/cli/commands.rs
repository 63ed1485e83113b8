//! Subcommand parsing and dispatch.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::access::Actor;
use crate::billing::DEFAULT_TAX_RATE;
use crate::cli::output;
use crate::config::{Config, ConfigManager};
use crate::cli::table::{Table, TableColumn};
use crate::dates::{anchor_offset, format_anchor_date};
use crate::domain::{Displayable, Employee, Property, RateType, Role, ServiceRecord};
use crate::format::{format_amount, format_hours_minutes, format_rate_type};
use crate::invoice::{GeneralFees, InvoiceOptions};
use crate::registry::Registry;
use crate::services::{
    EmployeeService, InvoiceService, PropertyService, ReportService, ServiceRecordService,
};
use crate::storage::JsonStorage;
use crate::utils::build_info;

const DEFAULT_REGISTRY: &str = "main";

const USAGE: &str = "\
Usage: limpia_cli [--registry NAME] [--as EMPLOYEE_ID] <command>

Commands:
  init                                          create an empty registry
  properties list
  properties add <name> <client> <rate> <rate-type> <refresh-rate>
  employees list
  employees add <first> <last> <start YYYY-MM-DD> [--admin]
  services list
  services add <property-id> <employee-id> <date YYYY-MM-DD> <hours> [--refresh]
  report <employee-id> <year> <month>
  invoice <property-id> <start> <end> [--tax] [--laundry N] [--refresh N] [--other N]
  version
  help";

/// Entry point: runs a parsed command line, returning the process exit code.
pub fn run(args: &[String]) -> i32 {
    match execute(args) {
        Ok(()) => 0,
        Err(message) => {
            output::print_error(message);
            1
        }
    }
}

struct Invocation {
    registry_name: Option<String>,
    actor_id: Option<Uuid>,
    rest: Vec<String>,
}

fn split_global(args: &[String]) -> Result<Invocation, String> {
    let mut registry_name = None;
    let mut actor_id = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--registry" => {
                registry_name = Some(
                    iter.next()
                        .ok_or("--registry requires a name")?
                        .to_string(),
                );
            }
            "--as" => {
                let raw = iter.next().ok_or("--as requires an employee id")?;
                actor_id = Some(parse_uuid(raw)?);
            }
            _ => rest.push(arg.clone()),
        }
    }
    Ok(Invocation {
        registry_name,
        actor_id,
        rest,
    })
}

fn execute(args: &[String]) -> Result<(), String> {
    let invocation = split_global(args)?;
    let command = invocation.rest.first().map(|s| s.as_str()).unwrap_or("help");

    match command {
        "help" | "--help" | "-h" => {
            println!("{USAGE}");
            return Ok(());
        }
        "version" => {
            let meta = build_info::current();
            println!("limpia_cli {} ({})", meta.version, meta.git_hash);
            return Ok(());
        }
        _ => {}
    }

    // Reject unknown commands before touching storage so a fresh install gets
    // a usage error, not a missing-registry one.
    if !matches!(
        command,
        "init" | "properties" | "employees" | "services" | "report" | "invoice"
    ) {
        return Err(format!("unknown command; see `limpia_cli help`\n{USAGE}"));
    }

    let storage = JsonStorage::new_default().map_err(|e| e.to_string())?;
    let config_manager = ConfigManager::new().map_err(|e| e.to_string())?;
    let config = config_manager.load().map_err(|e| e.to_string())?;

    // Registry selection: explicit flag, then the last one opened, then the
    // default name.
    let registry_name = invocation
        .registry_name
        .clone()
        .or_else(|| config.last_opened_registry.clone())
        .unwrap_or_else(|| DEFAULT_REGISTRY.to_string());

    if command == "init" {
        if storage.exists(&registry_name) {
            output::print_warning(format!("registry '{registry_name}' already exists"));
            return Ok(());
        }
        let registry = Registry::new(registry_name.clone());
        storage
            .save(&registry, &registry_name)
            .map_err(|e| e.to_string())?;
        remember_registry(&config_manager, &config, &registry_name);
        output::print_success(format!("created registry '{registry_name}'"));
        return Ok(());
    }

    if !storage.exists(&registry_name) {
        return Err(format!(
            "registry '{registry_name}' not found; run `limpia_cli init` first"
        ));
    }
    let report = storage.load(&registry_name).map_err(|e| e.to_string())?;
    if report.skipped_records > 0 {
        output::print_warning(format!(
            "{} stored record(s) could not be decoded and were skipped",
            report.skipped_records
        ));
    }
    let mut registry = report.registry;
    let actor = resolve_actor(&registry, invocation.actor_id)?;
    remember_registry(&config_manager, &config, &registry_name);

    let rest: Vec<&str> = invocation.rest.iter().map(|s| s.as_str()).collect();
    let mutated = match rest.as_slice() {
        ["properties", "list"] => {
            list_properties(&registry);
            false
        }
        ["properties", "add", name, client, rate, rate_type, refresh_rate] => {
            let property = Property::new(
                *name,
                *client,
                parse_f64(rate, "rate")?,
                RateType::from_tag(rate_type),
                parse_f64(refresh_rate, "refresh-rate")?,
            );
            let id = PropertyService::add(&mut registry, &actor, property)
                .map_err(|e| e.to_string())?;
            output::print_success(format!("added property {id}"));
            true
        }
        ["employees", "list"] => {
            list_employees(&registry, &actor);
            false
        }
        ["employees", "add", rest @ ..] => {
            let (positional, flags) = split_flags(rest);
            let [first, last, start] = positional.as_slice() else {
                return Err("usage: employees add <first> <last> <start> [--admin]".into());
            };
            let mut employee = Employee::new(*first, *last, parse_date(start)?);
            if flags.contains(&"--admin") {
                employee = employee.with_role(Role::Admin);
            }
            let id = EmployeeService::add(&mut registry, &actor, employee)
                .map_err(|e| e.to_string())?;
            output::print_success(format!("added employee {id}"));
            true
        }
        ["services", "list"] => {
            list_services(&registry, &actor);
            false
        }
        ["services", "add", rest @ ..] => {
            let (positional, flags) = split_flags(rest);
            let [property_id, employee_id, date, hours] = positional.as_slice() else {
                return Err(
                    "usage: services add <property-id> <employee-id> <date> <hours> [--refresh]"
                        .into(),
                );
            };
            let mut record = ServiceRecord::new(
                parse_uuid(property_id)?,
                parse_uuid(employee_id)?,
                service_timestamp(parse_date(date)?),
                parse_f64(hours, "hours")?,
            );
            if flags.contains(&"--refresh") {
                record = record.as_refresh();
            }
            let id = ServiceRecordService::add(&mut registry, &actor, record)
                .map_err(|e| e.to_string())?;
            output::print_success(format!("logged service {id}"));
            true
        }
        ["report", employee_id, year, month] => {
            run_report(&registry, &actor, employee_id, year, month)?;
            false
        }
        ["invoice", rest @ ..] => {
            run_invoice(&registry, &actor, &config, rest)?;
            false
        }
        _ => return Err(format!("unknown command; see `limpia_cli help`\n{USAGE}")),
    };

    if mutated {
        storage
            .save(&registry, &registry_name)
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn remember_registry(manager: &ConfigManager, config: &Config, name: &str) {
    if config.last_opened_registry.as_deref() == Some(name) {
        return;
    }
    let mut updated = config.clone();
    updated.last_opened_registry = Some(name.to_string());
    if let Err(error) = manager.save(&updated) {
        tracing::warn!(%error, "could not persist the last opened registry");
    }
}

fn resolve_actor(registry: &Registry, actor_id: Option<Uuid>) -> Result<Actor, String> {
    match actor_id {
        // Without --as the CLI acts as an administrator, mirroring direct
        // back-office access.
        None => Ok(Actor::admin(Uuid::nil())),
        Some(id) => {
            let employee = registry
                .employee(id)
                .ok_or_else(|| format!("no employee with id {id}"))?;
            Ok(Actor {
                employee_id: id,
                role: employee.role,
            })
        }
    }
}

fn list_properties(registry: &Registry) {
    output::print_section("Properties");
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("PROPERTY"),
        TableColumn::left("RATE PLAN"),
        TableColumn::right("REFRESH"),
        TableColumn::left("TAX"),
    ]);
    for property in PropertyService::list(registry) {
        table.push_row(vec![
            property.id.to_string(),
            property.display_label(),
            format_rate_type(&property.rate_type, property.regular_rate),
            format_amount(property.currency(), property.refresh_rate),
            property.tax_status.to_string(),
        ]);
    }
    println!("{}", table.render());
}

fn list_employees(registry: &Registry, actor: &Actor) {
    output::print_section("Employees");
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("NAME"),
        TableColumn::left("ROLE"),
        TableColumn::left("ACTIVE"),
    ]);
    for employee in EmployeeService::list(registry, actor) {
        table.push_row(vec![
            employee.id.to_string(),
            employee.full_name(),
            employee.role.to_string(),
            if employee.active { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{}", table.render());
}

fn list_services(registry: &Registry, actor: &Actor) {
    output::print_section("Services");
    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("DATE"),
        TableColumn::left("PROPERTY"),
        TableColumn::right("HOURS"),
        TableColumn::right("AMOUNT"),
    ]);
    for record in ServiceRecordService::list(registry, actor) {
        let (property_name, currency) = registry
            .property(record.property_id)
            .map(|p| (p.name.clone(), p.currency()))
            .unwrap_or_else(|| ("?".into(), crate::domain::Currency::Usd));
        table.push_row(vec![
            record.id.to_string(),
            format_anchor_date(crate::dates::anchor_date(record.service_date)),
            property_name,
            format_hours_minutes(record.hours_worked),
            format_amount(currency, record.total_amount),
        ]);
    }
    println!("{}", table.render());
}

fn run_report(
    registry: &Registry,
    actor: &Actor,
    employee_id: &str,
    year: &str,
    month: &str,
) -> Result<(), String> {
    let employee_id = parse_uuid(employee_id)?;
    let year: i32 = year.parse().map_err(|_| "year must be a number")?;
    let month: u32 = month.parse().map_err(|_| "month must be a number")?;
    let summary = ReportService::monthly_hours(registry, actor, employee_id, year, month)
        .map_err(|e| e.to_string())?;

    output::print_section(format!("Hours {year}-{month:02}"));
    let mut table = Table::new(vec![TableColumn::left("DATE"), TableColumn::right("HOURS")]);
    for (day, hours) in &summary.daily {
        table.push_row(vec![format_anchor_date(*day), format_hours_minutes(*hours)]);
    }
    println!("{}", table.render());
    output::print_info(format!("Total: {}", summary.total_formatted));
    Ok(())
}

fn run_invoice(
    registry: &Registry,
    actor: &Actor,
    config: &Config,
    rest: &[&str],
) -> Result<(), String> {
    let (positional, _) = split_flags(rest);
    let [property_id, start, end] = positional.as_slice() else {
        return Err("usage: invoice <property-id> <start> <end> [--tax] [--laundry N] [--refresh N] [--other N]".into());
    };
    let property_id = parse_uuid(property_id)?;
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let options = InvoiceOptions {
        include_tax: rest.contains(&"--tax"),
        tax_rate: config.tax_rate.unwrap_or(DEFAULT_TAX_RATE),
        general_fees: GeneralFees {
            laundry_fee: flag_value(rest, "--laundry")?,
            refresh_fee: flag_value(rest, "--refresh")?,
            other_fee: flag_value(rest, "--other")?,
        },
    };

    let invoice = InvoiceService::generate(registry, actor, property_id, start, end, options)
        .map_err(|e| e.to_string())?
        .ok_or("incomplete invoice input (check the property id and date range)")?;

    print!("{}", InvoiceService::render_document(&invoice));
    if !invoice.flagged.is_empty() {
        output::print_warning(format!(
            "{} record(s) excluded due to unrecognized rate plan",
            invoice.flagged.len()
        ));
    }
    Ok(())
}

fn split_flags<'a>(args: &[&'a str]) -> (Vec<&'a str>, Vec<&'a str>) {
    let mut positional = Vec::new();
    let mut flags = Vec::new();
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            flags.push(*arg);
            // Value-carrying flags consume the next token.
            if matches!(*arg, "--laundry" | "--other")
                || (*arg == "--refresh" && iter.peek().map_or(false, |v| v.parse::<f64>().is_ok()))
            {
                if let Some(value) = iter.next() {
                    flags.push(*value);
                }
            }
        } else {
            positional.push(*arg);
        }
    }
    (positional, flags)
}

fn flag_value(args: &[&str], flag: &str) -> Result<f64, String> {
    match args.iter().position(|arg| *arg == flag) {
        None => Ok(0.0),
        Some(idx) => args
            .get(idx + 1)
            .ok_or_else(|| format!("{flag} requires a value"))?
            .parse::<f64>()
            .map_err(|_| format!("{flag} requires a number")),
    }
}

fn parse_f64(raw: &str, what: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|_| format!("{what} must be a number, got '{raw}'"))
}

fn parse_uuid(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw).map_err(|_| format!("'{raw}' is not a valid id"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("'{raw}' is not a date (expected YYYY-MM-DD)"))
}

/// Timestamps a CLI-entered calendar date at midday in the anchor zone so the
/// record lands on the intended day regardless of later normalization.
fn service_timestamp(date: NaiveDate) -> chrono::DateTime<Utc> {
    date.and_hms_opt(12, 0, 0)
        .unwrap()
        .and_local_timezone(anchor_offset())
        .unwrap()
        .with_timezone(&Utc)
}
