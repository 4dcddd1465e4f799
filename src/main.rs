mod infra;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use menu_fabrik::config::AppConfig;
use menu_fabrik::error::AppError;
use menu_fabrik::telemetry;
use menu_fabrik::workflows::menu::{
    AlternativeOutcome, GenerationReport, MealSlot, MenuPlannerService, MenuRepository, Recipe,
    RecipeId, ServiceError, SlotId, SlotStatus,
};
use tracing::info;

use crate::infra::{parse_date, JsonHouseholdStore};

#[derive(Parser, Debug)]
#[command(
    name = "menu-fabrik",
    about = "Plan a household's lunches and dinners from its recipe catalog",
    version
)]
struct Cli {
    /// Household JSON file (overrides MENU_DATA_FILE)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Seed for reproducible plans (overrides MENU_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, fill and inspect meal plans
    Plan {
        #[command(subcommand)]
        command: PlanCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PlanCommand {
    /// Create the slots of a new plan and fill them
    Create(RangeArgs),
    /// Fill the empty planned slots of an existing plan
    Generate(RangeArgs),
    /// Swap the recipe of one slot for another
    Regenerate(SlotArgs),
    /// Change what happens at a slot (planned, restaurant, absent, ...)
    Status(StatusArgs),
    /// Put a specific recipe on a slot
    Pick(PickArgs),
    /// Print a plan
    Show(RangeArgs),
}

#[derive(Args, Debug)]
struct RangeArgs {
    /// First day of the plan (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    start: NaiveDate,
    /// Number of days, 1 to 14
    #[arg(long, default_value_t = 7)]
    days: u32,
}

#[derive(Args, Debug)]
struct SlotArgs {
    /// Slot id, e.g. 2025-10-06-lunch
    slot: String,
}

#[derive(Args, Debug)]
struct StatusArgs {
    /// Slot id, e.g. 2025-10-06-dinner
    slot: String,
    /// New status
    #[arg(value_parser = parse_status)]
    status: SlotStatus,
}

#[derive(Args, Debug)]
struct PickArgs {
    /// Slot id, e.g. 2025-10-06-dinner
    slot: String,
    /// Recipe id from the catalog
    recipe: String,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(data) = cli.data {
        config.storage.data_file = data;
    }
    if let Some(seed) = cli.seed {
        config.generation.seed = Some(seed);
    }

    telemetry::init(&config.telemetry)?;
    info!(
        environment = ?config.environment,
        data_file = %config.storage.data_file.display(),
        "starting menu planner"
    );

    let store = Arc::new(JsonHouseholdStore::open(&config.storage.data_file)?);
    let service = MenuPlannerService::new(store.clone(), store.scoring(), &config.generation);

    match cli.command {
        Command::Plan { command } => run_plan(&service, store.as_ref(), command),
    }
}

fn run_plan(
    service: &MenuPlannerService<JsonHouseholdStore>,
    store: &JsonHouseholdStore,
    command: PlanCommand,
) -> Result<(), AppError> {
    let output = match command {
        PlanCommand::Create(RangeArgs { start, days }) => {
            let report = service.create_week(start, days)?;
            render_report(&report)
        }
        PlanCommand::Generate(RangeArgs { start, days }) => {
            let report = service.generate(start, days)?;
            render_report(&report)
        }
        PlanCommand::Regenerate(SlotArgs { slot }) => {
            let outcome = service.regenerate(&SlotId(slot))?;
            render_outcome(&outcome)
        }
        PlanCommand::Status(StatusArgs { slot, status }) => {
            match service.change_status(&SlotId(slot), status)? {
                Some(outcome) => render_outcome(&outcome),
                None => format!("status set to {}\n", status.label()),
            }
        }
        PlanCommand::Pick(PickArgs { slot, recipe }) => {
            let slot = service.pick_recipe(&SlotId(slot), &RecipeId(recipe))?;
            render_week(std::slice::from_ref(&slot), &catalog(store)?)
        }
        PlanCommand::Show(RangeArgs { start, days }) => {
            let slots = service.week(start, days)?;
            render_week(&slots, &catalog(store)?)
        }
    };

    print!("{output}");
    Ok(())
}

fn catalog(store: &JsonHouseholdStore) -> Result<Vec<Recipe>, AppError> {
    Ok(store.recipes().map_err(ServiceError::from)?)
}

fn parse_status(raw: &str) -> Result<SlotStatus, String> {
    raw.parse()
}

fn render_report(report: &GenerationReport) -> String {
    let mut out = String::new();

    if report.assigned.is_empty() {
        let _ = writeln!(out, "Nothing to fill");
    } else {
        let _ = writeln!(out, "Assigned");
        for assignment in &report.assigned {
            let side = assignment
                .side_dish
                .as_ref()
                .map(|side| format!(" with {side}"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "- {}: {}{} (score {})",
                assignment.slot_id, assignment.recipe_name, side, assignment.score
            );
        }
    }

    if !report.unfulfilled.is_empty() {
        let _ = writeln!(out, "\nNo compatible recipe");
        for slot in &report.unfulfilled {
            let _ = writeln!(out, "- {slot}");
        }
    }

    let skipped = report.skipped_not_planned + report.skipped_filled;
    if skipped > 0 {
        let _ = writeln!(
            out,
            "\nSkipped {skipped} slot(s): {} not planned, {} already filled",
            report.skipped_not_planned, report.skipped_filled
        );
    }
    out
}

fn render_outcome(outcome: &AlternativeOutcome) -> String {
    format!("{}\n", outcome.summary())
}

fn render_week(slots: &[MealSlot], recipes: &[Recipe]) -> String {
    if slots.is_empty() {
        return "No slots in this range\n".to_string();
    }

    let names: HashMap<&RecipeId, &str> = recipes
        .iter()
        .map(|recipe| (&recipe.id, recipe.name.as_str()))
        .collect();

    let mut out = String::new();
    for slot in slots {
        let meal = match (&slot.recipe, slot.status) {
            (Some(recipe), _) => {
                let name = names.get(recipe).copied().unwrap_or(recipe.0.as_str());
                let sides: Vec<&str> = slot.side_dishes.iter().map(|side| side.as_str()).collect();
                if sides.is_empty() {
                    name.to_string()
                } else {
                    format!("{name} with {}", sides.join(", "))
                }
            }
            (None, SlotStatus::Planned) => "-".to_string(),
            (None, status) => format!("[{}]", status.label()),
        };
        let _ = writeln!(
            out,
            "{} {:<6} {}",
            slot.date.format("%a %Y-%m-%d"),
            slot.time.label(),
            meal
        );
    }
    out
}
