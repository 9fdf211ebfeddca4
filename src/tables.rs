use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{action::BerthAction, plan::Plan},
    quantity::time::Hours,
};

/// Render the plan as a terminal table, one row per station.
#[must_use]
pub fn build_plan_table(plan: &Plan) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        "Station",
        "Arrival",
        "SoC",
        "Action",
        "Wait",
        "Dwell",
        "Cost",
    ]);
    for step in &plan.steps {
        table.add_row(vec![
            Cell::new(&step.station),
            Cell::new(format!("{} (+{})", step.arrival_clock, step.arrival_offset))
                .add_attribute(Attribute::Dim),
            Cell::new(step.soc_arriving).set_alignment(CellAlignment::Right),
            Cell::new(step.action.to_string()).fg(match step.action {
                BerthAction::Idle => Color::Reset,
                BerthAction::Swap { .. } => Color::Green,
                BerthAction::Charge { .. } => Color::Cyan,
                BerthAction::SwapAndCharge { .. } => Color::Yellow,
            }),
            Cell::new(step.wait).set_alignment(CellAlignment::Right).fg(
                if step.wait > Hours::ZERO { Color::DarkYellow } else { Color::Reset },
            ),
            Cell::new(step.dwell).set_alignment(CellAlignment::Right),
            Cell::new(step.cost_breakdown.total).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format!("{} (+{})", plan.arrival_clock, plan.total_journey)),
        Cell::new(""),
        Cell::new(format!("{} swaps", plan.swap_count)),
        Cell::new(""),
        Cell::new(""),
        Cell::new(plan.total_cost)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table
}
