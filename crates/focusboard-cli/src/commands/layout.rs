use clap::Subcommand;
use focusboard_core::storage::Database;
use focusboard_core::{Config, DashboardLayout, WidgetKind};

use super::{emit, print_json, CmdResult};

const LAYOUT_KEY: &str = "dashboard_layout";

#[derive(Subcommand)]
pub enum LayoutAction {
    /// Print widget slots in display order
    Show,
    /// Move a widget from one slot to another
    Move { from: usize, to: usize },
    /// Collapse or expand a widget
    Collapse {
        /// Widget name, e.g. "focus"
        kind: WidgetKind,
    },
    /// Discard the saved layout and use the configured widget order
    Reset,
}

fn load_layout(db: &Database) -> Result<DashboardLayout, Box<dyn std::error::Error>> {
    match db.kv_get_json::<DashboardLayout>(LAYOUT_KEY)? {
        Some(layout) => Ok(layout),
        None => Ok(Config::load()?.layout()),
    }
}

pub fn run(action: LayoutAction) -> CmdResult {
    let db = Database::open()?;
    let mut layout = load_layout(&db)?;

    match action {
        LayoutAction::Show => {
            print_json(&layout.slots())?;
            return Ok(());
        }
        LayoutAction::Move { from, to } => {
            let event = layout.move_widget(from, to)?;
            emit(&event)?;
        }
        LayoutAction::Collapse { kind } => match layout.toggle_collapsed(kind) {
            Some(_) => print_json(&layout.slots())?,
            None => return Err(format!("widget not in layout: {kind}").into()),
        },
        LayoutAction::Reset => {
            layout = Config::load()?.layout();
            print_json(&layout.slots())?;
        }
    }

    db.kv_set_json(LAYOUT_KEY, &layout)?;
    Ok(())
}
