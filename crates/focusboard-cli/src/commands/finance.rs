use clap::Subcommand;
use focusboard_core::storage::Database;
use focusboard_core::{BudgetCategory, FinanceSummary};

use super::{print_json, CmdResult};

const BUDGET_KEY: &str = "finance_budget";

#[derive(Subcommand)]
pub enum FinanceAction {
    /// Create or update a spending category
    Set {
        name: String,
        #[arg(long)]
        budget: f64,
        #[arg(long, default_value = "0")]
        spent: f64,
    },
    /// List categories as JSON
    List,
    /// Remove a category
    Remove { name: String },
    /// Total budget, total spent and percent of budget used
    Summary,
}

fn load_budget(db: &Database) -> Result<Vec<BudgetCategory>, Box<dyn std::error::Error>> {
    Ok(db.kv_get_json(BUDGET_KEY)?.unwrap_or_default())
}

pub fn run(action: FinanceAction) -> CmdResult {
    let db = Database::open()?;
    let mut categories = load_budget(&db)?;

    match action {
        FinanceAction::Set {
            name,
            budget,
            spent,
        } => {
            if !budget.is_finite() || !spent.is_finite() || budget < 0.0 || spent < 0.0 {
                return Err("budget and spent must be non-negative amounts".into());
            }
            let category = BudgetCategory::new(name.trim(), budget, spent);
            if category.name.is_empty() {
                return Err("category name is empty".into());
            }
            match categories.iter_mut().find(|c| c.name == category.name) {
                Some(existing) => *existing = category.clone(),
                None => categories.push(category.clone()),
            }
            db.kv_set_json(BUDGET_KEY, &categories)?;
            print_json(&category)?;
        }
        FinanceAction::List => print_json(&categories)?,
        FinanceAction::Remove { name } => {
            let before = categories.len();
            categories.retain(|c| c.name != name);
            if categories.len() == before {
                return Err(format!("unknown category: {name}").into());
            }
            db.kv_set_json(BUDGET_KEY, &categories)?;
            println!("removed category: {name}");
        }
        FinanceAction::Summary => print_json(&FinanceSummary::compute(&categories))?,
    }
    Ok(())
}
