use clap::Subcommand;
use focusboard_core::storage::Database;

use super::{emit, print_json, CmdResult};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Save a note; it goes to the top of the list
    Add {
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Comma-separated, e.g. "work, meeting"
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// List notes as JSON, newest first
    List {
        /// Only notes whose title, content or tags contain this (any case)
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
}

pub fn run(action: NoteAction) -> CmdResult {
    let db = Database::open()?;
    let mut notes = db.load_notes()?;

    match action {
        NoteAction::Add {
            title,
            content,
            tags,
        } => {
            let event = notes.add(&title, &content, &tags)?;
            db.save_notes(&notes)?;
            emit(&event)?;
        }
        NoteAction::List { search } => {
            print_json(&notes.search(search.as_deref().unwrap_or("")))?;
        }
        NoteAction::Delete { id } => {
            let event = notes.delete(&id)?;
            db.save_notes(&notes)?;
            emit(&event)?;
        }
    }
    Ok(())
}
