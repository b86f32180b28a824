use super::feedback::{OutputNotifier, PromptConfirmer};
use super::prompts;
use super::spinner::{is_interactive, RequestSpinner};
use super::AppContext;
use crate::output::Output;
use crate::WatchlistCommands;
use cinescope_core::{
    Confirmer, ExpandedMovies, FixedAnswer, ListCard, Outcome, PosterStyle, SkipReason, WatchlistManager,
};
use cinescope_models::{WatchlistId, MISSING_IMAGE_TEXT};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use std::sync::Arc;

const EMPTY_MESSAGE: &str = "No watchlists yet. Create one with 'cinescope watchlists create <name>'.";
const STALE_MESSAGE: &str = "Watchlists could not be loaded, so this view may be stale. Try 'cinescope watchlists list'.";

pub async fn run_watchlists(cmd: WatchlistCommands, api_url: Option<&str>, output: &Output) -> Result<()> {
    let ctx = AppContext::load(api_url)?;
    ctx.warn_if_signed_out(output);

    let confirmer: Arc<dyn Confirmer> = match &cmd {
        WatchlistCommands::Delete { yes: true, .. } => Arc::new(FixedAnswer(true)),
        _ if is_interactive() => Arc::new(PromptConfirmer),
        // Nobody to ask
        _ => Arc::new(FixedAnswer(false)),
    };
    let manager = WatchlistManager::new(
        Arc::new(ctx.client()?),
        Arc::new(OutputNotifier::new(output)),
        confirmer,
    );
    let posters = PosterStyle::from_config(&ctx.config.images);

    match cmd {
        WatchlistCommands::List { expand } => {
            let spinner = RequestSpinner::start("Loading watchlists...");
            let outcome = manager.mount().await;
            spinner.finish();
            check(outcome, output)?;

            if let Some(id) = expand {
                if let Outcome::Skipped(SkipReason::UnknownList) = manager.toggle_expand(&WatchlistId::new(id.clone())) {
                    output.warn(format!("No watchlist with id '{}'", id));
                }
            }
            render(&manager.cards(&posters), manager.has_loaded(), output)
        }
        WatchlistCommands::Create { name } => {
            let outcome = manager.create_list(&name).await;
            report(&manager, outcome, &posters, output)
        }
        WatchlistCommands::Rename { id, name } => {
            let outcome = manager.rename_list(&WatchlistId::new(id), &name).await;
            report(&manager, outcome, &posters, output)
        }
        WatchlistCommands::Delete { id, .. } => {
            let outcome = manager.delete_list(&WatchlistId::new(id)).await;
            report(&manager, outcome, &posters, output)
        }
        WatchlistCommands::Manage => run_manage(&manager, &posters, output).await,
    }
}

/// Print the lists after a mutation. Exits non-zero when the re-fetch failed.
fn report(manager: &WatchlistManager, outcome: Outcome, posters: &PosterStyle, output: &Output) -> Result<()> {
    let unsynced = matches!(outcome, Outcome::Unsynced(_));
    check(outcome, output)?;
    render(&manager.cards(posters), manager.has_loaded(), output)?;
    if unsynced {
        return Err(color_eyre::eyre::eyre!("Watchlists could not be reloaded after the change"));
    }
    Ok(())
}

/// Turn an outcome into the command result; failures were already printed by the notifier
fn check(outcome: Outcome, output: &Output) -> Result<()> {
    match outcome {
        Outcome::Done => Ok(()),
        Outcome::Skipped(SkipReason::EmptyName) => {
            output.warn("Name cannot be empty, nothing was sent");
            Ok(())
        }
        Outcome::Skipped(SkipReason::Declined) => {
            output.info("Cancelled");
            Ok(())
        }
        Outcome::Skipped(SkipReason::UnknownList) => {
            output.warn("No such watchlist");
            Ok(())
        }
        Outcome::Busy => {
            output.warn("Another request of the same kind is still running");
            Ok(())
        }
        Outcome::Failed(_) => Err(color_eyre::eyre::eyre!("Watchlist request failed")),
        Outcome::Unsynced(_) => {
            output.warn("The change was saved, but the watchlists could not be reloaded");
            Ok(())
        }
    }
}

/// Text shown instead of the table; `None` when there are cards to show
fn placeholder(cards: &[ListCard], loaded: bool) -> Option<&'static str> {
    if !loaded {
        Some(STALE_MESSAGE)
    } else if cards.is_empty() {
        Some(EMPTY_MESSAGE)
    } else {
        None
    }
}

fn render(cards: &[ListCard], loaded: bool, output: &Output) -> Result<()> {
    if !output.is_human() {
        output.json(&serde_json::to_value(cards)?);
        return Ok(());
    }

    if let Some(message) = placeholder(cards, loaded) {
        if loaded {
            output.info(message);
        } else {
            output.warn(message);
        }
        return Ok(());
    }

    output.println(cards_table(cards).to_string());

    for card in cards {
        if let Some(expanded) = &card.expanded {
            output.println("");
            output.println(format!("{}", card.name.bold().bright_cyan()));
            match expanded {
                ExpandedMovies::Empty { message } => output.println(format!("{}", message.bright_black())),
                ExpandedMovies::Entries { movies } => {
                    let mut table = Table::new();
                    table.set_header(vec![
                        Cell::new("Title").add_attribute(Attribute::Bold),
                        Cell::new("Movie ID").add_attribute(Attribute::Bold),
                        Cell::new("Poster").add_attribute(Attribute::Bold),
                    ]);
                    for movie in movies {
                        table.add_row(vec![
                            Cell::new(&movie.title),
                            Cell::new(movie.movie_id.to_string()),
                            match &movie.poster_url {
                                Some(url) => Cell::new(url),
                                None => Cell::new(MISSING_IMAGE_TEXT).fg(Color::DarkGrey),
                            },
                        ]);
                    }
                    table.load_preset(comfy_table::presets::UTF8_FULL);
                    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
                    output.println(table.to_string());
                }
            }
        }
    }
    Ok(())
}

fn cards_table(cards: &[ListCard]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Watchlist").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("ID").add_attribute(Attribute::Bold),
        Cell::new("Movies").add_attribute(Attribute::Bold),
        Cell::new("").add_attribute(Attribute::Bold),
    ]);
    for card in cards {
        table.add_row(vec![
            Cell::new(&card.name),
            Cell::new(card.id.as_str()),
            Cell::new(card.movie_count),
            Cell::new(card.toggle_label).fg(Color::DarkGrey),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManageAction {
    Create,
    Rename,
    Delete,
    Toggle,
    Refresh,
    Quit,
}

impl ManageAction {
    const ALL: [ManageAction; 6] = [
        ManageAction::Toggle,
        ManageAction::Create,
        ManageAction::Rename,
        ManageAction::Delete,
        ManageAction::Refresh,
        ManageAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            ManageAction::Create => "Create a list",
            ManageAction::Rename => "Rename a list",
            ManageAction::Delete => "Delete a list",
            ManageAction::Toggle => "View / hide movies",
            ManageAction::Refresh => "Refresh",
            ManageAction::Quit => "Quit",
        }
    }

    /// Actions that need at least one list to pick from
    fn needs_list(&self) -> bool {
        matches!(self, ManageAction::Rename | ManageAction::Delete | ManageAction::Toggle)
    }
}

async fn run_manage(manager: &WatchlistManager, posters: &PosterStyle, output: &Output) -> Result<()> {
    if !is_interactive() || !output.is_human() {
        return Err(color_eyre::eyre::eyre!(
            "'watchlists manage' needs an interactive terminal and human output"
        ));
    }

    let spinner = RequestSpinner::start("Loading watchlists...");
    manager.mount().await;
    spinner.finish();

    loop {
        output.println("");
        render(&manager.cards(posters), manager.has_loaded(), output)?;

        let labels: Vec<&str> = ManageAction::ALL.iter().map(ManageAction::label).collect();
        let action = ManageAction::ALL[prompts::prompt_select("What would you like to do?", &labels)?];

        if action.needs_list() && manager.lists().is_empty() {
            output.warn("There are no lists yet");
            continue;
        }

        match action {
            ManageAction::Create => {
                let name = prompts::prompt_string("New list name", None)?;
                manager.set_new_list_name(name);
                check(manager.submit_new_list().await, output).ok();
            }
            ManageAction::Rename => {
                let id = pick_list(manager, "Rename which list?")?;
                let current = manager.rename_text(&id);
                let default = (!current.is_empty()).then_some(current.as_str());
                let name = prompts::prompt_string("New name", default)?;
                manager.set_rename_text(&id, name);
                check(manager.submit_rename(&id).await, output).ok();
            }
            ManageAction::Delete => {
                let id = pick_list(manager, "Delete which list?")?;
                check(manager.delete_list(&id).await, output).ok();
            }
            ManageAction::Toggle => {
                let id = pick_list(manager, "Which list?")?;
                manager.toggle_expand(&id);
            }
            ManageAction::Refresh => {
                check(manager.refresh_lists().await, output).ok();
            }
            ManageAction::Quit => return Ok(()),
        }
    }
}

fn pick_list(manager: &WatchlistManager, prompt: &str) -> Result<WatchlistId> {
    let lists = manager.lists();
    let labels: Vec<String> = lists
        .iter()
        .map(|l| format!("{} ({} movies)", l.name, l.movies.len()))
        .collect();
    let index = prompts::prompt_select(prompt, &labels)?;
    lists
        .get(index)
        .map(|l| l.id.clone())
        .ok_or_else(|| color_eyre::eyre::eyre!("Selection out of range"))
}
