use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use screen_router::{Config, Dispatch, Navigator};

use crate::console::ConsoleStack;
use crate::demo::{self, DemoView};

/// Steps replayed when none are given
const DEFAULT_SCRIPT: &[&str] = &["/", "/settings", "/settings/video", "/about", "back", "back"];

/// Step that calls `history_back` instead of navigating
const BACK: &str = "back";

pub fn execute(routes: &[String], config: Option<&Path>, max_history: Option<usize>) -> Result<()> {
    let mut config = match config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if let Some(max) = max_history {
        config.history.max_entries = max;
    }

    let script: Vec<&str> = if routes.is_empty() {
        DEFAULT_SCRIPT.to_vec()
    } else {
        routes.iter().map(String::as_str).collect()
    };

    println!("{}", "Replaying navigation...".green().bold());
    println!("History bound: {}", config.max_history().to_string().cyan());
    println!();

    let mut nav = demo::navigator(&config)?;

    if let Some(dispatch) = nav.start()? {
        report(&nav, "start", &dispatch);
    }

    for step in script {
        if step == BACK {
            match nav.history_back()? {
                Some(dispatch) => report(&nav, BACK, &dispatch),
                None => println!("{} {}", BACK.bold(), "history is empty".yellow()),
            }
        } else {
            let dispatch = nav.navigate(step)?;
            report(&nav, step, &dispatch);
        }
    }

    println!();
    println!("Route:   {}", nav.route().cyan());
    println!("History: {}", nav.history().entries().join(" → "));

    Ok(())
}

fn report(nav: &Navigator<DemoView, ConsoleStack>, step: &str, dispatch: &Dispatch) {
    match dispatch {
        Dispatch::Resolved { screen, change } => {
            let shown = nav
                .router()
                .view_for(screen)
                .map(|view| view.describe())
                .unwrap_or_default();
            println!(
                "{} {} {} ({:?}): {}",
                "✓".green(),
                step.bold(),
                screen.cyan(),
                change,
                shown
            );
        }
        Dispatch::NotFound => {
            println!("{} {} {}", "✗".red(), step.bold(), "no route matches".yellow());
        }
        Dispatch::Unchanged => {
            println!("{} {} {}", "=".dimmed(), step.bold(), "already current".dimmed());
        }
    }
}
