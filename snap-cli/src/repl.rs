//! Line-oriented interactive session.
//!
//! Lookups and reverse geocoding run as spawned tasks and report back over a
//! channel, so the prompt keeps accepting input while a request is in
//! flight. The controller drops results that a newer submission has
//! superseded.

use anyhow::Context;
use chrono::Local;
use std::sync::Arc;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use weathersnap_core::{
    ConfiguredLocator, Controller, Located, Locating, RetrievalService, Settled, Submission,
    ViewState, WeatherProvider, render,
};

const HELP: &str = "Type a city and press Enter. Empty line repeats the last search. \
                    Commands: :locate, :reset, :help, :quit";

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Resubmit,
    Locate,
    Reset,
    Help,
    Quit,
    Text(String),
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Resubmit,
        ":locate" | ":here" => Input::Locate,
        ":reset" => Input::Reset,
        ":help" | "?" => Input::Help,
        ":quit" | ":q" | ":exit" => Input::Quit,
        text => Input::Text(text.to_string()),
    }
}

/// A number typed while the suggestions are on screen picks one of them.
fn suggestion_pick<'a>(text: &str, state: &ViewState, suggestions: &'a [String]) -> Option<&'a str> {
    if !matches!(state, ViewState::Empty) {
        return None;
    }
    let n: usize = text.parse().ok()?;
    suggestions.get(n.checked_sub(1)?).map(String::as_str)
}

/// Work finished in the background.
#[derive(Debug)]
enum Event {
    Located(Located),
    Settled(Settled),
}

fn spawn_lookup<P>(
    service: Arc<RetrievalService<P>>,
    submission: Submission,
    tx: mpsc::UnboundedSender<Event>,
) where
    P: WeatherProvider + 'static,
{
    tokio::spawn(async move {
        let settled = submission.execute(&service).await;
        // The receiver only goes away when the session has ended.
        let _ = tx.send(Event::Settled(settled));
    });
}

fn spawn_reverse_lookup<P>(
    service: Arc<RetrievalService<P>>,
    locating: Locating,
    tx: mpsc::UnboundedSender<Event>,
) where
    P: WeatherProvider + 'static,
{
    tokio::spawn(async move {
        let located = locating.resolve(&service).await;
        let _ = tx.send(Event::Located(located));
    });
}

fn show<P: WeatherProvider>(controller: &Controller<P>, suggestions: &[String]) {
    println!();
    print!("{}", render(controller.state(), suggestions, &Local));
}

pub async fn run<P>(
    mut controller: Controller<P>,
    suggestions: Vec<String>,
    locator: ConfiguredLocator,
) -> anyhow::Result<()>
where
    P: WeatherProvider + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");
    show(&controller, &suggestions);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };

                let submission = match parse_input(&line) {
                    Input::Quit => break,
                    Input::Help => {
                        println!("{HELP}");
                        continue;
                    }
                    Input::Reset => {
                        controller.reset();
                        None
                    }
                    Input::Locate => {
                        if let Some(locating) = controller.locate(&locator).await {
                            spawn_reverse_lookup(controller.service(), locating, tx.clone());
                        }
                        None
                    }
                    Input::Resubmit => controller.begin(),
                    Input::Text(text) => {
                        let query = suggestion_pick(&text, controller.state(), &suggestions)
                            .map(str::to_string)
                            .unwrap_or(text);
                        controller.set_query(query);
                        controller.begin()
                    }
                };

                if let Some(submission) = submission {
                    spawn_lookup(controller.service(), submission, tx.clone());
                }
                show(&controller, &suggestions);
            }
            Some(event) = rx.recv() => match event {
                Event::Located(located) => {
                    if let Some(submission) = controller.finish_locating(located) {
                        spawn_lookup(controller.service(), submission, tx.clone());
                        show(&controller, &suggestions);
                    }
                }
                Event::Settled(settled) => {
                    if controller.settle(settled) {
                        show(&controller, &suggestions);
                    }
                }
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weathersnap_core::ErrorKind;

    fn cities() -> Vec<String> {
        vec!["London".into(), "Tokyo".into()]
    }

    #[test]
    fn parses_commands_and_text() {
        assert_eq!(parse_input("  "), Input::Resubmit);
        assert_eq!(parse_input(":locate"), Input::Locate);
        assert_eq!(parse_input(":q"), Input::Quit);
        assert_eq!(parse_input(" New York "), Input::Text("New York".into()));
    }

    #[test]
    fn number_picks_suggestion_only_when_empty() {
        let cities = cities();
        assert_eq!(suggestion_pick("2", &ViewState::Empty, &cities), Some("Tokyo"));
        assert_eq!(suggestion_pick("0", &ViewState::Empty, &cities), None);
        assert_eq!(suggestion_pick("3", &ViewState::Empty, &cities), None);
        assert_eq!(suggestion_pick("Oslo", &ViewState::Empty, &cities), None);
        assert_eq!(
            suggestion_pick("1", &ViewState::Error(ErrorKind::NotFound), &cities),
            None
        );
    }
}
