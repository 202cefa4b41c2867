//! Terminal front-end for the nasal-pair trainer.
//!
//! Environment:
//!   NASAL_PAIRS_DATA_URL  optional remote dataset URL
//!   NASAL_PAIRS_STORE     progress file path (default nasal-pairs.json)

mod console;

use std::env;
use std::io::{self, BufRead, Write};

use pairs_core::model::Side;
use pairs_core::repository::MistakeOrder;
use pairs_core::time::Clock;
use services::loader::DatasetLoader;
use services::schedule::ScheduledTask;
use services::{SessionError, Trainer};
use storage::store::FileStore;

use console::{ConsoleAudio, ConsolePresenter};

const DEFAULT_STORE_PATH: &str = "nasal-pairs.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let records = DatasetLoader::from_env().load().await;
    tracing::info!(count = records.len(), "dataset ready");

    let store_path =
        env::var("NASAL_PAIRS_STORE").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
    let mut trainer = Trainer::new(
        records,
        Box::new(FileStore::open(store_path)),
        Box::new(ConsolePresenter),
        Box::new(ConsoleAudio),
        Clock::default_clock(),
    );

    println!("前后鼻音 trainer - type 'help' for commands");
    match trainer.resume() {
        Ok(Some(task)) => run_task(&mut trainer, task).await,
        Ok(None) => {}
        Err(err) => tracing::warn!(%err, "could not resume previous session"),
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(%err, "stdin read failed");
                break;
            }
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }
        if words[0] == "quit" || words[0] == "q" {
            break;
        }
        match dispatch(&mut trainer, &words) {
            Ok(Some(task)) => run_task(&mut trainer, task).await,
            Ok(None) => {}
            Err(err) => println!("! {err}"),
        }
    }
}

/// Wait out a task's delay, deliver it, and follow any chained tasks until
/// the trainer has nothing more scheduled.
async fn run_task(trainer: &mut Trainer, mut task: ScheduledTask) {
    loop {
        tokio::time::sleep(task.delay).await;
        match trainer.fire(task) {
            Ok(Some(next)) => task = next,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(%err, "scheduled task failed");
                break;
            }
        }
    }
}

fn dispatch(trainer: &mut Trainer, words: &[&str]) -> Result<Option<ScheduledTask>, SessionError> {
    let review = words.get(1).copied() == Some("review");
    match words[0] {
        "help" | "h" => {
            print_help();
            Ok(None)
        }
        "home" => {
            trainer.go_home();
            Ok(None)
        }
        "compare" | "c" => {
            if review {
                trainer.open_compare_review().map(|()| None)
            } else {
                trainer.open_compare().map(|()| None)
            }
        }
        "next" | "n" => trainer.compare_next().map(|()| None),
        "prev" | "p" => trainer.compare_previous().map(|()| None),
        "mistake" | "m" => trainer.compare_mark_mistake().map(|()| None),
        "front" | "f" => trainer.play_side(Side::Front).map(|()| None),
        "back" | "b" => trainer.play_side(Side::Back).map(|()| None),
        "classify" => trainer.start_classify(review).map(|()| None),
        "place" => match (parse_index(words.get(1)), parse_side(words.get(2))) {
            (Some(id), Some(side)) => trainer.place_card(id, side),
            _ => {
                println!("usage: place <id> <front|back>");
                Ok(None)
            }
        },
        "play" => match parse_index(words.get(1)) {
            Some(id) => trainer.play_card(id).map(|()| None),
            None => {
                println!("usage: play <id>");
                Ok(None)
            }
        },
        "challenge" => trainer.start_challenge(review),
        "answer" | "a" => match parse_side(words.get(1)) {
            Some(side) => trainer.answer_challenge(side).map(Some),
            None => {
                println!("usage: answer <front|back>");
                Ok(None)
            }
        },
        "replay" | "r" => trainer.replay_prompt().map(|()| None),
        "book" => {
            let order = if words.get(1).copied() == Some("frequent") {
                MistakeOrder::Frequency
            } else {
                MistakeOrder::Recency
            };
            print_mistake_book(trainer, order);
            Ok(None)
        }
        "unmark" => match parse_index(words.get(1)) {
            Some(index) => {
                trainer.remove_mistake(index)?;
                println!("removed from the mistake book");
                Ok(None)
            }
            None => {
                println!("usage: unmark <index>");
                Ok(None)
            }
        },
        "study" => match parse_index(words.get(1)) {
            Some(index) => trainer.open_compare_at(index).map(|()| None),
            None => {
                println!("usage: study <index>");
                Ok(None)
            }
        },
        other => {
            println!("unknown command '{other}', try 'help'");
            Ok(None)
        }
    }
}

fn print_mistake_book(trainer: &Trainer, order: MistakeOrder) {
    let book = trainer.mistake_book(order);
    if book.is_empty() {
        println!("the mistake book is empty");
        return;
    }
    for (index, record) in book {
        println!(
            "  #{index:<3} {} / {}  ({} mistakes)",
            record.front.text, record.back.text, record.mistakes
        );
    }
}

fn parse_index(word: Option<&&str>) -> Option<usize> {
    word.and_then(|w| w.parse().ok())
}

fn parse_side(word: Option<&&str>) -> Option<Side> {
    match word.copied() {
        Some("front") | Some("f") => Some(Side::Front),
        Some("back") | Some("b") => Some(Side::Back),
        _ => None,
    }
}

fn print_help() {
    println!("  compare [review] | next | prev | mistake | front | back");
    println!("  classify [review] | place <id> <front|back> | play <id>");
    println!("  challenge [review] | answer <front|back> | replay");
    println!("  book [recent|frequent] | unmark <index> | study <index>");
    println!("  home | quit");
}
