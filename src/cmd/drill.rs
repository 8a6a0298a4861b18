// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Terminal drill: shows each due card's front, reveals the back on Enter,
//! and records the grade.

use std::io::BufRead;
use std::io::Write;

use chrono::Local;
use leitner_core::AnswerDifficulty;
use leitner_core::Card;
use leitner_core::Day;
use leitner_core::Session;
use leitner_core::error::Fallible;
use leitner_core::get_hint;

use crate::collection::Collection;
use crate::db::Database;

pub struct DrillConfig {
    pub directory: Option<String>,
    pub card_limit: Option<usize>,
}

/// What the user typed at a prompt.
enum Input {
    Line(String),
    Quit,
}

fn read_input(input: &mut impl BufRead) -> Fallible<Input> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Input::Quit);
    }
    let line = line.trim();
    if line == "q" {
        Ok(Input::Quit)
    } else {
        Ok(Input::Line(line.to_string()))
    }
}

pub fn start_drill(
    config: DrillConfig,
    input: impl BufRead,
    out: &mut impl Write,
) -> Fallible<()> {
    let collection = Collection::new(config.directory)?;
    let reviewed = drill(collection, config.card_limit, input, out)?;
    log::debug!("Drill finished after {reviewed} reviews");
    Ok(())
}

/// Run a drill over the cards due on the collection's current day. Returns
/// the number of cards reviewed.
fn drill(
    collection: Collection,
    card_limit: Option<usize>,
    mut input: impl BufRead,
    out: &mut impl Write,
) -> Fallible<usize> {
    let Collection { mut db, deck, .. } = collection;
    let today: Day = db.current_day()?;

    let mut due: Vec<Card> = deck.due(today).into_iter().cloned().collect();
    if let Some(limit) = card_limit {
        due.truncate(limit);
    }
    if due.is_empty() {
        writeln!(out, "No cards due today.")?;
        return Ok(0);
    }

    let session = Session::new(deck, Vec::new());
    let total = due.len();
    for (idx, card) in due.iter().enumerate() {
        writeln!(out, "[{}/{total}] {}", idx + 1, card.front())?;
        if !reveal(card, &mut input, out)? {
            break;
        }
        let Some(difficulty) = grade(&mut input, out)? else {
            break;
        };
        record(&session, &mut db, card, difficulty, today, out)?;
    }

    let reviewed = session.history().len();
    writeln!(out, "Session completed: {reviewed} of {total} cards reviewed.")?;
    Ok(reviewed)
}

/// Wait for Enter, answering `?` with the hint. False if the user quit.
fn reveal(card: &Card, input: &mut impl BufRead, out: &mut impl Write) -> Fallible<bool> {
    loop {
        write!(out, "(Enter to reveal, ? for a hint, q to quit) ")?;
        out.flush()?;
        match read_input(input)? {
            Input::Quit => return Ok(false),
            Input::Line(line) if line == "?" => writeln!(out, "Hint: {}", get_hint(card))?,
            Input::Line(_) => {
                writeln!(out, "{}", card.back())?;
                return Ok(true);
            }
        }
    }
}

/// Ask until a valid difficulty is given. None if the user quit.
fn grade(input: &mut impl BufRead, out: &mut impl Write) -> Fallible<Option<AnswerDifficulty>> {
    loop {
        write!(out, "(w)rong, (h)ard or (e)asy? ")?;
        out.flush()?;
        match read_input(input)? {
            Input::Quit => return Ok(None),
            Input::Line(line) => match line.parse::<AnswerDifficulty>() {
                Ok(difficulty) => return Ok(Some(difficulty)),
                Err(e) => writeln!(out, "{e}")?,
            },
        }
    }
}

fn record(
    session: &Session,
    db: &mut Database,
    card: &Card,
    difficulty: AnswerDifficulty,
    today: Day,
    out: &mut impl Write,
) -> Fallible<()> {
    let record = session.review(card.hash(), difficulty, today)?;
    db.save_review(&record, Local::now().naive_local())?;
    writeln!(out, "Bucket {} -> {}", record.previous_bucket, record.new_bucket)?;
    Ok(())
}
