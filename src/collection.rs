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

use std::collections::BTreeSet;
use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use chrono::Local;
use leitner_core::Card;
use leitner_core::CardHash;
use leitner_core::Deck;
use leitner_core::error::Fallible;
use leitner_core::error::fail;
use leitner_core::parse_decks;
use walkdir::DirEntry;
use walkdir::WalkDir;

use crate::db::Database;

/// Name of the database file inside a collection directory.
pub const DB_FILE: &str = "leitner.db";

/// A collection directory: its deck files and its database.
pub struct Collection {
    pub directory: PathBuf,
    pub db: Database,
    pub deck: Deck,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;

        let mut db = Database::new(&directory.join(DB_FILE))?;
        let cards: Vec<Card> = load_cards(&directory)?;

        // If a card is in the directory, but not in the DB, it is new. Add it
        // to the database.
        let db_hashes: BTreeSet<CardHash> = db.card_hashes()?;
        let new_cards: Vec<CardHash> = cards
            .iter()
            .map(|card| card.hash())
            .filter(|hash| !db_hashes.contains(hash))
            .collect();
        if !new_cards.is_empty() {
            db.insert_cards(&new_cards, Local::now().naive_local())?;
        }

        let deck = Deck::from_parts(cards, db.bucket_map()?);
        log::debug!(
            "Loaded {} cards from {}",
            deck.len(),
            directory.display()
        );
        Ok(Self {
            directory,
            db,
            deck,
        })
    }

    /// Hashes in the database with no card in the deck files.
    pub fn orphans(&self) -> Fallible<Vec<CardHash>> {
        let orphans = self
            .db
            .card_hashes()?
            .into_iter()
            .filter(|hash| self.deck.get(*hash).is_none())
            .collect();
        Ok(orphans)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

fn load_cards(directory: &Path) -> Fallible<Vec<Card>> {
    let mut files: Vec<(String, String)> = Vec::new();
    for entry in WalkDir::new(directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            let name = path
                .strip_prefix(directory)
                .unwrap_or(path)
                .display()
                .to_string();
            files.push((name, read_to_string(path)?));
        }
    }
    parse_decks(
        files
            .iter()
            .map(|(name, text)| (name.as_str(), text.as_str())),
    )
}
