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

use std::io::stdin;
use std::io::stdout;

use clap::Parser;
use leitner_core::AnswerDifficulty;
use leitner_core::error::Fallible;

use crate::cmd::advance::advance_day;
use crate::cmd::check::check_collection;
use crate::cmd::drill::DrillConfig;
use crate::cmd::drill::start_drill;
use crate::cmd::due::list_due;
use crate::cmd::hint::print_hint;
use crate::cmd::review::review_card;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::collection::Collection;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill the cards due today in the terminal.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Maximum number of cards to drill in a session. By default, all cards due today are drilled.
        #[arg(long)]
        card_limit: Option<usize>,
    },
    /// List the cards due on a practice day.
    Due {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The practice day. By default, the collection's current day is used.
        #[arg(long, allow_negative_numbers = true)]
        day: Option<i64>,
    },
    /// Record the outcome of reviewing a single card.
    Review {
        /// The card's hash, or a unique prefix of it.
        card: String,
        /// How hard the card was to recall: wrong, hard or easy.
        difficulty: AnswerDifficulty,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print the hint for a card.
    Hint {
        /// The card's hash, or a unique prefix of it.
        card: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Move the collection to the next practice day.
    Advance {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Check the integrity of a collection.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let mut out = stdout().lock();
    match cli {
        Command::Drill {
            directory,
            card_limit,
        } => {
            let config = DrillConfig {
                directory,
                card_limit,
            };
            start_drill(config, stdin().lock(), &mut out)
        }
        Command::Due { directory, day } => list_due(&Collection::new(directory)?, day, &mut out),
        Command::Review {
            card,
            difficulty,
            directory,
        } => review_card(&mut Collection::new(directory)?, &card, difficulty, &mut out),
        Command::Hint { card, directory } => print_hint(&Collection::new(directory)?, &card, &mut out),
        Command::Stats { directory, format } => {
            print_stats(&Collection::new(directory)?, format, &mut out)
        }
        Command::Advance { directory } => advance_day(&mut Collection::new(directory)?, &mut out),
        Command::Check { directory } => check_collection(&Collection::new(directory)?, &mut out),
    }
}
