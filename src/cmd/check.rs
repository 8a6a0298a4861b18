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

use std::io::Write;

use leitner_core::error::Fallible;

use crate::collection::Collection;

/// Loading the collection already parses every deck file and validates the
/// stored buckets; what remains is to report database rows with no card.
pub fn check_collection(collection: &Collection, out: &mut impl Write) -> Fallible<()> {
    log::debug!("Checking {}", collection.directory.display());
    let orphans = collection.orphans()?;
    for hash in &orphans {
        log::warn!("Orphan card in database: {hash}");
    }
    let buckets = collection.deck.buckets().iter().count();
    writeln!(
        out,
        "{} cards in {buckets} buckets, {} orphan records.",
        collection.deck.len(),
        orphans.len()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_test_collection;

    #[test]
    fn test_clean_collection() -> Fallible<()> {
        let dir = create_test_collection()?;
        let collection = Collection::new(Some(dir.path().display().to_string()))?;
        let mut out = Vec::new();
        check_collection(&collection, &mut out)?;
        assert_eq!(String::from_utf8(out)?, "3 cards in 1 buckets, 0 orphan records.\n");
        Ok(())
    }

    #[test]
    fn test_invalid_deck_file() -> Fallible<()> {
        let dir = create_test_collection()?;
        write(dir.path().join("broken.toml"), "[[cards]]\nfront = \"only a front\"\n")?;
        let result = Collection::new(Some(dir.path().display().to_string()));
        let err = result.err().unwrap();
        assert!(err.to_string().contains("broken.toml"));
        Ok(())
    }
}
