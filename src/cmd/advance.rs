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

pub fn advance_day(collection: &mut Collection, out: &mut impl Write) -> Fallible<()> {
    let day = collection.db.advance_day()?;
    writeln!(
        out,
        "Day {day}: {} cards due.",
        collection.deck.due(day).len()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use leitner_core::Day;

    use super::*;
    use crate::helper::create_test_collection;

    #[test]
    fn test_advance() -> Fallible<()> {
        let dir = create_test_collection()?;
        let path = dir.path().display().to_string();
        let mut collection = Collection::new(Some(path.clone()))?;
        let mut out = Vec::new();
        advance_day(&mut collection, &mut out)?;
        advance_day(&mut collection, &mut out)?;
        assert_eq!(String::from_utf8(out)?, "Day 1: 3 cards due.\nDay 2: 3 cards due.\n");
        let collection = Collection::new(Some(path))?;
        assert_eq!(collection.db.current_day()?, Day::new(2));
        Ok(())
    }
}
