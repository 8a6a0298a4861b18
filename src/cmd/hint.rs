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
use leitner_core::get_hint;

use crate::collection::Collection;

pub fn print_hint(collection: &Collection, prefix: &str, out: &mut impl Write) -> Fallible<()> {
    let card = collection.deck.find_by_prefix(prefix)?;
    writeln!(out, "{}", get_hint(card))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use leitner_core::CardHash;

    use super::*;
    use crate::helper::create_test_collection;

    #[test]
    fn test_hints() -> Fallible<()> {
        let dir = create_test_collection()?;
        let collection = Collection::new(Some(dir.path().display().to_string()))?;

        let mut out = Vec::new();
        let paris = CardHash::of_content("Paris", "France of capital");
        print_hint(&collection, &paris.short(), &mut out)?;
        let berlin = CardHash::of_content("Berlin", "Germany of capital");
        print_hint(&collection, &berlin.short(), &mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "Eiffel\nThink about the key concepts related to Berlin\n"
        );
        Ok(())
    }
}
