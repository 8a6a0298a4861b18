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

use std::fs::write;

use leitner_core::error::Fallible;
use tempfile::TempDir;
use tempfile::tempdir;

pub const GEOGRAPHY: &str = r#"name = "Geography"

[[cards]]
front = "Paris"
back = "France of capital"
hint = "Eiffel"

[[cards]]
front = "Berlin"
back = "Germany of capital"
"#;

pub const HISTORY: &str = r#"[[cards]]
front = "1789"
back = "French Revolution"
tags = ["europe"]
"#;

/// A temporary collection with three cards across two deck files.
pub fn create_test_collection() -> Fallible<TempDir> {
    let dir = tempdir()?;
    write(dir.path().join("geography.toml"), GEOGRAPHY)?;
    write(dir.path().join("history.toml"), HISTORY)?;
    Ok(dir)
}
