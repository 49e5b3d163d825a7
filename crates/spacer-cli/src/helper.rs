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

use tempfile::TempDir;
use tempfile::tempdir;

use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;

/// A fresh database in a temporary directory. The directory is removed when
/// the returned `TempDir` is dropped, so keep it alive.
pub fn temp_database() -> Fallible<(TempDir, Database)> {
    let dir = tempdir()?;
    let path = dir.path().join("db.sqlite3");
    let path = path
        .to_str()
        .ok_or_else(|| ErrorReport::new("invalid path"))?;
    let db = Database::new(path)?;
    Ok((dir, db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_database() -> Fallible<()> {
        let (dir, db) = temp_database()?;
        assert!(dir.path().join("db.sqlite3").exists());
        assert!(db.all_progress(None)?.is_empty());
        Ok(())
    }
}
