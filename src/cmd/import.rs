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

use std::fs::File;
use std::path::Path;

use crate::controller::Controller;
use crate::error::Fallible;
use crate::error::fail;
use crate::import::read_rows;
use crate::library::Library;
use crate::types::module_id::ModuleId;

/// Import a CSV file into a module, the same way an upload does.
pub fn import_file(library: &Library, module: ModuleId, path: &Path) -> Fallible<()> {
    if !path.exists() {
        return fail(format!("file does not exist: {}", path.display()));
    }
    let mut controller = Controller::new(library.catalog()?);
    if controller.catalog().get(module).is_none() {
        return fail(format!("no such module: {module}"));
    }
    let rows = read_rows(File::open(path)?)?;
    let count = controller.import(module, &rows);
    if count == 0 {
        println!("No valid rows in {}; module {module} is unchanged.", path.display());
    } else {
        println!("Imported {count} cards into {}.", module.display_name());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_import_file() -> Fallible<()> {
        let dir = tempdir()?;
        let csv = dir.path().join("cards.csv");
        write(&csv, "Cat,Animal\nRun,Verb\n")?;
        let library = Library::open(Some(dir.path().display().to_string()))?;
        import_file(&library, ModuleId::new(4), &csv)?;
        let catalog = library.catalog()?;
        let cards = catalog.get(ModuleId::new(4)).unwrap().cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].definition(), "Verb");
        Ok(())
    }

    #[test]
    fn test_import_into_unknown_module() -> Fallible<()> {
        let dir = tempdir()?;
        let csv = dir.path().join("cards.csv");
        write(&csv, "Cat,Animal\n")?;
        let library = Library::open(Some(dir.path().display().to_string()))?;
        let result = import_file(&library, ModuleId::new(15), &csv);
        assert_eq!(result.err().unwrap().to_string(), "error: no such module: 15");
        Ok(())
    }

    #[test]
    fn test_import_missing_file() -> Fallible<()> {
        let dir = tempdir()?;
        let library = Library::open(Some(dir.path().display().to_string()))?;
        let result = import_file(&library, ModuleId::new(1), &dir.path().join("nope.csv"));
        assert!(result.is_err());
        Ok(())
    }
}
