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
use std::io::stdout;
use std::path::PathBuf;

use crate::error::Fallible;
use crate::error::fail;
use crate::import::write_cards;
use crate::library::Library;
use crate::types::module_id::ModuleId;

/// Write a module's cards as CSV, to `output` or standard output.
pub fn export_module(
    library: &Library,
    module_id: ModuleId,
    output: Option<PathBuf>,
) -> Fallible<()> {
    let catalog = library.catalog()?;
    let Some(module) = catalog.get(module_id) else {
        return fail(format!("no such module: {module_id}"));
    };
    match output {
        Some(path) => {
            write_cards(module.cards(), File::create(&path)?)?;
            log::info!(
                "Exported {} cards from {} to {}.",
                module.cards().len(),
                module.name(),
                path.display()
            );
        }
        None => write_cards(module.cards(), stdout().lock())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;
    use crate::cmd::import::import_file;

    #[test]
    fn test_export_after_import() -> Fallible<()> {
        let dir = tempdir()?;
        let source = dir.path().join("in.csv");
        write(&source, "Term,Definition\n  Cat , Animal\nlonely\n")?;
        let library = Library::open(Some(dir.path().display().to_string()))?;
        import_file(&library, ModuleId::new(1), &source)?;
        let target = dir.path().join("out.csv");
        export_module(&library, ModuleId::new(1), Some(target.clone()))?;
        assert_eq!(read_to_string(target)?, "Term,Definition\nCat,Animal\n");
        Ok(())
    }

    #[test]
    fn test_export_unknown_module() -> Fallible<()> {
        let dir = tempdir()?;
        let library = Library::open(Some(dir.path().display().to_string()))?;
        assert!(export_module(&library, ModuleId::new(99), None).is_err());
        Ok(())
    }
}
