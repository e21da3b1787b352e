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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::export::export_module;
use crate::cmd::import::import_file;
use crate::cmd::scores::ScoresFormat;
use crate::cmd::scores::print_scores;
use crate::error::Fallible;
use crate::library::Library;
use crate::study::server::start_server;
use crate::types::module_id::ModuleId;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the study interface.
    Serve {
        /// Optional path to the data directory.
        directory: Option<String>,
        /// Port to listen on, overriding the config file.
        #[arg(long)]
        port: Option<u16>,
        /// Don't open a browser.
        #[arg(long)]
        no_open: bool,
    },
    /// Import a CSV file into a module, replacing its cards.
    Import {
        /// The module number.
        module: ModuleId,
        /// Path to the CSV file.
        file: PathBuf,
        /// Optional path to the data directory.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Export a module's cards as CSV.
    Export {
        /// The module number.
        module: ModuleId,
        /// Optional path to the data directory.
        #[arg(long)]
        directory: Option<String>,
        /// Write to this file instead of standard output.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print every module's card count and last score.
    Scores {
        /// Optional path to the data directory.
        directory: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = ScoresFormat::Text)]
        format: ScoresFormat,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            directory,
            port,
            no_open,
        } => {
            let mut library = Library::open(directory)?;
            if let Some(port) = port {
                library.config.port = port;
            }
            if no_open {
                library.config.open_browser = false;
            }
            start_server(library).await
        }
        Command::Import {
            module,
            file,
            directory,
        } => {
            let library = Library::open(directory)?;
            import_file(&library, module, &file)
        }
        Command::Export {
            module,
            directory,
            output,
        } => {
            let library = Library::open(directory)?;
            export_module(&library, module, output)
        }
        Command::Scores { directory, format } => {
            let library = Library::open(directory)?;
            print_scores(&library, format)
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_definition() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_import() {
        let cli = Command::try_parse_from(["flashdeck", "import", "3", "cards.csv"]).unwrap();
        match cli {
            Command::Import { module, file, .. } => {
                assert_eq!(module, ModuleId::new(3));
                assert_eq!(file, PathBuf::from("cards.csv"));
            }
            _ => panic!("Expected Import"),
        }
    }

    #[test]
    fn test_parse_rejects_module_zero() {
        assert!(Command::try_parse_from(["flashdeck", "export", "0"]).is_err());
    }
}
