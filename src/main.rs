use anyhow::{anyhow, Context, Result};
use log::info;
use std::env;
use std::path::{Path, PathBuf};
use std::process;
use uuid::Uuid;

use studymates_import::identity::Session;
use studymates_import::import::{write_template, ImportError, Importer, TEMPLATE_FILE_NAME};
use studymates_import::output::Message;
use studymates_import::question::Difficulty;
use studymates_import::settings::{Settings, USER_VAR};
use studymates_import::store::{CsvQuestionStore, QuestionFilter, QuestionStore};

const USAGE: &str = "Usage:
  studymates-import import <file.csv>
  studymates-import template [path]
  studymates-import list [easy|medium|hard] [--mine]
  studymates-import delete <question-uuid>";

fn import(settings: &Settings, store: &CsvQuestionStore, args: &[String]) -> Result<Message> {
    let path = args.get(0).context("Please select a CSV file to upload")?;
    let importer = Importer::new(store, Session::new(settings.user.clone()));
    let message = match importer.import_file(Path::new(path)) {
        Ok(report) => Message::ImportCompleted(report),
        Err(e @ ImportError::Unreadable { .. }) => Message::ImportFailed(e.to_string()),
        Err(ImportError::NotAuthenticated) => Message::ImportRefused(format!(
            "{} (set {})",
            ImportError::NotAuthenticated,
            USER_VAR
        )),
        Err(e) => Message::ImportRefused(e.to_string()),
    };
    Ok(message)
}

fn list(settings: &Settings, store: &CsvQuestionStore, args: &[String]) -> Result<Message> {
    let mut filter = QuestionFilter::default();
    for arg in args {
        if arg == "--mine" {
            let user = settings
                .user
                .clone()
                .with_context(|| format!("--mine requires {} to be set", USER_VAR))?;
            filter.created_by = Some(user);
        } else {
            let difficulty = Difficulty::parse(arg)
                .with_context(|| format!("Unknown difficulty {:?}", arg))?;
            filter.difficulty = Some(difficulty);
        }
    }
    Ok(Message::QuestionList(store.list(&filter)?))
}

fn delete(store: &CsvQuestionStore, args: &[String]) -> Result<Message> {
    let id = args.get(0).context("Missing question id")?;
    let id = Uuid::parse_str(id).with_context(|| format!("Invalid question id {:?}", id))?;
    store.delete(&id)?;
    Ok(Message::QuestionDeleted(id))
}

fn template(args: &[String]) -> Result<Message> {
    let path = args
        .get(0)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(TEMPLATE_FILE_NAME));
    write_template(&path).with_context(|| format!("Could not write template to {:?}", path))?;
    Ok(Message::TemplateWritten(path))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();

    let result = || -> Result<Message> {
        let (command, rest) = args.split_first().context(USAGE)?;
        if command == "template" {
            return template(rest);
        }

        let settings = Settings::from_env()?;
        info!("Using question store {:?}", settings.store_path);
        let store = CsvQuestionStore::open(&settings.store_path)
            .with_context(|| format!("Could not open {:?}", settings.store_path))?;

        match command.as_str() {
            "import" => import(&settings, &store, rest),
            "list" => list(&settings, &store, rest),
            "delete" => delete(&store, rest),
            _ => Err(anyhow!("Unknown command {:?}\n{}", command, USAGE)),
        }
    }();

    match result {
        Ok(message) => {
            print!("{}", message);
            if let Message::ImportRefused(_) | Message::ImportFailed(_) = message {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}
