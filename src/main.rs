use std::{
    io::{
        self,
        Read,
        Write,
    },
    path::PathBuf,
    process,
};

use clap::{
    Parser,
    Subcommand,
};
use mochi_sync::{
    core::{
        pipeline::run_sync,
        MochiSyncError,
    },
    mochi::MochiClient,
    settings::SettingsData,
};

#[derive(Parser)]
#[command(name = "mochi-sync", version, about = "Sync delimited text into Mochi flashcards")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Store the Mochi API key
    SetKey { api_key: String },
    /// Set the delimiter that starts a new card (default "#")
    SetDelimiter { delimiter: String },
    /// Pick the card template new cards are created with
    SelectTemplate,
    /// Segment a text file (or stdin) into cards and sync them into a deck
    Export {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,
        /// Deck id to sync into; prompts with a deck list when omitted
        #[arg(long)]
        deck: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), MochiSyncError> {
    let mut settings = SettingsData::load();

    match cli.command {
        Command::SetKey { api_key } => {
            settings.api_key = api_key;
            settings.save()?;
            println!("API key saved");
            Ok(())
        }
        Command::SetDelimiter { delimiter } => {
            if delimiter.is_empty() {
                return Err(MochiSyncError::EmptyDelimiter);
            }
            settings.delimiter = delimiter;
            settings.save()?;
            println!("Delimiter saved");
            Ok(())
        }
        Command::SelectTemplate => select_template(&mut settings).await,
        Command::Export { file, deck } => export(&mut settings, file, deck).await,
    }
}

async fn select_template(settings: &mut SettingsData) -> Result<(), MochiSyncError> {
    if settings.api_key.is_empty() {
        return Err(MochiSyncError::MissingApiKey);
    }

    let client = MochiClient::new(&settings.api_key)?;
    let templates = client.templates().await;
    if templates.is_empty() {
        return Err(MochiSyncError::Custom("No templates found on Mochi".to_string()));
    }

    for (i, template) in templates.iter().enumerate() {
        println!("{:>3}. {} ({})", i + 1, template.name, template.id);
    }
    let index = prompt_index("Select a template", templates.len())?;
    let template = &templates[index];

    settings.template_id = template.id.clone();
    settings.save()?;
    println!("Selected {}", template.name);
    Ok(())
}

async fn export(
    settings: &mut SettingsData,
    file: Option<PathBuf>,
    deck: Option<String>,
) -> Result<(), MochiSyncError> {
    if settings.api_key.is_empty() {
        return Err(MochiSyncError::MissingApiKey);
    }
    if settings.template_id.is_empty() {
        return Err(MochiSyncError::NoTemplateSelected);
    }

    // The text snapshot is captured up front; later edits to the file do not
    // affect a sync already underway.
    let text = read_text(file)?;
    let client = MochiClient::new(&settings.api_key)?;

    let deck_id = match deck {
        Some(id) => id,
        None => {
            let decks = client.decks().await;
            if decks.is_empty() {
                return Err(MochiSyncError::Custom("No decks found on Mochi".to_string()));
            }
            for (i, deck) in decks.iter().enumerate() {
                println!("{:>3}. {} ({})", i + 1, deck.name, deck.id);
            }
            let index = prompt_index("Select a deck", decks.len())?;
            let deck = &decks[index];
            println!("Selected {}", deck.name);
            deck.id.clone()
        }
    };

    settings.deck_id = Some(deck_id.clone());
    settings.save()?;

    let outcome = run_sync(&client, settings, &text, &deck_id).await?;
    println!("{}", outcome.summary());
    println!(
        "  created: {}, updated: {}, unchanged: {}",
        outcome.created, outcome.updated, outcome.skipped
    );
    Ok(())
}

fn read_text(file: Option<PathBuf>) -> Result<String, MochiSyncError> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn prompt_index(prompt: &str, len: usize) -> Result<usize, MochiSyncError> {
    print!("{prompt} [1-{len}]: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let choice: usize = line
        .trim()
        .parse()
        .map_err(|_| MochiSyncError::Custom(format!("Not a number: {}", line.trim())))?;

    if choice == 0 || choice > len {
        return Err(MochiSyncError::Custom(format!("Choice out of range: {choice}")));
    }
    Ok(choice - 1)
}
