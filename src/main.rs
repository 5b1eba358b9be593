use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use schemaforge::client::FixedClient;
use schemaforge::config::Settings;
use schemaforge::prompt::{Complexity, Prompt};
use schemaforge::service::{self, SchemaService, Status};

#[derive(Parser)]
#[command(name = "schemaforge")]
#[command(author, version, about = "Recover database schemas from model output and export them as DDL or ORM schemas")]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover a schema from raw model output and print it as JSON
    Extract {
        /// File with the model output (defaults to stdin)
        input: Option<PathBuf>,
    },

    /// Render a schema JSON document
    Export {
        /// Target format: postgresql, mysql, prisma, drizzle
        #[arg(short, long, default_value = "postgresql")]
        format: String,

        /// Schema JSON file (defaults to stdin)
        input: Option<PathBuf>,
    },

    /// Run the generate pipeline against a saved model response
    Generate {
        /// Natural-language description of the application
        description: String,

        /// simple, standard or enterprise
        #[arg(short, long, default_value = "standard")]
        complexity: String,

        /// File holding the model's answer to the prompt
        #[arg(short, long)]
        response: PathBuf,
    },

    /// Print the instruction template sent to the model
    Prompt {
        description: String,

        #[arg(short, long, default_value = "standard")]
        complexity: String,
    },

    /// List example application descriptions
    Examples,

    /// Report configuration status
    Health,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let level = cli.log_level.as_deref().unwrap_or(&settings.log_level);
    schemaforge::logging::init(level);

    match cli.command {
        Commands::Extract { input } => {
            let raw = read_input(input.as_ref())?;
            let schema = schemaforge::extract(&raw)?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Commands::Export { format, input } => {
            let raw = read_input(input.as_ref())?;
            let value = serde_json::from_str(&raw).context("schema input is not valid JSON")?;
            let response = service::export(value, &format);
            match (response.status, response.code, response.error) {
                (Status::Success, Some(code), _) => print!("{}", code),
                (_, _, error) => bail!("{}", error.unwrap_or_default()),
            }
        }
        Commands::Generate {
            description,
            complexity,
            response,
        } => {
            let complexity = parse_complexity(&complexity)?;
            let text = fs::read_to_string(&response)
                .with_context(|| format!("Failed to read {}", response.display()))?;
            let client = FixedClient::new(settings.llm_provider.clone(), text);
            let service = SchemaService::new(client, settings);
            let result = service.generate(&description, complexity);
            println!("{}", serde_json::to_string_pretty(&result)?);
            if result.status == Status::Error {
                std::process::exit(1);
            }
        }
        Commands::Prompt {
            description,
            complexity,
        } => {
            let prompt = Prompt::schema_request(&description, parse_complexity(&complexity)?);
            println!("{}\n\n{}", prompt.system, prompt.user);
        }
        Commands::Examples => {
            println!("{}", serde_json::to_string_pretty(&service::examples())?);
        }
        Commands::Health => {
            let service = SchemaService::new(schemaforge::client::Unconfigured, settings);
            println!("{}", serde_json::to_string_pretty(&service.health())?);
        }
    }

    Ok(())
}

fn parse_complexity(s: &str) -> Result<Complexity> {
    match Complexity::from_str(s) {
        Some(c) => Ok(c),
        None => bail!("Invalid complexity: {} (expected simple, standard or enterprise)", s),
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
