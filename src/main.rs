use clap::Parser;
use docstack::cli::commands::{parse_inputs, Cli, Commands};
use docstack::domain::error::DomainError;
use docstack::Docstack;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let db_path = std::env::var("DOCSTACK_DB").unwrap_or_else(|_| "./docstack.db".into());
    let collection = cli
        .collection
        .clone()
        .or_else(|| std::env::var("DOCSTACK_COLLECTION").ok())
        .unwrap_or_else(|| "default".into());

    let ds = match Docstack::new(&db_path, &collection) {
        Ok(ds) => ds,
        Err(e) => {
            eprintln!("Error initializing docstack: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(ds, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(ds: Docstack, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Init => {
            // Schema bootstrap and collection creation happen on open.
            println!(
                "{}",
                serde_json::to_string_pretty(ds.collection()).unwrap()
            );
        }
        Commands::Add { json } => {
            let inputs = parse_inputs(&json)?;
            let docs = ds.ingest(inputs).await?;
            println!("{}", serde_json::to_string_pretty(&docs).unwrap());
        }
        Commands::Search { text, limit, ranks } => {
            if ranks {
                let ranking = ds.search_with_ranking(&text, limit)?;
                println!("{}", serde_json::to_string_pretty(&ranking).unwrap());
            } else {
                let docs = ds.retrieve(&text, limit)?;
                println!("{}", serde_json::to_string_pretty(&docs).unwrap());
            }
        }
        Commands::Get { id } => match ds.get_document(&id)? {
            Some(doc) => println!("{}", serde_json::to_string_pretty(&doc).unwrap()),
            None => return Err(DomainError::NotFound(format!("document {id}")).into()),
        },
        Commands::Stats => {
            let stats = ds.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats).unwrap());
        }
    }
    Ok(())
}
