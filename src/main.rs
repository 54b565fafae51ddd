use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lola::{ChatController, Config, GatewayClient, JsonSessionRepository, SendOptions};

/// Developer console for the LoLA chat client core.
///
/// Drives the same controller/client stack as the desktop UI: sessions
/// created or continued here show up in the app and vice versa.
#[derive(Parser)]
#[command(name = "lola", version, about = "LoLA chat client console")]
struct Cli {
    /// Gateway base URL (overrides LOLA_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send one message in the active chat and print the reply
    Chat {
        message: String,
        /// Answer without document retrieval
        #[arg(long)]
        no_rag: bool,
        /// Number of document chunks to retrieve
        #[arg(long, default_value_t = 3)]
        top_k: u32,
        /// Model override for this request
        #[arg(long)]
        model: Option<String>,
    },
    /// List stored chat sessions
    Sessions,
    /// Start a new chat session and make it active
    New,
    /// Delete a chat session by id
    Delete { id: String },
    /// List models available on the backend
    Models,
    /// List documents in the knowledge base
    Documents,
    /// Check backend health
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }

    let client = GatewayClient::new(&config.api_base_url)?;

    match cli.command {
        Command::Chat {
            message,
            no_rag,
            top_k,
            model,
        } => {
            let controller = controller(client).await?;
            let options = SendOptions {
                use_rag: !no_rag,
                top_k,
                model,
            };

            match controller.send_message(&message, options).await {
                Ok(reply) => {
                    println!("{}", reply.text);
                    if !reply.sources.is_empty() {
                        println!();
                        println!("Sources: {}", reply.sources.join(", "));
                    }
                    if let Some(model) = reply.model_used {
                        println!("Model: {}", model);
                    }
                }
                Err(e) => anyhow::bail!(e.user_message()),
            }
        }
        Command::Sessions => {
            let controller = controller(client).await?;
            let active = controller.active_id();

            for session in controller.sessions() {
                let marker = if active.as_deref() == Some(session.id()) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}  {:40}  {} messages  {}",
                    marker,
                    session.id(),
                    session.title(),
                    session.message_count(),
                    session.updated_at().format("%Y-%m-%d %H:%M")
                );
            }
        }
        Command::New => {
            let controller = controller(client).await?;
            let session = controller.new_chat().await;
            println!("{}", session.id());
        }
        Command::Delete { id } => {
            let controller = controller(client).await?;
            controller.delete_chat(&id).await;
        }
        Command::Models => {
            let response = client.list_models().await?;
            for model in response.models {
                println!("{}  [{}]", model.name, model.capabilities.join(", "));
            }
            if let Some(current) = response.current_llm {
                println!("current: {}", current);
            }
        }
        Command::Documents => {
            let response = client.list_documents().await?;
            for doc in response.documents {
                println!("{}  ({} chunks)", doc.filename, doc.chunks);
            }
            println!(
                "{} documents, {} chunks",
                response.total_documents, response.total_chunks
            );
        }
        Command::Health => {
            let health = client.health().await?;
            println!("status: {}", health.status);
            println!("version: {}", health.version);
            for (kind, model) in health.models {
                println!("{}: {}", kind, model);
            }
            println!("vector store size: {}", health.vector_store_size);
        }
    }

    Ok(())
}

/// Build the controller on the on-disk repository.
async fn controller(client: GatewayClient) -> anyhow::Result<ChatController> {
    let repository =
        JsonSessionRepository::new().context("Failed to initialize session repository")?;
    Ok(ChatController::init(Arc::new(repository), Arc::new(client)).await)
}
