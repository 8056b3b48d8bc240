//! Basic chat completion example.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example chat_basic
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use openai_connector::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ConnectionConfig::from_env()?;
    let client = Client::connect(config)?;

    let mut request = ChatCompletionRequest::new(
        "gpt-4",
        vec![
            ChatMessage::system("You are a concise assistant."),
            ChatMessage::user("What is the capital of France?"),
        ],
    );
    request.temperature = Some(0.2);
    request.max_tokens = Some(64);

    let response = client.create_chat_completion(&request).await?;

    println!("{}", response.choices[0].message.content);
    if let Some(usage) = response.usage {
        println!(
            "\nTokens: {} (prompt: {}, completion: {})",
            usage.total_tokens, usage.prompt_tokens, usage.completion_tokens
        );
    }

    Ok(())
}
