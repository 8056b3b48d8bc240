//! Audio transcription example.
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example transcribe_audio -- recording.wav
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use openai_connector::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: transcribe_audio <audio-file>")?;
    let bytes = std::fs::read(&path)?;
    let file_name = std::path::Path::new(&path)
        .file_name()
        .map_or_else(|| path.clone(), |n| n.to_string_lossy().into_owned());

    let config = ConnectionConfig::from_env()?;
    let client = Client::connect(config)?;

    let mut request = TranscriptionRequest::new(FileContent::new(bytes, file_name), "whisper-1");
    request.language = Some("en".to_owned());

    let response = client.create_transcription(&request).await?;
    println!("{}", response.text);

    Ok(())
}
