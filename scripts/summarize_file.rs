//! Run with: cargo run --bin summarize_file -- <transcript.txt> [instruction]
//!
//! Posts a transcript file to a running relay. Set SUMMARIZER_URL to target
//! a deployed instance instead of the local one.

use anyhow::{bail, Context};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Instant;

const DEFAULT_INSTRUCTION: &str = "Summarize the meeting notes clearly in bullet points.";

#[derive(Debug, Serialize)]
struct SummarizeRequest {
    transcript: String,
    prompt: String,
}

#[derive(Debug, Deserialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut args = env::args().skip(1);
    let path = args
        .next()
        .context("usage: summarize_file <transcript.txt> [instruction]")?;
    let prompt = args
        .next()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string());

    let transcript = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Could not read {}. Please ensure it is a .txt file.", path))?;

    if transcript.trim().is_empty() {
        bail!("{} is empty", path);
    }

    let base_url = env::var("SUMMARIZER_URL").unwrap_or_else(|_| {
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        format!("http://127.0.0.1:{}", port)
    });

    println!("\n📝 Summarizing {} ({} chars)", path, transcript.len());
    println!("Instruction: {}\n", prompt);

    let start = Instant::now();

    let response = Client::new()
        .post(format!("{}/summarize", base_url.trim_end_matches('/')))
        .json(&SummarizeRequest { transcript, prompt })
        .send()
        .await
        .with_context(|| format!("Request to {} failed. Is the server running?", base_url))?;

    let elapsed = start.elapsed().as_millis();
    let status = response.status();

    if status.is_success() {
        let body: SummarizeResponse = response.json().await?;
        println!("⏱️  Response time: {}ms\n", elapsed);
        println!("{}\n", body.summary);
        Ok(())
    } else {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        bail!("❌ {} {}", status, message)
    }
}
