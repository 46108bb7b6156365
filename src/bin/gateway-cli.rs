use clap::Parser;
use serde_json::{Map, Value};

use generate_gateway::http::{ErrorBody, GenerateRequest, GenerateResponse};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Send a generate request to the gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8434")]
    url: String,

    /// Mode to resolve settings from.
    #[arg(short, long)]
    mode: Option<String>,

    /// Setting override as KEY=VALUE. VALUE is parsed as JSON, falling back
    /// to a plain string. Repeatable.
    #[arg(short, long = "set", value_parser = parse_setting)]
    settings: Vec<(String, Value)>,

    /// Prompt text.
    text: String,
}

fn parse_setting(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err("setting name must not be empty".to_string());
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = if cli.settings.is_empty() {
        None
    } else {
        Some(cli.settings.into_iter().collect::<Map<String, Value>>())
    };
    let request = GenerateRequest {
        text: cli.text,
        mode: cli.mode,
        settings,
    };

    let res = reqwest::Client::new()
        .post(format!("{}/generate", cli.url.trim_end_matches('/')))
        .json(&request)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let text = res.text().await?;
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .map(|e| e.detail)
            .unwrap_or(text);
        eprintln!("Error: gateway returned status {}: {}", status, detail);
        std::process::exit(1);
    }

    let body: GenerateResponse = res.json().await?;
    println!("{}", body.response);
    Ok(())
}
