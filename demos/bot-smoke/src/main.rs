//! Drive a bot through a running teletest service.
//!
//! Run with:
//! TELETEST_URL=http://localhost:8000 cargo run -p bot-smoke-demo -- @my_bot /start "Settings"
//!
//! Sends the message, optionally presses a button by label, then prints the
//! last few messages of the chat. `TELEGRAM_API_ID`, `TELEGRAM_API_HASH` and
//! `TELEGRAM_SESSION_STRING` override the service's default account.

use std::time::Duration;

use anyhow::Context;
use teletest_client::{
    BotResponse, Credentials, PressButtonRequest, SendMessageRequest, TeletestClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: bot-smoke <bot_username> [message] [button_text]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let bot = args.next().context(USAGE)?;
    let text = args.next().unwrap_or_else(|| "/start".to_string());
    let button = args.next();

    let base_url =
        std::env::var("TELETEST_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let client = TeletestClient::builder(&base_url)
        .request_timeout(Duration::from_secs(60))
        .build()?;
    let creds = credentials_from_env()?;
    tracing::info!(%base_url, %bot, custom_account = creds.is_some(), "Driving bot");

    let replies = client
        .send_message(&SendMessageRequest::new(&bot, &text).with_timeout(10), creds.as_ref())
        .await?;
    print_responses("send", &replies);

    if let Some(button) = button {
        let replies = client
            .press_button(&PressButtonRequest::by_text(&bot, button), creds.as_ref())
            .await?;
        print_responses("press", &replies);
    }

    let recent = client.get_messages(&bot, None, creds.as_ref()).await?;
    print_responses("recent", &recent.messages);

    Ok(())
}

fn credentials_from_env() -> anyhow::Result<Option<Credentials>> {
    let mut creds = Credentials::new();
    if let Ok(api_id) = std::env::var("TELEGRAM_API_ID") {
        let api_id = api_id
            .trim()
            .parse()
            .with_context(|| format!("TELEGRAM_API_ID is not an integer: {api_id}"))?;
        creds = creds.with_api_id(api_id);
    }
    if let Ok(api_hash) = std::env::var("TELEGRAM_API_HASH") {
        creds = creds.with_api_hash(api_hash);
    }
    if let Ok(session) = std::env::var("TELEGRAM_SESSION_STRING") {
        creds = creds.with_session_string(session);
    }
    Ok((!creds.is_empty()).then_some(creds))
}

fn print_responses(label: &str, responses: &[BotResponse]) {
    for response in responses {
        match response {
            BotResponse::Message(m) | BotResponse::EditedMessage(m) => {
                println!(
                    "[{label}] {} #{}: {}",
                    response.response_type(),
                    m.message_id.unwrap_or_default(),
                    m.message_text.as_deref().unwrap_or("")
                );
                for button in response.buttons() {
                    println!(
                        "[{label}]   button {:?} -> {:?}",
                        button.text,
                        button.callback_data()
                    );
                }
            }
            BotResponse::CallbackAnswer(a) => {
                let kind = if a.callback_answer_alert == Some(true) { "alert" } else { "toast" };
                println!(
                    "[{label}] callback answer ({kind}): {}",
                    a.callback_answer_text.as_deref().unwrap_or("")
                );
            }
            BotResponse::Popup(p) => {
                println!("[{label}] popup: {}", p.popup_message.as_deref().unwrap_or(""));
            }
        }
    }
}
