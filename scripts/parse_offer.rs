//! Offer Tweet Inspection Script
//!
//! This script checks an offer tweet offline: it reports whether the text is an
//! offer command, which parameters were parsed, which required ones are missing and
//! the payload that would be sent to Instamojo. No network calls are made.

use std::io::{self, Read};

use tweetmojo::offer::{
    build_offer_payload, is_offer_command, missing_fields, parse_offer_command, COVER_FIELD,
};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    println!("🔎 Offer Tweet Inspector");
    println!("========================");

    // Tweet text from the arguments, or stdin when none are given
    let args: Vec<String> = std::env::args().skip(1).collect();
    let tweet = if args.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer.trim().to_string()
    } else {
        args.join(" ")
    };

    if tweet.is_empty() {
        println!("❌ Tweet text cannot be empty!");
        return Err("Tweet text is required".into());
    }

    println!("📝 Tweet: {}", tweet);

    if !is_offer_command(&tweet) {
        println!("❌ Not an offer command (must start with 'instamoffer')");
        std::process::exit(1);
    }
    println!("✅ Offer command detected");

    let params = parse_offer_command(&tweet);
    let mut keys: Vec<&String> = params.keys().collect();
    keys.sort();
    println!("📋 Parsed {} parameter(s):", params.len());
    for key in keys {
        println!("   {} = {}", key, params[key]);
    }

    let missing = missing_fields(&params);
    if !missing.is_empty() {
        println!("❌ Missing required parameter(s): {}", missing.join(", "));
        std::process::exit(1);
    }

    let cover = params
        .contains_key(COVER_FIELD)
        .then(|| "<cover upload response>".to_string());
    let payload = build_offer_payload(&params, "<file upload response>".to_string(), cover)?;

    println!("\n📦 Payload preview:");
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
