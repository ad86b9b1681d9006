use cryptopia::build_public_client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Public endpoints need no credentials
    let client = build_public_client()?;

    // Example 1: Markets quoted in BTC over the last 24 hours
    println!("=== Getting BTC Markets ===");
    match client.get_markets(Some("BTC"), Some(24)).await {
        Ok(markets) => {
            println!("Successfully fetched {} markets", markets.len());

            println!("\nFirst 10 markets:");
            for market in markets.iter().take(10) {
                println!(
                    "  {} - Last: {} Bid: {} Ask: {} Volume: {}",
                    market.label, market.last_price, market.bid_price, market.ask_price, market.volume
                );
            }
        }
        Err(e) => {
            eprintln!("Failed to get markets: {}", e);
        }
    }

    // Example 2: Top of the DOT/BTC order book
    println!("\n=== Getting Order Book ===");
    match client.get_market_orders("DOT_BTC", 5).await {
        Ok(orders) => {
            println!("Bids:");
            for entry in &orders.buy {
                println!("  {} @ {}", entry.volume, entry.price);
            }
            println!("Asks:");
            for entry in &orders.sell {
                println!("  {} @ {}", entry.volume, entry.price);
            }
        }
        Err(e) => {
            eprintln!("Failed to get order book: {}", e);
        }
    }

    // Example 3: Calling a method by name
    println!("\n=== Dispatching By Name ===");
    match client
        .dispatch("GetTradePairs", cryptopia::Params::new())
        .await
    {
        Ok(value) => {
            let count = value.as_array().map_or(0, Vec::len);
            println!("GetTradePairs returned {} pairs", count);
        }
        Err(e) => {
            eprintln!("Failed to dispatch GetTradePairs: {}", e);
        }
    }

    Ok(())
}
