//! hiverpc CLI — inspect a Hive-style node from the terminal.
//!
//! Usage:
//! ```bash
//! # Current head block number
//! hiverpc head --url https://api.hive.blog
//!
//! # Fetch one block as JSON
//! hiverpc block --url https://api.hive.blog --num 5022881
//!
//! # Follow the live block stream
//! hiverpc stream --url https://api.hive.blog --count 10
//! ```

use std::env;
use std::process;

use hiverpc_http::HttpClient;
use hiverpc_stream::{BlockFetcher, StreamConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "head" => cmd_head(&args[2..]).await,
        "block" => cmd_block(&args[2..]).await,
        "stream" => cmd_stream(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("hiverpc {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_usage() {
    println!("hiverpc {}", env!("CARGO_PKG_VERSION"));
    println!("Inspect Hive-style blockchain nodes\n");
    println!("USAGE:");
    println!("    hiverpc <COMMAND>\n");
    println!("COMMANDS:");
    println!("    head       Print the node's current head block number");
    println!("    block      Fetch one block and print it as JSON");
    println!("    stream     Follow the live block stream");
    println!("    version    Print version");
    println!("    help       Print this help\n");
    println!("FLAGS:");
    println!("    --url <URL>     Node endpoint  [required]");
    println!("    --num <N>       Block number   [block]");
    println!("    --count <N>     Stop after N blocks, 0 = forever  [stream]");
}

async fn cmd_head(args: &[String]) -> Result<(), String> {
    let url = parse_flag(args, "--url").ok_or("--url is required")?;
    let fetcher = BlockFetcher::new(HttpClient::for_endpoint(&url));

    let head = fetcher.head_block_number().await.map_err(|e| e.to_string())?;
    println!("{head}");
    Ok(())
}

async fn cmd_block(args: &[String]) -> Result<(), String> {
    let url = parse_flag(args, "--url").ok_or("--url is required")?;
    let num: u64 = parse_flag(args, "--num")
        .ok_or("--num is required")?
        .parse()
        .map_err(|_| "--num must be a block number".to_string())?;

    let fetcher = BlockFetcher::new(HttpClient::for_endpoint(&url));
    let raw = fetcher.block_raw(num).await.map_err(|e| e.to_string())?;

    let pretty: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|e| e.to_string())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&pretty).unwrap_or_default()
    );
    Ok(())
}

async fn cmd_stream(args: &[String]) -> Result<(), String> {
    let url = parse_flag(args, "--url").ok_or("--url is required")?;
    let count: u64 = parse_flag(args, "--count")
        .unwrap_or_else(|| "0".into())
        .parse()
        .map_err(|_| "--count must be a number".to_string())?;

    let fetcher = BlockFetcher::new(HttpClient::for_endpoint(&url));
    let mut stream = fetcher
        .stream(StreamConfig::default())
        .await
        .map_err(|e| e.to_string())?;

    let mut seen = 0u64;
    while let Some(block) = stream.recv().await {
        println!(
            "#{} {} witness={} txs={}",
            block.block_number,
            block.block_id,
            block.witness,
            block.transactions.len()
        );
        seen += 1;
        if count > 0 && seen >= count {
            break;
        }
    }
    Ok(())
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == flag)?;
    args.get(pos + 1).cloned()
}
