//! Sortscope playback server
//!
//! Serve the playback API and the draw-command stream.

use sortscope_vis::VisServer;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();

    let port: u16 = args.get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);

    println!("Sortscope");
    println!("=========");
    println!();
    println!("Playback controls on http://localhost:{}/api", port);
    println!("Draw-command stream on ws://localhost:{}/ws", port);
    println!();
    println!("POST /api/run with five value fields and one of:");
    println!("  bubble, selection, insertion, merge, quick, heap");
    println!();

    let server = VisServer::new();
    server.serve(port).await?;

    Ok(())
}
