use std::sync::Arc;

use fyyur_client::{Navigator, VenueDeleter, config::Config, http_client::ReqwestTransport};

struct PrintLocation;

impl Navigator for PrintLocation {
    fn navigate(&self, url: &str) {
        println!("location: {url}");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Example: expects a Fyyur site at FYYUR_BASE_URL (default http://localhost:5000)
    let venue_id = std::env::args().nth(1).unwrap_or_else(|| "1".into());
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(());
        }
    };
    let transport = ReqwestTransport::from_config(&cfg)?;
    let deleter = VenueDeleter::new(Arc::new(transport), Arc::new(PrintLocation));
    let outcome = deleter.delete_venue(&venue_id).await;
    println!("venue {venue_id}: {outcome:?}");
    Ok(())
}
