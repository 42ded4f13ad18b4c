//! Interactive console session against the real OpenAI and Nominatim
//! collaborators (in-memory store, mock device/identity).
//!
//! Run with `OPENAI_API_KEY` set:
//!
//! ```sh
//! cargo run --example repl
//! ```

use std::io::{BufRead, Write};
use std::sync::Arc;

use vigil::ai::OpenAi;
use vigil::geo::NominatimGeocoder;
use vigil::session::{DialogueSession, Vigil};
use vigil::stores::MemoryStore;
use vigil::testing::{MockDeviceLocator, MockIdentity};

#[tokio::main]
async fn main() -> vigil::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vigil=debug".into()),
        )
        .init();

    let vigil = Vigil::new(
        Arc::new(MemoryStore::new()),
        Arc::new(OpenAi::from_env()?),
        Arc::new(NominatimGeocoder::new()),
        // Fixed position in central Pretoria; no real GPS on a console
        Arc::new(MockDeviceLocator::granted_at(-25.7461, 28.1881)),
        Arc::new(MockIdentity::anonymous()),
    );

    let mut session = DialogueSession::new();
    println!("{}", session.messages[0].content);

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush().ok();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() || input == "quit" || input == "exit" {
            break;
        }
        let reply = vigil.handle_turn(&mut session, input).await;
        println!("{reply}\n");
    }
    Ok(())
}
