use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use college_compass::{format, CatalogStore, ConversationStore, Engine, Role};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "stats" {
        // Statistics mode
        run_stats()
    } else {
        // Chat mode (default)
        run_chat()
    }
}

fn run_stats() -> Result<()> {
    let catalog = CatalogStore::with_defaults();

    println!("📊 Catalog Statistics");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    match catalog.statistics() {
        Some(stats) => {
            println!("Total institutions: {}", stats.total_institutions);
            println!(
                "Average acceptance rate: {:.1}%",
                stats.average_acceptance_rate
            );
            println!(
                "Average undergraduate tuition: {}",
                format::format_usd(stats.average_undergraduate_tuition as u32)
            );
            println!(
                "Ranking range: #{} - #{}",
                stats.ranking_min, stats.ranking_max
            );
            println!("\nBy category:");
            for (category, count) in &stats.by_category {
                println!("   • {}: {}", category, count);
            }
            println!("\nBy state:");
            for (state, count) in &stats.by_state {
                println!("   • {}: {}", state, count);
            }
        }
        None => println!("Catalog is empty."),
    }

    Ok(())
}

fn run_chat() -> Result<()> {
    let catalog = Arc::new(CatalogStore::with_defaults());
    let engine = Engine::new(catalog.clone());
    let conversations = ConversationStore::new();
    let conversation_id = conversations.begin();

    println!("{}", "=".repeat(60));
    println!("🎓 COLLEGE COMPASS");
    println!("{}", "=".repeat(60));
    println!("Available institutions:");
    for record in catalog.all() {
        println!("   • {} (#{})", record.name, record.ranking);
    }
    println!("{}", "=".repeat(60));
    println!("Ask about colleges, programs, admissions, or comparisons.");
    println!("Type 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("you> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();

        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            println!("Goodbye! Good luck with your college search!");
            break;
        }

        let history = conversations.history(&conversation_id);
        conversations.record(&conversation_id, Role::User, message);

        let reply = engine.handle(message, &history);
        let text = format::render(&reply);
        conversations.record(&conversation_id, Role::Bot, &text);

        println!("\n{}\n", text);
    }

    Ok(())
}
