//! Example: Reading a page with the navigation manager
//!
//! Walks a small page by group, drops into a table, and reads the rest
//! continuously. Run with `RUST_LOG=fos_nav=debug` to see the engine's log.

use fos_nav::{NavConfig, NavigationManager, QueueMode, SpeechQueue, WalkerKind};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"
    <h1>Quarterly report</h1>
    <p>Revenue grew. Costs stayed flat.</p>
    <table>
        <tr><th>Quarter</th><th>Revenue</th></tr>
        <tr><td>Q1</td><td>10</td></tr>
        <tr><td>Q2</td><td>12</td></tr>
    </table>
    <p>See the <a href="/appendix">appendix</a> for details.</p>
"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let doc = fos_html::parse(PAGE)?;
    let mut nav = NavigationManager::new(&doc, NavConfig::default());

    println!("== By {} ==", nav.granularity_msg());
    while nav.navigate(&doc) {
        for description in nav.get_description(&doc) {
            println!("  {}", description.spoken());
        }
        if nav.is_table_mode() {
            if let Some((row, col)) = nav.table_location(&doc) {
                println!("    (row {}, column {})", row + 1, col + 1);
            }
        }
    }

    println!("== By word ==");
    nav.sync_to_beginning(&doc);
    nav.set_granularity(&doc, WalkerKind::Word);
    for _ in 0..4 {
        nav.navigate(&doc);
        let words: Vec<String> = nav.get_description(&doc).iter().map(|d| d.spoken()).collect();
        println!("  {}", words.join(" "));
    }

    println!("== Continuous reading ==");
    nav.set_granularity(&doc, WalkerKind::Group);
    let mut speech = SpeechQueue::new(0);
    nav.start_reading(&doc, &mut speech, QueueMode::Flush);
    while nav.on_speech_complete(&doc, &mut speech) {
        speech.finish_all();
    }
    for line in speech.history_text() {
        println!("  {}", line);
    }

    Ok(())
}
