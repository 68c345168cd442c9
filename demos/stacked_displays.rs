//! Example showing stacked spinners cooperating with a progress bar

use banter::{logging, Console, Progress};
use std::thread;
use std::time::Duration;

fn main() -> Result<(), banter::Error> {
    let console = Console::new();

    // Pick the log level off the command line (`-v debug` to see the
    // verbose behavior) before any other argument handling.
    let mut args: Vec<String> = std::env::args().collect();
    logging::init(&console, &mut args)?;

    let sync = console.spinner("Syncing [info]three projects[/info]");
    for project in ["alpha", "beta", "gamma"] {
        // Each step gets its own spinner; the outer one waits underneath.
        let fetch = console.spinner(&format!("Fetching {project}"));
        thread::sleep(Duration::from_millis(600));
        log::info!("{project} manifest fetched");
        drop(fetch);

        // The download bar pauses the spinner stack while it runs.
        let bar = Progress::new(&console, true);
        bar.set_description(project);
        bar.start();
        bar.set_length(256_000);
        for _ in 0..8 {
            bar.inc(32_000);
            thread::sleep(Duration::from_millis(150));
        }
        bar.stop();
        log::info!("{project} downloaded");
    }
    drop(sync);
    log::info!("All projects synced");

    Ok(())
}
