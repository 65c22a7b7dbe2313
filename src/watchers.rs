use std::path::Path;
use std::sync::mpsc::{Receiver, channel};
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

// Editors tend to emit bursts of events per save.
const SETTLE: Duration = Duration::from_millis(150);

/// Watches one file; every modify/create/remove sends a unit on the channel.
/// The watcher stops when the returned handle is dropped.
pub fn watch_file(path: &Path) -> notify::Result<(RecommendedWatcher, Receiver<()>)> {
    let (tx, rx) = channel::<()>();
    let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        match res {
            Ok(event) => match event.kind {
                EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) | EventKind::Any => {
                    let _ = tx.send(());
                }
                _ => {}
            },
            Err(e) => log::warn!("watch error: {}", e),
        }
    })?;
    watcher.watch(path, RecursiveMode::NonRecursive)?;
    Ok((watcher, rx))
}

/// Blocks until the next change, then swallows the rest of the burst.
/// Returns false once the watcher has gone away.
pub fn wait_for_change(rx: &Receiver<()>) -> bool {
    if rx.recv().is_err() {
        return false;
    }
    std::thread::sleep(SETTLE);
    while rx.try_recv().is_ok() {}
    true
}
