use anyhow::Result;
use chrono::Local;

use haven::journal::summary::entry_summary;
use haven::service::{FeedSnapshot, Haven};

/// Print the day-grouped feed, loading up to `pages` pages.
pub async fn trace(haven: &Haven, type_name: Option<&str>, pages: usize) -> Result<()> {
    let feed = haven.feed();
    let mut snapshot = match type_name {
        Some(name) => {
            let entry_type = super::entry_type(haven, name).await?;
            feed.select_filter(Some(entry_type.id)).await?
        }
        None => feed.load_initial().await?,
    };

    for _ in 1..pages {
        if !snapshot.has_more {
            break;
        }
        match feed.load_more().await? {
            Some(next) => snapshot = next,
            None => break,
        }
    }

    print_snapshot(&snapshot);
    Ok(())
}

fn print_snapshot(snapshot: &FeedSnapshot) {
    let today = Local::now().date_naive();
    if snapshot.groups.is_empty() {
        println!("Nothing logged yet.");
        return;
    }

    for group in &snapshot.groups {
        println!("{}", group.label(today));
        for entry in &group.entries {
            let time = entry.timestamp.get(11..16).unwrap_or("--:--");
            println!("  {time}  {} {}", entry.icon().glyph(), entry_summary(entry));
            if let Some(notes) = &entry.notes {
                println!("         {notes}");
            }
        }
        println!();
    }

    if snapshot.has_more {
        println!("({} entries shown, more available)", snapshot.total_entries);
    } else {
        println!("({} entries)", snapshot.total_entries);
    }
}
