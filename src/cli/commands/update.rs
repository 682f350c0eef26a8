use crate::config::Config;
use crate::db::Store;
use crate::entities::show::{ShowStatus, default_notify_for};
use crate::models::show::ShowChanges;

pub async fn cmd_update_show(
    config: &Config,
    name: &str,
    new_name: Option<String>,
    last_watched: Option<i32>,
    rating: Option<f32>,
    notify: Option<bool>,
    status: Option<ShowStatus>,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(show) = store.get_show_by_name(name).await? else {
        anyhow::bail!("Show '{name}' not found. Use 'bingewatcher catalog' to see tracked shows.");
    };

    let mut changes = ShowChanges {
        name: new_name,
        last_watched,
        rating,
        notify,
        status,
    };

    // A status change implies a notify default unless the user overrode
    // the flag explicitly.
    if let (Some(status), None) = (changes.status, changes.notify) {
        changes.notify = Some(default_notify_for(status));
    }

    if changes.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    store.update_show(show.id, &changes).await?;

    if let Some(watched) = changes.last_watched {
        let pruned = store.prune_through(show.id, watched).await?;
        if pruned > 0 {
            println!("✓ Cleared {pruned} episodes watched through {watched}.");
        }
    }

    println!("✓ Updated: {}", changes.name.as_deref().unwrap_or(name));

    Ok(())
}
