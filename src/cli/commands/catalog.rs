use crate::config::Config;
use crate::db::Store;

pub async fn cmd_catalog(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let shows = store.list_shows().await?;

    if shows.is_empty() {
        println!("No shows tracked.");
        println!();
        println!("Add one with: bingewatcher add \"Show Name\" <imdb-link>");
        return Ok(());
    }

    println!("Tracked Shows ({} total)", shows.len());
    println!("{:-<70}", "");

    for show in shows {
        let notify = if show.notify { "on" } else { "off" };

        println!("{} [{}]", show.name, show.status.as_str());
        println!(
            "  ID: {} | Watched: {}/{} | Rating: {} | Notify: {}",
            show.id, show.last_watched, show.latest_episode, show.rating, notify
        );
    }

    Ok(())
}
