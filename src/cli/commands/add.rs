use crate::clients::imdb::{ImdbClient, parse_title_id};
use crate::clients::youtube::YoutubeClient;
use crate::config::Config;
use crate::db::Store;
use crate::entities::show::{ShowStatus, default_notify_for};
use crate::models::show::NewShow;
use crate::services::{Enricher, SyncService};

pub async fn cmd_add_show(
    config: &Config,
    name: &str,
    imdb_link: &str,
    status: ShowStatus,
    last_watched: Option<i32>,
    rating: Option<f32>,
    notify: Option<bool>,
) -> anyhow::Result<()> {
    let Some(external_id) = parse_title_id(imdb_link) else {
        anyhow::bail!("Invalid IMDb link for show.");
    };

    let feed = ImdbClient::new(&config.feed);

    let title = feed.get_title(&external_id).await?;
    if !title.is_series() {
        anyhow::bail!("'{name}' ({external_id}) is not a TV series.");
    }

    let notify = notify.unwrap_or_else(|| default_notify_for(status));

    let store = Store::new(&config.general.database_path).await?;
    let show = store
        .add_show(&NewShow {
            external_id,
            name: name.to_string(),
            imdb_link: imdb_link.to_string(),
            status,
            last_watched: last_watched.unwrap_or(0),
            rating: rating.unwrap_or(0.0),
            notify,
        })
        .await?;

    println!("✓ Added: {} (ID: {})", show.name, show.id);
    println!(
        "  Status: {} | Notify: {}",
        show.status.as_str(),
        if show.notify { "on" } else { "off" }
    );

    if show.notify {
        println!("Checking for released episodes...");

        let videos = YoutubeClient::from_config(&config.youtube)?;
        let service = SyncService::new(store, feed, Enricher::new(videos));

        match service.sync_show(&show).await {
            Ok(inserted) => println!("✓ Discovered {} new episodes.", inserted.len()),
            Err(e) => println!("⚠ Initial sync failed: {e}"),
        }
    }

    Ok(())
}
