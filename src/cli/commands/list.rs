use super::sync_service;
use crate::config::Config;

/// Refresh-then-serve: run a full sync pass, then print what's pending.
pub async fn cmd_list_episodes(config: &Config) -> anyhow::Result<()> {
    let (store, service) = sync_service(config).await?;

    let stats = service.sync_all().await?;

    let shows = store.list_notify_enabled().await?;
    let mut total = 0;

    for show in &shows {
        let episodes = store.pending_for_show(show.id).await?;
        if episodes.is_empty() {
            continue;
        }

        println!("For {}:", show.name);
        for episode in episodes {
            total += 1;
            println!(
                "  Ep {}: {} (rating {})",
                episode.number, episode.title, episode.rating
            );

            if let Some(link) = &episode.video_link {
                let label = if episode.has_trailer { "Trailer" } else { "Related" };
                let video_title = episode.video_title.as_deref().unwrap_or("");
                println!("    {label}: {video_title} ({link})");
            }
        }
        println!();
    }

    if total == 0 {
        println!("No new episodes. You're all caught up.");
    }

    if stats.failed_shows > 0 {
        println!("⚠ {} shows failed to sync; see logs.", stats.failed_shows);
    }

    Ok(())
}
