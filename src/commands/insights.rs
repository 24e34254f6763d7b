use crate::export::write_emails;
use crate::state::AppState;
use crate::types::OpaqueResult;
use crate::view::text::{render_dashboard, render_map};
use crate::view::{dashboard, map_view};
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Clone, Debug, Subcommand)]
pub enum EnrichTarget {
    /// Re-run enrichment for a saved contact
    Contact { id: i64 },
    /// Look up an email address
    Email { email: String },
    /// Look up a phone number
    Phone { phone: String },
}

pub(super) async fn show_dashboard(state: &AppState) -> anyhow::Result<String> {
    let (stats, recent) = tokio::try_join!(state.api.stats(), state.api.recent_contacts())?;
    Ok(render_dashboard(&dashboard(stats, &recent.contacts)))
}

pub(super) async fn tags(state: &AppState) -> anyhow::Result<String> {
    let tags = state.api.tags().await?;
    if tags.is_empty() {
        return Ok("No tags yet".to_string());
    }
    Ok(tags.join("\n"))
}

pub(super) async fn map(state: &AppState) -> anyhow::Result<String> {
    let res = state.api.map_markers().await?;
    Ok(render_map(&map_view(&res.markers)))
}

pub(super) async fn export_emails(state: &AppState, out: Option<PathBuf>) -> anyhow::Result<String> {
    let res = state.api.export_emails().await?;
    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    let path = write_emails(&dir, &res.emails)?;
    Ok(format!(
        "{} email address(es) exported to {}",
        res.emails.len(),
        path.display()
    ))
}

fn render_opaque(res: OpaqueResult) -> anyhow::Result<String> {
    let body = serde_json::to_string_pretty(&res.payload)?;
    Ok(match res.message {
        Some(message) => format!("{message}\n{body}"),
        None => body,
    })
}

pub(super) async fn enrich(state: &AppState, target: EnrichTarget) -> anyhow::Result<String> {
    let res = match target {
        EnrichTarget::Contact { id } => state.api.enrich_contact(id).await?,
        EnrichTarget::Email { email } => state.api.enrich_email(&email).await?,
        EnrichTarget::Phone { phone } => state.api.enrich_phone(&phone).await?,
    };
    render_opaque(res)
}

pub(super) async fn nearby(
    state: &AppState,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
) -> anyhow::Result<String> {
    anyhow::ensure!(
        (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude),
        "coordinates out of range"
    );
    anyhow::ensure!(radius_km > 0.0, "radius must be positive");
    render_opaque(state.api.proximity(latitude, longitude, radius_km).await?)
}
