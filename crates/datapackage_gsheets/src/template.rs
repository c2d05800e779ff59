//! The "build Google Sheets template" operation.

use crate::{GoogleConfig, HttpSheetsClient, Result, SheetsClient, SheetsError, template_requests};
use datapackage_core::{Package, ProjectConfig};
use datapackage_render::{render_header_comments, template_layout};
use tracing::info;

/// Builds a Google Sheets template named `name` and returns its URL.
///
/// The service-account key is checked before any client is created, so a
/// missing credential fails without touching the network.
pub async fn build_gsheets_template(
    name: &str,
    package: &Package,
    project: &ProjectConfig,
    google: &GoogleConfig,
) -> Result<String> {
    let key = google.service_account_key()?;
    let client = HttpSheetsClient::connect(&key).await?;
    write_gsheets_template(&client, name, package, project, google.share_with.as_deref()).await
}

/// Builds the template through any [`SheetsClient`].
///
/// Fails with [`SheetsError::AlreadyExists`] when a spreadsheet with the same
/// name is visible, leaving it untouched. Otherwise creates the spreadsheet,
/// shares it with `share_with` (writer role) when given, and writes one sheet
/// per resource.
pub async fn write_gsheets_template<C: SheetsClient + ?Sized>(
    client: &C,
    name: &str,
    package: &Package,
    project: &ProjectConfig,
    share_with: Option<&str>,
) -> Result<String> {
    if client.find_spreadsheet(name).await?.is_some() {
        return Err(SheetsError::AlreadyExists(name.to_string()));
    }

    let comments = render_header_comments(package, &project.header_comment_template())?;
    let sheets = template_layout(package, &comments);

    let spreadsheet = client.create_spreadsheet(name).await?;
    if let Some(account) = share_with {
        client.share(&spreadsheet.id, account).await?;
    }

    client
        .batch_update(
            &spreadsheet.id,
            template_requests(&sheets, spreadsheet.default_sheet_id),
        )
        .await?;

    let url = spreadsheet.url();
    info!("Wrote Google Sheets template {}", url);
    Ok(url)
}
