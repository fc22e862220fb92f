//! Application inventory command handlers.

use casaos_core::{
    ApplicationRecord, CancellationToken, InventoryFetcher, ProcessEnv, index_by_id,
};
use tabled::Tabled;

use crate::cli::{AppsArgs, AppsCommand, GlobalOpts};
use crate::error::CliError;
use crate::{config, output};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AppRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Image")]
    image: String,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Managed")]
    managed: &'static str,
}

impl From<&ApplicationRecord> for AppRow {
    fn from(r: &ApplicationRecord) -> Self {
        Self {
            id: r.store_app_id.clone(),
            title: r.display_title().to_owned(),
            status: r.status.clone(),
            image: r.image.clone(),
            endpoint: endpoint(r),
            managed: if r.is_uncontrolled { "no" } else { "yes" },
        }
    }
}

/// `scheme://hostname:port/index`, with the empty parts dropped.
fn endpoint(r: &ApplicationRecord) -> String {
    if r.hostname.is_empty() && r.port.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    if !r.scheme.is_empty() {
        out.push_str(&r.scheme);
        out.push_str("://");
    }
    out.push_str(&r.hostname);
    if !r.port.is_empty() {
        out.push(':');
        out.push_str(&r.port);
    }
    if r.index != "/" {
        out.push_str(&r.index);
    }
    out
}

fn detail(r: &ApplicationRecord) -> String {
    let mut lines = vec![
        format!("ID:          {}", r.store_app_id),
        format!("Title:       {}", r.display_title()),
        format!("Status:      {}", r.status),
        format!("App type:    {}", r.app_type),
        format!("Author type: {}", r.author_type),
        format!("Image:       {}", r.image),
        format!("Endpoint:    {}", endpoint(r)),
        format!("Icon:        {}", r.icon),
        format!("Managed:     {}", if r.is_uncontrolled { "no" } else { "yes" }),
    ];
    for t in &r.titles {
        lines.push(format!("Title:       custom={:?} en_us={:?}", t.custom, t.en_us));
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    args: AppsArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let (input, options) = config::build_fetch(global)?;
    let records = InventoryFetcher::new(options)
        .fetch_applications_with_cancel(&input, &ProcessEnv, cancel)
        .await?;

    let out = match args.command.unwrap_or(AppsCommand::List) {
        AppsCommand::List => output::render_list(
            &global.output,
            &records,
            |r| AppRow::from(r),
            |r| r.store_app_id.clone(),
        )?,
        AppsCommand::Get { id } => {
            let index = index_by_id(&records);
            let record = index
                .get(id.as_str())
                .ok_or_else(|| CliError::NotFound { id: id.clone() })?;
            output::render_single(&global.output, *record, detail, |r| {
                r.store_app_id.clone()
            })?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
