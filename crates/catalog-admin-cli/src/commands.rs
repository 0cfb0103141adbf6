//! Command execution.

use std::path::Path;

use anyhow::{bail, Context};
use serde::Serialize;
use serde_json::{Map, Value};

use catalog_admin_client::{
    ActivityFilter, AdminClient, ClientError, RubricScopedFilter, UploadFile,
};
use catalog_admin_core::DomainResolver;

use crate::cli::{Command, ImageCommand};

/// Run one command and print its result as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the command fails or its input cannot be read.
pub async fn run(client: &AdminClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let response = client.auth().login(&email, &password).await.map_err(describe)?;
            print_json(&response)
        }
        Command::Logout => {
            client.auth().logout().await;
            tracing::info!("Session token cleared");
            Ok(())
        }
        Command::Whoami => {
            let session = client.session();
            session.initialize().await;
            print_json(&session.snapshot())
        }
        Command::Refresh => match client.auth().refresh_token().await.map_err(describe)? {
            Some(response) => print_json(&response),
            None => bail!("Not logged in"),
        },
        Command::Resolve { host } => print_json(&DomainResolver::default().resolve(&host)),
        Command::Rubrics { trashed } => {
            let filter = ActivityFilter {
                trashed,
                ..ActivityFilter::default()
            };
            let rubrics = client.graphql().rubrics().list(&filter).await.map_err(describe)?;
            print_json(&rubrics)
        }
        Command::Categories {
            rubric_slug: Some(slug),
            ..
        } => {
            let found = client
                .graphql()
                .categories()
                .by_rubric_slug(&slug)
                .await
                .map_err(describe)?;
            print_json(&found)
        }
        Command::Categories {
            rubric_slug: None,
            trashed,
        } => {
            let filter = RubricScopedFilter {
                trashed,
                ..RubricScopedFilter::default()
            };
            let categories = client
                .graphql()
                .categories()
                .list(&filter)
                .await
                .map_err(describe)?;
            print_json(&categories)
        }
        Command::Query { file, vars } => {
            let document = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let variables = parse_variables(vars.as_deref())?;
            let data = client
                .graphql()
                .execute(&document, &variables)
                .await
                .map_err(describe)?;
            print_json(&data)
        }
        Command::Images(command) => run_images(client, command).await,
    }
}

async fn run_images(client: &AdminClient, command: ImageCommand) -> anyhow::Result<()> {
    let media = client.media();
    let result = match command {
        ImageCommand::List { owner_type, owner_id } => media.list(&owner_type, &owner_id).await,
        ImageCommand::Upload {
            owner_type,
            owner_id,
            files,
        } => {
            let uploads = load_files(&files).await?;
            media.upload(uploads, &owner_type, &owner_id).await
        }
        ImageCommand::Delete { id } => media.delete(&id).await,
        ImageCommand::Toggle { id } => media.toggle_active(&id).await,
    };

    print_json(&result.map_err(describe)?)
}

async fn load_files(paths: &[impl AsRef<Path>]) -> anyhow::Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let file = UploadFile::from_path(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}

/// `--vars` as a JSON object; absent means `{}`.
fn parse_variables(raw: Option<&str>) -> anyhow::Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Object(Map::new()));
    };

    let value: Value = serde_json::from_str(raw).context("--vars is not valid JSON")?;
    if !value.is_object() {
        bail!("--vars must be a JSON object");
    }
    Ok(value)
}

/// Attach the backend's field errors to the error message.
fn describe(error: ClientError) -> anyhow::Error {
    let fields = error.field_errors().map(|errors| {
        let mut lines: Vec<String> = errors
            .iter()
            .map(|(field, messages)| format!("  {field}: {}", messages.join(", ")))
            .collect();
        lines.sort();
        lines.join("\n")
    });

    match fields {
        Some(fields) if !fields.is_empty() => anyhow::anyhow!("{error}\n{fields}"),
        _ => anyhow::Error::new(error),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
