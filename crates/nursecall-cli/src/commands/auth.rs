use anyhow::Result;
use colored::Colorize;
use futures_util::future::join_all;

use crate::auth::{self, StoredCredentials};
use crate::cli::{LoginArgs, OutputFormat};
use crate::output::{print_list, print_success, print_warning};
use nursecall_client::ApiClient;
use nursecall_core::ResourceKind;

pub async fn login(server: &str, args: &LoginArgs, profile: &str) -> Result<()> {
    let token = auth::obtain_token(server, &args.username, &args.password).await?;
    auth::save_credentials(
        profile,
        &StoredCredentials {
            server: server.trim_end_matches('/').to_string(),
            access_token: token.access,
        },
    )?;
    print_success(&format!("Logged in to {server} (profile: {profile})"));
    Ok(())
}

pub fn logout(profile: &str) -> Result<()> {
    if auth::remove_credentials(profile)? {
        print_success(&format!("Logged out (profile: {profile})"));
    } else {
        println!("No stored credentials for profile {profile}.");
    }
    Ok(())
}

pub fn whoami(profile: &str) -> Result<()> {
    match auth::load_credentials(profile)? {
        Some(creds) => {
            println!("{}: {}", "Profile".cyan(), profile);
            println!("{}: {}", "Server".cyan(), creds.server);
            println!("{}: {}", "Token".cyan(), mask(&creds.access_token));
        }
        None => {
            println!("Not logged in (profile: {profile}).");
        }
    }
    Ok(())
}

fn mask(token: &str) -> String {
    let visible: String = token.chars().take(8).collect();
    format!("{visible}…")
}

/// Record counts across every collection, fetched concurrently. A failing
/// collection shows "-" instead of taking the whole overview down.
pub async fn overview(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let counts = join_all(ResourceKind::ALL.map(|kind| async move {
        (kind, client.list(kind).await.map(|records| records.len()))
    }))
    .await;

    let mut rows = Vec::new();
    let mut raw = serde_json::Map::new();
    for (kind, count) in counts {
        match count {
            Ok(count) => {
                rows.push(vec![kind.collection().to_string(), count.to_string()]);
                raw.insert(kind.collection().to_string(), count.into());
            }
            Err(err) => {
                if err.is_unauthorized() {
                    return Err(err.into());
                }
                print_warning(&format!("could not count {}: {err}", kind.collection()));
                rows.push(vec![kind.collection().to_string(), "-".to_string()]);
                raw.insert(kind.collection().to_string(), serde_json::Value::Null);
            }
        }
    }

    print_list(format, &["Collection", "Records"], rows, || {
        serde_json::Value::Object(raw)
    });
    Ok(())
}
