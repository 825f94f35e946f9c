use clap::Args;
use discounts_app::auth::PgAuthService;
use uuid::Uuid;

use super::create::join_permissions;

#[derive(Debug, Args)]
pub(crate) struct ListTokensArgs {
    /// Principal UUID whose tokens should be listed
    #[arg(long)]
    principal_uuid: Uuid,
}

pub(crate) async fn run(service: &PgAuthService, args: ListTokensArgs) -> Result<(), String> {
    let tokens = service
        .list_api_tokens(args.principal_uuid)
        .await
        .map_err(|error| format!("failed to list tokens: {error}"))?;

    if tokens.is_empty() {
        println!("no tokens found for principal {}", args.principal_uuid);
        return Ok(());
    }

    for token in tokens {
        println!("token_uuid: {}", token.uuid);
        println!("principal: {} {}", token.principal_kind, token.principal_uuid);
        println!("permissions: {}", join_permissions(&token.permissions));
        println!("token_version: {}", token.version.as_i16());
        println!("created_at: {}", token.created_at);
        println!(
            "last_used_at: {}",
            token
                .last_used_at
                .map_or_else(|| "never".to_string(), |value| value.to_string())
        );
        println!(
            "expires_at: {}",
            token
                .expires_at
                .map_or_else(|| "none".to_string(), |value| value.to_string())
        );
        println!(
            "revoked_at: {}",
            token
                .revoked_at
                .map_or_else(|| "active".to_string(), |value| value.to_string())
        );
        println!();
    }

    Ok(())
}
