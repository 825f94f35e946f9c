use clap::{Args, ValueEnum};
use discounts_app::auth::{Permission, Permissions, PgAuthService, PrincipalKind};
use jiff::Timestamp;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum PrincipalKindArg {
    Staff,
    App,
    Customer,
}

impl From<PrincipalKindArg> for PrincipalKind {
    fn from(value: PrincipalKindArg) -> Self {
        match value {
            PrincipalKindArg::Staff => Self::Staff,
            PrincipalKindArg::App => Self::App,
            PrincipalKindArg::Customer => Self::Customer,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// Kind of caller the token authenticates
    #[arg(long, value_enum)]
    principal_kind: PrincipalKindArg,

    /// Staff user, app or customer UUID that should own the token
    #[arg(long)]
    principal_uuid: Uuid,

    /// Permission to grant; repeat for several (e.g. `manage_discounts`)
    #[arg(long = "permission")]
    permissions: Vec<String>,

    /// Optional token expiration timestamp (RFC 3339)
    #[arg(long)]
    expires_at: Option<String>,
}

pub(crate) async fn run(service: &PgAuthService, args: CreateTokenArgs) -> Result<(), String> {
    let expires_at = parse_expires_at(args.expires_at.as_deref())?;

    if let Some(expires_at) = expires_at.as_ref()
        && *expires_at <= Timestamp::now()
    {
        return Err("expires-at must be in the future".to_string());
    }

    let permissions = parse_permissions(&args.permissions)?;

    let issued = service
        .issue_api_token(
            args.principal_kind.into(),
            args.principal_uuid,
            permissions,
            expires_at,
        )
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("principal: {} {}", issued.metadata.principal_kind, issued.metadata.principal_uuid);
    println!("permissions: {}", join_permissions(&issued.metadata.permissions));
    println!("token_version: {}", issued.metadata.version.as_i16());
    println!("token_created_at: {}", issued.metadata.created_at);
    if let Some(expires_at) = issued.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}

pub(crate) fn join_permissions(permissions: &Permissions) -> String {
    if permissions.is_empty() {
        return "none".to_string();
    }

    permissions
        .iter()
        .map(|permission| permission.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_permissions(raw: &[String]) -> Result<Permissions, String> {
    let mut permissions = Permissions::new();

    for value in raw {
        let permission = value
            .parse::<Permission>()
            .map_err(|error| error.to_string())?;

        if !permissions.contains(&permission) {
            permissions.push(permission);
        }
    }

    Ok(permissions)
}

fn parse_expires_at(raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid expires-at timestamp: {error}"))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissions_are_parsed_and_deduplicated() {
        let parsed = parse_permissions(&[
            "manage_discounts".to_string(),
            "manage_discounts".to_string(),
        ]);

        assert_eq!(parsed.map(|p| p.into_vec()), Ok(vec![Permission::ManageDiscounts]));
    }

    #[test]
    fn unknown_permission_is_rejected() {
        assert!(parse_permissions(&["manage_orders".to_string()]).is_err());
    }

    #[test]
    fn expires_at_must_be_rfc3339() {
        assert!(parse_expires_at(Some("tomorrow")).is_err());
        assert!(matches!(parse_expires_at(Some("2030-01-01T00:00:00Z")), Ok(Some(_))));
        assert!(matches!(parse_expires_at(None), Ok(None)));
    }
}
