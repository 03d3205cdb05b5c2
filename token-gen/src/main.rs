use clap::Parser;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

/// Mint an HS256 bearer token accepted by thread-api when it runs with `ACCESS_JWT_SECRET`.
///
/// Development only: production deployments verify EdDSA tokens issued by the
/// authorization server (`ACCESS_JWT_PUBLIC_KEY_PEM`).
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject (user id). Default: random UUID v4.
    #[arg(long)]
    sub: Option<Uuid>,

    /// Shared secret; must match the server's ACCESS_JWT_SECRET
    #[arg(long, env = "ACCESS_JWT_SECRET", hide_env_values = true)]
    secret: String,

    #[arg(long, env = "AUTH_ISSUER")]
    issuer: String,

    #[arg(long, env = "AUTH_AUDIENCE")]
    audience: String,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl: i64,

    /// Space-separated scopes to embed in `scope`
    #[arg(long)]
    scope: Option<String>,

    /// Print only the token (no extra lines)
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

#[derive(Debug, Serialize)]
struct Claims {
    iss: String,
    aud: String,
    sub: String,
    exp: i64,
    iat: i64,
    jti: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.ttl <= 0 {
        return Err("--ttl must be positive".into());
    }

    let sub = args.sub.unwrap_or_else(Uuid::new_v4);
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        iss: args.issuer,
        aud: args.audience,
        sub: sub.to_string(),
        exp: iat + args.ttl,
        iat,
        jti: Uuid::new_v4().to_string(),
        scope: args.scope,
    };

    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());
    let token = jsonwebtoken::encode(
        &header,
        &claims,
        &EncodingKey::from_secret(args.secret.as_bytes()),
    )?;

    if args.quiet {
        println!("{}", token);
        return Ok(());
    }

    println!("Authorization: Bearer {}", token);
    println!("sub: {}", sub);
    println!("exp: {}", claims.exp);
    println!("jti: {}", claims.jti);

    Ok(())
}
