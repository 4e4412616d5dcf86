use crate::auth::{generate_jwt, Claims};
use crate::config::config;

pub fn handle(username: &str, admin: bool) -> anyhow::Result<()> {
    let claims = Claims::with_expiry(username, admin, config().security.jwt_expiry_hours);
    let token = generate_jwt(&claims)?;

    println!("{}", token);
    Ok(())
}
